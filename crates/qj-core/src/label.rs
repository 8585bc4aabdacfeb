//! Label alphabet and allocation.
//!
//! Labels are single characters taken from an ordered [`Alphabet`]. The
//! order matters twice: it decides which targets get the "easy" keys, and
//! it is the set of keys the user may type at a prompt.
//!
//! # Tiers
//!
//! | Tier    | Label of target `i`         | Labels unique? | Capacity |
//! |---------|-----------------------------|----------------|----------|
//! | `Block` | `alphabet[i / len]`         | no (groups)    | `len²`   |
//! | `Word`  | `alphabet[i]`               | yes            | `len`    |
//!
//! # Overflow
//!
//! Allocation is capped: an index past the end of the alphabet gets no
//! label at all ([`Alphabet::label_for`] returns `None`) and the caller drops
//! that target. Since targets are allocated in scan order, the dropped ones
//! are always the last ones on screen.

use std::fmt;

use crate::error::ConfigError;

/// The label set used when nothing is configured.
pub const DEFAULT_ALPHABET: &str = "hklyuiopnm,qwertzxcvbasdgjf;0123456789/";

// ---------------------------------------------------------------------------
// Tier
// ---------------------------------------------------------------------------

/// Which selection step a label belongs to. Hosts use it as the colour role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Coarse, many-to-one labels shown first.
    Block,
    /// Fine, one-to-one labels for the members of one block.
    Word,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block => f.write_str("block"),
            Self::Word => f.write_str("word"),
        }
    }
}

// ---------------------------------------------------------------------------
// Alphabet
// ---------------------------------------------------------------------------

/// An ordered, non-empty, duplicate-free set of label characters.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    /// Build an alphabet from the chars of `source`, in order.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyAlphabet`] for an empty string,
    /// [`ConfigError::DuplicateLabel`] when a char appears twice.
    pub fn new(source: &str) -> Result<Self, ConfigError> {
        let mut chars: Vec<char> = Vec::with_capacity(source.len());
        for ch in source.chars() {
            if chars.contains(&ch) {
                return Err(ConfigError::DuplicateLabel { ch });
            }
            chars.push(ch);
        }
        if chars.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        Ok(Self { chars })
    }

    /// Number of labels. Never zero.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false; present for API symmetry with `len`.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// True when the user may type `ch` at a prompt.
    #[inline]
    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    /// The label for the `index`-th allocation, or `None` past the end.
    #[inline]
    #[must_use]
    pub fn label_for(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// The label for the `counter`-th target of the block tier: every run of
    /// `len` consecutive targets shares one label.
    #[inline]
    #[must_use]
    pub fn block_label_for(&self, counter: usize) -> Option<char> {
        self.label_for(counter / self.len())
    }

    /// How many targets a tier can label before the cap drops the rest.
    #[must_use]
    pub fn capacity(&self, tier: Tier) -> usize {
        match tier {
            Tier::Block => self.len().saturating_mul(self.len()),
            Tier::Word => self.len(),
        }
    }

    /// The label characters in order.
    #[must_use]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self {
            chars: DEFAULT_ALPHABET.chars().collect(),
        }
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: String = self.chars.iter().collect();
        write!(f, "Alphabet({s:?})")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_alphabet_is_valid() {
        let parsed = Alphabet::new(DEFAULT_ALPHABET).unwrap();
        assert_eq!(parsed, Alphabet::default());
        assert_eq!(parsed.len(), 39);
        assert_eq!(parsed.label_for(0), Some('h'));
        assert_eq!(parsed.label_for(38), Some('/'));
        assert_eq!(parsed.label_for(39), None);
    }

    #[test]
    fn empty_alphabet_rejected() {
        assert!(matches!(Alphabet::new(""), Err(ConfigError::EmptyAlphabet)));
    }

    #[test]
    fn duplicate_char_rejected() {
        let err = Alphabet::new("abca").unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateLabel { ch: 'a' }));
    }

    #[test]
    fn contains_only_alphabet_chars() {
        let a = Alphabet::new("ab").unwrap();
        assert!(a.contains('a'));
        assert!(a.contains('b'));
        assert!(!a.contains('c'));
        assert!(!a.contains('A'));
    }

    // ── Word tier boundary ────────────────────────────────────────────────

    #[test]
    fn label_for_distinct_up_to_len() {
        let a = Alphabet::new("xyz").unwrap();
        let labels: Vec<_> = (0..a.len()).map(|i| a.label_for(i)).collect();
        assert_eq!(labels, vec![Some('x'), Some('y'), Some('z')]);
    }

    #[test]
    fn label_for_caps_at_len() {
        let a = Alphabet::new("xyz").unwrap();
        assert_eq!(a.label_for(a.len()), None);
        assert_eq!(a.label_for(usize::MAX), None);
    }

    // ── Block tier ────────────────────────────────────────────────────────

    #[test]
    fn block_labels_group_by_alphabet_len() {
        let a = Alphabet::new("ab").unwrap();
        let labels: Vec<_> = (0..4).map(|i| a.block_label_for(i)).collect();
        assert_eq!(labels, vec![Some('a'), Some('a'), Some('b'), Some('b')]);
    }

    #[test]
    fn block_labels_cap_at_len_squared() {
        let a = Alphabet::new("ab").unwrap();
        assert_eq!(a.capacity(Tier::Block), 4);
        assert_eq!(a.block_label_for(3), Some('b'));
        assert_eq!(a.block_label_for(4), None);
    }

    #[test]
    fn word_capacity_is_len() {
        assert_eq!(Alphabet::default().capacity(Tier::Word), 39);
    }

    #[test]
    fn tier_display() {
        assert_eq!(Tier::Block.to_string(), "block");
        assert_eq!(Tier::Word.to_string(), "word");
    }

    #[test]
    fn debug_shows_chars() {
        assert_eq!(format!("{:?}", Alphabet::new("ab;").unwrap()), "Alphabet(\"ab;\")");
    }
}
