//! Target pattern: which characters of a line deserve a label.
//!
//! A [`TargetPattern`] wraps a compiled regular expression and turns its
//! matches on one line into char offsets. The default pattern picks word
//! starts and ends plus the sub-word boundaries of `snake_case` and
//! `camelCase` identifiers:
//!
//! | Alternative                | Labels                                     |
//! |----------------------------|--------------------------------------------|
//! | `\b\w`                     | first char of a word                       |
//! | `\w\b`                     | last char of a word                        |
//! | `\w(?=_)`                  | char right before an underscore            |
//! | `(?<=_)\w`                 | char right after an underscore             |
//! | `(?<=[\p{Ll}\d])\p{Lu}`    | uppercase letter after a lowercase / digit |
//!
//! Look-around keeps every alternative one char wide, so each match starts
//! on the char it labels and alternatives that hit the same char cannot
//! hide one another.
//!
//! # Target offset
//!
//! The target is the start of the first capture group that took part in the
//! match, or the match start when none did. A pattern without groups labels
//! its match starts; `_(\w)` labels the char after the underscore.
//!
//! # Overlapping matches
//!
//! After each match the search restarts one char past the match *start*, not
//! past its end, so matches may overlap. Look-behind still sees the text
//! before the restart point. An offset hit by several matches is reported
//! once.

use std::collections::BTreeSet;

use fancy_regex::Regex;
use log::warn;

use crate::error::ConfigError;

/// Source of the default target pattern.
pub const DEFAULT_PATTERN: &str = r"\b\w|\w\b|\w(?=_)|(?<=_)\w|(?<=[\p{Ll}\d])\p{Lu}";

/// A compiled target pattern.
#[derive(Debug, Clone)]
pub struct TargetPattern {
    regex: Regex,
}

impl TargetPattern {
    /// Compile a pattern from its source text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pattern`] when the source is not a valid regex.
    pub fn new(source: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(source).map_err(|source_err| ConfigError::Pattern {
            source_text: source.to_string(),
            source: source_err,
        })?;
        Ok(Self { regex })
    }

    /// The pattern source, as written in the configuration.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Char offsets of all targets in `line`, looking only at its first
    /// `max_columns` chars.
    ///
    /// The result is strictly ascending, and every offset is below both the
    /// line's char count and `max_columns`.
    #[must_use]
    pub fn find_targets(&self, line: &str, max_columns: usize) -> Vec<usize> {
        let text = truncate_chars(line, max_columns);
        let mut targets = BTreeSet::new();

        let mut from = 0;
        while from < text.len() {
            let caps = match self.regex.captures_from_pos(text, from) {
                Ok(Some(caps)) => caps,
                Ok(None) => break,
                Err(err) => {
                    warn!("target search stopped at byte {from}: {err}");
                    break;
                }
            };
            let Some(whole) = caps.get(0) else {
                break;
            };

            let target = caps
                .iter()
                .skip(1)
                .flatten()
                .next()
                .map_or(whole.start(), |group| group.start());
            // Zero-width matches at the end of the text label nothing.
            if target < text.len() {
                targets.insert(char_offset(text, target));
            }

            // Restart one char after the match start so overlaps are found.
            match text[whole.start()..].chars().next() {
                Some(ch) => from = whole.start() + ch.len_utf8(),
                None => break,
            }
        }

        targets.into_iter().collect()
    }
}

impl Default for TargetPattern {
    fn default() -> Self {
        Self {
            regex: Regex::new(DEFAULT_PATTERN).expect("DEFAULT_PATTERN is a valid regex"),
        }
    }
}

/// The prefix of `line` holding at most `max_chars` chars.
fn truncate_chars(line: &str, max_chars: usize) -> &str {
    match line.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &line[..byte_idx],
        None => line,
    }
}

/// Convert a byte index (on a char boundary) to a char offset.
fn char_offset(text: &str, byte_idx: usize) -> usize {
    text[..byte_idx].chars().count()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
