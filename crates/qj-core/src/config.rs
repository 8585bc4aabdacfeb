//! Validated jump configuration.
//!
//! A [`JumpConfig`] can only be built from values that make a jump possible,
//! so the scanning and selection code never re-checks them. Build one per
//! invocation; the compiled pattern lives exactly as long as the config.

use crate::error::ConfigError;
use crate::label::Alphabet;
use crate::pattern::TargetPattern;

/// Default number of columns scanned per line.
pub const DEFAULT_MAX_COLUMNS: usize = 500;

/// Everything the core needs to run one jump.
#[derive(Debug, Clone)]
pub struct JumpConfig {
    pub alphabet: Alphabet,
    pub pattern: TargetPattern,
    /// Only the first `max_columns` chars of each line are scanned.
    pub max_columns: usize,
    /// Land one column before the chosen target instead of on it.
    pub jump_before_anchor: bool,
}

impl JumpConfig {
    /// Validate raw settings.
    ///
    /// `max_columns` is signed so values read from a settings file can be
    /// rejected here rather than wrapping.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`]: empty or repeating alphabet, a pattern that does
    /// not compile, or a non-positive column budget.
    pub fn new(
        alphabet: &str,
        pattern: &str,
        max_columns: i64,
        jump_before_anchor: bool,
    ) -> Result<Self, ConfigError> {
        let alphabet = Alphabet::new(alphabet)?;
        let pattern = TargetPattern::new(pattern)?;
        let max_columns = usize::try_from(max_columns)
            .ok()
            .filter(|&n| n > 0)
            .ok_or(ConfigError::MaxColumns { value: max_columns })?;
        Ok(Self {
            alphabet,
            pattern,
            max_columns,
            jump_before_anchor,
        })
    }
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::default(),
            pattern: TargetPattern::default(),
            max_columns: DEFAULT_MAX_COLUMNS,
            jump_before_anchor: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::DEFAULT_ALPHABET;
    use crate::pattern::DEFAULT_PATTERN;

    #[test]
    fn defaults_validate() {
        let cfg = JumpConfig::new(DEFAULT_ALPHABET, DEFAULT_PATTERN, 500, false).unwrap();
        assert_eq!(cfg.alphabet, Alphabet::default());
        assert_eq!(cfg.max_columns, DEFAULT_MAX_COLUMNS);
        assert!(!cfg.jump_before_anchor);
    }

    #[test]
    fn zero_or_negative_columns_rejected() {
        for value in [0, -1, i64::MIN] {
            let err = JumpConfig::new("ab", DEFAULT_PATTERN, value, false).unwrap_err();
            assert!(matches!(err, ConfigError::MaxColumns { value: v } if v == value));
        }
    }

    #[test]
    fn bad_pattern_rejected() {
        let err = JumpConfig::new("ab", "[", 10, false).unwrap_err();
        assert!(matches!(err, ConfigError::Pattern { .. }));
    }

    #[test]
    fn empty_alphabet_rejected() {
        let err = JumpConfig::new("", DEFAULT_PATTERN, 10, false).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyAlphabet));
    }
}
