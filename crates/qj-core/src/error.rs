//! Error types.
//!
//! Only configuration problems are errors in the usual sense: they stop the
//! jump command from running at all. Everything that can go wrong during a
//! single jump (nothing to label, a wrong key, a pane that vanished) is a
//! normal outcome and is reported as a value, see [`crate::jump::Outcome`].

use thiserror::Error;

use crate::position::PaneId;

/// The configuration cannot be turned into a usable [`crate::JumpConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("label alphabet is empty")]
    EmptyAlphabet,

    #[error("label alphabet repeats {ch:?} (labels must be unique)")]
    DuplicateLabel { ch: char },

    #[error("target pattern {source_text:?} does not compile: {source}")]
    Pattern {
        source_text: String,
        source: fancy_regex::Error,
    },

    #[error("max_columns must be positive, got {value}")]
    MaxColumns { value: i64 },
}

/// A host request failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The pane was closed between scanning and the request.
    #[error("{0} no longer exists")]
    PaneGone(PaneId),

    /// No pane is bound to this focus ordinal.
    #[error("no pane at focus ordinal {0}")]
    NoSuchOrdinal(usize),

    /// The host could not draw the marker.
    #[error("render failed: {0}")]
    Render(String),
}
