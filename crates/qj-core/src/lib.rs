//! # qj-core: two-keystroke cursor jumps
//!
//! Every jump-worthy spot in the visible text gets a coloured label. The
//! first keystroke picks a block of targets, the second picks one target
//! inside it, and the cursor moves there, across panes if needed.
//!
//! - **[`position`]**: `Position`, `LineSpan` and `PaneId`, all 0-indexed
//! - **[`pattern`]**: the regex that decides which chars are targets
//! - **[`label`]**: `Alphabet` and label assignment per tier
//! - **[`config`]**: validated `JumpConfig`
//! - **[`host`]**: the traits an editor implements to host jumps
//! - **[`anchor`]**: block and word anchor indexes
//! - **[`session`]**: markers of one jump and their teardown
//! - **[`resolver`]**: the keystroke state machine
//! - **[`navigator`]**: focus and cursor placement
//! - **[`jump`]**: all of the above in one call

pub mod anchor;
pub mod config;
pub mod error;
pub mod host;
pub mod jump;
pub mod label;
pub mod navigator;
pub mod pattern;
pub mod position;
pub mod resolver;
pub mod session;

#[cfg(test)]
mod testing;

pub use anchor::{Anchor, AnchorIndex};
pub use config::{DEFAULT_MAX_COLUMNS, JumpConfig};
pub use error::{ConfigError, HostError};
pub use host::{Host, LineSource, Overlay, PaneInfo};
pub use jump::{Outcome, jump};
pub use label::{Alphabet, DEFAULT_ALPHABET, Tier};
pub use navigator::{Navigation, Target, navigate};
pub use pattern::{DEFAULT_PATTERN, TargetPattern};
pub use position::{LineSpan, PaneId, Position};
pub use resolver::{CancelReason, Resolver, State};
pub use session::Session;
