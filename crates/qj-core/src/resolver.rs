//! Selection resolver: the two-keystroke state machine.
//!
//! ```text
//!            start                 input(block)             input(word)
//!   Idle ───────────▶ AwaitingBlockInput ─────▶ AwaitingWordInput ─────▶ Resolved
//!     │                      │                          │
//!     └── no targets ────────┴── bad / empty input ─────┴──────────────▶ Cancelled
//! ```
//!
//! The resolver never blocks. A host with its own event loop calls
//! [`Resolver::start`] from the jump command, then feeds each keystroke to
//! [`Resolver::input`] while [`State::prompt`] says input is expected. Hosts
//! with a blocking prompt can use [`crate::jump::jump`] instead.
//!
//! Entering `Resolved` or `Cancelled` always tears the session down first, so
//! nothing stays on screen past the end of a jump.

use log::{debug, warn};

use crate::config::JumpConfig;
use crate::error::HostError;
use crate::host::{Host, Overlay};
use crate::navigator::Target;
use crate::session::Session;

/// Prompt shown while waiting for a block label.
pub const BLOCK_PROMPT: &str = "jump: block?";

/// Prompt shown while waiting for a word label.
pub const WORD_PROMPT: &str = "jump: word?";

/// Why a jump ended without a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// Nothing in the visible text matched the pattern.
    NoTargets,
    /// The typed char is not a label of the current tier.
    InvalidSelection,
    /// The prompt was dismissed or answered with nothing.
    Aborted,
    /// The host failed to draw a marker.
    RenderFailed,
}

/// Where the resolver stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    AwaitingBlockInput,
    AwaitingWordInput,
    Resolved(Target),
    Cancelled(CancelReason),
}

impl State {
    /// True while a keystroke is expected.
    #[inline]
    #[must_use]
    pub const fn is_awaiting(self) -> bool {
        matches!(self, Self::AwaitingBlockInput | Self::AwaitingWordInput)
    }

    /// The prompt to show in this state, if input is expected.
    #[must_use]
    pub const fn prompt(self) -> Option<&'static str> {
        match self {
            Self::AwaitingBlockInput => Some(BLOCK_PROMPT),
            Self::AwaitingWordInput => Some(WORD_PROMPT),
            _ => None,
        }
    }
}

/// Drives one jump at a time from keystrokes to a [`Target`].
#[derive(Debug)]
pub struct Resolver {
    state: State,
    session: Session,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            session: Session::new(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> State {
        self.state
    }

    #[inline]
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Begin a jump: scan the visible panes and show the block labels.
    ///
    /// Starting while a previous jump still waits for input discards that
    /// jump (its markers are removed first) and starts over.
    pub fn start<H: Host + ?Sized>(&mut self, host: &mut H, config: &JumpConfig) -> State {
        if self.state.is_awaiting() {
            debug!("jump restarted while {:?}; discarding it", self.state);
        }

        match self.session.open(host, config) {
            Ok(0) => self.finish(host, State::Cancelled(CancelReason::NoTargets)),
            Ok(_) => {
                self.state = State::AwaitingBlockInput;
                self.state
            }
            Err(err) => self.render_failed(host, &err),
        }
    }

    /// Feed the user's entry for the current prompt. `None` or an empty
    /// entry aborts; only the first char of a longer entry counts.
    ///
    /// Input while not awaiting is ignored and returns the current state.
    pub fn input<O: Overlay + ?Sized>(&mut self, overlay: &mut O, entry: Option<&str>) -> State {
        let token = entry.and_then(|e| e.chars().next());

        match (self.state, token) {
            (State::AwaitingBlockInput | State::AwaitingWordInput, None) => {
                self.finish(overlay, State::Cancelled(CancelReason::Aborted))
            }
            (State::AwaitingBlockInput, Some(ch)) => self.select_block(overlay, ch),
            (State::AwaitingWordInput, Some(ch)) => match self.session.resolve(ch) {
                Some(target) => self.finish(overlay, State::Resolved(target)),
                None => self.finish(overlay, State::Cancelled(CancelReason::InvalidSelection)),
            },
            (state, _) => state,
        }
    }

    /// Abort a pending jump. Tears down in any state.
    pub fn cancel<O: Overlay + ?Sized>(&mut self, overlay: &mut O) -> State {
        if self.state.is_awaiting() {
            return self.finish(overlay, State::Cancelled(CancelReason::Aborted));
        }
        self.session.teardown(overlay);
        self.state
    }

    fn select_block<O: Overlay + ?Sized>(&mut self, overlay: &mut O, ch: char) -> State {
        if !self.session.alphabet().contains(ch) {
            debug!("{ch:?} is not a label");
            return self.finish(overlay, State::Cancelled(CancelReason::InvalidSelection));
        }
        match self.session.narrow(overlay, ch) {
            Ok(0) => self.finish(overlay, State::Cancelled(CancelReason::InvalidSelection)),
            Ok(_) => {
                self.state = State::AwaitingWordInput;
                self.state
            }
            Err(err) => self.render_failed(overlay, &err),
        }
    }

    fn render_failed<O: Overlay + ?Sized>(&mut self, overlay: &mut O, err: &HostError) -> State {
        warn!("jump cancelled: {err}");
        self.finish(overlay, State::Cancelled(CancelReason::RenderFailed))
    }

    fn finish<O: Overlay + ?Sized>(&mut self, overlay: &mut O, state: State) -> State {
        self.session.teardown(overlay);
        self.state = state;
        debug!("jump finished: {state:?}");
        state
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
