//! One-call jump driver for hosts with a blocking prompt.

use log::debug;

use crate::config::JumpConfig;
use crate::host::Host;
use crate::navigator::{navigate, Navigation, Target};
use crate::resolver::{CancelReason, Resolver, State};

/// How a [`jump`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Cursor moved to the target (or just before it).
    Jumped(Target),
    /// A target was chosen but its pane closed before the cursor moved.
    PaneGone(Target),
    Cancelled(CancelReason),
}

/// Keeps the resolver tied to its host for the length of a jump. Dropping
/// the guard, including on unwind, removes every marker still on screen.
struct ActiveJump<'h, H: Host + ?Sized> {
    host: &'h mut H,
    resolver: Resolver,
}

impl<H: Host + ?Sized> Drop for ActiveJump<'_, H> {
    fn drop(&mut self) {
        self.resolver.cancel(&mut *self.host);
    }
}

/// Run a whole jump: show block labels, prompt twice, move the cursor.
///
/// The host is left without any jump marker whatever the outcome.
pub fn jump<H: Host + ?Sized>(host: &mut H, config: &JumpConfig) -> Outcome {
    let mut active = ActiveJump {
        host,
        resolver: Resolver::new(),
    };

    let mut state = active.resolver.start(&mut *active.host, config);
    while let Some(text) = state.prompt() {
        let entry = active.host.prompt(text);
        state = active.resolver.input(&mut *active.host, entry.as_deref());
    }

    match state {
        State::Resolved(target) => {
            match navigate(&mut *active.host, target, config.jump_before_anchor) {
                Navigation::Moved(_) => Outcome::Jumped(target),
                Navigation::PaneGone(_) => Outcome::PaneGone(target),
            }
        }
        State::Cancelled(reason) => Outcome::Cancelled(reason),
        other => {
            // start/input only stop the loop in a terminal state
            debug!("jump stopped in {other:?}");
            Outcome::Cancelled(CancelReason::Aborted)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
