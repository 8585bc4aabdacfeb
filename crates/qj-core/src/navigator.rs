//! Navigator: move the host cursor to a resolved target.

use log::{debug, warn};

use crate::error::HostError;
use crate::host::Host;
use crate::position::{PaneId, Position};

/// A fully resolved jump destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub pane: PaneId,
    /// 1-based ordinal that brings `pane` to the foreground.
    pub focus_ordinal: usize,
    /// The labelled char.
    pub position: Position,
}

/// What [`navigate`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Pane focused, cursor placed here.
    Moved(Position),
    /// The pane disappeared after the target was chosen; nothing moved.
    PaneGone(PaneId),
}

/// Focus the target's pane and place a zero-width cursor on the target, or
/// one column before it with `jump_before_anchor`.
///
/// Never fails: a pane that is gone by now is a silent no-op.
pub fn navigate<H: Host + ?Sized>(
    host: &mut H,
    target: Target,
    jump_before_anchor: bool,
) -> Navigation {
    let cursor = if jump_before_anchor {
        target.position.step_left()
    } else {
        target.position
    };

    let moved = host
        .focus_pane(target.focus_ordinal)
        .and_then(|()| host.set_cursor(target.pane, cursor));

    match moved {
        Ok(()) => {
            debug!("jumped to {} {cursor}", target.pane);
            Navigation::Moved(cursor)
        }
        Err(err @ (HostError::PaneGone(_) | HostError::NoSuchOrdinal(_))) => {
            debug!("jump target vanished: {err}");
            Navigation::PaneGone(target.pane)
        }
        Err(err) => {
            warn!("could not move to {} {cursor}: {err}", target.pane);
            Navigation::PaneGone(target.pane)
        }
    }
}
