//! Host boundary: everything the core asks of the embedding editor.
//!
//! The core never draws, never reads files and never waits for keys itself.
//! It talks to the host through three traits:
//!
//! - [`LineSource`]: read the text of one line of a pane
//! - [`Overlay`]: draw and remove label markers and the dimming style
//! - [`Host`]: visible panes, focus, cursor and the prompt
//!
//! Marker handles stay on the host side. The core only remembers *what* it
//! asked to draw, so it can ask for the exact inverse on teardown.

use crate::error::HostError;
use crate::label::Tier;
use crate::position::{LineSpan, PaneId, Position};

/// One visible pane as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneInfo {
    pub id: PaneId,
    /// 1-based ordinal used to bring the pane to the foreground.
    pub focus_ordinal: usize,
    /// Visible line spans, scanned in this order.
    pub regions: Vec<LineSpan>,
}

impl PaneInfo {
    #[must_use]
    pub const fn new(id: PaneId, focus_ordinal: usize, regions: Vec<LineSpan>) -> Self {
        Self {
            id,
            focus_ordinal,
            regions,
        }
    }
}

/// Read access to pane text.
pub trait LineSource {
    /// The text of `line` in `pane`, without its line terminator. `None`
    /// when the line does not exist (past the end, or the pane is gone).
    fn line_text(&self, pane: PaneId, line: usize) -> Option<String>;
}

/// Visual markers drawn over pane text.
pub trait Overlay {
    /// Draw `label` over the char at `pos`, coloured by `tier`.
    ///
    /// # Errors
    ///
    /// Any [`HostError`]; the jump is then cancelled and torn down.
    fn render_label(
        &mut self,
        pane: PaneId,
        pos: Position,
        label: char,
        tier: Tier,
    ) -> Result<(), HostError>;

    /// Remove the label drawn at `pos`. Removing a missing label is a no-op.
    fn clear_label(&mut self, pane: PaneId, pos: Position);

    /// De-emphasize the text of `span` so labels stand out.
    ///
    /// # Errors
    ///
    /// Any [`HostError`]; the jump is then cancelled and torn down.
    fn render_dim(&mut self, pane: PaneId, span: LineSpan) -> Result<(), HostError>;

    /// Undo [`render_dim`](Self::render_dim). Removing a missing dim is a no-op.
    fn clear_dim(&mut self, pane: PaneId, span: LineSpan);
}

/// The full host: text, overlay, panes, focus, cursor and input.
pub trait Host: LineSource + Overlay {
    /// Visible panes in the order they should be scanned.
    fn visible_panes(&self) -> Vec<PaneInfo>;

    /// Bring the pane with this 1-based ordinal to the foreground.
    ///
    /// # Errors
    ///
    /// [`HostError::NoSuchOrdinal`] or [`HostError::PaneGone`] when the pane
    /// has been closed since it was scanned.
    fn focus_pane(&mut self, ordinal: usize) -> Result<(), HostError>;

    /// Place a zero-width cursor at `pos` in `pane`.
    ///
    /// # Errors
    ///
    /// [`HostError::PaneGone`] when the pane has been closed.
    fn set_cursor(&mut self, pane: PaneId, pos: Position) -> Result<(), HostError>;

    /// Show `text` and wait for the user's entry. `None` means the prompt
    /// was dismissed (Escape, focus lost). The core only looks at the first
    /// char of the entry.
    fn prompt(&mut self, text: &str) -> Option<String>;
}
