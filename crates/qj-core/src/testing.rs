//! Recording host for unit tests.

use std::collections::{BTreeMap, HashSet, VecDeque};

use crate::error::HostError;
use crate::host::{Host, LineSource, Overlay, PaneInfo};
use crate::label::Tier;
use crate::position::{LineSpan, PaneId, Position};

/// One pane of the mock: its text plus the spans reported as visible.
#[derive(Debug, Clone)]
pub struct MockPane {
    pub id: PaneId,
    pub ordinal: usize,
    pub regions: Vec<LineSpan>,
    pub lines: Vec<String>,
}

/// A pane showing all of `lines` as one region.
pub fn pane(id: usize, ordinal: usize, lines: &[&str]) -> MockPane {
    MockPane {
        id: PaneId(id),
        ordinal,
        regions: vec![LineSpan::new(0, lines.len().saturating_sub(1))],
        lines: lines.iter().map(|l| (*l).to_string()).collect(),
    }
}

#[derive(Debug, Default)]
pub struct MockHost {
    pub panes: Vec<MockPane>,
    /// Labels currently on screen.
    pub labels: BTreeMap<(PaneId, Position), (char, Tier)>,
    /// Dimmed spans currently on screen.
    pub dims: Vec<(PaneId, LineSpan)>,
    /// Every prompt text shown, in order.
    pub prompts: Vec<String>,
    /// Scripted prompt answers; an exhausted script answers `None`.
    pub answers: VecDeque<Option<String>>,
    pub focused: Option<usize>,
    pub cursor: Option<(PaneId, Position)>,
    /// Panes closed after scanning: focus and cursor requests fail.
    pub closed: HashSet<PaneId>,
    /// Fail the n-th `render_label` call (0-based) from now on.
    pub fail_label_at: Option<usize>,
    pub label_calls: usize,
    /// Largest number of labels on screen at once.
    pub peak_labels: usize,
}

impl MockHost {
    pub fn new(panes: Vec<MockPane>) -> Self {
        Self {
            panes,
            ..Self::default()
        }
    }

    /// Queue prompt answers.
    pub fn answering(mut self, answers: &[Option<&str>]) -> Self {
        self.answers = answers.iter().map(|a| a.map(str::to_string)).collect();
        self
    }

    /// Nothing left on screen.
    pub fn is_clean(&self) -> bool {
        self.labels.is_empty() && self.dims.is_empty()
    }

    fn pane(&self, id: PaneId) -> Option<&MockPane> {
        self.panes.iter().find(|p| p.id == id)
    }
}

impl LineSource for MockHost {
    fn line_text(&self, pane: PaneId, line: usize) -> Option<String> {
        self.pane(pane)?.lines.get(line).cloned()
    }
}

impl Overlay for MockHost {
    fn render_label(
        &mut self,
        pane: PaneId,
        pos: Position,
        label: char,
        tier: Tier,
    ) -> Result<(), HostError> {
        let call = self.label_calls;
        self.label_calls += 1;
        if self.fail_label_at.is_some_and(|n| call >= n) {
            return Err(HostError::Render("scripted failure".into()));
        }
        self.labels.insert((pane, pos), (label, tier));
        self.peak_labels = self.peak_labels.max(self.labels.len());
        Ok(())
    }

    fn clear_label(&mut self, pane: PaneId, pos: Position) {
        self.labels.remove(&(pane, pos));
    }

    fn render_dim(&mut self, pane: PaneId, span: LineSpan) -> Result<(), HostError> {
        self.dims.push((pane, span));
        Ok(())
    }

    fn clear_dim(&mut self, pane: PaneId, span: LineSpan) {
        if let Some(i) = self.dims.iter().position(|d| *d == (pane, span)) {
            self.dims.remove(i);
        }
    }
}

impl Host for MockHost {
    fn visible_panes(&self) -> Vec<PaneInfo> {
        self.panes
            .iter()
            .map(|p| PaneInfo::new(p.id, p.ordinal, p.regions.clone()))
            .collect()
    }

    fn focus_pane(&mut self, ordinal: usize) -> Result<(), HostError> {
        let pane = self
            .panes
            .iter()
            .find(|p| p.ordinal == ordinal)
            .ok_or(HostError::NoSuchOrdinal(ordinal))?;
        if self.closed.contains(&pane.id) {
            return Err(HostError::PaneGone(pane.id));
        }
        self.focused = Some(ordinal);
        Ok(())
    }

    fn set_cursor(&mut self, pane: PaneId, pos: Position) -> Result<(), HostError> {
        if self.closed.contains(&pane) || self.pane(pane).is_none() {
            return Err(HostError::PaneGone(pane));
        }
        self.cursor = Some((pane, pos));
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Option<String> {
        self.prompts.push(text.to_string());
        self.answers.pop_front().flatten()
    }
}
