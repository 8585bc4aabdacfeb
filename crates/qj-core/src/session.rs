//! Session: everything one jump puts on screen.
//!
//! A [`Session`] owns both anchor tiers of a single jump together with a
//! ledger of every marker it asked the host to draw. Teardown walks the
//! ledger and asks for the exact inverse, so the host ends up as it was
//! before the jump, whatever state the jump stopped in.
//!
//! ```text
//! open()      scan panes → block index → dim regions + block labels
//! narrow(c)   clear block labels → word index → word labels
//! resolve(c)  word label → Target
//! teardown()  clear labels + dims, forget anchors (idempotent)
//! ```

use log::debug;

use crate::anchor::AnchorIndex;
use crate::config::JumpConfig;
use crate::error::HostError;
use crate::host::{Host, Overlay, PaneInfo};
use crate::label::{Alphabet, Tier};
use crate::navigator::Target;
use crate::position::{LineSpan, PaneId, Position};

/// Transient state of one jump.
#[derive(Debug)]
pub struct Session {
    tier: Option<Tier>,
    alphabet: Alphabet,
    block: AnchorIndex,
    word: AnchorIndex,
    /// Panes scanned by `open`, with their focus ordinals.
    panes: Vec<PaneInfo>,
    /// Labels currently drawn by this session.
    labels: Vec<(PaneId, Position)>,
    /// Spans currently dimmed by this session.
    dims: Vec<(PaneId, LineSpan)>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// An empty session; nothing scanned, nothing drawn.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tier: None,
            alphabet: Alphabet::default(),
            block: AnchorIndex::empty(Tier::Block),
            word: AnchorIndex::empty(Tier::Word),
            panes: Vec::new(),
            labels: Vec::new(),
            dims: Vec::new(),
        }
    }

    /// Scan the host's visible panes, build the block tier and draw it.
    ///
    /// Any leftovers of a previous jump are torn down first. Returns the
    /// number of block anchors; with zero anchors nothing is drawn.
    ///
    /// # Errors
    ///
    /// The first failed render request. Markers drawn before the failure
    /// stay in the ledger, so a following [`teardown`](Self::teardown)
    /// removes them.
    pub fn open<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        config: &JumpConfig,
    ) -> Result<usize, HostError> {
        self.teardown(host);

        self.panes = host.visible_panes();
        self.alphabet = config.alphabet.clone();
        self.block = AnchorIndex::build_block(&self.panes, &*host, config);
        self.tier = Some(Tier::Block);
        debug!(
            "scanned {} panes: {} block anchors",
            self.panes.len(),
            self.block.len()
        );

        if self.block.is_empty() {
            return Ok(0);
        }

        for pane in &self.panes {
            for &span in &pane.regions {
                host.render_dim(pane.id, span)?;
                self.dims.push((pane.id, span));
            }
        }
        self.paint(host, Tier::Block)?;
        Ok(self.block.len())
    }

    /// Replace the block labels with word labels for the block `label`.
    ///
    /// Returns the number of word anchors (zero when no block carries
    /// `label`).
    ///
    /// # Errors
    ///
    /// The first failed render request.
    pub fn narrow<O: Overlay + ?Sized>(
        &mut self,
        overlay: &mut O,
        label: char,
    ) -> Result<usize, HostError> {
        self.clear_labels(overlay);
        self.word = self.block.narrow(label, &self.alphabet);
        self.tier = Some(Tier::Word);
        debug!("block {label:?}: {} word anchors", self.word.len());

        self.paint(overlay, Tier::Word)?;
        Ok(self.word.len())
    }

    /// The target behind word label `label`, if any.
    #[must_use]
    pub fn resolve(&self, label: char) -> Option<Target> {
        let anchor = self.word.find(label)?;
        let pane = self.panes.iter().find(|p| p.id == anchor.pane)?;
        Some(Target {
            pane: anchor.pane,
            focus_ordinal: pane.focus_ordinal,
            position: anchor.position,
        })
    }

    /// Remove every marker this session drew and forget all anchors.
    ///
    /// Safe to call any number of times; the second call finds an empty
    /// ledger and does nothing.
    pub fn teardown<O: Overlay + ?Sized>(&mut self, overlay: &mut O) {
        if self.tier.is_none() && self.labels.is_empty() && self.dims.is_empty() {
            return;
        }
        self.clear_labels(overlay);
        for (pane, span) in self.dims.drain(..) {
            overlay.clear_dim(pane, span);
        }
        self.block = AnchorIndex::empty(Tier::Block);
        self.word = AnchorIndex::empty(Tier::Word);
        self.panes.clear();
        self.tier = None;
    }

    /// The tier currently on screen, `None` when idle.
    #[inline]
    #[must_use]
    pub const fn tier(&self) -> Option<Tier> {
        self.tier
    }

    /// The label set of the current jump.
    #[inline]
    #[must_use]
    pub const fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    #[inline]
    #[must_use]
    pub const fn block(&self) -> &AnchorIndex {
        &self.block
    }

    #[inline]
    #[must_use]
    pub const fn word(&self) -> &AnchorIndex {
        &self.word
    }

    /// Ids of the panes scanned by the last `open`.
    pub fn scanned_panes(&self) -> impl Iterator<Item = PaneId> + '_ {
        self.panes.iter().map(|p| p.id)
    }

    /// No anchors held and no markers on screen.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.tier.is_none()
            && self.block.is_empty()
            && self.word.is_empty()
            && self.labels.is_empty()
            && self.dims.is_empty()
    }

    fn paint<O: Overlay + ?Sized>(&mut self, overlay: &mut O, tier: Tier) -> Result<(), HostError> {
        let index = match tier {
            Tier::Block => &self.block,
            Tier::Word => &self.word,
        };
        for anchor in index.anchors() {
            overlay.render_label(anchor.pane, anchor.position, anchor.label, tier)?;
            self.labels.push((anchor.pane, anchor.position));
        }
        Ok(())
    }

    fn clear_labels<O: Overlay + ?Sized>(&mut self, overlay: &mut O) {
        for (pane, pos) in self.labels.drain(..) {
            overlay.clear_label(pane, pos);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
