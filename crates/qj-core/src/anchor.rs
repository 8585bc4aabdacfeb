//! Anchor index: the labelled targets of one tier.
//!
//! # Block tier
//!
//! [`AnchorIndex::build_block`] walks every visible line of every pane and
//! labels each target with one shared running counter:
//!
//! ```text
//! pane 1, span 0..=1      pane 2, span 4..=4
//! ┌──────────────────┐    ┌──────────────────┐
//! │ foo bar          │    │ baz              │
//! │ qux              │    └──────────────────┘
//! └──────────────────┘
//! counter: f=0 o=1 b=2 r=3 q=4 x=5 | b=6 z=7
//! alphabet "abc" → label = alphabet[counter / 3]
//!          a   a   a   b   b   b   | c   c
//! ```
//!
//! # Word tier
//!
//! [`AnchorIndex::narrow`] keeps the block anchors carrying the chosen label
//! and relabels them one-to-one, in order: the `i`-th survivor gets
//! `alphabet[i]`.

use log::debug;

use crate::config::JumpConfig;
use crate::host::{LineSource, PaneInfo};
use crate::label::{Alphabet, Tier};
use crate::position::{PaneId, Position};

/// A labelled jump target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub label: char,
    pub pane: PaneId,
    pub position: Position,
}

/// The anchors of one tier, in scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorIndex {
    tier: Tier,
    anchors: Vec<Anchor>,
    /// Targets found but left unlabelled by the allocation cap.
    dropped: usize,
}

impl AnchorIndex {
    /// An index with no anchors.
    #[must_use]
    pub const fn empty(tier: Tier) -> Self {
        Self {
            tier,
            anchors: Vec::new(),
            dropped: 0,
        }
    }

    /// Scan the visible regions of `panes` and build the block tier.
    ///
    /// Panes are visited in the given order, regions in order within a pane,
    /// lines top to bottom within a region. Lines the source cannot provide
    /// are skipped.
    pub fn build_block<S: LineSource + ?Sized>(
        panes: &[PaneInfo],
        source: &S,
        config: &JumpConfig,
    ) -> Self {
        let mut index = Self::empty(Tier::Block);
        let mut counter = 0usize;

        for pane in panes {
            for span in &pane.regions {
                for line in span.lines() {
                    let Some(text) = source.line_text(pane.id, line) else {
                        continue;
                    };
                    for col in config.pattern.find_targets(&text, config.max_columns) {
                        match config.alphabet.block_label_for(counter) {
                            Some(label) => index.anchors.push(Anchor {
                                label,
                                pane: pane.id,
                                position: Position::new(line, col),
                            }),
                            None => index.dropped += 1,
                        }
                        counter += 1;
                    }
                }
            }
        }

        if index.dropped > 0 {
            debug!(
                "block tier full: labelled {}, dropped {} targets",
                index.anchors.len(),
                index.dropped
            );
        }
        index
    }

    /// Build the word tier from the block anchors labelled `label`.
    ///
    /// Calling this on a word index narrows it again, which is harmless but
    /// never done by the resolver.
    #[must_use]
    pub fn narrow(&self, label: char, alphabet: &Alphabet) -> Self {
        let mut index = Self::empty(Tier::Word);
        let members = self.anchors.iter().filter(|a| a.label == label);

        for (i, anchor) in members.enumerate() {
            match alphabet.label_for(i) {
                Some(word_label) => index.anchors.push(Anchor {
                    label: word_label,
                    ..*anchor
                }),
                None => index.dropped += 1,
            }
        }

        if index.dropped > 0 {
            debug!(
                "word tier full: labelled {}, dropped {} targets",
                index.anchors.len(),
                index.dropped
            );
        }
        index
    }

    /// The first anchor carrying `label`. In the word tier it is the only one.
    #[must_use]
    pub fn find(&self, label: char) -> Option<&Anchor> {
        self.anchors.iter().find(|a| a.label == label)
    }

    /// Distinct labels in first-seen order.
    #[must_use]
    pub fn labels(&self) -> Vec<char> {
        let mut out: Vec<char> = Vec::new();
        for anchor in &self.anchors {
            if !out.contains(&anchor.label) {
                out.push(anchor.label);
            }
        }
        out
    }

    #[inline]
    #[must_use]
    pub const fn tier(&self) -> Tier {
        self.tier
    }

    #[inline]
    #[must_use]
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Targets that were found but received no label.
    #[inline]
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::TargetPattern;
    use crate::position::LineSpan;
    use crate::host::Host;
    use crate::testing::{pane, MockHost};
    use pretty_assertions::assert_eq;

    fn config(alphabet: &str) -> JumpConfig {
        JumpConfig {
            alphabet: Alphabet::new(alphabet).unwrap(),
            ..JumpConfig::default()
        }
    }

    /// A config whose pattern labels every char, so target counts are exact.
    fn every_char(alphabet: &str) -> JumpConfig {
        JumpConfig {
            pattern: TargetPattern::new(".").unwrap(),
            ..config(alphabet)
        }
    }

    fn labels(index: &AnchorIndex) -> String {
        index.anchors().iter().map(|a| a.label).collect()
    }

    // ── Block tier ────────────────────────────────────────────────────────

    #[test]
    fn three_targets_with_two_letter_alphabet() {
        // "ab cd e" → targets a(0) b(1) c(3) d(4) e(6) with the default
        // pattern; use a pattern picking word starts only to get exactly 3.
        let host = MockHost::new(vec![pane(1, 1, &["ab cd e"])]);
        let cfg = JumpConfig {
            pattern: TargetPattern::new(r"\b\w").unwrap(),
            ..config("ab")
        };
        let index = AnchorIndex::build_block(&host.visible_panes(), &host, &cfg);

        assert_eq!(labels(&index), "aab");
        let cols: Vec<_> = index.anchors().iter().map(|a| a.position.col).collect();
        assert_eq!(cols, vec![0, 3, 6]);
        assert_eq!(index.tier(), Tier::Block);
    }

    #[test]
    fn counter_runs_across_lines_regions_and_panes() {
        let mut left = pane(1, 1, &["foo bar", "qux", "skip", "zz"]);
        left.regions = vec![LineSpan::new(0, 1), LineSpan::single(3)];
        let right = pane(2, 2, &["baz"]);
        let host = MockHost::new(vec![left, right]);

        let index = AnchorIndex::build_block(&host.visible_panes(), &host, &config("abc"));

        // foo(0,2) bar(4,6) qux(0,2) | zz(0,1) | baz(0,2): ten targets, nine labels.
        assert_eq!(labels(&index), "aaabbbccc");
        let placed: Vec<_> = index
            .anchors()
            .iter()
            .map(|a| (a.pane.0, a.position.line, a.position.col))
            .collect();
        assert_eq!(
            placed,
            vec![
                (1, 0, 0),
                (1, 0, 2),
                (1, 0, 4),
                (1, 0, 6),
                (1, 1, 0),
                (1, 1, 2),
                (1, 3, 0),
                (1, 3, 1),
                (2, 0, 0),
            ]
        );
        assert_eq!(index.dropped(), 1);
    }

    #[test]
    fn missing_lines_are_skipped() {
        let mut p = pane(1, 1, &["one"]);
        p.regions = vec![LineSpan::new(0, 5)];
        let host = MockHost::new(vec![p]);
        let index = AnchorIndex::build_block(&host.visible_panes(), &host, &config("ab"));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn no_targets_gives_empty_index() {
        let host = MockHost::new(vec![pane(1, 1, &["", "  ", "-> ;"])]);
        let index = AnchorIndex::build_block(&host.visible_panes(), &host, &config("ab"));
        assert!(index.is_empty());
        assert!(index.labels().is_empty());
    }

    #[test]
    fn block_capacity_boundary_exact() {
        // "ab" → capacity 4.
        let host = MockHost::new(vec![pane(1, 1, &["wxyz"])]);
        let index = AnchorIndex::build_block(&host.visible_panes(), &host, &every_char("ab"));
        assert_eq!(labels(&index), "aabb");
        assert_eq!(index.dropped(), 0);
    }

    #[test]
    fn block_capacity_boundary_plus_one_drops_last() {
        let host = MockHost::new(vec![pane(1, 1, &["vwxyz"])]);
        let index = AnchorIndex::build_block(&host.visible_panes(), &host, &every_char("ab"));
        assert_eq!(labels(&index), "aabb");
        assert_eq!(index.dropped(), 1);
        assert_eq!(index.anchors().last().map(|a| a.position.col), Some(3));
    }

    // ── Word tier ─────────────────────────────────────────────────────────

    #[test]
    fn narrow_relabels_one_to_one() {
        let host = MockHost::new(vec![pane(1, 1, &["abcdef"])]);
        let block = AnchorIndex::build_block(&host.visible_panes(), &host, &every_char("xyz"));
        assert_eq!(labels(&block), "xxxyyy");

        let word = block.narrow('y', &Alphabet::new("xyz").unwrap());
        assert_eq!(word.tier(), Tier::Word);
        assert_eq!(labels(&word), "xyz");
        let cols: Vec<_> = word.anchors().iter().map(|a| a.position.col).collect();
        assert_eq!(cols, vec![3, 4, 5]);
    }

    #[test]
    fn narrow_on_unused_label_is_empty() {
        let host = MockHost::new(vec![pane(1, 1, &["ab"])]);
        let cfg = every_char("xyz");
        let block = AnchorIndex::build_block(&host.visible_panes(), &host, &cfg);
        assert!(block.narrow('z', &cfg.alphabet).is_empty());
    }

    #[test]
    fn narrow_at_alphabet_len_keeps_all() {
        let a = Alphabet::new("ab").unwrap();
        let block = block_of(&['q', 'q'], Tier::Block);
        let word = block.narrow('q', &a);
        assert_eq!(labels(&word), "ab");
        assert_eq!(word.dropped(), 0);
    }

    #[test]
    fn narrow_past_alphabet_len_drops_extra() {
        let a = Alphabet::new("ab").unwrap();
        let block = block_of(&['q', 'q', 'q'], Tier::Block);
        let word = block.narrow('q', &a);
        assert_eq!(labels(&word), "ab");
        assert_eq!(word.dropped(), 1);
    }

    #[test]
    fn word_labels_are_unique() {
        let host = MockHost::new(vec![pane(1, 1, &["the quick brown fox jumps over"])]);
        let cfg = JumpConfig::default();
        let block = AnchorIndex::build_block(&host.visible_panes(), &host, &cfg);
        for label in block.labels() {
            let word = block.narrow(label, &cfg.alphabet);
            assert_eq!(word.labels().len(), word.len());
        }
    }

    #[test]
    fn two_tier_selection_is_a_bijection() {
        let host = MockHost::new(vec![
            pane(1, 1, &["alpha beta_gamma deltaEpsilon", "zeta eta theta"]),
            pane(2, 2, &["iota kappa lambda mu nu xi omicron pi rho"]),
        ]);
        let cfg = config("asdf");
        let block = AnchorIndex::build_block(&host.visible_panes(), &host, &cfg);

        let mut reached = Vec::new();
        for block_label in block.labels() {
            let word = block.narrow(block_label, &cfg.alphabet);
            let members: Vec<_> = block
                .anchors()
                .iter()
                .filter(|a| a.label == block_label)
                .map(|a| (a.pane, a.position))
                .collect();
            for (i, anchor) in word.anchors().iter().enumerate() {
                let found = word.find(anchor.label).unwrap();
                assert_eq!((found.pane, found.position), members[i]);
                reached.push((found.pane, found.position));
            }
        }
        let all: Vec<_> = block.anchors().iter().map(|a| (a.pane, a.position)).collect();
        assert_eq!(reached, all);
    }

    #[test]
    fn labels_lists_distinct_in_order() {
        let block = block_of(&['b', 'b', 'a', 'c', 'a'], Tier::Block);
        assert_eq!(block.labels(), vec!['b', 'a', 'c']);
    }

    fn block_of(labels: &[char], tier: Tier) -> AnchorIndex {
        AnchorIndex {
            tier,
            anchors: labels
                .iter()
                .enumerate()
                .map(|(i, &label)| Anchor {
                    label,
                    pane: PaneId(1),
                    position: Position::new(0, i),
                })
                .collect(),
            dropped: 0,
        }
    }
}
