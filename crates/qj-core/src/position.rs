//! Pane, position and line-span types.
//!
//! All coordinates are **0-indexed**. Line 0 is the first line, column 0 is the
//! first character. Columns count Unicode scalar values (chars), not bytes or
//! grapheme clusters, so a label placed at column 3 of `"café!"` sits on the
//! `'é'` regardless of its UTF-8 width.
//!
//! Display impls render 1-indexed `line:col`, which is what the picker binary
//! prints and what a human expects to paste into another editor.

use std::fmt;
use std::ops::RangeInclusive;

// ---------------------------------------------------------------------------
// PaneId
// ---------------------------------------------------------------------------

/// Host-assigned identifier of a visible pane.
///
/// The core never interprets the number; it only hands it back to the host
/// in render, cursor and line-text requests.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct PaneId(pub usize);

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pane#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A character cell inside a pane: (line, column), both 0-indexed.
///
/// # Ordering
///
/// Positions are ordered lexicographically: line first, then column. This is
/// also the order in which anchors are produced within one region.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    /// The origin, line 0 column 0.
    pub const ZERO: Self = Self { line: 0, col: 0 };

    /// Create a new position.
    #[inline]
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    /// The same line, one column to the left. Column 0 stays at column 0:
    /// the cursor never wraps onto the previous line.
    #[inline]
    #[must_use]
    pub const fn step_left(self) -> Self {
        Self {
            line: self.line,
            col: self.col.saturating_sub(1),
        }
    }
}

impl Ord for Position {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.line
            .cmp(&other.line)
            .then(self.col.cmp(&other.col))
    }
}

impl PartialOrd for Position {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({}:{})", self.line, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

// ---------------------------------------------------------------------------
// LineSpan
// ---------------------------------------------------------------------------

/// An inclusive range of lines `first..=last` currently rendered in a pane.
///
/// A pane may expose several disjoint spans (folded code, split scroll
/// views); each one is scanned on its own, in the order the host lists them.
/// Spans are always normalized so that `first <= last`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineSpan {
    first: usize,
    last: usize,
}

impl LineSpan {
    /// Create a span from two line numbers, swapping if needed.
    #[must_use]
    pub const fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { first: a, last: b }
        } else {
            Self { first: b, last: a }
        }
    }

    /// A span covering a single line.
    #[inline]
    #[must_use]
    pub const fn single(line: usize) -> Self {
        Self {
            first: line,
            last: line,
        }
    }

    #[inline]
    #[must_use]
    pub const fn first(self) -> usize {
        self.first
    }

    #[inline]
    #[must_use]
    pub const fn last(self) -> usize {
        self.last
    }

    /// Number of lines in the span. Never zero.
    #[inline]
    #[must_use]
    pub const fn line_count(self) -> usize {
        self.last - self.first + 1
    }

    /// True when `line` falls within the span (both ends inclusive).
    #[inline]
    #[must_use]
    pub const fn contains(self, line: usize) -> bool {
        line >= self.first && line <= self.last
    }

    /// The line numbers in top-to-bottom order.
    #[inline]
    #[must_use]
    pub fn lines(self) -> RangeInclusive<usize> {
        self.first..=self.last
    }
}

impl fmt::Debug for LineSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lines({}..={})", self.first, self.last)
    }
}

impl fmt::Display for LineSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first + 1, self.last + 1)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
