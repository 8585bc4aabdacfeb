// SPDX-License-Identifier: MIT
//
// Terminal host: the files from the command line, stacked as panes.
//
//   ┌──────────────────────────────┐
//   │ path/of/first.rs             │  ← header (INVERSE)
//   │ lines top.. of first file    │  ← pane body
//   ├──────────────────────────────┤
//   │ path/of/second.rs            │
//   │ lines top.. of second file   │
//   ├──────────────────────────────┤
//   │ jump: block?                 │  ← prompt line
//   └──────────────────────────────┘
//
// The host only keeps what the jump asked it to show: labels and dimmed
// spans. The whole screen is redrawn from that state before every prompt,
// so clearing a marker is just forgetting it.
//
// The alternate screen is entered lazily on the first prompt and left when
// the host is dropped. A jump with no targets never touches the terminal.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor,
};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use log::{debug, warn};

use qj_config::{Palette, Rgb};
use qj_core::{Host, HostError, LineSource, LineSpan, Overlay, PaneId, PaneInfo, Position, Tier};

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub cols: u16,
    pub rows: u16,
}

impl Size {
    /// Used when stdout is not a terminal.
    pub const FALLBACK: Self = Self { cols: 80, rows: 24 };

    /// The current terminal size, or [`Size::FALLBACK`].
    #[must_use]
    pub fn query() -> Self {
        terminal::size()
            .ok()
            .filter(|&(cols, rows)| cols > 0 && rows > 0)
            .map_or(Self::FALLBACK, |(cols, rows)| Self { cols, rows })
    }
}

// ─── Layout ─────────────────────────────────────────────────────────────────

/// Screen rows given to one pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Row of the pane's header; the body starts one row below.
    pub header_row: u16,
    /// Rows of file text. Zero means the pane is off screen.
    pub body_rows: u16,
}

/// Split `rows` between `count` panes, top to bottom. The last row is the
/// prompt line. Leftover rows go to the last pane; panes that would get no
/// body row at all are off screen.
#[must_use]
pub fn layout(rows: u16, count: usize) -> Vec<Slot> {
    let usable = rows.saturating_sub(1);
    let Ok(n) = u16::try_from(count) else {
        return vec![Slot { header_row: 0, body_rows: 0 }; count];
    };
    if n == 0 {
        return Vec::new();
    }

    let share = usable / n;
    if share < 2 {
        // Not enough room for everyone: give each pane two rows until the
        // screen runs out.
        let mut slots = Vec::with_capacity(count);
        let mut row = 0;
        for _ in 0..count {
            if row + 2 <= usable {
                slots.push(Slot { header_row: row, body_rows: 1 });
                row += 2;
            } else {
                slots.push(Slot { header_row: row.min(usable), body_rows: 0 });
            }
        }
        return slots;
    }

    (0..n)
        .map(|i| {
            let extra = if i == n - 1 { usable - share * n } else { 0 };
            Slot {
                header_row: i * share,
                body_rows: share - 1 + extra,
            }
        })
        .collect()
}

// ─── Panes ──────────────────────────────────────────────────────────────────

/// One file shown in the terminal.
#[derive(Debug, Clone)]
pub struct FilePane {
    pub id: PaneId,
    /// 1-based, in command-line order.
    pub ordinal: usize,
    pub path: PathBuf,
    pub lines: Vec<String>,
}

impl FilePane {
    /// Read `path` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// The file cannot be read or is not valid UTF-8.
    pub fn load(path: &Path, ordinal: usize) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
        Ok(Self::from_text(path, ordinal, &text))
    }

    #[must_use]
    pub fn from_text(path: &Path, ordinal: usize, text: &str) -> Self {
        Self {
            id: PaneId(ordinal),
            ordinal,
            path: path.to_path_buf(),
            lines: text.lines().map(str::to_string).collect(),
        }
    }
}

// ─── Screen ─────────────────────────────────────────────────────────────────

/// Raw mode plus alternate screen, restored on drop.
struct Screen {
    active: bool,
}

impl Screen {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(err) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        Ok(Self { active: true })
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        if self.active {
            let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
            self.active = false;
        }
    }
}

/// What a key press means at a prompt.
enum Key {
    Entry(Option<String>),
    Redraw,
    Ignore,
}

fn read_key() -> io::Result<Key> {
    Ok(match event::read()? {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => match code {
            KeyCode::Esc => Key::Entry(None),
            KeyCode::Char('c' | 'g') if modifiers.contains(KeyModifiers::CONTROL) => {
                Key::Entry(None)
            }
            KeyCode::Char(ch) => Key::Entry(Some(ch.to_string())),
            KeyCode::Enter => Key::Entry(Some(String::new())),
            _ => Key::Ignore,
        },
        Event::Resize(..) => Key::Redraw,
        _ => Key::Ignore,
    })
}

// ─── Host ───────────────────────────────────────────────────────────────────

/// How one cell of a pane body is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Paint {
    Plain,
    Dim,
    Label(char, Tier),
}

/// [`Host`] over a set of files in a real terminal.
pub struct TermHost {
    panes: Vec<FilePane>,
    slots: Vec<Slot>,
    size: Size,
    /// First file line shown in every pane, 0-indexed.
    top: usize,
    palette: Palette,
    labels: BTreeMap<(PaneId, Position), (char, Tier)>,
    dims: Vec<(PaneId, LineSpan)>,
    focused: Option<usize>,
    cursor: Option<(PaneId, Position)>,
    screen: Option<Screen>,
}

impl TermHost {
    #[must_use]
    pub fn new(panes: Vec<FilePane>, size: Size, top: usize, palette: Palette) -> Self {
        let slots = layout(size.rows, panes.len());
        Self {
            panes,
            slots,
            size,
            top,
            palette,
            labels: BTreeMap::new(),
            dims: Vec::new(),
            focused: None,
            cursor: None,
            screen: None,
        }
    }

    /// Where the last jump put the cursor, with the file it is in.
    #[must_use]
    pub fn cursor(&self) -> Option<(&Path, Position)> {
        let (id, pos) = self.cursor?;
        let pane = self.pane(id)?;
        Some((pane.path.as_path(), pos))
    }

    /// Ordinal of the pane brought to the foreground, if any.
    #[inline]
    #[must_use]
    pub const fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Any label or dim still shown.
    #[must_use]
    pub fn has_markers(&self) -> bool {
        !self.labels.is_empty() || !self.dims.is_empty()
    }

    fn pane(&self, id: PaneId) -> Option<&FilePane> {
        self.panes.iter().find(|p| p.id == id)
    }

    /// File lines on screen for pane `i`, if any.
    fn shown_lines(&self, i: usize) -> Option<LineSpan> {
        let pane = &self.panes[i];
        let body = usize::from(self.slots.get(i)?.body_rows);
        if body == 0 || self.top >= pane.lines.len() {
            return None;
        }
        let last = (self.top + body - 1).min(pane.lines.len() - 1);
        Some(LineSpan::new(self.top, last))
    }

    fn paint_at(&self, pane: PaneId, pos: Position) -> Paint {
        if let Some(&(label, tier)) = self.labels.get(&(pane, pos)) {
            return Paint::Label(label, tier);
        }
        if self
            .dims
            .iter()
            .any(|&(p, span)| p == pane && span.contains(pos.line))
        {
            return Paint::Dim;
        }
        Paint::Plain
    }

    /// Render every pane plus the prompt line.
    fn draw<W: Write>(&self, out: &mut W, prompt: &str) -> io::Result<()> {
        let width = usize::from(self.size.cols);
        queue!(out, Clear(ClearType::All))?;

        for (i, pane) in self.panes.iter().enumerate() {
            let Some(slot) = self.slots.get(i).copied() else { continue };
            if slot.body_rows == 0 {
                continue;
            }
            let header: String = pane.path.display().to_string().chars().take(width).collect();
            queue!(
                out,
                MoveTo(0, slot.header_row),
                SetAttribute(Attribute::Reverse),
                Print(format!("{header:<width$}")),
                SetAttribute(Attribute::Reset),
            )?;

            let Some(span) = self.shown_lines(i) else { continue };
            for (row, line) in (slot.header_row + 1..).zip(span.lines()) {
                queue!(out, MoveTo(0, row))?;
                self.draw_line(out, pane, line, width)?;
            }
        }

        let prompt_row = self.size.rows.saturating_sub(1);
        queue!(out, MoveTo(0, prompt_row), Print(prompt))?;
        out.flush()
    }

    fn draw_line<W: Write>(
        &self,
        out: &mut W,
        pane: &FilePane,
        line: usize,
        width: usize,
    ) -> io::Result<()> {
        let mut current = Paint::Plain;
        for (col, ch) in pane.lines[line].chars().take(width).enumerate() {
            let paint = self.paint_at(pane.id, Position::new(line, col));
            if paint != current {
                queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
                match paint {
                    Paint::Plain => {}
                    Paint::Dim => queue!(out, SetForegroundColor(color(self.palette.dim)))?,
                    Paint::Label(_, tier) => queue!(
                        out,
                        SetForegroundColor(color(self.palette.label(tier))),
                        SetAttribute(Attribute::Bold),
                    )?,
                }
                current = paint;
            }
            let shown = match paint {
                Paint::Label(label, _) => label,
                _ if ch.is_control() => ' ',
                _ => ch,
            };
            queue!(out, Print(shown))?;
        }
        queue!(out, SetAttribute(Attribute::Reset), ResetColor)
    }

    /// Adopt a new terminal size. Pane layout follows; labels keep their
    /// file positions and show up wherever those lines now are.
    fn resize(&mut self, size: Size) {
        self.size = size;
        self.slots = layout(size.rows, self.panes.len());
    }

    fn ask(&mut self, text: &str) -> io::Result<Option<String>> {
        if self.screen.is_none() {
            self.screen = Some(Screen::enter()?);
        }
        let mut out = io::stdout();
        loop {
            self.draw(&mut out, text)?;
            match read_key()? {
                Key::Entry(entry) => return Ok(entry),
                Key::Redraw => self.resize(Size::query()),
                Key::Ignore => {}
            }
        }
    }
}

const fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

impl LineSource for TermHost {
    /// Only the part of the line that fits on screen, so nothing past the
    /// right edge gets a label.
    fn line_text(&self, pane: PaneId, line: usize) -> Option<String> {
        let text = self.pane(pane)?.lines.get(line)?;
        Some(text.chars().take(usize::from(self.size.cols)).collect())
    }
}

impl Overlay for TermHost {
    fn render_label(
        &mut self,
        pane: PaneId,
        pos: Position,
        label: char,
        tier: Tier,
    ) -> Result<(), HostError> {
        if self.pane(pane).is_none() {
            return Err(HostError::PaneGone(pane));
        }
        self.labels.insert((pane, pos), (label, tier));
        Ok(())
    }

    fn clear_label(&mut self, pane: PaneId, pos: Position) {
        self.labels.remove(&(pane, pos));
    }

    fn render_dim(&mut self, pane: PaneId, span: LineSpan) -> Result<(), HostError> {
        if self.pane(pane).is_none() {
            return Err(HostError::PaneGone(pane));
        }
        self.dims.push((pane, span));
        Ok(())
    }

    fn clear_dim(&mut self, pane: PaneId, span: LineSpan) {
        if let Some(i) = self.dims.iter().position(|d| *d == (pane, span)) {
            self.dims.remove(i);
        }
    }
}

impl Host for TermHost {
    fn visible_panes(&self) -> Vec<PaneInfo> {
        (0..self.panes.len())
            .filter_map(|i| {
                let span = self.shown_lines(i)?;
                let pane = &self.panes[i];
                Some(PaneInfo::new(pane.id, pane.ordinal, vec![span]))
            })
            .collect()
    }

    fn focus_pane(&mut self, ordinal: usize) -> Result<(), HostError> {
        if !self.panes.iter().any(|p| p.ordinal == ordinal) {
            return Err(HostError::NoSuchOrdinal(ordinal));
        }
        self.focused = Some(ordinal);
        Ok(())
    }

    fn set_cursor(&mut self, pane: PaneId, pos: Position) -> Result<(), HostError> {
        if self.pane(pane).is_none() {
            return Err(HostError::PaneGone(pane));
        }
        debug!("cursor → {pane} {pos}");
        self.cursor = Some((pane, pos));
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Option<String> {
        match self.ask(text) {
            Ok(entry) => entry,
            Err(err) => {
                warn!("prompt failed: {err}");
                None
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
