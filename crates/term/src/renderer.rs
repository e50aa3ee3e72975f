//! Terminal output for the game view.
//!
//! Frames are composed in a [`FrameBuffer`] and encoded to crossterm commands
//! in a byte buffer before a single write. The first frame, and any frame
//! after a resize, repaints the whole screen; later frames only repaint the
//! runs of glyphs that changed.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{self, Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use blockfall_driver::Renderer;

use crate::core::{GameSnapshot, LockEvent};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::game_view::{GameView, Viewport};

/// Used when the terminal size cannot be queried.
const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// A horizontal span of changed glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

pub struct TerminalRenderer {
    out: io::Stdout,
    bytes: Vec<u8>,
    view: GameView,
    /// Frame being composed.
    pending: FrameBuffer,
    /// Frame currently on screen, if any.
    shown: Option<FrameBuffer>,
    bonus: ClearBonus,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            bytes: Vec::with_capacity(16 * 1024),
            view: GameView::default(),
            pending: FrameBuffer::new(0, 0),
            shown: None,
            bonus: ClearBonus::default(),
        }
    }

    /// Switch to raw mode on the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.bytes.clear();
        self.bytes
            .queue(terminal::EnterAlternateScreen)?
            .queue(terminal::DisableLineWrap)?
            .queue(cursor::Hide)?;
        self.write_out()?;
        self.shown = None;
        Ok(())
    }

    /// Restore the terminal to its normal state.
    pub fn exit(&mut self) -> Result<()> {
        self.bytes.clear();
        self.bytes
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(cursor::Show)?
            .queue(terminal::EnableLineWrap)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.write_out()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.bytes.clear();
        match self.shown.as_mut() {
            Some(shown) if same_dimensions(shown, &self.pending) => {
                encode_diff_into(shown, &self.pending, &mut self.bytes)?;
                // The old frame becomes the scratch buffer for the next one.
                std::mem::swap(shown, &mut self.pending);
            }
            _ => {
                encode_full_into(&self.pending, &mut self.bytes)?;
                self.shown = Some(self.pending.clone());
            }
        }
        self.write_out()
    }

    fn write_out(&mut self) -> Result<()> {
        self.out.write_all(&self.bytes)?;
        self.out.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TerminalRenderer {
    fn draw(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        let (width, height) = terminal::size().unwrap_or(FALLBACK_SIZE);
        let bonus = self.bonus.visible(snapshot);
        self.view
            .render_into(snapshot, bonus, Viewport::new(width, height), &mut self.pending);
        self.present()
    }

    fn on_lock(&mut self, event: &LockEvent) {
        self.bonus.record(event);
    }
}

/// Points from the latest line clear, shown under the score until the next
/// clear or the next game.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ClearBonus {
    game_id: u32,
    points: Option<u32>,
}

impl ClearBonus {
    fn record(&mut self, event: &LockEvent) {
        if event.lines_cleared > 0 {
            self.points = Some(event.points);
        }
    }

    fn visible(&mut self, snapshot: &GameSnapshot) -> Option<u32> {
        if snapshot.game_id != self.game_id {
            self.game_id = snapshot.game_id;
            self.points = None;
        }
        self.points.filter(|_| snapshot.playable())
    }
}

/// Tracks the active style so consecutive glyphs of one style share a
/// single set of color commands.
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<Style>,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn move_to(&mut self, x: u16, y: u16) -> io::Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        Ok(())
    }

    fn glyph(&mut self, glyph: Glyph) -> io::Result<()> {
        if self.style != Some(glyph.style) {
            let Style { fg, bg, bold } = glyph.style;
            self.out
                .queue(SetAttribute(Attribute::Reset))?
                .queue(SetForegroundColor(to_crossterm(fg)))?
                .queue(SetBackgroundColor(to_crossterm(bg)))?;
            if bold {
                self.out.queue(SetAttribute(Attribute::Bold))?;
            }
            self.style = Some(glyph.style);
        }
        self.out.queue(Print(glyph.ch))?;
        Ok(())
    }

    fn newline(&mut self) -> io::Result<()> {
        self.out.queue(Print("\r\n"))?;
        Ok(())
    }

    fn finish(self) -> io::Result<()> {
        self.out
            .queue(SetAttribute(Attribute::Reset))?
            .queue(ResetColor)?;
        Ok(())
    }
}

/// Encode a clear-and-repaint of the whole frame.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut painter = Painter::new(out);
    painter.move_to(0, 0)?;

    for y in 0..fb.height() {
        if y > 0 {
            painter.newline()?;
        }
        for x in 0..fb.width() {
            painter.glyph(fb.get(x, y).unwrap_or_default())?;
        }
    }
    painter.finish()?;
    Ok(())
}

/// Encode only the glyphs of `next` that differ from `prev`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut painter = Painter::new(out);
    for run in changed_runs(prev, next) {
        painter.move_to(run.x, run.y)?;
        for x in run.x..run.x + run.len {
            painter.glyph(next.get(x, run.y).unwrap_or_default())?;
        }
    }
    painter.finish()?;
    Ok(())
}

/// Spans of `next` that differ from `prev`, row by row. Every row is one
/// full-width run when the dimensions differ.
pub fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<Run> {
    let width = next.width();
    if !same_dimensions(prev, next) {
        return (0..next.height())
            .map(|y| Run { x: 0, y, len: width })
            .collect();
    }

    let mut runs = Vec::new();
    for y in 0..next.height() {
        let mut open: Option<u16> = None;
        for x in 0..width {
            let dirty = prev.get(x, y) != next.get(x, y);
            match (dirty, open) {
                (true, None) => open = Some(x),
                (false, Some(start)) => {
                    runs.push(Run { x: start, y, len: x - start });
                    open = None;
                }
                _ => {}
            }
        }
        if let Some(start) = open {
            runs.push(Run { x: start, y, len: width - start });
        }
    }
    runs
}

fn same_dimensions(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

fn to_crossterm(rgb: Rgb) -> style::Color {
    style::Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
