//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Phase};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::Color;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const PLAYFIELD_BG: Rgb = Rgb::new(221, 221, 221);
const DOT_FG: Rgb = Rgb::new(190, 190, 190);
const PANEL_FG: Rgb = Rgb::new(220, 220, 220);
const BLACK: Rgb = Rgb::new(0, 0, 0);

/// A lightweight terminal view of the game.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

/// Where the playfield landed inside the viewport.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render into a fresh framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, None, viewport, &mut fb);
        fb
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// `last_points` is the score delta of the most recent line clear, if
    /// the caller wants it shown.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        last_points: Option<u32>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        if fb.width() != viewport.width || fb.height() != viewport.height {
            fb.resize(viewport.width, viewport.height);
        }
        fb.fill(Glyph::default());

        let board_w = snap.width as u16 * self.cell_w;
        let board_h = snap.height as u16 * self.cell_h;
        let frame = Frame {
            x: viewport.width.saturating_sub(board_w + 2) / 2,
            y: viewport.height.saturating_sub(board_h + 2) / 2,
            w: board_w + 2,
            h: board_h + 2,
        };

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            board_w,
            board_h,
            ' ',
            Style::new(DOT_FG, PLAYFIELD_BG),
        );
        self.draw_border(fb, frame, Style::default());

        // Settled cells.
        for y in 0..snap.height {
            for x in 0..snap.width {
                match snap.cell(x, y) {
                    Some(color) => self.draw_block(fb, frame, x as i32, y as i32, color),
                    None => self.fill_cell(
                        fb,
                        frame,
                        x as u16,
                        y as u16,
                        '·',
                        Style::new(DOT_FG, PLAYFIELD_BG),
                    ),
                }
            }
        }

        // Active piece (cells above or outside the grid are not drawn).
        if let Some(active) = snap.active {
            for &(x, y) in active.coords.iter() {
                if x >= 0 && (x as usize) < snap.width && y >= 0 && (y as usize) < snap.height {
                    self.draw_block(fb, frame, x, y, active.color);
                }
            }
        }

        self.draw_side_panel(fb, snap, last_points, viewport, frame);

        match snap.phase {
            Phase::Idle => self.draw_overlay(
                fb,
                frame,
                ("BLOCKFALL", Style::new(Rgb::new(255, 255, 255), BLACK).bold()),
                "Press space bar to start",
            ),
            Phase::Lost => self.draw_overlay(
                fb,
                frame,
                ("You LOST!!!", Style::new(Rgb::new(230, 40, 40), BLACK).bold()),
                "Press space bar to try again",
            ),
            Phase::Running => {}
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: Style) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put(x, y, '┌', style);
        fb.put(x + w - 1, y, '┐', style);
        fb.put(x, y + h - 1, '└', style);
        fb.put(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put(x + dx, y, '─', style);
            fb.put(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put(x, y + dy, '│', style);
            fb.put(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: i32, y: i32, color: Color) {
        let style = Style::new(color_rgb(color), PLAYFIELD_BG).bold();
        self.fill_cell(fb, frame, x as u16, y as u16, '█', style);
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, ch: char, style: Style) {
        let px = frame.x + 1 + x * self.cell_w;
        let py = frame.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        last_points: Option<u32>,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = Style::new(PANEL_FG, BLACK).bold();
        let value = Style::new(PANEL_FG, BLACK);

        let mut y = frame.y;
        fb.put_str(panel_x, y, &format!("Score: {}", snap.score), label);
        y = y.saturating_add(1);
        if let Some(points) = last_points {
            fb.put_str(panel_x, y, &format!("+{}", points), value);
        }
        y = y.saturating_add(2);

        if snap.game_id > 0 {
            fb.put_str(panel_x, y, &format!("Game #{}", snap.game_id), value);
            y = y.saturating_add(2);
        }

        for line in ["←/a  →/d  move", "↑/w  rotate", "↓/s  drop", "space start", "q    quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, value);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        title: (&str, Style),
        hint: &str,
    ) {
        let text_style = Style::new(Rgb::new(255, 255, 255), BLACK);
        let (title, title_style) = title;

        let title_y = frame.y.saturating_add(frame.h / 3);
        let hint_y = frame.y.saturating_add(frame.h * 2 / 3);
        fb.put_str(centered(frame, title), title_y, title, title_style);
        fb.put_str(centered(frame, hint), hint_y, hint, text_style);
    }
}

fn centered(frame: Frame, text: &str) -> u16 {
    let text_w = text.chars().count() as u16;
    frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2)
}

/// Terminal color for a block color.
pub fn color_rgb(color: Color) -> Rgb {
    match color {
        Color::Red => Rgb::new(220, 50, 50),
        Color::Orange => Rgb::new(255, 165, 0),
        Color::Yellow => Rgb::new(240, 220, 60),
        Color::Green => Rgb::new(60, 180, 75),
        Color::Cyan => Rgb::new(60, 210, 220),
        Color::Blue => Rgb::new(60, 90, 220),
        Color::Purple => Rgb::new(150, 70, 200),
    }
}
