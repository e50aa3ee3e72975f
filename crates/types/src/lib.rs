//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the game.
//! All types are pure data with no external dependencies, so they can be used
//! from the engine core, the driver, input mapping and rendering alike.
//!
//! # Grid Dimensions
//!
//! Classic playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_INTERVAL_MS` | 800 | Gravity: one row per tick |
//! | `FRAME_MS` | 16 | Render/poll interval (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameConfig, ShapeKind, GRID_HEIGHT, GRID_WIDTH};
//!
//! let config = GameConfig::default();
//! assert_eq!(config.grid_width, GRID_WIDTH);
//! assert_eq!(config.grid_height, GRID_HEIGHT);
//! assert_eq!(ShapeKind::I.offsets(), [(0, 0), (0, 1), (0, 2), (0, 3)]);
//! ```

/// Grid width in cells (10 columns)
pub const GRID_WIDTH: usize = 10;

/// Grid height in cells (20 rows)
pub const GRID_HEIGHT: usize = 20;

/// Interval between gravity ticks in milliseconds
pub const TICK_INTERVAL_MS: u32 = 800;

/// Render/input poll interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Points awarded per cleared line
pub const LINE_CLEAR_POINTS: u32 = 1000;

/// Integer grid coordinate `(x, y)`; `y` grows downwards.
pub type Coord = (i32, i32);

/// The four cells of a polyomino.
pub type ShapeOffsets = [Coord; 4];

/// Block colors
///
/// Colors are chosen independently of the shape, so any piece kind can show
/// up in any color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Purple,
}

impl Color {
    /// The full palette, in catalog order.
    pub const ALL: [Color; 7] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Cyan,
        Color::Blue,
        Color::Purple,
    ];
}

/// The seven shapes of the classic catalog
///
/// Each shape is four fixed offsets; a freshly spawned piece sits exactly on
/// them, in the top-left corner of the grid:
///
/// ```text
/// Z  ##.    S  .##    I  #    L  #.    J  .#    T  #.    O  ##
///    .##       ##.       #       #.       .#       ##       ##
///                        #       ##       ##       #.
///                        #
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Z,
    S,
    I,
    L,
    J,
    T,
    O,
}

impl ShapeKind {
    /// The full catalog, in catalog order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Z,
        ShapeKind::S,
        ShapeKind::I,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::T,
        ShapeKind::O,
    ];

    /// Native cell offsets for this shape
    pub fn offsets(&self) -> ShapeOffsets {
        match self {
            ShapeKind::Z => [(0, 0), (1, 0), (1, 1), (2, 1)],
            ShapeKind::S => [(0, 1), (1, 1), (1, 0), (2, 0)],
            ShapeKind::I => [(0, 0), (0, 1), (0, 2), (0, 3)],
            ShapeKind::L => [(0, 0), (0, 1), (0, 2), (1, 2)],
            ShapeKind::J => [(1, 0), (1, 1), (1, 2), (0, 2)],
            ShapeKind::T => [(0, 0), (0, 1), (1, 1), (0, 2)],
            ShapeKind::O => [(0, 0), (0, 1), (1, 0), (1, 1)],
        }
    }
}

/// Cell in the grid (None = empty, Some = settled block of that color)
pub type Cell = Option<Color>;

/// Logical player commands
///
/// These are the only legal entry points from input into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    RotateCw,
    SoftDrop,
    Start,
}

/// Immutable game configuration held by the engine.
///
/// The runner always plays the classic 10x20 setup and may only change the
/// tick interval. Smaller grids are for tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    pub tick_interval_ms: u32,
    pub line_clear_points: u32,
}

impl GameConfig {
    /// Classic configuration with a different tick interval.
    pub fn with_tick_interval_ms(self, tick_interval_ms: u32) -> Self {
        Self {
            tick_interval_ms,
            ..self
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            tick_interval_ms: TICK_INTERVAL_MS,
            line_clear_points: LINE_CLEAR_POINTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 10);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.tick_interval_ms, 800);
        assert_eq!(config.line_clear_points, 1000);
    }

    #[test]
    fn tick_override_keeps_classic_grid() {
        let config = GameConfig::default().with_tick_interval_ms(250);
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.grid_width, GRID_WIDTH);
        assert_eq!(config.grid_height, GRID_HEIGHT);
    }

    #[test]
    fn every_shape_has_four_distinct_cells() {
        for kind in ShapeKind::ALL {
            let offsets = kind.offsets();
            for i in 0..4 {
                for j in (i + 1)..4 {
                    assert_ne!(offsets[i], offsets[j], "{:?} repeats a cell", kind);
                }
            }
        }
    }
}
