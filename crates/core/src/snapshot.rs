use crate::engine::Phase;
use crate::piece::Piece;
use crate::types::{Cell, Color, ShapeKind, ShapeOffsets};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub color: Color,
    pub coords: ShapeOffsets,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind(),
            color: value.color(),
            coords: *value.coords(),
        }
    }
}

/// Read-only view of the engine handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Settled cells, row-major.
    pub cells: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub phase: Phase,
    pub game_id: u32,
}

impl GameSnapshot {
    /// Settled cell at (x, y); `None` when empty or out of bounds.
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x]
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Lost
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Running
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            active: None,
            score: 0,
            phase: Phase::Idle,
            game_id: 0,
        }
    }
}
