//! Engine module - the game state machine
//!
//! Ties together the grid, the active piece, the RNG and the score. The
//! engine runs the spawn → fall → lock → clear → respawn cycle and owns loss
//! detection:
//!
//! ```text
//!   Idle --start--> Running --spawn blocked--> Lost
//!                      ^                         |
//!                      +---------start-----------+
//! ```
//!
//! Every entry point runs to completion; the engine never blocks. Ticks and
//! movement commands outside `Running` are ignored, so a tick delivered after
//! the loss transition cannot touch the grid.

use log::{debug, info, trace};

use crate::grid::Grid;
use crate::piece::Piece;
use crate::rng::SimpleRng;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Command, GameConfig};

/// Lifecycle phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Waiting for the first start command
    Idle,
    /// Gravity ticks and player commands are live
    Running,
    /// A fresh piece could not be placed; waiting for a restart
    Lost,
}

/// Result of a gravity tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The engine is not running; nothing changed
    Ignored,
    /// The active piece moved down one row
    Fell,
    /// The active piece locked and a new piece spawned
    Locked { lines_cleared: u32 },
    /// The active piece locked and the next piece could not be placed
    Lost { lines_cleared: u32 },
}

/// Emitted whenever a piece locks (consumed by the score display).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub points: u32,
    pub score: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    active: Option<Piece>,
    rng: SimpleRng,
    score: u32,
    phase: Phase,
    /// Monotonic game id (increments on every start).
    game_id: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameEngine {
    /// Create an idle engine with the given RNG seed
    pub fn new(config: GameConfig, seed: u32) -> Self {
        Self {
            config,
            grid: Grid::new(config.grid_width, config.grid_height),
            active: None,
            rng: SimpleRng::new(seed),
            score: 0,
            phase: Phase::Idle,
            game_id: 0,
            last_event: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Lost
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    /// Start a fresh game: empty grid, zero score, new piece.
    ///
    /// Works from `Idle` and from `Lost` (restart). Ignored while running.
    pub fn start(&mut self) -> bool {
        if self.phase == Phase::Running {
            return false;
        }

        self.grid = Grid::new(self.config.grid_width, self.config.grid_height);
        self.score = 0;
        self.active = None;
        self.last_event = None;
        self.game_id = self.game_id.wrapping_add(1);
        self.phase = Phase::Running;
        info!("game {} started", self.game_id);

        self.spawn_piece();
        true
    }

    /// Move the active piece down one row, locking it if it cannot move.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Ignored;
        }
        let Some(mut piece) = self.active else {
            return TickOutcome::Ignored;
        };

        piece.translate(0, 1);
        if !self.below_floor(&piece) && !self.grid.collides(&piece) {
            self.active = Some(piece);
            return TickOutcome::Fell;
        }

        let lines_cleared = self.lock_active();
        if self.phase == Phase::Lost {
            TickOutcome::Lost { lines_cleared }
        } else {
            TickOutcome::Locked { lines_cleared }
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1)
    }

    /// Rotate the active piece a quarter turn; rejected moves are undone with
    /// the inverse rotation.
    pub fn rotate_cw(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        piece.rotate(90.0);
        if self.fits(&piece) {
            self.active = Some(piece);
            return true;
        }

        piece.rotate(-90.0);
        trace!("rotation rejected for {:?}", piece.kind());
        self.active = Some(piece);
        false
    }

    /// One manual gravity step.
    pub fn soft_drop(&mut self) -> TickOutcome {
        self.tick()
    }

    /// Dispatch a player command. Returns whether the state changed.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::RotateCw => self.rotate_cw(),
            Command::SoftDrop => self.soft_drop() != TickOutcome::Ignored,
            Command::Start => self.start(),
        }
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.grid.cells());
        out.active = self.active.map(ActiveSnapshot::from);
        out.score = self.score;
        out.phase = self.phase;
        out.game_id = self.game_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn try_move(&mut self, dx: i32) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        piece.translate(dx, 0);
        if self.fits(&piece) {
            self.active = Some(piece);
            true
        } else {
            trace!("move by {} rejected", dx);
            false
        }
    }

    /// Write the active piece into the grid, clear lines, score, respawn.
    fn lock_active(&mut self) -> u32 {
        let Some(piece) = self.active.take() else {
            return 0;
        };

        self.grid.lock(&piece);
        let lines_cleared = self.grid.clear_full_lines() as u32;
        let points = lines_cleared.saturating_mul(self.config.line_clear_points);
        self.score = self.score.saturating_add(points);
        debug!(
            "locked {:?} at {:?}, cleared {} line(s), score {}",
            piece.kind(),
            piece.coords(),
            lines_cleared,
            self.score
        );

        self.last_event = Some(LockEvent {
            lines_cleared,
            points,
            score: self.score,
        });

        self.spawn_piece();
        lines_cleared
    }

    /// Spawn the next piece; a blocked spawn ends the game.
    fn spawn_piece(&mut self) {
        let piece = Piece::spawn(&mut self.rng);
        let blocked = !self.fits(&piece);
        self.active = Some(piece);

        if blocked {
            self.phase = Phase::Lost;
            info!(
                "game {} lost with score {} ({:?} could not spawn)",
                self.game_id,
                self.score,
                piece.kind()
            );
        }
    }

    /// Bounds and collision check for a candidate placement.
    ///
    /// Horizontal bounds are checked on both sides, vertical bounds only
    /// against the floor. Bounds are checked before the grid so it is never
    /// indexed past the floor or the side walls.
    fn fits(&self, piece: &Piece) -> bool {
        self.within_walls(piece) && !self.below_floor(piece) && !self.grid.collides(piece)
    }

    fn within_walls(&self, piece: &Piece) -> bool {
        let width = self.config.grid_width as i32;
        piece.coords().iter().all(|&(x, _)| 0 <= x && x < width)
    }

    fn below_floor(&self, piece: &Piece) -> bool {
        let height = self.config.grid_height as i32;
        piece.coords().iter().any(|&(_, y)| y >= height)
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(GameConfig::default(), 1)
    }
}
