//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules and state machine. It has no
//! dependencies on terminals, timers or I/O, which makes it:
//!
//! - **Deterministic**: the same seed produces the same sequence of pieces
//! - **Testable**: every rule is exercised without a display
//! - **Portable**: a host only has to deliver ticks and commands
//!
//! # Module Structure
//!
//! - [`piece`]: the active polyomino, translation and pivot rotation
//! - [`grid`]: settled cells, collision queries and line clearing
//! - [`engine`]: the Idle/Running/Lost state machine and scoring
//! - [`rng`]: seeded uniform selection of shapes and colors
//! - [`snapshot`]: read-only view handed to renderers
//!
//! # Game Rules
//!
//! - A new piece appears at its catalog offsets in the top-left corner, with a
//!   random shape and an independent random color
//! - Every tick moves the piece down one row; when it cannot move it locks
//! - Full rows are removed and everything above drops by one
//! - Each cleared line scores 1000 points
//! - The game is lost when a freshly spawned piece does not fit
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameEngine, Phase};
//! use blockfall_types::{Command, GameConfig};
//!
//! let mut game = GameEngine::new(GameConfig::default(), 12345);
//! assert_eq!(game.phase(), Phase::Idle);
//!
//! game.apply(Command::Start);
//! game.apply(Command::MoveRight);
//! game.apply(Command::RotateCw);
//! game.tick();
//!
//! assert!(game.is_running());
//! assert_eq!(game.score(), 0);
//! ```

pub mod engine;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod snapshot;

pub use blockfall_types as types;

pub use engine::{GameEngine, LockEvent, Phase, TickOutcome};
pub use grid::Grid;
pub use piece::Piece;
pub use rng::SimpleRng;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
