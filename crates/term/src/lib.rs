//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It avoids
//! widget/layout libraries and renders into a simple framebuffer that is then
//! flushed to the terminal with crossterm.
//!
//! - [`fb`]: framebuffer and styles
//! - [`game_view`]: pure mapping from a game snapshot to a framebuffer
//! - [`renderer`]: the [`blockfall_driver::Renderer`] that owns the terminal

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{color_rgb, GameView, Viewport};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, Run, TerminalRenderer};
