//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`] and exposes a
//! [`TerminalInput`] source for the driver loop.

pub mod map;
pub mod terminal;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
pub use terminal::{translate_key, TerminalInput};
