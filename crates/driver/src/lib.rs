//! Clock and command driver.
//!
//! Connects the deterministic engine to the outside world: a cancellable
//! periodic tick source, a single-threaded dispatch loop, and the two seams
//! collaborators plug into.
//!
//! - [`timer`]: periodic tick source that is started and stopped with the
//!   engine's Running phase
//! - [`driver`]: the loop plus the [`InputSource`] and [`Renderer`] traits
//! - [`config`]: environment-driven host configuration
//!
//! Everything runs on the caller's thread. A handler always completes before
//! the next event is looked at, so the engine needs no locking.

pub mod config;
pub mod driver;
pub mod timer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use config::DriverConfig;
pub use driver::{Driver, InputEvent, InputSource, Renderer};
pub use timer::TickTimer;
