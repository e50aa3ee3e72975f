//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so the binary, the
//! integration tests and the benchmarks can use `blockfall::{core, driver,
//! input, term, types}`.

pub use blockfall_core as core;
pub use blockfall_driver as driver;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
