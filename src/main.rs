//! Terminal runner (default binary).
//!
//! Reads host configuration from the environment, sets up logging, then hands
//! the terminal to the driver loop until the player quits.

use std::fs::OpenOptions;

use anyhow::{Context, Result};
use log::info;

use blockfall::core::GameEngine;
use blockfall::driver::{Driver, DriverConfig};
use blockfall::input::TerminalInput;
use blockfall::term::TerminalRenderer;

fn main() -> Result<()> {
    let config = DriverConfig::from_env();
    init_logging(&config)?;

    let seed = config.resolve_seed();
    info!(
        "starting: seed={} tick={:?} frame={:?}",
        seed,
        config.tick_interval(),
        config.frame_interval
    );

    let mut driver = Driver::new(GameEngine::new(config.game, seed), config.frame_interval);
    let mut input = TerminalInput::new();
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = driver.run(&mut input, &mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to `BLOCKFALL_LOG_PATH` when set; stderr would scribble over the
/// alternate screen, so without a file only errors are let through by default.
fn init_logging(config: &DriverConfig) -> Result<()> {
    let default_filter = if config.log_path.is_some() {
        "info"
    } else {
        "error"
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));

    if let Some(path) = &config.log_path {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("failed to install logger")?;
    Ok(())
}
