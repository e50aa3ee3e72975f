//! Command dispatch loop.
//!
//! The driver owns the engine and the tick timer and is the only thing that
//! mutates the engine. Input and rendering sit behind the [`InputSource`] and
//! [`Renderer`] traits so the loop can be driven by a terminal or by a test.

use std::time::{Duration, Instant};

use anyhow::Result;
use log::{debug, info};

use blockfall_core::{GameEngine, GameSnapshot, LockEvent, TickOutcome};
use blockfall_types::Command;

use crate::timer::TickTimer;

/// What an input source can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Command(Command),
    Quit,
}

/// Producer of logical commands.
pub trait InputSource {
    /// Wait up to `timeout` for the next event.
    fn poll_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>>;
}

/// Consumer of engine state. Called once per frame with a fresh snapshot.
pub trait Renderer {
    fn draw(&mut self, snapshot: &GameSnapshot) -> Result<()>;

    /// Called after every lock, with the updated score.
    fn on_lock(&mut self, _event: &LockEvent) {}
}

pub struct Driver {
    engine: GameEngine,
    timer: TickTimer,
    snapshot: GameSnapshot,
    frame_interval: Duration,
}

impl Driver {
    pub fn new(engine: GameEngine, frame_interval: Duration) -> Self {
        let interval = Duration::from_millis(engine.config().tick_interval_ms as u64);
        Self {
            engine,
            timer: TickTimer::new(interval),
            snapshot: GameSnapshot::default(),
            frame_interval,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    /// Apply a player command at `now`. Returns whether the state changed.
    pub fn dispatch(&mut self, command: Command, now: Instant) -> bool {
        let changed = self.engine.apply(command);
        self.sync_timer(now);
        changed
    }

    /// Deliver a gravity tick if one is due at `now`.
    pub fn advance(&mut self, now: Instant) -> TickOutcome {
        if !self.timer.poll(now) {
            return TickOutcome::Ignored;
        }
        let outcome = self.engine.tick();
        self.sync_timer(now);
        outcome
    }

    /// Keep the timer in lockstep with the engine phase: running iff the
    /// engine is running.
    fn sync_timer(&mut self, now: Instant) {
        match (self.engine.is_running(), self.timer.is_active()) {
            (true, false) => {
                debug!("tick timer started ({:?})", self.timer.interval());
                self.timer.start(now);
            }
            (false, true) => {
                debug!("tick timer stopped");
                self.timer.stop();
            }
            _ => {}
        }
    }

    /// Forward pending lock events to the renderer.
    fn flush_events(&mut self, renderer: &mut impl Renderer) {
        if let Some(event) = self.engine.take_last_event() {
            if event.lines_cleared > 0 {
                info!(
                    "cleared {} line(s), +{} (score {})",
                    event.lines_cleared, event.points, event.score
                );
            }
            renderer.on_lock(&event);
        }
    }

    /// Run until the input source asks to quit.
    pub fn run(
        &mut self,
        input: &mut impl InputSource,
        renderer: &mut impl Renderer,
    ) -> Result<()> {
        loop {
            // Render.
            self.engine.snapshot_into(&mut self.snapshot);
            renderer.draw(&self.snapshot)?;

            // Input with timeout until next tick or frame.
            let timeout = self
                .timer
                .time_until_due(Instant::now())
                .map_or(self.frame_interval, |d| d.min(self.frame_interval));

            match input.poll_event(timeout)? {
                Some(InputEvent::Quit) => {
                    info!("quit requested");
                    return Ok(());
                }
                Some(InputEvent::Command(command)) => {
                    self.dispatch(command, Instant::now());
                }
                None => {}
            }
            self.flush_events(renderer);

            // Tick.
            self.advance(Instant::now());
            self.flush_events(renderer);
        }
    }
}
