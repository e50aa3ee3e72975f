//! Driver tests - the dispatch loop against scripted input and a recording renderer

use std::collections::VecDeque;
use std::time::Duration;

use anyhow::Result;

use blockfall::core::{GameEngine, GameSnapshot, LockEvent, Phase};
use blockfall::driver::{Driver, InputEvent, InputSource, Renderer};
use blockfall::types::{Command, GameConfig, ShapeKind};

const FRAME: Duration = Duration::from_millis(16);

/// Replays a fixed script, then asks to quit.
struct ScriptedInput {
    script: VecDeque<Option<InputEvent>>,
    timeouts: Vec<Duration>,
}

impl ScriptedInput {
    fn new(events: impl IntoIterator<Item = Option<InputEvent>>) -> Self {
        Self {
            script: events.into_iter().collect(),
            timeouts: Vec::new(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>> {
        self.timeouts.push(timeout);
        Ok(self.script.pop_front().unwrap_or(Some(InputEvent::Quit)))
    }
}

#[derive(Default)]
struct RecordingRenderer {
    frames: Vec<GameSnapshot>,
    locks: Vec<LockEvent>,
}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        self.frames.push(snapshot.clone());
        Ok(())
    }

    fn on_lock(&mut self, event: &LockEvent) {
        self.locks.push(*event);
    }
}

struct FailingRenderer;

impl Renderer for FailingRenderer {
    fn draw(&mut self, _snapshot: &GameSnapshot) -> Result<()> {
        anyhow::bail!("terminal went away")
    }
}

fn command(command: Command) -> Option<InputEvent> {
    Some(InputEvent::Command(command))
}

#[test]
fn test_quit_immediately_draws_one_frame() {
    let mut driver = Driver::new(GameEngine::new(GameConfig::default(), 1), FRAME);
    let mut input = ScriptedInput::new(Vec::<Option<InputEvent>>::new());
    let mut renderer = RecordingRenderer::default();

    driver.run(&mut input, &mut renderer).unwrap();

    assert_eq!(renderer.frames.len(), 1);
    assert_eq!(renderer.frames[0].phase, Phase::Idle);
    assert_eq!(driver.engine().phase(), Phase::Idle);
}

#[test]
fn test_start_command_starts_game_and_timer() {
    let mut driver = Driver::new(GameEngine::new(GameConfig::default(), 1), FRAME);
    let mut input = ScriptedInput::new([command(Command::Start), None]);
    let mut renderer = RecordingRenderer::default();

    driver.run(&mut input, &mut renderer).unwrap();

    assert!(driver.engine().is_running());
    assert!(driver.timer().is_active());
    assert_eq!(renderer.frames.len(), 3);
    assert_eq!(renderer.frames[0].phase, Phase::Idle);
    assert_eq!(renderer.frames[1].phase, Phase::Running);
    assert!(renderer.frames[1].active.is_some());
}

#[test]
fn test_poll_timeout_never_exceeds_frame_interval() {
    let mut driver = Driver::new(GameEngine::new(GameConfig::default(), 1), FRAME);
    let mut input = ScriptedInput::new([
        None,
        command(Command::Start),
        None,
        command(Command::MoveRight),
        None,
    ]);
    let mut renderer = RecordingRenderer::default();

    driver.run(&mut input, &mut renderer).unwrap();

    assert_eq!(input.timeouts.len(), 6);
    assert!(input.timeouts.iter().all(|&t| t <= FRAME));
    // Idle: nothing to wait for but the next frame.
    assert_eq!(input.timeouts[0], FRAME);
}

#[test]
fn test_lock_events_reach_renderer() {
    let config = GameConfig {
        grid_width: 1,
        grid_height: 4,
        ..GameConfig::default()
    };
    let seed = (1..100_000)
        .find(|&seed| {
            let mut engine = GameEngine::new(config, seed);
            engine.start();
            engine.active().map(|p| p.kind()) == Some(ShapeKind::I)
        })
        .expect("no seed opens with an I");

    let mut driver = Driver::new(GameEngine::new(config, seed), FRAME);
    let mut input = ScriptedInput::new([command(Command::Start), command(Command::SoftDrop)]);
    let mut renderer = RecordingRenderer::default();

    driver.run(&mut input, &mut renderer).unwrap();

    assert_eq!(renderer.locks.len(), 1);
    assert_eq!(renderer.locks[0].lines_cleared, 4);
    assert_eq!(renderer.locks[0].points, 4000);
    assert_eq!(driver.engine().score(), 4000);
    assert_eq!(renderer.frames.last().unwrap().score, 4000);
}

#[test]
fn test_commands_before_start_are_ignored() {
    let mut driver = Driver::new(GameEngine::new(GameConfig::default(), 1), FRAME);
    let mut input = ScriptedInput::new([
        command(Command::MoveLeft),
        command(Command::RotateCw),
        command(Command::SoftDrop),
    ]);
    let mut renderer = RecordingRenderer::default();

    driver.run(&mut input, &mut renderer).unwrap();

    assert_eq!(driver.engine().phase(), Phase::Idle);
    assert!(!driver.timer().is_active());
    assert!(renderer.locks.is_empty());
}

#[test]
fn test_render_error_stops_loop() {
    let mut driver = Driver::new(GameEngine::new(GameConfig::default(), 1), FRAME);
    let mut input = ScriptedInput::new([command(Command::Start)]);

    let err = driver.run(&mut input, &mut FailingRenderer).unwrap_err();

    assert!(err.to_string().contains("terminal went away"));
    assert!(input.timeouts.is_empty());
}
