//! Engine tests - full games driven through the public API

use blockfall::core::{GameEngine, Phase, TickOutcome};
use blockfall::types::{Command, GameConfig, ShapeKind};

/// A board one column wide and four rows tall: only a vertical I fits.
fn single_column() -> GameConfig {
    GameConfig {
        grid_width: 1,
        grid_height: 4,
        ..GameConfig::default()
    }
}

/// First seed whose opening piece is `kind` and whose engine passes `accept`.
fn find_seed(config: GameConfig, kind: ShapeKind, accept: impl Fn(&mut GameEngine) -> bool) -> u32 {
    (1..100_000)
        .find(|&seed| {
            let mut engine = GameEngine::new(config, seed);
            engine.start();
            engine.active().map(|p| p.kind()) == Some(kind) && accept(&mut engine)
        })
        .expect("no matching seed")
}

fn tick_until_settled(engine: &mut GameEngine) -> (u32, TickOutcome) {
    let mut falls = 0;
    loop {
        match engine.tick() {
            TickOutcome::Fell => falls += 1,
            outcome => return (falls, outcome),
        }
    }
}

#[test]
fn test_bar_falls_to_floor_and_locks() {
    let config = GameConfig::default();
    let seed = find_seed(config, ShapeKind::I, |_| true);
    let mut engine = GameEngine::new(config, seed);
    engine.start();
    let color = engine.active().unwrap().color();

    let (falls, outcome) = tick_until_settled(&mut engine);

    assert_eq!(falls, 16);
    assert_eq!(outcome, TickOutcome::Locked { lines_cleared: 0 });
    assert_eq!(engine.score(), 0);
    for y in 16..20 {
        assert_eq!(engine.grid().get(0, y), Some(Some(color)));
    }
    assert_eq!(engine.grid().occupied_count(), 4);

    // A fresh piece is waiting at the top.
    let next = engine.active().unwrap();
    assert_eq!(*next.coords(), next.kind().offsets());
}

#[test]
fn test_filling_every_row_scores_per_line() {
    let config = single_column();
    let seed = find_seed(config, ShapeKind::I, |_| true);
    let mut engine = GameEngine::new(config, seed);
    engine.start();
    assert!(engine.is_running());

    let outcome = engine.tick();
    let lines_cleared = match outcome {
        TickOutcome::Locked { lines_cleared } | TickOutcome::Lost { lines_cleared } => {
            lines_cleared
        }
        other => panic!("expected a lock, got {:?}", other),
    };

    assert_eq!(lines_cleared, 4);
    assert_eq!(engine.score(), 4000);
    assert!(engine.grid().is_empty());

    let event = engine.take_last_event().unwrap();
    assert_eq!(event.lines_cleared, 4);
    assert_eq!(event.points, 4000);
    assert_eq!(event.score, 4000);
}

#[test]
fn test_score_accumulates_across_locks() {
    let config = single_column();
    // Opening I followed by another I.
    let seed = find_seed(config, ShapeKind::I, |engine| {
        engine.tick();
        engine.is_running()
    });
    let mut engine = GameEngine::new(config, seed);
    engine.start();

    assert_eq!(engine.tick(), TickOutcome::Locked { lines_cleared: 4 });
    assert_eq!(engine.active().unwrap().kind(), ShapeKind::I);
    let outcome = engine.tick();
    assert!(matches!(
        outcome,
        TickOutcome::Locked { lines_cleared: 4 } | TickOutcome::Lost { lines_cleared: 4 }
    ));
    assert_eq!(engine.score(), 8000);
}

#[test]
fn test_soft_drop_is_one_gravity_step() {
    let mut a = GameEngine::new(GameConfig::default(), 31);
    let mut b = GameEngine::new(GameConfig::default(), 31);
    a.start();
    b.start();

    assert!(a.apply(Command::SoftDrop));
    assert_eq!(b.tick(), TickOutcome::Fell);
    assert_eq!(a.active(), b.active());
}

#[test]
fn test_unblocked_stacking_ends_in_loss() {
    let mut engine = GameEngine::new(GameConfig::default(), 5);
    engine.start();

    let mut outcome = TickOutcome::Fell;
    for _ in 0..10_000 {
        outcome = engine.tick();
        if matches!(outcome, TickOutcome::Lost { .. }) {
            break;
        }
    }

    assert!(matches!(outcome, TickOutcome::Lost { lines_cleared: 0 }));
    assert_eq!(engine.phase(), Phase::Lost);
    assert!(engine.is_over());
    assert!(engine.grid().occupied_count() > 0);
}

#[test]
fn test_stray_ticks_after_loss_do_nothing() {
    let mut engine = GameEngine::new(GameConfig::default(), 5);
    engine.start();
    while engine.is_running() {
        engine.tick();
    }

    let grid = engine.grid().clone();
    let active = engine.active().copied();
    let score = engine.score();

    for _ in 0..10 {
        assert_eq!(engine.tick(), TickOutcome::Ignored);
    }
    assert!(!engine.apply(Command::MoveLeft));
    assert!(!engine.apply(Command::MoveRight));
    assert!(!engine.apply(Command::RotateCw));
    assert!(!engine.apply(Command::SoftDrop));

    assert_eq!(engine.grid(), &grid);
    assert_eq!(engine.active().copied(), active);
    assert_eq!(engine.score(), score);
    assert!(engine.take_last_event().is_none());
}

#[test]
fn test_restart_after_loss() {
    let config = single_column();
    let seed = find_seed(config, ShapeKind::I, |_| true);
    let mut engine = GameEngine::new(config, seed);
    engine.start();
    while engine.is_running() {
        engine.tick();
    }
    assert!(engine.is_over());

    assert!(engine.apply(Command::Start));
    assert_eq!(engine.phase(), Phase::Running);
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.game_id(), 2);
    let piece = engine.active().unwrap();
    assert_eq!(*piece.coords(), piece.kind().offsets());
}

#[test]
fn test_spawn_blocked_on_first_piece() {
    // Nothing but a vertical I fits in a single column.
    let config = single_column();
    let seed = find_seed(config, ShapeKind::O, |_| true);
    let mut engine = GameEngine::new(config, seed);

    assert!(engine.start());
    assert!(engine.is_over());
    assert_eq!(engine.active().unwrap().kind(), ShapeKind::O);
    assert!(engine.grid().is_empty());
    assert_eq!(engine.tick(), TickOutcome::Ignored);
}

#[test]
fn test_snapshot_tracks_engine() {
    let mut engine = GameEngine::new(GameConfig::default(), 11);
    let snap = engine.snapshot();
    assert_eq!(snap.phase, Phase::Idle);
    assert!(snap.active.is_none());

    engine.start();
    engine.tick();
    let snap = engine.snapshot();
    assert!(snap.playable());
    assert_eq!(snap.active.unwrap().coords, *engine.active().unwrap().coords());
    assert_eq!(snap.cells.len(), 200);
    assert_eq!(snap.game_id, 1);
}
