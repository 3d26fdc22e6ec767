use std::time::Duration;

use river_run_core::{
    Command, Direction, Event, GridConfig, PlayerPosition, PlayerStatus, SessionOutcome,
};
use river_run_world::{self as world, query, World};

#[test]
fn deterministic_replay_produces_identical_sequence() {
    let first = replay(scripted_commands());
    let second = replay(scripted_commands());

    assert_eq!(first.events, second.events, "replay diverged between runs");
    assert_eq!(first.player, second.player);
    assert_eq!(first.outcome, second.outcome);
}

#[test]
fn scripted_crossing_attempt_ends_in_exactly_one_death() {
    let outcome = replay(scripted_commands());

    let drowned = outcome
        .events
        .iter()
        .filter(|event| matches!(event, Event::PlayerDrowned))
        .count();
    assert_eq!(drowned, 1, "death must be announced exactly once");

    assert_eq!(outcome.outcome, SessionOutcome::GameOver);
    assert_eq!(outcome.player.status, PlayerStatus::Dead);
    assert_eq!(outcome.player.position, PlayerPosition::new(12.0, -1.5, 2.0));
}

#[test]
fn ticks_after_death_stay_silent() {
    let mut world = World::new();
    let mut log = Vec::new();
    for command in scripted_commands() {
        let mut events = Vec::new();
        world::apply(&mut world, command, &mut events);
        log.push(events);
    }

    let trailing = log.last().expect("script is non-empty");
    assert!(trailing.is_empty(), "a dead session emits no further events");
}

fn replay(commands: Vec<Command>) -> ReplayOutcome {
    let mut world = World::new();
    let mut log = Vec::new();

    for command in commands {
        let mut events = Vec::new();
        world::apply(&mut world, command, &mut events);
        log.extend(events);
    }

    ReplayOutcome {
        events: log,
        player: query::player(&world),
        outcome: query::session_outcome(&world),
    }
}

/// Walks the player off the left bank into the channel while the boat sits at
/// a different row, then keeps ticking until well past the death transition.
fn scripted_commands() -> Vec<Command> {
    let mut commands = vec![Command::ConfigureGrid {
        config: GridConfig::default(),
    }];

    for (direction, seconds) in [
        (Direction::Right, 0),
        (Direction::Up, 1),
        (Direction::Down, 2),
        (Direction::Right, 3),
        (Direction::Right, 3),
        (Direction::Right, 4),
        (Direction::Right, 4),
    ] {
        commands.push(Command::QueueMove { direction });
        commands.push(Command::Tick {
            elapsed: Duration::from_secs(seconds),
        });
    }

    // Sinking through the death threshold plus two frames past it.
    for frame in 0..10 {
        commands.push(Command::Tick {
            elapsed: Duration::from_secs(5 + frame),
        });
    }

    commands
}

#[derive(Debug)]
struct ReplayOutcome {
    events: Vec<Event>,
    player: query::PlayerSnapshot,
    outcome: SessionOutcome,
}
