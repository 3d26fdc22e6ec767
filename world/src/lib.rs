#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for River Run.
//!
//! The world owns every gameplay entity: the static tile grid, the player,
//! the boat, and the single buffered pending move. Adapters mutate it
//! exclusively through [`apply`] and read it back through [`query`], which
//! keeps the per-frame rule engine a deterministic function of the submitted
//! commands.

pub mod boat;
mod grid;

pub use grid::{Tile, TileGrid};

use river_run_core::{
    BoatPosition, Command, Direction, Event, GridConfig, PlayerPosition, PlayerStatus,
    DEATH_DEPTH, SINK_RATE, WELCOME_BANNER,
};

const PLAYER_START: PlayerPosition = PlayerPosition::new(2.0, 2.0, 2.0);

/// Represents the authoritative River Run world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: TileGrid,
    player: Player,
    boat: BoatPosition,
    pending_move: Option<Direction>,
}

impl World {
    /// Creates a new world using the default board layout.
    #[must_use]
    pub fn new() -> Self {
        let config = GridConfig::default();
        Self {
            banner: WELCOME_BANNER,
            grid: TileGrid::build(config),
            player: Player::at_start(),
            boat: boat::position(std::time::Duration::ZERO, config.water().span_start()),
            pending_move: None,
        }
    }

    fn reset_session(&mut self, config: GridConfig) {
        self.grid = TileGrid::build(config);
        self.player = Player::at_start();
        self.boat = boat::position(std::time::Duration::ZERO, config.water().span_start());
        self.pending_move = None;
    }

    fn advance_frame(&mut self, elapsed: std::time::Duration, out_events: &mut Vec<Event>) {
        if self.player.status == PlayerStatus::Dead {
            return;
        }

        out_events.push(Event::TimeAdvanced { elapsed });

        let config = *self.grid.config();
        let next_boat = boat::position(elapsed, config.water().span_start());
        if next_boat != self.boat {
            out_events.push(Event::BoatMoved {
                from: self.boat,
                to: next_boat,
            });
            self.boat = next_boat;
        }

        // The death transition is evaluated before anything else becomes
        // observable this frame.
        if self.player.position.y < DEATH_DEPTH {
            self.player.status = PlayerStatus::Dead;
            out_events.push(Event::PlayerDrowned);
            return;
        }

        // One-way transition: a boat row that later coincides with the player
        // does not rescue someone already sinking.
        if self.player.status == PlayerStatus::Drowning || self.drowning_condition(&config) {
            self.player.status = PlayerStatus::Drowning;
            self.player.position.y -= SINK_RATE;
            self.pending_move = None;
            out_events.push(Event::PlayerSinking {
                depth: self.player.position.y,
            });
            return;
        }

        self.player.status = PlayerStatus::Safe;
        if let Some(direction) = self.pending_move.take() {
            let from = self.player.position;
            let (dx, dz) = direction.delta();
            self.player.position.x += dx;
            self.player.position.z += dz;
            out_events.push(Event::PlayerStepped {
                from,
                to: self.player.position,
            });
        }
    }

    fn drowning_condition(&self, config: &GridConfig) -> bool {
        let position = self.player.position;
        if out_of_bounds(position.x, position.z, config) {
            return true;
        }
        over_water(position.x, position.z, config) && !riding_boat(position.z, self.boat.z)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureGrid { config } => {
            world.reset_session(config);
        }
        Command::QueueMove { direction } => {
            // Single slot, last write wins. Presses arriving faster than one
            // per frame overwrite rather than accumulate.
            world.pending_move = Some(direction);
        }
        Command::Tick { elapsed } => {
            world.advance_frame(elapsed, out_events);
        }
    }
}

fn out_of_bounds(x: f32, z: f32, config: &GridConfig) -> bool {
    x < 0.0 || x >= config.width() || z < 0.0 || z >= config.depth()
}

fn over_water(x: f32, z: f32, config: &GridConfig) -> bool {
    let water = config.water();
    x >= water.span_start() && x < water.span_end() && z >= 0.0 && z < config.depth()
}

// The boat test compares rows only: the boat spans the whole channel width,
// so its instantaneous x never participates in the check.
fn riding_boat(player_z: f32, boat_z: f32) -> bool {
    player_z == boat_z
}

#[derive(Clone, Copy, Debug)]
struct Player {
    position: PlayerPosition,
    status: PlayerStatus,
}

impl Player {
    fn at_start() -> Self {
        Self {
            position: PLAYER_START,
            status: PlayerStatus::Safe,
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{TileGrid, World};
    use river_run_core::{
        BoatPosition, Direction, PlayerPosition, PlayerStatus, SessionOutcome,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the static tile grid.
    #[must_use]
    pub fn tile_grid(world: &World) -> &TileGrid {
        &world.grid
    }

    /// Current boat position sampled during the most recent tick.
    #[must_use]
    pub fn boat(world: &World) -> BoatPosition {
        world.boat
    }

    /// Captures an immutable snapshot of the player.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        PlayerSnapshot {
            position: world.player.position,
            status: world.player.status,
        }
    }

    /// Directional command currently buffered for the next frame, if any.
    #[must_use]
    pub fn pending_move(world: &World) -> Option<Direction> {
        world.pending_move
    }

    /// Per-frame result the hosting loop uses to decide whether to shut down.
    #[must_use]
    pub fn session_outcome(world: &World) -> SessionOutcome {
        if world.player.status == PlayerStatus::Dead {
            SessionOutcome::GameOver
        } else {
            SessionOutcome::Continue
        }
    }

    /// Immutable representation of the player state used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct PlayerSnapshot {
        /// Player location in world units.
        pub position: PlayerPosition,
        /// Life-cycle state of the player.
        pub status: PlayerStatus,
    }
}
