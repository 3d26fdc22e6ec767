#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the River Run engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! actually happened. Adapters and systems consume event streams and
//! immutable snapshots; they never mutate world state directly.

use std::{error::Error, fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to River Run.";

/// Distance between the centres of two adjacent tiles, in world units.
///
/// The player hops in whole-tile increments, so every accepted move shifts
/// exactly one axis by this amount.
pub const TILE_STRIDE: f32 = 2.0;

/// Vertical drop applied to the player on every frame spent drowning.
pub const SINK_RATE: f32 = 0.5;

/// Vertical threshold below which a sinking player is declared dead.
pub const DEATH_DEPTH: f32 = -1.0;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Rebuilds the static tile grid and resets the session entities.
    ConfigureGrid {
        /// Validated board layout to install.
        config: GridConfig,
    },
    /// Buffers a directional command for the next frame.
    ///
    /// The world keeps a single slot: commands arriving faster than one per
    /// frame overwrite the pending one (last write wins, no queueing).
    QueueMove {
        /// Direction requested by the input adapter.
        direction: Direction,
    },
    /// Advances the session by exactly one frame.
    Tick {
        /// Monotonic elapsed time sampled once per frame by the adapter.
        elapsed: Duration,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation observed a new clock reading.
    TimeAdvanced {
        /// Monotonic elapsed time carried by the processed tick.
        elapsed: Duration,
    },
    /// Confirms that the boat jumped to a new position on its schedule.
    BoatMoved {
        /// Position the boat occupied before the tick.
        from: BoatPosition,
        /// Position the boat occupies after the tick.
        to: BoatPosition,
    },
    /// Confirms that the player completed a discrete hop.
    PlayerStepped {
        /// Position the player occupied before moving.
        from: PlayerPosition,
        /// Position the player occupies after completing the move.
        to: PlayerPosition,
    },
    /// Reports that the player spent a frame falling through water.
    PlayerSinking {
        /// Vertical position after applying this frame's drop.
        depth: f32,
    },
    /// Announces the terminal death transition. Emitted exactly once.
    PlayerDrowned,
}

/// Directional commands available to the player.
///
/// The axis mapping is fixed: `Up`/`Down` adjust z, `Left`/`Right` adjust x,
/// each by one [`TILE_STRIDE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing z.
    Up,
    /// Movement toward increasing z.
    Down,
    /// Movement toward decreasing x.
    Left,
    /// Movement toward increasing x.
    Right,
}

impl Direction {
    /// World-unit displacement `(dx, dz)` produced by an accepted move.
    #[must_use]
    pub const fn delta(self) -> (f32, f32) {
        match self {
            Self::Up => (0.0, -TILE_STRIDE),
            Self::Down => (0.0, TILE_STRIDE),
            Self::Left => (-TILE_STRIDE, 0.0),
            Self::Right => (TILE_STRIDE, 0.0),
        }
    }
}

/// Surface type of a single board tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Solid ground the player may stand on freely.
    Ground,
    /// Water; standing here without the boat starts the drowning transition.
    Water,
}

/// Index within the tile grid measured in whole tiles.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TileCoord(u32);

impl TileCoord {
    /// Creates a new tile coordinate wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying tile index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Contiguous inclusive column range whose tiles are Water.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WaterChannel {
    first: TileCoord,
    last: TileCoord,
}

impl WaterChannel {
    /// Creates a channel spanning `first..=last`.
    ///
    /// Returns an error when the range is reversed.
    pub fn new(first: TileCoord, last: TileCoord) -> Result<Self, GridConfigError> {
        if first > last {
            return Err(GridConfigError::ReversedChannel { first, last });
        }
        Ok(Self { first, last })
    }

    /// First water column of the channel.
    #[must_use]
    pub const fn first(&self) -> TileCoord {
        self.first
    }

    /// Last water column of the channel.
    #[must_use]
    pub const fn last(&self) -> TileCoord {
        self.last
    }

    /// Reports whether the provided column lies inside the channel.
    #[must_use]
    pub fn contains(&self, column: TileCoord) -> bool {
        self.first <= column && column <= self.last
    }

    /// World-unit x coordinate of the channel's leading edge.
    #[must_use]
    pub fn span_start(&self) -> f32 {
        self.first.get() as f32 * TILE_STRIDE
    }

    /// World-unit x coordinate just past the channel's trailing edge.
    #[must_use]
    pub fn span_end(&self) -> f32 {
        (self.last.get() + 1) as f32 * TILE_STRIDE
    }
}

/// Validated description of the board layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridConfig {
    columns: TileCoord,
    rows: TileCoord,
    water: WaterChannel,
}

impl GridConfig {
    /// Creates a grid configuration, validating the startup preconditions.
    ///
    /// Zero-sized boards and channels extending past the last column are
    /// rejected before the session loop ever begins.
    pub fn new(
        columns: TileCoord,
        rows: TileCoord,
        water: WaterChannel,
    ) -> Result<Self, GridConfigError> {
        if columns.get() == 0 || rows.get() == 0 {
            return Err(GridConfigError::ZeroDimension { columns, rows });
        }
        if water.last() >= columns {
            return Err(GridConfigError::ChannelOutOfRange {
                last: water.last(),
                columns,
            });
        }
        Ok(Self {
            columns,
            rows,
            water,
        })
    }

    /// Number of tile columns laid out in the grid.
    #[must_use]
    pub const fn columns(&self) -> TileCoord {
        self.columns
    }

    /// Number of tile rows laid out in the grid.
    #[must_use]
    pub const fn rows(&self) -> TileCoord {
        self.rows
    }

    /// Column range occupied by the water channel.
    #[must_use]
    pub const fn water(&self) -> WaterChannel {
        self.water
    }

    /// Total width of the board in world units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns.get() as f32 * TILE_STRIDE
    }

    /// Total depth of the board in world units.
    #[must_use]
    pub fn depth(&self) -> f32 {
        self.rows.get() as f32 * TILE_STRIDE
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: TileCoord::new(15),
            rows: TileCoord::new(10),
            water: WaterChannel {
                first: TileCoord::new(6),
                last: TileCoord::new(7),
            },
        }
    }
}

/// Reasons a grid configuration may be rejected at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridConfigError {
    /// The board must contain at least one column and one row.
    ZeroDimension {
        /// Requested column count.
        columns: TileCoord,
        /// Requested row count.
        rows: TileCoord,
    },
    /// The water channel range runs backwards.
    ReversedChannel {
        /// Requested first column.
        first: TileCoord,
        /// Requested last column.
        last: TileCoord,
    },
    /// The water channel extends past the last board column.
    ChannelOutOfRange {
        /// Last column of the requested channel.
        last: TileCoord,
        /// Number of columns on the board.
        columns: TileCoord,
    },
}

impl fmt::Display for GridConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimension { columns, rows } => write!(
                f,
                "board dimensions must be positive (received {} columns, {} rows)",
                columns.get(),
                rows.get()
            ),
            Self::ReversedChannel { first, last } => write!(
                f,
                "water channel runs backwards (columns {}..={})",
                first.get(),
                last.get()
            ),
            Self::ChannelOutOfRange { last, columns } => write!(
                f,
                "water channel ends at column {} but the board has only {} columns",
                last.get(),
                columns.get()
            ),
        }
    }
}

impl Error for GridConfigError {}

/// Player location expressed in world units.
///
/// x and z advance in whole [`TILE_STRIDE`] steps; y is continuous and only
/// participates in the falling animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerPosition {
    /// Horizontal position along the column axis.
    pub x: f32,
    /// Vertical position; drops while drowning.
    pub y: f32,
    /// Horizontal position along the row axis.
    pub z: f32,
}

impl PlayerPosition {
    /// Creates a new player position.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Boat location expressed in world units. The boat never leaves the water
/// channel, so no y component is tracked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoatPosition {
    /// Horizontal position along the column axis.
    pub x: f32,
    /// Horizontal position along the row axis.
    pub z: f32,
}

impl BoatPosition {
    /// Creates a new boat position.
    #[must_use]
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }
}

/// Life-cycle state of the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerStatus {
    /// Standing on ground or riding the boat.
    Safe,
    /// Falling through water. One-way: the only exit is death.
    Drowning,
    /// Terminal state; the session is over.
    Dead,
}

/// Per-frame result surfaced to the hosting loop.
///
/// The engine never terminates the process itself; the host decides how to
/// shut down when it observes [`SessionOutcome::GameOver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionOutcome {
    /// The session is still live.
    Continue,
    /// The player has died; no further moves will be processed.
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::{Direction, GridConfig, GridConfigError, TileCoord, WaterChannel, TILE_STRIDE};
    use serde::{de::DeserializeOwned, Serialize};

    fn channel(first: u32, last: u32) -> WaterChannel {
        WaterChannel::new(TileCoord::new(first), TileCoord::new(last)).expect("valid channel")
    }

    #[test]
    fn direction_deltas_match_axis_mapping() {
        assert_eq!(Direction::Up.delta(), (0.0, -TILE_STRIDE));
        assert_eq!(Direction::Down.delta(), (0.0, TILE_STRIDE));
        assert_eq!(Direction::Left.delta(), (-TILE_STRIDE, 0.0));
        assert_eq!(Direction::Right.delta(), (TILE_STRIDE, 0.0));
    }

    #[test]
    fn water_channel_contains_exactly_its_columns() {
        let water = channel(6, 7);
        assert!(!water.contains(TileCoord::new(5)));
        assert!(water.contains(TileCoord::new(6)));
        assert!(water.contains(TileCoord::new(7)));
        assert!(!water.contains(TileCoord::new(8)));
    }

    #[test]
    fn water_channel_world_span_covers_both_columns() {
        let water = channel(6, 7);
        assert_eq!(water.span_start(), 12.0);
        assert_eq!(water.span_end(), 16.0);
    }

    #[test]
    fn reversed_channel_is_rejected() {
        let error = WaterChannel::new(TileCoord::new(7), TileCoord::new(6))
            .expect_err("reversed range must be rejected");
        assert!(matches!(error, GridConfigError::ReversedChannel { .. }));
    }

    #[test]
    fn zero_dimension_board_is_rejected() {
        let error = GridConfig::new(TileCoord::new(0), TileCoord::new(10), channel(0, 0))
            .expect_err("zero columns must be rejected");
        assert!(matches!(error, GridConfigError::ZeroDimension { .. }));
    }

    #[test]
    fn channel_past_last_column_is_rejected() {
        let error = GridConfig::new(TileCoord::new(8), TileCoord::new(10), channel(6, 8))
            .expect_err("channel past the board edge must be rejected");
        assert!(matches!(error, GridConfigError::ChannelOutOfRange { .. }));
    }

    #[test]
    fn default_config_matches_documented_board() {
        let config = GridConfig::default();
        assert_eq!(config.columns(), TileCoord::new(15));
        assert_eq!(config.rows(), TileCoord::new(10));
        assert_eq!(config.water().first(), TileCoord::new(6));
        assert_eq!(config.water().last(), TileCoord::new(7));
        assert_eq!(config.width(), 30.0);
        assert_eq!(config.depth(), 20.0);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn grid_config_round_trips_through_bincode() {
        assert_round_trip(&GridConfig::default());
    }

    #[test]
    fn direction_round_trips_through_bincode() {
        assert_round_trip(&Direction::Left);
    }
}
