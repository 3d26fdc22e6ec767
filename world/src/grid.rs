//! Static tile grid construction for the River Run board.

use river_run_core::{GridConfig, TileCoord, TileKind, TILE_STRIDE};

/// One static cell of the board.
///
/// Tiles are created once during world initialisation and never change type
/// or position afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    column: TileCoord,
    row: TileCoord,
    kind: TileKind,
    oscillates: bool,
}

impl Tile {
    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> TileCoord {
        self.column
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> TileCoord {
        self.row
    }

    /// Surface type of the tile.
    #[must_use]
    pub const fn kind(&self) -> TileKind {
        self.kind
    }

    /// Decorative vertical-bob flag consumed by renderers.
    ///
    /// Carries no gameplay meaning; no movement rule reads it.
    #[must_use]
    pub const fn oscillates(&self) -> bool {
        self.oscillates
    }

    /// World-unit x coordinate of the tile centre.
    #[must_use]
    pub fn world_x(&self) -> f32 {
        self.column.get() as f32 * TILE_STRIDE
    }

    /// World-unit z coordinate of the tile centre.
    #[must_use]
    pub fn world_z(&self) -> f32 {
        self.row.get() as f32 * TILE_STRIDE
    }
}

/// Dense rectangular grid of tiles covering the whole board.
#[derive(Clone, Debug)]
pub struct TileGrid {
    config: GridConfig,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Builds the full tile list for the provided board layout.
    ///
    /// Every `(column, row)` pair in `[0, columns) x [0, rows)` receives
    /// exactly one tile; columns inside the water channel become Water, all
    /// others Ground. The board never changes shape at runtime, so a plain
    /// vector in row-major order is sufficient.
    #[must_use]
    pub(crate) fn build(config: GridConfig) -> Self {
        let columns = config.columns().get();
        let rows = config.rows().get();
        let capacity = usize::try_from(u64::from(columns) * u64::from(rows)).unwrap_or(0);

        let mut tiles = Vec::with_capacity(capacity);
        for row in 0..rows {
            for column in 0..columns {
                let column = TileCoord::new(column);
                let kind = if config.water().contains(column) {
                    TileKind::Water
                } else {
                    TileKind::Ground
                };
                tiles.push(Tile {
                    column,
                    row: TileCoord::new(row),
                    kind,
                    oscillates: kind == TileKind::Water,
                });
            }
        }

        Self { config, tiles }
    }

    /// Board layout the grid was built from.
    #[must_use]
    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    /// All tiles in row-major order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Surface type at the provided coordinates, if they are on the board.
    #[must_use]
    pub fn kind_at(&self, column: TileCoord, row: TileCoord) -> Option<TileKind> {
        let columns = self.config.columns().get();
        if column.get() >= columns || row.get() >= self.config.rows().get() {
            return None;
        }
        let index = usize::try_from(row.get()).ok()? * usize::try_from(columns).ok()?
            + usize::try_from(column.get()).ok()?;
        self.tiles.get(index).map(Tile::kind)
    }
}
