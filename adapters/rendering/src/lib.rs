#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for River Run adapters.

use anyhow::Result as AnyResult;
use glam::Vec3;
use river_run_core::Direction;
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Directional press detected on this frame, if any.
    pub step: Option<Direction>,
}

/// Per-frame decision returned by the scene-update closure.
///
/// Backends keep presenting frames until the closure asks to exit; the
/// backend itself never decides when the session is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum FrameDirective {
    /// Keep presenting frames.
    Continue,
    /// Close the window and return from the backend loop.
    Exit,
}

/// Describes the rectangular tile board that can be rendered by adapters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGridPresentation {
    /// Number of columns contained in the board.
    pub columns: u32,
    /// Number of rows contained in the board.
    pub rows: u32,
    /// Side length of a single tile expressed in world units.
    pub tile_length: f32,
    /// Color used for tile border lines.
    pub border_color: Color,
}

impl TileGridPresentation {
    /// Creates a new tile board descriptor.
    ///
    /// Returns an error when `tile_length` is not positive.
    pub fn new(
        columns: u32,
        rows: u32,
        tile_length: f32,
        border_color: Color,
    ) -> std::result::Result<Self, RenderingError> {
        if tile_length <= 0.0 {
            return Err(RenderingError::InvalidTileLength { tile_length });
        }

        Ok(Self {
            columns,
            rows,
            tile_length,
            border_color,
        })
    }

    /// Calculates the total width of the board along the column axis.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Calculates the total depth of the board along the row axis.
    #[must_use]
    pub const fn depth(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }

    /// Centre of the board in world units, used as the default camera target.
    #[must_use]
    pub fn centre(&self) -> Vec3 {
        Vec3::new(self.width() * 0.5, 0.0, self.depth() * 0.5)
    }
}

/// Single board tile rendered as a cube.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TilePresentation {
    /// Zero-based column index of the tile.
    pub column: u32,
    /// Zero-based row index of the tile.
    pub row: u32,
    /// Fill color of the tile cube.
    pub color: Color,
    /// Whether the tile bobs vertically for decorative effect.
    pub oscillates: bool,
}

impl TilePresentation {
    /// Creates a new tile descriptor.
    #[must_use]
    pub const fn new(column: u32, row: u32, color: Color, oscillates: bool) -> Self {
        Self {
            column,
            row,
            color,
            oscillates,
        }
    }
}

/// Boat rendered as a flat slab floating on the water channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoatPresentation {
    /// Position of the slab centre in world units.
    pub position: Vec3,
    /// Extents of the slab along each axis in world units.
    pub size: Vec3,
    /// Fill color of the slab.
    pub color: Color,
}

impl BoatPresentation {
    /// Creates a new boat descriptor.
    #[must_use]
    pub const fn new(position: Vec3, size: Vec3, color: Color) -> Self {
        Self {
            position,
            size,
            color,
        }
    }
}

/// Player token rendered as a cube hovering above the board.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerPresentation {
    /// Position of the token centre in world units.
    pub position: Vec3,
    /// Fill color of the token.
    pub color: Color,
}

impl PlayerPresentation {
    /// Creates a new player descriptor.
    #[must_use]
    pub const fn new(position: Vec3, color: Color) -> Self {
        Self { position, color }
    }
}

/// Scene description combining the board, the boat, and the player token.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Board dimensions and shared tile styling.
    pub tile_grid: TileGridPresentation,
    /// Tiles composing the board surface.
    pub tiles: Vec<TilePresentation>,
    /// Boat currently crossing the water channel.
    pub boat: BoatPresentation,
    /// Player token.
    pub player: PlayerPresentation,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        tile_grid: TileGridPresentation,
        tiles: Vec<TilePresentation>,
        boat: BoatPresentation,
        player: PlayerPresentation,
    ) -> Self {
        Self {
            tile_grid,
            tiles,
            boat,
            player,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting River Run scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until the scene-update closure asks to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame delta
    /// and the per-frame input captured by the adapter, and may mutate the
    /// scene before it is rendered. Returning [`FrameDirective::Exit`] ends
    /// the loop after the current frame is presented.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameDirective + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Tile length must be positive to avoid a zero-sized board.
    InvalidTileLength {
        /// Provided tile length that failed validation.
        tile_length: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTileLength { tile_length } => {
                write!(f, "tile_length must be positive (received {tile_length})")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_grid_creation_accepts_positive_tile_length() {
        let presentation = TileGridPresentation::new(15, 10, 2.0, Color::from_rgb_u8(0, 0, 0))
            .expect("positive tile_length should succeed");

        assert_eq!(presentation.width(), 30.0);
        assert_eq!(presentation.depth(), 20.0);
        assert_eq!(presentation.centre(), Vec3::new(15.0, 0.0, 10.0));
    }

    #[test]
    fn tile_grid_creation_rejects_zero_tile_length_without_panicking() {
        let error = TileGridPresentation::new(15, 10, 0.0, Color::from_rgb_u8(0, 0, 0))
            .expect_err("zero tile_length must be rejected");

        assert!(matches!(error, RenderingError::InvalidTileLength { .. }));
    }

    #[test]
    fn lighten_moves_channels_towards_white() {
        let color = Color::from_rgb_u8(0, 128, 255).lighten(0.5);

        assert_eq!(color.red, 0.5);
        assert!(color.green > 128.0 / 255.0);
        assert_eq!(color.blue, 1.0);
        assert_eq!(color.alpha, 1.0);
    }

    #[test]
    fn frame_input_defaults_to_no_step() {
        assert_eq!(FrameInput::default().step, None);
    }

    #[test]
    fn scene_new_preserves_every_channel() {
        let tile_grid = TileGridPresentation::new(4, 3, 2.0, Color::from_rgb_u8(32, 32, 32))
            .expect("valid grid");
        let tiles = vec![TilePresentation::new(
            1,
            2,
            Color::from_rgb_u8(0, 200, 60),
            false,
        )];
        let boat = BoatPresentation::new(
            Vec3::new(4.0, 0.2, 0.0),
            Vec3::new(4.0, 0.4, 1.8),
            Color::from_rgb_u8(120, 80, 40),
        );
        let player =
            PlayerPresentation::new(Vec3::new(2.0, 2.0, 2.0), Color::from_rgb_u8(230, 50, 50));

        let scene = Scene::new(tile_grid, tiles.clone(), boat, player);

        assert_eq!(scene.tile_grid, tile_grid);
        assert_eq!(scene.tiles, tiles);
        assert_eq!(scene.boat, boat);
        assert_eq!(scene.player, player);
    }
}
