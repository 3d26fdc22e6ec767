#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the River Run experience.

mod settings;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec3;
use river_run_core::{
    Command, GridConfig, SessionOutcome, TileCoord, TileKind, WaterChannel, TILE_STRIDE,
};
use river_run_rendering::{
    BoatPresentation, Color, FrameDirective, PlayerPresentation, Presentation, RenderingBackend,
    Scene, TileGridPresentation, TilePresentation,
};
use river_run_rendering_macroquad::MacroquadBackend;
use river_run_system_bootstrap::Bootstrap;
use river_run_world::{self as world, query, World};

use crate::settings::Settings;

const CLEAR_COLOR: Color = Color::from_rgb_u8(110, 170, 220);
const BORDER_COLOR: Color = Color::from_rgb_u8(25, 60, 25);
const GROUND_COLOR: Color = Color::from_rgb_u8(70, 160, 60);
const WATER_COLOR: Color = Color::from_rgb_u8(40, 90, 200);
const BOAT_COLOR: Color = Color::from_rgb_u8(140, 95, 45);
const PLAYER_COLOR: Color = Color::from_rgb_u8(220, 60, 50);

/// Height of the boat deck above the water surface.
const BOAT_DECK_HEIGHT: f32 = 0.1;

/// Thickness of the boat slab in world units.
const BOAT_THICKNESS: f32 = 0.4;

/// Depth of the boat slab along the row axis in world units.
const BOAT_LENGTH: f32 = 1.8;

/// Command-line options accepted by the River Run binary.
#[derive(Debug, Parser)]
#[command(name = "river-run", about = "Hop across the river without drowning")]
struct Args {
    /// Number of board columns.
    #[arg(long)]
    columns: Option<u32>,

    /// Number of board rows.
    #[arg(long)]
    rows: Option<u32>,

    /// First column of the water channel.
    #[arg(long)]
    water_first: Option<u32>,

    /// Last column of the water channel.
    #[arg(long)]
    water_last: Option<u32>,

    /// Render as fast as possible instead of waiting for the display.
    #[arg(long)]
    no_vsync: bool,

    /// Print frame timing metrics once per second.
    #[arg(long)]
    show_fps: bool,

    /// Path to an optional TOML settings file.
    #[arg(long)]
    settings: Option<PathBuf>,
}

/// Final option values after merging defaults, the settings file, and flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Resolved {
    columns: u32,
    rows: u32,
    water_first: u32,
    water_last: u32,
    vsync: bool,
    show_fps: bool,
}

/// Merges option sources. Built-in defaults are overridden by the settings
/// file, which in turn is overridden by explicit command-line flags.
fn resolve(args: &Args, overrides: Option<&Settings>) -> Resolved {
    let defaults = GridConfig::default();
    let mut resolved = Resolved {
        columns: defaults.columns().get(),
        rows: defaults.rows().get(),
        water_first: defaults.water().first().get(),
        water_last: defaults.water().last().get(),
        vsync: true,
        show_fps: false,
    };

    if let Some(overrides) = overrides {
        if let Some(columns) = overrides.columns {
            resolved.columns = columns;
        }
        if let Some(rows) = overrides.rows {
            resolved.rows = rows;
        }
        if let Some(water_first) = overrides.water_first {
            resolved.water_first = water_first;
        }
        if let Some(water_last) = overrides.water_last {
            resolved.water_last = water_last;
        }
        if let Some(vsync) = overrides.vsync {
            resolved.vsync = vsync;
        }
        if let Some(show_fps) = overrides.show_fps {
            resolved.show_fps = show_fps;
        }
    }

    if let Some(columns) = args.columns {
        resolved.columns = columns;
    }
    if let Some(rows) = args.rows {
        resolved.rows = rows;
    }
    if let Some(water_first) = args.water_first {
        resolved.water_first = water_first;
    }
    if let Some(water_last) = args.water_last {
        resolved.water_last = water_last;
    }
    if args.no_vsync {
        resolved.vsync = false;
    }
    if args.show_fps {
        resolved.show_fps = true;
    }

    resolved
}

fn grid_config(resolved: &Resolved) -> Result<GridConfig> {
    let water = WaterChannel::new(
        TileCoord::new(resolved.water_first),
        TileCoord::new(resolved.water_last),
    )
    .context("invalid water channel")?;
    GridConfig::new(
        TileCoord::new(resolved.columns),
        TileCoord::new(resolved.rows),
        water,
    )
    .context("invalid board layout")
}

fn tile_color(kind: TileKind) -> Color {
    match kind {
        TileKind::Ground => GROUND_COLOR,
        TileKind::Water => WATER_COLOR,
    }
}

fn boat_presentation(world: &World) -> BoatPresentation {
    let boat = query::boat(world);
    let water = query::tile_grid(world).config().water();
    let centre_x = (water.span_start() + water.span_end() - TILE_STRIDE) * 0.5;
    let width = water.span_end() - water.span_start();

    BoatPresentation::new(
        Vec3::new(centre_x, BOAT_DECK_HEIGHT, boat.z),
        Vec3::new(width, BOAT_THICKNESS, BOAT_LENGTH),
        BOAT_COLOR,
    )
}

fn player_presentation(world: &World) -> PlayerPresentation {
    let player = query::player(world);
    PlayerPresentation::new(
        Vec3::new(player.position.x, player.position.y, player.position.z),
        PLAYER_COLOR,
    )
}

fn build_scene(world: &World) -> Result<Scene> {
    let grid = query::tile_grid(world);
    let config = grid.config();
    let tile_grid = TileGridPresentation::new(
        config.columns().get(),
        config.rows().get(),
        TILE_STRIDE,
        BORDER_COLOR,
    )
    .context("invalid board presentation")?;

    let tiles = grid
        .tiles()
        .iter()
        .map(|tile| {
            TilePresentation::new(
                tile.column().get(),
                tile.row().get(),
                tile_color(tile.kind()),
                tile.oscillates(),
            )
        })
        .collect();

    Ok(Scene::new(
        tile_grid,
        tiles,
        boat_presentation(world),
        player_presentation(world),
    ))
}

fn populate_scene(world: &World, scene: &mut Scene) {
    scene.boat = boat_presentation(world);
    scene.player = player_presentation(world);
}

/// Entry point for the River Run command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let overrides = args.settings.as_ref().map(settings::load).transpose()?;
    let resolved = resolve(&args, overrides.as_ref());
    let config = grid_config(&resolved)?;

    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(&mut world, Command::ConfigureGrid { config }, &mut events);

    let bootstrap = Bootstrap::default();
    println!("{}", bootstrap.welcome_banner(&world));

    let scene = build_scene(&world)?;
    let presentation = Presentation::new("River Run", CLEAR_COLOR, scene);
    let backend = MacroquadBackend::new()
        .with_vsync(resolved.vsync)
        .with_show_fps(resolved.show_fps);

    let mut session_clock = Duration::ZERO;
    backend.run(presentation, move |frame_dt, input, scene| {
        session_clock += frame_dt;
        events.clear();

        if let Some(direction) = input.step {
            world::apply(&mut world, Command::QueueMove { direction }, &mut events);
        }
        world::apply(
            &mut world,
            Command::Tick {
                elapsed: session_clock,
            },
            &mut events,
        );

        populate_scene(&world, scene);

        if query::session_outcome(&world) == SessionOutcome::GameOver {
            println!("You drowned. Game over.");
            FrameDirective::Exit
        } else {
            FrameDirective::Continue
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            columns: None,
            rows: None,
            water_first: None,
            water_last: None,
            no_vsync: false,
            show_fps: false,
            settings: None,
        }
    }

    #[test]
    fn resolve_defaults_match_the_engine_board() {
        let resolved = resolve(&args(), None);

        assert_eq!(
            resolved,
            Resolved {
                columns: 15,
                rows: 10,
                water_first: 6,
                water_last: 7,
                vsync: true,
                show_fps: false,
            }
        );
    }

    #[test]
    fn resolve_prefers_flags_over_the_settings_file() {
        let mut args = args();
        args.columns = Some(18);
        args.show_fps = true;

        let overrides = Settings {
            columns: Some(20),
            vsync: Some(false),
            ..Settings::default()
        };

        let resolved = resolve(&args, Some(&overrides));
        assert_eq!(resolved.columns, 18, "flags beat the settings file");
        assert_eq!(resolved.rows, 10, "untouched options keep their defaults");
        assert!(!resolved.vsync, "settings file beats the defaults");
        assert!(resolved.show_fps);
    }

    #[test]
    fn grid_config_rejects_impossible_boards() {
        let resolved = resolve(&args(), None);
        let broken = Resolved {
            water_last: resolved.columns,
            ..resolved
        };

        assert!(grid_config(&broken).is_err());
    }

    #[test]
    fn build_scene_reflects_the_default_board() {
        let world = World::new();
        let scene = build_scene(&world).expect("default board renders");

        assert_eq!(scene.tiles.len(), 150);
        let water_tiles = scene
            .tiles
            .iter()
            .filter(|tile| tile.color == WATER_COLOR)
            .count();
        assert_eq!(water_tiles, 20);

        assert_eq!(scene.boat.position, Vec3::new(13.0, BOAT_DECK_HEIGHT, 0.0));
        assert_eq!(scene.boat.size.x, 4.0);
        assert_eq!(scene.player.position, Vec3::new(2.0, 2.0, 2.0));
    }
}
