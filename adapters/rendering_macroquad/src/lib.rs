#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for River Run.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature. Consumers that need sound playback can opt back
//! in by enabling `macroquad/audio` in their own `Cargo.toml` dependency
//! specification.

use anyhow::Result;
use glam::Vec3;
use macroquad::{
    camera::{set_camera, set_default_camera, Camera3D},
    input::{is_key_pressed, KeyCode},
    math::Vec3 as MacroquadVec3,
    models::{draw_cube, draw_cube_wires},
};
use river_run_core::Direction;
use river_run_rendering::{
    FrameDirective, FrameInput, Presentation, RenderingBackend, Scene, TileGridPresentation,
    TilePresentation,
};
use std::{collections::VecDeque, time::Duration};

/// Side length of the player token cube in world units.
const PLAYER_SIZE: f32 = 1.0;

/// Vertical amplitude of the decorative water bob in world units.
const BOB_AMPLITUDE: f32 = 0.15;

/// Angular speed of the decorative water bob in radians per second.
const BOB_SPEED: f32 = 2.0;

/// How far water tiles sit below the ground surface.
const WATER_RECESS: f32 = 0.3;

/// Snapshot of edge-triggered keyboard input observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
    /// Arrow press mapped to a directional step, if one fired this frame.
    step: Option<Direction>,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);

        // One direction per frame; the world keeps a single pending slot
        // anyway, so simultaneous presses resolve by this fixed precedence.
        let step = if is_key_pressed(KeyCode::Up) {
            Some(Direction::Up)
        } else if is_key_pressed(KeyCode::Down) {
            Some(Direction::Down)
        } else if is_key_pressed(KeyCode::Left) {
            Some(Direction::Left)
        } else if is_key_pressed(KeyCode::Right) {
            Some(Direction::Right)
        } else {
            None
        };

        Self {
            quit_requested,
            step,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing
    /// ten-second averages once one second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<FpsMetrics> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        self.frame_times.push_back(frame);
        self.window_duration += frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            if let Some(removed) = self.frame_times.pop_front() {
                self.window_duration = self.window_duration.saturating_sub(removed);
            } else {
                break;
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        if seconds <= f32::EPSILON {
            self.elapsed = Duration::ZERO;
            self.frames = 0;
            return None;
        }

        let per_second = self.frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };

        self.elapsed = Duration::ZERO;
        self.frames = 0;

        Some(FpsMetrics {
            per_second,
            trailing_ten_seconds,
        })
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameDirective + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: 960,
            window_height: 720,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();
            let mut bob_clock = 0.0_f32;

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                bob_clock += frame_dt.as_secs_f32();

                let frame_input = FrameInput {
                    step: keyboard.step,
                };
                let directive = update_scene(frame_dt, frame_input, &mut scene);

                set_camera(&board_camera(&scene.tile_grid));
                draw_board(&scene, bob_clock);
                draw_boat(&scene);
                draw_player(&scene);
                set_default_camera();

                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        trailing_ten_seconds,
                    }) = fps_counter.record_frame(frame_dt)
                    {
                        println!("FPS: {per_second:.2} (10s avg: {trailing_ten_seconds:.2})");
                    }
                } else {
                    let _ = fps_counter.record_frame(frame_dt);
                }

                macroquad::window::next_frame().await;

                if directive == FrameDirective::Exit {
                    break;
                }
            }
        });

        Ok(())
    }
}

/// Fixed bird's-eye camera aimed at the centre of the board.
fn board_camera(tile_grid: &TileGridPresentation) -> Camera3D {
    let centre = tile_grid.centre();
    let eye = centre + Vec3::new(0.0, tile_grid.depth() * 1.1, tile_grid.depth() * 1.2);

    Camera3D {
        position: to_macroquad_vec3(eye),
        target: to_macroquad_vec3(centre),
        up: MacroquadVec3::new(0.0, 1.0, 0.0),
        ..Default::default()
    }
}

fn draw_board(scene: &Scene, bob_clock: f32) {
    let tile_grid = scene.tile_grid;
    let border_color = to_macroquad_color(tile_grid.border_color);
    let tile_size = MacroquadVec3::new(tile_grid.tile_length, tile_grid.tile_length * 0.5, tile_grid.tile_length);

    for tile in &scene.tiles {
        let centre = tile_centre(tile, &tile_grid, bob_clock);
        let position = to_macroquad_vec3(centre);
        draw_cube(position, tile_size, None, to_macroquad_color(tile.color));
        draw_cube_wires(position, tile_size, border_color);
    }
}

/// World-space centre of a tile cube, including the decorative water bob.
fn tile_centre(tile: &TilePresentation, tile_grid: &TileGridPresentation, bob_clock: f32) -> Vec3 {
    let x = tile.column as f32 * tile_grid.tile_length;
    let z = tile.row as f32 * tile_grid.tile_length;
    let mut y = -tile_grid.tile_length * 0.25;

    if tile.oscillates {
        y -= WATER_RECESS;
        y += bob_offset(bob_clock, tile.column, tile.row);
    }

    Vec3::new(x, y, z)
}

/// Per-tile vertical offset for the water animation.
///
/// Neighbouring tiles are phase-shifted so the channel ripples instead of
/// bobbing as one rigid sheet.
fn bob_offset(bob_clock: f32, column: u32, row: u32) -> f32 {
    let phase = column as f32 * 1.3 + row as f32 * 0.7;
    (bob_clock * BOB_SPEED + phase).sin() * BOB_AMPLITUDE
}

fn draw_boat(scene: &Scene) {
    let boat = scene.boat;
    draw_cube(
        to_macroquad_vec3(boat.position),
        to_macroquad_vec3(boat.size),
        None,
        to_macroquad_color(boat.color),
    );
}

fn draw_player(scene: &Scene) {
    let player = scene.player;
    let size = MacroquadVec3::new(PLAYER_SIZE, PLAYER_SIZE, PLAYER_SIZE);
    let position = to_macroquad_vec3(player.position);
    draw_cube(position, size, None, to_macroquad_color(player.color));
    draw_cube_wires(position, size, macroquad::color::BLACK);
}

fn to_macroquad_color(color: river_run_rendering::Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

fn to_macroquad_vec3(vector: Vec3) -> MacroquadVec3 {
    MacroquadVec3::new(vector.x, vector.y, vector.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use river_run_rendering::Color;

    fn grid() -> TileGridPresentation {
        TileGridPresentation::new(15, 10, 2.0, Color::from_rgb_u8(30, 30, 30))
            .expect("valid grid")
    }

    #[test]
    fn camera_targets_the_board_centre() {
        let camera = board_camera(&grid());

        assert_eq!(camera.target, MacroquadVec3::new(15.0, 0.0, 10.0));
        assert!(camera.position.y > 0.0, "camera looks down at the board");
        assert!(camera.position.z > camera.target.z, "camera sits behind the board");
    }

    #[test]
    fn ground_tiles_do_not_bob() {
        let tile = TilePresentation::new(3, 2, Color::from_rgb_u8(0, 200, 60), false);

        let early = tile_centre(&tile, &grid(), 0.0);
        let late = tile_centre(&tile, &grid(), 5.0);

        assert_eq!(early, late);
        assert_eq!(early.x, 6.0);
        assert_eq!(early.z, 4.0);
    }

    #[test]
    fn water_tiles_bob_within_the_amplitude() {
        let tile = TilePresentation::new(6, 2, Color::from_rgb_u8(30, 90, 220), true);
        let grid = grid();
        let resting = -grid.tile_length * 0.25 - WATER_RECESS;

        for step in 0..100 {
            let centre = tile_centre(&tile, &grid, step as f32 * 0.1);
            assert!((centre.y - resting).abs() <= BOB_AMPLITUDE + f32::EPSILON);
        }
    }

    #[test]
    fn neighbouring_water_tiles_are_phase_shifted() {
        let clock = 1.0;
        assert_ne!(bob_offset(clock, 6, 2), bob_offset(clock, 7, 2));
        assert_ne!(bob_offset(clock, 6, 2), bob_offset(clock, 6, 3));
    }

    #[test]
    fn color_conversion_preserves_channels() {
        let converted = to_macroquad_color(Color::new(0.1, 0.2, 0.3, 0.4));
        assert_eq!(converted.r, 0.1);
        assert_eq!(converted.g, 0.2);
        assert_eq!(converted.b, 0.3);
        assert_eq!(converted.a, 0.4);
    }
}
