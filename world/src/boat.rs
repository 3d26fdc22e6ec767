//! Clock-driven boat scheduler.
//!
//! The boat has no persisted velocity state: its position is a pure function
//! of the monotonic clock reading, which keeps unit tests free of real-time
//! delays.

use std::time::Duration;

use river_run_core::{BoatPosition, TILE_STRIDE};

/// Number of whole seconds in one traversal cycle.
pub const CYCLE_SECONDS: u64 = 10;

/// Samples the boat position for the provided clock reading.
///
/// `cycle = floor(elapsed) mod 10` selects one of five discrete rows, each
/// held for exactly one second; when the counter wraps to zero the boat jumps
/// back to the start of the channel. The motion is deliberately steppy: there
/// is no interpolation between the per-second positions.
#[must_use]
pub fn position(elapsed: Duration, channel_x: f32) -> BoatPosition {
    let cycle = elapsed.as_secs() % CYCLE_SECONDS;
    if cycle == 0 {
        return BoatPosition::new(channel_x, 0.0);
    }
    BoatPosition::new(channel_x, cycle as f32 * TILE_STRIDE)
}

#[cfg(test)]
mod tests {
    use super::{position, CYCLE_SECONDS};
    use std::time::Duration;

    const CHANNEL_X: f32 = 12.0;

    #[test]
    fn row_follows_the_sawtooth_schedule() {
        for seconds in 0..40 {
            let sampled = position(Duration::from_secs(seconds), CHANNEL_X);
            let expected = (seconds % CYCLE_SECONDS) as f32 * 2.0;
            assert_eq!(sampled.z, expected, "at t={seconds}s");
            assert_eq!(sampled.x, CHANNEL_X);
        }
    }

    #[test]
    fn fractional_seconds_truncate_to_the_current_step() {
        let early = position(Duration::from_millis(3_100), CHANNEL_X);
        let late = position(Duration::from_millis(3_900), CHANNEL_X);
        assert_eq!(early, late);
        assert_eq!(early.z, 6.0);
    }

    #[test]
    fn cycle_wrap_returns_to_the_channel_start() {
        let before_wrap = position(Duration::from_secs(9), CHANNEL_X);
        let at_wrap = position(Duration::from_secs(10), CHANNEL_X);
        assert_eq!(before_wrap.z, 18.0);
        assert_eq!(at_wrap.z, 0.0);
        assert_eq!(at_wrap.x, CHANNEL_X);
    }
}
