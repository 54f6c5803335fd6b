//! Iso Golf - build an isometric mini-golf course, then play it
//!
//! Core modules:
//! - `sim`: Deterministic shot simulation (phases, terrain physics, scoring)
//! - `course`: Terrain grid, holes and course definitions
//! - `iso`: Grid <-> isometric world projection
//! - `settings`: Data-driven timing and hazard policy
//! - `scorecard`: Course-complete summary

pub mod course;
pub mod error;
pub mod iso;
pub mod scorecard;
pub mod settings;
pub mod sim;

pub use course::{Course, GridCoord, Hole, TerrainGrid, Tile};
pub use error::{CourseError, SettingsError};
pub use iso::{IsoProjection, ViewRotation};
pub use scorecard::Scorecard;
pub use settings::{Settings, WaterPolicy};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Course grid dimensions (tiles)
    pub const GRID_WIDTH: i32 = 72;
    pub const GRID_HEIGHT: i32 = 72;

    /// Isometric tile footprint (pixels)
    pub const TILE_WIDTH: f32 = 64.0;
    pub const TILE_HEIGHT: f32 = 32.0;

    /// Reference frame delta used by tests and the demo runner (ms)
    pub const FRAME_MS: f32 = 16.0;

    /// Swing animation length before the ball leaves the tee (ms)
    pub const SWING_DURATION_MS: f32 = 150.0;
    /// Flight duration = base + distance / divisor (ms)
    pub const FLIGHT_BASE_MS: f32 = 600.0;
    pub const FLIGHT_DISTANCE_DIVISOR: f32 = 1.5;
    /// Flight arc control point lift cap (pixels)
    pub const FLIGHT_ARC_CAP: f32 = 150.0;
    /// Aim preview arc control point lift cap (pixels)
    pub const PREVIEW_ARC_CAP: f32 = 100.0;
    /// Points sampled along the aim preview curve (segments + 1)
    pub const PREVIEW_SEGMENTS: usize = 20;
    /// Bounce duration = base + bounce distance (ms)
    pub const BOUNCE_BASE_MS: f32 = 300.0;
    /// Ball walk-back after an out-of-bounds penalty (ms)
    pub const REPOSITION_MS: f32 = 500.0;
    /// Ball fade-out after a water landing (ms)
    pub const SINK_MS: f32 = 500.0;
    /// Pause after holing out before advancing (ms)
    pub const WIN_DELAY_MS: f32 = 2000.0;
    /// Swings are ignored this long after entering play mode (ms)
    pub const SWING_ARM_DELAY_MS: f32 = 100.0;

    /// Power above the knee is halved
    pub const POWER_KNEE: f32 = 400.0;
    pub const POWER_OVERSHOOT_SLOPE: f32 = 0.5;
    /// bounce distance = effective power * bounce multiplier * factor
    pub const BOUNCE_FACTOR: f32 = 1.5;
    /// Bounces at or below this distance roll directly instead
    pub const BOUNCE_THRESHOLD: f32 = 20.0;
    /// Bounce arc lift divisor (flight uses half the arc height)
    pub const BOUNCE_LIFT_DIVISOR: f32 = 10.0;
    /// Bounce arc control point divisor
    pub const BOUNCE_ARC_DIVISOR: f32 = 4.0;
    /// Roll power scale applied on both roll branches
    pub const ROLL_SCALE: f32 = 0.5;
    /// Initial roll velocity = roll power / divisor (pixels/ms)
    pub const ROLL_VELOCITY_DIVISOR: f32 = 45.0;
    /// Friction decay reference tick (ms)
    pub const FRICTION_REFERENCE_MS: f32 = 16.0;
    /// Rolling stops below this velocity (pixels/ms)
    pub const ROLL_STOP_VELOCITY: f32 = 0.03;

    /// Rolling capture: closer than radius and slower than speed
    pub const CUP_CAPTURE_RADIUS: f32 = 12.0;
    pub const CUP_CAPTURE_SPEED: f32 = 0.8;
    /// Resting capture radius (ball stopped near the cup)
    pub const CUP_LANDING_RADIUS: f32 = 15.0;

    /// Flight visual scale gain at the apex
    pub const FLIGHT_SCALE_GAIN: f32 = 0.6;

    /// Default club name shown on the scorecard
    pub const DEFAULT_CLUB_NAME: &str = "Golf Course";
}

/// Power after dampening long shots: identity up to the knee, half slope beyond.
#[inline]
pub fn effective_power(power: f32) -> f32 {
    use consts::{POWER_KNEE, POWER_OVERSHOOT_SLOPE};
    if power <= POWER_KNEE {
        power
    } else {
        POWER_KNEE + (power - POWER_KNEE) * POWER_OVERSHOOT_SLOPE
    }
}

/// Unit direction from `from` to `to`, or `None` for a zero-length vector
#[inline]
pub fn direction_between(from: Vec2, to: Vec2) -> Option<(Vec2, f32)> {
    let delta = to - from;
    let dist = delta.length();
    if dist <= f32::EPSILON {
        None
    } else {
        Some((delta / dist, dist))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_power_identity_below_knee() {
        assert_eq!(effective_power(300.0), 300.0);
        assert_eq!(effective_power(400.0), 400.0);
    }

    #[test]
    fn test_effective_power_dampens_overshoot() {
        assert!((effective_power(500.0) - 450.0).abs() < 1e-4);
        assert!((effective_power(800.0) - 600.0).abs() < 1e-4);
    }

    #[test]
    fn test_direction_between_zero_length() {
        assert!(direction_between(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0)).is_none());

        let (dir, dist) = direction_between(Vec2::ZERO, Vec2::new(3.0, 4.0)).unwrap();
        assert!((dist - 5.0).abs() < 1e-5);
        assert!((dir.length() - 1.0).abs() < 1e-5);
    }
}
