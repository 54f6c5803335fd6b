//! Deterministic shot simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `ShotController::update(delta)`
//! - Seeded RNG only (demo golfer)
//! - No rendering or platform dependencies

pub mod arc;
pub mod autoplay;
pub mod progress;
pub mod state;
pub mod terrain;
pub mod tick;

pub use arc::{ShotArc, lift_profile};
pub use autoplay::AutoGolfer;
pub use progress::{CourseResult, HoleScore, HudReadout, Progression};
pub use state::{
    BallState, CourseSummary, GameEvent, Hazard, Motion, NotifyTone, PlaySession, SessionEnd,
    ShotPhase,
};
pub use terrain::{TerrainKind, TerrainPhysics, lookup, lookup_opt};
pub use tick::{
    ImpactPlan, ShotController, bounce_distance, captures_rolling, decay_velocity, roll_velocity,
};
