//! Play session state and core simulation types
//!
//! Everything the shot controller owns while a course is being played lives
//! here. Dropping the session discards every in-flight phase.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arc::ShotArc;
use super::progress::{CourseResult, HoleScore, HudReadout, Progression};
use super::terrain::TerrainKind;
use crate::course::{Course, GridCoord, Hole};

/// Current phase of a shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotPhase {
    /// Ball at rest, waiting for a swing
    Aiming,
    /// Club animation before the ball leaves
    Swinging,
    /// Ball in the air toward the aim point
    Flight,
    /// Short secondary hop after impact
    Bounce,
    /// Ground contact with friction decay
    Rolling,
    /// Shot settled; a timed follow-up (walk back, sink, next hole) is pending
    Resolved,
}

/// The ball during a hole
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    /// Ground-plane world position
    pub world_position: Vec2,
    /// Last resting cell whose terrain was not `Out`
    pub last_valid_grid: GridCoord,
    /// Rolling speed (pixels/ms)
    pub velocity: f32,
    /// Unit direction of the current shot
    pub direction: Vec2,
    /// Visual height above the ground path (pixels)
    #[serde(default)]
    pub lift: f32,
    /// Visual sprite scale
    #[serde(default = "one")]
    pub scale: f32,
    /// Visual opacity (fades when sinking)
    #[serde(default = "one")]
    pub alpha: f32,
    pub visible: bool,
}

fn one() -> f32 {
    1.0
}

impl BallState {
    /// Ball resting on a tee
    pub fn at_rest(world_position: Vec2, cell: GridCoord) -> Self {
        Self {
            world_position,
            last_valid_grid: cell,
            velocity: 0.0,
            direction: Vec2::ZERO,
            lift: 0.0,
            scale: 1.0,
            alpha: 1.0,
            visible: true,
        }
    }

    /// Clear per-shot visuals when the ball touches down
    pub fn touch_down(&mut self) {
        self.lift = 0.0;
        self.scale = 1.0;
    }
}

/// Flight along the main arc
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightPath {
    pub arc: ShotArc,
    pub direction: Vec2,
    /// Shot distance, used as impact power
    pub power: f32,
    pub duration: f32,
    pub elapsed: f32,
}

/// Secondary hop after impact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BouncePath {
    pub arc: ShotArc,
    pub direction: Vec2,
    pub distance: f32,
    /// Roll multiplier of the terrain that was hit
    pub roll_multiplier: f32,
    pub duration: f32,
    pub elapsed: f32,
}

/// Follow-up action once a resolved shot's timer elapses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Pending {
    /// Walk the ball back after a penalty, then aim again
    ReturnToAim { from: Vec2, to: Vec2 },
    /// Ball sinks in water, then the session ends
    Sink,
    /// Holed out; move on to the next hole or finish the course
    AdvanceHole,
}

/// A timed continuation, tagged with the session token it was scheduled under
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Continuation {
    pub pending: Pending,
    pub delay: f32,
    pub elapsed: f32,
    pub ticket: u64,
}

impl Continuation {
    /// Fraction of the delay elapsed, in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.delay <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.delay).clamp(0.0, 1.0)
        }
    }
}

/// Phase data; exactly one is active
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    Aiming,
    Swinging { target: Vec2, elapsed: f32 },
    Flight(FlightPath),
    Bounce(BouncePath),
    Rolling,
    Resolved(Continuation),
}

impl Motion {
    pub fn phase(&self) -> ShotPhase {
        match self {
            Motion::Aiming => ShotPhase::Aiming,
            Motion::Swinging { .. } => ShotPhase::Swinging,
            Motion::Flight(_) => ShotPhase::Flight,
            Motion::Bounce(_) => ShotPhase::Bounce,
            Motion::Rolling => ShotPhase::Rolling,
            Motion::Resolved(_) => ShotPhase::Resolved,
        }
    }
}

/// Colour tag for a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotifyTone {
    Error,
    Success,
    Info,
    Warning,
    Water,
    Sand,
}

impl NotifyTone {
    /// CSS colour used by the notification banner
    pub fn color(&self) -> &'static str {
        match self {
            NotifyTone::Error => "#ff0000",
            NotifyTone::Success => "#00ff00",
            NotifyTone::Info => "#ffffff",
            NotifyTone::Warning => "#ffff00",
            NotifyTone::Water => "#3498db",
            NotifyTone::Sand => "#f1c40f",
        }
    }
}

/// Penalised hazards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hazard {
    OutOfBounds,
    Water,
}

/// Why a play session ended on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEnd {
    /// Ball went in the water
    Water,
    /// Every hole was played
    CourseComplete,
    /// A later hole could not be started
    ConfigurationError,
}

/// Payload handed to the results screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSummary {
    #[serde(flatten)]
    pub result: CourseResult,
    pub total_holes: u32,
    pub club_name: String,
}

impl CourseSummary {
    pub fn total(&self) -> u32 {
        self.result.total()
    }
}

/// Events emitted by the simulation (drained by the host each frame)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// User-facing banner
    Notify { message: String, tone: NotifyTone },
    /// HUD needs refreshing
    Hud(HudReadout),
    /// Ball touched down after flight or while rolling into a hazard
    Impact {
        cell: GridCoord,
        terrain: TerrainKind,
        power: f32,
    },
    /// A hazard added a penalty stroke
    Penalty {
        hazard: Hazard,
        strokes_this_hole: u32,
    },
    HoleComplete { hole_number: u32, strokes: HoleScore },
    CourseComplete(CourseSummary),
    SessionEnded(SessionEnd),
}

impl GameEvent {
    pub fn notify(message: impl Into<String>, tone: NotifyTone) -> Self {
        GameEvent::Notify {
            message: message.into(),
            tone,
        }
    }
}

/// Everything owned by one play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaySession {
    /// Liveness token; continuations scheduled under another token are stale
    pub token: u64,
    pub course: Course,
    pub ball: BallState,
    pub progress: Progression,
    pub motion: Motion,
    /// World position of the current hole's cup
    pub cup_world: Vec2,
    /// Time left before the first swing is accepted (ms)
    pub arm_remaining: f32,
    /// Last known pointer position in world space
    pub pointer: Option<Vec2>,
    /// Advisory aim arc (visual only)
    pub preview: Option<ShotArc>,
}

impl PlaySession {
    pub fn phase(&self) -> ShotPhase {
        self.motion.phase()
    }

    pub fn current_hole(&self) -> Option<&Hole> {
        self.course.holes.get(self.progress.current_hole_index)
    }

    pub fn hud(&self) -> HudReadout {
        HudReadout {
            hole_number: self.current_hole().map(|h| h.number).unwrap_or(0),
            total_holes: self.course.holes.len() as u32,
            strokes_this_hole: self.progress.strokes_this_hole,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_phase_mapping() {
        assert_eq!(Motion::Aiming.phase(), ShotPhase::Aiming);
        assert_eq!(Motion::Rolling.phase(), ShotPhase::Rolling);
        assert_eq!(
            Motion::Swinging {
                target: Vec2::ZERO,
                elapsed: 0.0
            }
            .phase(),
            ShotPhase::Swinging
        );
    }

    #[test]
    fn test_continuation_progress() {
        let mut c = Continuation {
            pending: Pending::Sink,
            delay: 500.0,
            elapsed: 250.0,
            ticket: 1,
        };
        assert!((c.progress() - 0.5).abs() < 1e-6);
        c.elapsed = 900.0;
        assert_eq!(c.progress(), 1.0);
        c.delay = 0.0;
        assert_eq!(c.progress(), 1.0);
    }

    #[test]
    fn test_summary_total() {
        let summary = CourseSummary {
            result: CourseResult {
                course_strokes: vec![2, 4, 3],
            },
            total_holes: 3,
            club_name: "Pine Links".to_string(),
        };
        assert_eq!(summary.total(), 9);
    }

    #[test]
    fn test_tone_colors() {
        assert_eq!(NotifyTone::Water.color(), "#3498db");
        assert_eq!(NotifyTone::Sand.color(), "#f1c40f");
    }
}
