//! Shot controller
//!
//! Frame-driven state machine: Aiming -> Swinging -> Flight -> (Bounce) ->
//! Rolling -> landing check, with hazards and hole-out branching into timed
//! Resolved continuations. The host calls `update(delta)` once per frame;
//! phase timers advance synchronously inside that call.

use glam::Vec2;

use super::arc::{ShotArc, lift_profile};
use super::progress::HudReadout;
use super::state::{
    BallState, BouncePath, Continuation, CourseSummary, FlightPath, GameEvent, Hazard, Motion,
    NotifyTone, Pending, PlaySession, SessionEnd, ShotPhase,
};
use super::terrain::{TerrainKind, TerrainPhysics};
use crate::consts::*;
use crate::course::{Course, GridCoord};
use crate::error::CourseError;
use crate::iso::{IsoProjection, ViewRotation};
use crate::settings::{Settings, WaterPolicy};
use crate::{direction_between, effective_power};

/// What an impact on bounceable terrain turns into
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImpactPlan {
    /// Hop `distance` pixels, then roll with `roll_power`
    Bounce { distance: f32, roll_power: f32 },
    /// Too little energy to hop; roll straight away
    Roll { roll_power: f32 },
}

impl ImpactPlan {
    /// Plan an impact with the given (already dampened) power
    pub fn new(effective_power: f32, physics: TerrainPhysics) -> Self {
        let distance = bounce_distance(effective_power, physics);
        Self::for_bounce(distance, effective_power, physics)
    }

    /// Branch on a computed bounce distance. Exactly the threshold rolls.
    pub fn for_bounce(distance: f32, effective_power: f32, physics: TerrainPhysics) -> Self {
        if distance > BOUNCE_THRESHOLD {
            ImpactPlan::Bounce {
                distance,
                roll_power: distance * physics.roll_multiplier * ROLL_SCALE,
            }
        } else {
            ImpactPlan::Roll {
                roll_power: effective_power
                    * physics.bounce_multiplier
                    * physics.roll_multiplier
                    * ROLL_SCALE,
            }
        }
    }

    pub fn roll_power(&self) -> f32 {
        match *self {
            ImpactPlan::Bounce { roll_power, .. } | ImpactPlan::Roll { roll_power } => roll_power,
        }
    }
}

/// Hop length for an impact
#[inline]
pub fn bounce_distance(effective_power: f32, physics: TerrainPhysics) -> f32 {
    effective_power * physics.bounce_multiplier * BOUNCE_FACTOR
}

/// Initial rolling speed (pixels/ms) for a roll power
#[inline]
pub fn roll_velocity(roll_power: f32) -> f32 {
    roll_power / ROLL_VELOCITY_DIVISOR
}

/// Exponential friction decay normalised to the reference tick
#[inline]
pub fn decay_velocity(velocity: f32, friction: f32, delta: f32) -> f32 {
    velocity * friction.powf(delta / FRICTION_REFERENCE_MS)
}

/// Rolling capture: close enough and slow enough to drop
#[inline]
pub fn captures_rolling(distance_to_cup: f32, velocity: f32) -> bool {
    distance_to_cup < CUP_CAPTURE_RADIUS && velocity < CUP_CAPTURE_SPEED
}

/// Control point lift for an arc of `distance`, capped
#[inline]
fn arc_raise(distance: f32, cap: f32) -> f32 {
    (distance / 2.0).min(cap)
}

/// Outcome of stepping a session
enum Flow {
    Continue,
    End(SessionEnd),
}

/// Read-only context plus the event sink for one step
struct Frame<'a> {
    settings: &'a Settings,
    projection: &'a IsoProjection,
    generation: u64,
    events: &'a mut Vec<GameEvent>,
}

impl Frame<'_> {
    fn notify(&mut self, message: impl Into<String>, tone: NotifyTone) {
        self.events.push(GameEvent::notify(message, tone));
    }

    fn terrain_under(&self, session: &PlaySession, world: Vec2) -> (GridCoord, TerrainKind) {
        let cell = self.projection.world_to_grid(world, false);
        (cell, session.course.terrain.terrain_at(cell))
    }
}

/// Owns the play session and drives it frame by frame
#[derive(Debug, Clone)]
pub struct ShotController {
    settings: Settings,
    projection: IsoProjection,
    rotation: ViewRotation,
    session: Option<PlaySession>,
    /// Bumped whenever a session is torn down
    generation: u64,
    events: Vec<GameEvent>,
}

impl Default for ShotController {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl ShotController {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            projection: IsoProjection::default(),
            rotation: ViewRotation::Deg0,
            session: None,
            generation: 0,
            events: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn projection(&self) -> &IsoProjection {
        &self.projection
    }

    pub fn session(&self) -> Option<&PlaySession> {
        self.session.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.session.is_some()
    }

    pub fn phase(&self) -> Option<ShotPhase> {
        self.session.as_ref().map(|s| s.phase())
    }

    pub fn can_swing(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.progress.can_swing && s.phase() == ShotPhase::Aiming)
    }

    pub fn hud(&self) -> Option<HudReadout> {
        self.session.as_ref().map(|s| s.hud())
    }

    /// Advisory aim arc, present only while aiming
    pub fn preview(&self) -> Option<&ShotArc> {
        self.session.as_ref().and_then(|s| s.preview.as_ref())
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start playing a course from its first hole
    pub fn try_enter_play_mode(&mut self, course: Course) -> Result<(), CourseError> {
        let (tee, cup) = course.validate_for_play()?;

        if self.session.is_some() {
            self.exit_play_mode();
        }

        self.projection = IsoProjection::new(course.terrain.width(), course.terrain.height())
            .with_rotation(self.rotation);

        let ball = BallState::at_rest(self.projection.cell_to_world(tee), tee);
        let cup_world = self.projection.cell_to_world(cup);
        let arm = self.settings.swing_arm_delay_ms;

        let mut session = PlaySession {
            token: self.generation,
            course,
            ball,
            progress: Default::default(),
            motion: Motion::Aiming,
            cup_world,
            arm_remaining: arm,
            pointer: None,
            preview: None,
        };
        session.progress.can_swing = arm <= 0.0;

        log::info!(
            "Entering play mode: {} ({} holes)",
            session.course.club_name,
            session.course.holes.len()
        );
        self.events.push(GameEvent::notify(
            "ENTERING PLAY MODE - ESC to Exit",
            NotifyTone::Info,
        ));
        self.events.push(GameEvent::Hud(session.hud()));
        self.session = Some(session);
        Ok(())
    }

    /// Start playing; on a configuration error, notify and refuse
    pub fn enter_play_mode(&mut self, course: Course) -> bool {
        match self.try_enter_play_mode(course) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Cannot enter play mode: {}", err);
                self.events
                    .push(GameEvent::notify(err.to_string(), NotifyTone::Error));
                false
            }
        }
    }

    /// Tear down the session, discarding any in-flight phase
    pub fn exit_play_mode(&mut self) {
        if let Some(session) = self.session.take() {
            self.generation += 1;
            log::info!(
                "Exiting play mode during {:?} on hole index {}",
                session.phase(),
                session.progress.current_hole_index
            );
        }
    }

    /// Rotate the view. Only allowed outside play or while aiming.
    pub fn set_view_rotation(&mut self, rotation: ViewRotation) -> bool {
        if let Some(session) = self.session.as_ref() {
            if session.phase() != ShotPhase::Aiming {
                return false;
            }
        }
        let old = self.projection;
        self.rotation = rotation;
        self.projection.rotation = rotation;

        if let Some(session) = self.session.as_mut() {
            let cell = old.world_to_grid(session.ball.world_position, true);
            session.ball.world_position = self.projection.cell_to_world(cell);
            if let Some(cup) = session.current_hole().and_then(|h| h.cup) {
                session.cup_world = self.projection.cell_to_world(cup);
            }
            session.preview = None;
        }
        true
    }

    /// Track the pointer for the aim preview
    pub fn aim(&mut self, pointer: Vec2) {
        if let Some(session) = self.session.as_mut() {
            session.pointer = Some(pointer);
        }
    }

    /// Swing at a world-space target. Ignored unless aiming and armed.
    pub fn swing(&mut self, pointer: Vec2) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if !session.progress.can_swing || session.phase() != ShotPhase::Aiming {
            return false;
        }

        session.progress.can_swing = false;
        let strokes = session.progress.add_stroke();
        session.pointer = Some(pointer);
        session.preview = None;
        session.motion = Motion::Swinging {
            target: pointer,
            elapsed: 0.0,
        };
        log::debug!("Swing #{} toward ({:.1}, {:.1})", strokes, pointer.x, pointer.y);
        self.events.push(GameEvent::Hud(session.hud()));
        true
    }

    /// Advance the active phase by `delta` milliseconds
    pub fn update(&mut self, delta: f32) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let delta = delta.max(0.0);
        let mut frame = Frame {
            settings: &self.settings,
            projection: &self.projection,
            generation: self.generation,
            events: &mut self.events,
        };

        if let Flow::End(reason) = step(session, &mut frame, delta) {
            self.end_session(reason);
        }
    }

    fn end_session(&mut self, reason: SessionEnd) {
        self.session = None;
        self.generation += 1;
        log::info!("Play session ended: {:?}", reason);
        self.events.push(GameEvent::SessionEnded(reason));
    }
}

/// Advance one phase by `delta`
fn step(s: &mut PlaySession, f: &mut Frame, delta: f32) -> Flow {
    match &mut s.motion {
        Motion::Aiming => {
            if !s.progress.can_swing {
                s.arm_remaining -= delta;
                if s.arm_remaining <= 0.0 {
                    s.progress.can_swing = true;
                }
            }
            if s.progress.can_swing {
                s.preview = s.pointer.map(|target| {
                    let start = s.ball.world_position;
                    let raise = arc_raise(start.distance(target), f.settings.preview_arc_cap);
                    ShotArc::new(start, target, raise, 0.0)
                });
            }
            Flow::Continue
        }
        Motion::Swinging { target, elapsed } => {
            *elapsed += delta;
            if *elapsed < f.settings.swing_ms {
                return Flow::Continue;
            }
            let target = *target;
            launch(s, f, target)
        }
        Motion::Flight(flight) => {
            flight.elapsed += delta;
            let t = (flight.elapsed / flight.duration).min(1.0);
            s.ball.world_position = flight.arc.point(t);
            s.ball.lift = flight.arc.lift_at(t);
            s.ball.scale = 1.0 + lift_profile(t) * FLIGHT_SCALE_GAIN;
            if t < 1.0 {
                return Flow::Continue;
            }
            let (end, direction, power) = (flight.arc.end, flight.direction, flight.power);
            s.ball.touch_down();
            resolve_impact(s, f, end, direction, power)
        }
        Motion::Bounce(bounce) => {
            bounce.elapsed += delta;
            let t = (bounce.elapsed / bounce.duration).min(1.0);
            s.ball.world_position = bounce.arc.point(t);
            s.ball.lift = bounce.arc.lift_at(t);
            if t < 1.0 {
                return Flow::Continue;
            }
            let BouncePath {
                arc,
                direction,
                distance,
                roll_multiplier,
                ..
            } = *bounce;
            s.ball.touch_down();
            start_roll(s, arc.end, direction, distance * roll_multiplier * ROLL_SCALE)
        }
        Motion::Rolling => roll(s, f, delta),
        Motion::Resolved(cont) => {
            cont.elapsed += delta;
            let progress = cont.progress();
            match cont.pending {
                Pending::ReturnToAim { from, to } => {
                    s.ball.world_position = from.lerp(to, progress);
                }
                Pending::Sink => {
                    s.ball.alpha = 1.0 - progress;
                    s.ball.scale = 1.0 - 0.5 * progress;
                }
                Pending::AdvanceHole => {}
            }
            if cont.elapsed < cont.delay {
                return Flow::Continue;
            }
            let cont = *cont;
            fire(s, f, cont)
        }
    }
}

/// Ball leaves the club toward `target`
fn launch(s: &mut PlaySession, f: &mut Frame, target: Vec2) -> Flow {
    let start = s.ball.world_position;
    match direction_between(start, target) {
        None => {
            log::debug!("Zero-length shot, resolving in place");
            s.ball.velocity = 0.0;
            land(s, f)
        }
        Some((direction, distance)) => {
            let raise = arc_raise(distance, f.settings.flight_arc_cap);
            s.ball.direction = direction;
            s.motion = Motion::Flight(FlightPath {
                arc: ShotArc::new(start, target, raise, raise * 0.5),
                direction,
                power: distance,
                duration: f.settings.flight_duration(distance),
                elapsed: 0.0,
            });
            Flow::Continue
        }
    }
}

/// Terrain decides what happens where the ball came down
fn resolve_impact(
    s: &mut PlaySession,
    f: &mut Frame,
    point: Vec2,
    direction: Vec2,
    power: f32,
) -> Flow {
    s.ball.world_position = point;
    let (cell, terrain) = f.terrain_under(s, point);
    log::debug!(
        "Impact at ({}, {}) on {} with power {:.1}",
        cell.x,
        cell.y,
        terrain.as_str(),
        power
    );
    f.events.push(GameEvent::Impact {
        cell,
        terrain,
        power,
    });

    match terrain {
        TerrainKind::Out => penalty_drop(s, f, Hazard::OutOfBounds),
        TerrainKind::Water => splash(s, f),
        TerrainKind::Sand => plop(s, f),
        _ => match ImpactPlan::new(effective_power(power), terrain.physics()) {
            ImpactPlan::Bounce { distance, .. } => {
                let physics = terrain.physics();
                let end = point + direction * distance;
                s.motion = Motion::Bounce(BouncePath {
                    arc: ShotArc::new(
                        point,
                        end,
                        distance / BOUNCE_ARC_DIVISOR,
                        distance / BOUNCE_LIFT_DIVISOR,
                    ),
                    direction,
                    distance,
                    roll_multiplier: physics.roll_multiplier,
                    duration: f.settings.bounce_duration(distance),
                    elapsed: 0.0,
                });
                Flow::Continue
            }
            ImpactPlan::Roll { roll_power } => start_roll(s, point, direction, roll_power),
        },
    }
}

fn start_roll(s: &mut PlaySession, from: Vec2, direction: Vec2, roll_power: f32) -> Flow {
    s.ball.world_position = from;
    s.ball.direction = direction;
    s.ball.velocity = roll_velocity(roll_power);
    s.motion = Motion::Rolling;
    Flow::Continue
}

/// One rolling tick
fn roll(s: &mut PlaySession, f: &mut Frame, delta: f32) -> Flow {
    let travel = s.ball.velocity * delta;
    s.ball.world_position += s.ball.direction * travel;

    let (cell, terrain) = f.terrain_under(s, s.ball.world_position);
    let to_cup = s.ball.world_position.distance(s.cup_world);

    if captures_rolling(to_cup, s.ball.velocity) {
        return hole_out(s, f);
    }

    match terrain {
        TerrainKind::Out => penalty_drop(s, f, Hazard::OutOfBounds),
        TerrainKind::Water => {
            f.events.push(GameEvent::Impact {
                cell,
                terrain,
                power: 0.0,
            });
            splash(s, f)
        }
        TerrainKind::Sand => plop(s, f),
        _ => {
            s.ball.velocity = decay_velocity(s.ball.velocity, terrain.physics().friction, delta);
            if s.ball.velocity < ROLL_STOP_VELOCITY {
                s.ball.velocity = 0.0;
                land(s, f)
            } else {
                Flow::Continue
            }
        }
    }
}

/// Sand swallows the ball where it is
fn plop(s: &mut PlaySession, f: &mut Frame) -> Flow {
    f.notify("PLOP!", NotifyTone::Sand);
    s.ball.velocity = 0.0;
    land(s, f)
}

/// Ball at rest: hole out if close, otherwise aim from here
fn land(s: &mut PlaySession, f: &mut Frame) -> Flow {
    if s.ball.world_position.distance(s.cup_world) < CUP_LANDING_RADIUS {
        return hole_out(s, f);
    }

    let (cell, terrain) = f.terrain_under(s, s.ball.world_position);
    if terrain != TerrainKind::Out {
        s.ball.last_valid_grid = cell;
    }
    log::debug!("Ball at rest on ({}, {})", cell.x, cell.y);
    ready_to_aim(s);
    Flow::Continue
}

fn ready_to_aim(s: &mut PlaySession) {
    s.ball.velocity = 0.0;
    s.ball.touch_down();
    s.motion = Motion::Aiming;
    s.progress.can_swing = true;
}

fn schedule(s: &mut PlaySession, pending: Pending, delay: f32) {
    s.progress.can_swing = false;
    s.preview = None;
    s.motion = Motion::Resolved(Continuation {
        pending,
        delay,
        elapsed: 0.0,
        ticket: s.token,
    });
}

/// Penalty stroke and walk back to the last valid cell
fn penalty_drop(s: &mut PlaySession, f: &mut Frame, hazard: Hazard) -> Flow {
    let strokes = s.progress.add_stroke();
    let message = match hazard {
        Hazard::OutOfBounds => "Out of bounds! +1 stroke",
        Hazard::Water => "SPLASH! +1 stroke",
    };
    let tone = match hazard {
        Hazard::OutOfBounds => NotifyTone::Warning,
        Hazard::Water => NotifyTone::Water,
    };
    log::debug!("{:?} penalty, strokes this hole: {}", hazard, strokes);
    f.notify(message, tone);
    f.events.push(GameEvent::Penalty {
        hazard,
        strokes_this_hole: strokes,
    });
    f.events.push(GameEvent::Hud(s.hud()));

    s.ball.velocity = 0.0;
    s.ball.touch_down();
    let from = s.ball.world_position;
    let to = f.projection.cell_to_world(s.ball.last_valid_grid);
    schedule(s, Pending::ReturnToAim { from, to }, f.settings.reposition_ms);
    Flow::Continue
}

fn splash(s: &mut PlaySession, f: &mut Frame) -> Flow {
    match f.settings.water_policy {
        WaterPolicy::DropWithPenalty => penalty_drop(s, f, Hazard::Water),
        WaterPolicy::EndSession => {
            f.notify("SPLASH!", NotifyTone::Water);
            s.ball.velocity = 0.0;
            s.ball.touch_down();
            schedule(s, Pending::Sink, f.settings.sink_ms);
            Flow::Continue
        }
    }
}

/// Ball is in the cup: record the hole, then wait before moving on
fn hole_out(s: &mut PlaySession, f: &mut Frame) -> Flow {
    let strokes = s.progress.record_hole();
    let hole_number = s.current_hole().map(|h| h.number).unwrap_or(0);
    log::info!("Hole {} complete in {} strokes", hole_number, strokes);

    s.ball.velocity = 0.0;
    s.ball.touch_down();
    s.ball.world_position = s.cup_world;
    s.ball.visible = false;

    f.notify("IN THE HOLE!", NotifyTone::Warning);
    f.events.push(GameEvent::HoleComplete {
        hole_number,
        strokes,
    });
    schedule(s, Pending::AdvanceHole, f.settings.win_delay_ms);
    Flow::Continue
}

/// Run a continuation whose timer elapsed
fn fire(s: &mut PlaySession, f: &mut Frame, cont: Continuation) -> Flow {
    if cont.ticket != s.token || s.token != f.generation {
        log::warn!(
            "Discarding stale {:?} (ticket {}, generation {})",
            cont.pending,
            cont.ticket,
            f.generation
        );
        ready_to_aim(s);
        return Flow::Continue;
    }

    match cont.pending {
        Pending::ReturnToAim { to, .. } => {
            s.ball.world_position = to;
            ready_to_aim(s);
            Flow::Continue
        }
        Pending::Sink => Flow::End(SessionEnd::Water),
        Pending::AdvanceHole => advance_hole(s, f),
    }
}

fn advance_hole(s: &mut PlaySession, f: &mut Frame) -> Flow {
    let total_holes = s.course.holes.len();

    if !s.progress.has_next_hole(total_holes) {
        let summary = CourseSummary {
            result: s.progress.result(),
            total_holes: total_holes as u32,
            club_name: s.course.club_name.clone(),
        };
        log::info!(
            "Course complete: {} strokes over {} holes",
            summary.total(),
            summary.total_holes
        );
        f.notify(
            format!("Course complete! Total strokes: {}", summary.total()),
            NotifyTone::Success,
        );
        f.events.push(GameEvent::CourseComplete(summary));
        return Flow::End(SessionEnd::CourseComplete);
    }

    s.progress.advance();
    let Some(hole) = s.current_hole() else {
        return Flow::End(SessionEnd::ConfigurationError);
    };
    let hole_number = hole.number;
    match s.course.playable_endpoints(hole) {
        Ok((tee, cup)) => {
            s.ball = BallState::at_rest(f.projection.cell_to_world(tee), tee);
            s.cup_world = f.projection.cell_to_world(cup);
            log::info!("Advancing to hole {}", hole_number);
            f.notify(format!("Hole {}", hole_number), NotifyTone::Success);
            f.events.push(GameEvent::Hud(s.hud()));
            ready_to_aim(s);
            Flow::Continue
        }
        Err(err) => {
            log::warn!("Cannot start hole {}: {}", hole_number, err);
            f.notify(err.to_string(), NotifyTone::Error);
            Flow::End(SessionEnd::ConfigurationError)
        }
    }
}
