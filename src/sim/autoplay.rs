//! Demo golfer
//!
//! Aims at the cup, shortening the shot so the bounce carries the ball the
//! rest of the way. A seeded RNG adds a little scatter so runs vary by seed
//! but stay reproducible.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::terrain::TerrainKind;
use super::tick::ShotController;
use crate::consts::{BOUNCE_FACTOR, BOUNCE_THRESHOLD};
use crate::direction_between;

#[derive(Debug, Clone)]
pub struct AutoGolfer {
    rng: Pcg32,
    /// Maximum aim error per axis (pixels)
    pub scatter: f32,
}

impl AutoGolfer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            scatter: 0.0,
        }
    }

    pub fn with_scatter(mut self, scatter: f32) -> Self {
        self.scatter = scatter.max(0.0);
        self
    }

    /// Aim point for a ball at `ball` going for a cup on `cup_terrain`
    pub fn pick_target(&mut self, ball: Vec2, cup: Vec2, cup_terrain: TerrainKind) -> Vec2 {
        let Some((dir, dist)) = direction_between(ball, cup) else {
            return cup;
        };

        let carry = cup_terrain.physics().bounce_multiplier * BOUNCE_FACTOR;
        let flight = dist / (1.0 + carry);
        let aim = if flight * carry > BOUNCE_THRESHOLD {
            ball + dir * flight
        } else {
            // Short enough to land and stop near the cup
            cup
        };

        if self.scatter > 0.0 {
            let jitter = Vec2::new(
                self.rng.random_range(-self.scatter..=self.scatter),
                self.rng.random_range(-self.scatter..=self.scatter),
            );
            aim + jitter
        } else {
            aim
        }
    }

    /// Swing if the controller is ready. Returns true when a shot was taken.
    pub fn play(&mut self, controller: &mut ShotController) -> bool {
        if !controller.can_swing() {
            return false;
        }
        let Some(session) = controller.session() else {
            return false;
        };
        let cup_cell = controller.projection().world_to_grid(session.cup_world, false);
        let cup_terrain = session.course.terrain.terrain_at(cup_cell);
        let target = self.pick_target(session.ball.world_position, session.cup_world, cup_terrain);
        controller.aim(target);
        controller.swing(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_shot_is_shortened_for_carry() {
        let mut golfer = AutoGolfer::new(7);
        let ball = Vec2::ZERO;
        let cup = Vec2::new(275.0, 0.0);
        let target = golfer.pick_target(ball, cup, TerrainKind::Green);
        // Grass/green carry 0.375 of the flight
        assert!((target.x - 200.0).abs() < 1e-3);
        assert_eq!(target.y, 0.0);
    }

    #[test]
    fn test_short_putt_aims_at_cup() {
        let mut golfer = AutoGolfer::new(7);
        let cup = Vec2::new(40.0, 10.0);
        assert_eq!(golfer.pick_target(Vec2::ZERO, cup, TerrainKind::Green), cup);
        assert_eq!(golfer.pick_target(cup, cup, TerrainKind::Green), cup);
    }

    #[test]
    fn test_scatter_is_seeded() {
        let mut a = AutoGolfer::new(42).with_scatter(5.0);
        let mut b = AutoGolfer::new(42).with_scatter(5.0);
        let cup = Vec2::new(300.0, 120.0);
        for _ in 0..10 {
            let ta = a.pick_target(Vec2::ZERO, cup, TerrainKind::Fairway);
            let tb = b.pick_target(Vec2::ZERO, cup, TerrainKind::Fairway);
            assert_eq!(ta, tb);
        }
    }
}
