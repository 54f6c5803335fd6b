//! Parametric arcs for flight, bounce and the aim preview
//!
//! All arcs are quadratic beziers on the ground plane. The control point is
//! the chord midpoint raised (screen -y) by the arc height. Any extra visual
//! lift is reported separately and never feeds terrain or landing logic.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A quadratic bezier between two ground-plane points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotArc {
    pub start: Vec2,
    pub control: Vec2,
    pub end: Vec2,
    /// Peak of the visual lift added on top of the ground path
    pub lift: f32,
}

impl ShotArc {
    /// Arc with its control point raised by `raise`
    pub fn new(start: Vec2, end: Vec2, raise: f32, lift: f32) -> Self {
        let mid = (start + end) / 2.0;
        Self {
            start,
            control: Vec2::new(mid.x, mid.y - raise),
            end,
            lift,
        }
    }

    /// Ground-plane position at `t` in [0, 1]
    pub fn point(&self, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        self.start * (u * u) + self.control * (2.0 * u * t) + self.end * (t * t)
    }

    /// Visual height above the ground path at `t`
    #[inline]
    pub fn lift_at(&self, t: f32) -> f32 {
        lift_profile(t) * self.lift
    }

    /// `segments + 1` evenly spaced samples, endpoints included
    pub fn sample(&self, segments: usize) -> Vec<Vec2> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.point(i as f32 / segments as f32))
            .collect()
    }
}

/// Normalised lift curve: sin(t * pi), zero at both ends
#[inline]
pub fn lift_profile(t: f32) -> f32 {
    (t.clamp(0.0, 1.0) * std::f32::consts::PI).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_endpoints() {
        let arc = ShotArc::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 40.0), 50.0, 25.0);
        assert_eq!(arc.point(0.0), arc.start);
        assert!((arc.point(1.0) - arc.end).length() < 1e-4);
        // Out-of-range t clamps
        assert!((arc.point(1.5) - arc.end).length() < 1e-4);
    }

    #[test]
    fn test_arc_rises_toward_screen_top() {
        let arc = ShotArc::new(Vec2::new(0.0, 100.0), Vec2::new(200.0, 100.0), 80.0, 0.0);
        let apex = arc.point(0.5);
        assert!((apex.x - 100.0).abs() < 1e-4);
        // Bezier midpoint sits halfway to the control point
        assert!((apex.y - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_lift_profile_peaks_mid_arc() {
        assert!(lift_profile(0.0).abs() < 1e-6);
        assert!((lift_profile(0.5) - 1.0).abs() < 1e-6);
        assert!(lift_profile(1.0).abs() < 1e-6);
    }

    #[test]
    fn test_sample_count() {
        let arc = ShotArc::new(Vec2::ZERO, Vec2::new(10.0, 0.0), 5.0, 0.0);
        let points = arc.sample(20);
        assert_eq!(points.len(), 21);
        assert_eq!(points[0], Vec2::ZERO);
    }
}
