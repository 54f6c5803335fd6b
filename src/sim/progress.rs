//! Stroke counting and hole sequencing

use serde::{Deserialize, Serialize};

/// Strokes taken on one hole
pub type HoleScore = u32;

/// Live HUD readout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudReadout {
    pub hole_number: u32,
    pub total_holes: u32,
    pub strokes_this_hole: u32,
}

/// Per-hole tally for a completed course
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseResult {
    pub course_strokes: Vec<HoleScore>,
}

impl CourseResult {
    pub fn total(&self) -> u32 {
        self.course_strokes.iter().sum()
    }

    pub fn holes_played(&self) -> usize {
        self.course_strokes.len()
    }
}

/// Progression through a course during one play session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub current_hole_index: usize,
    pub strokes_this_hole: u32,
    /// One entry per holed-out hole, in play order
    pub course_strokes: Vec<HoleScore>,
    pub can_swing: bool,
}

impl Progression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a swing or a penalty
    pub fn add_stroke(&mut self) -> u32 {
        self.strokes_this_hole += 1;
        self.strokes_this_hole
    }

    /// Record the current hole's score. Called once, at cup capture.
    pub fn record_hole(&mut self) -> HoleScore {
        let score = self.strokes_this_hole;
        self.course_strokes.push(score);
        score
    }

    /// Whether a hole follows the current one
    pub fn has_next_hole(&self, total_holes: usize) -> bool {
        self.current_hole_index + 1 < total_holes
    }

    /// Move to the next hole with a fresh stroke count
    pub fn advance(&mut self) {
        self.current_hole_index += 1;
        self.strokes_this_hole = 0;
    }

    pub fn result(&self) -> CourseResult {
        CourseResult {
            course_strokes: self.course_strokes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strokes_and_advance() {
        let mut p = Progression::new();
        assert_eq!(p.add_stroke(), 1);
        assert_eq!(p.add_stroke(), 2);
        assert_eq!(p.record_hole(), 2);

        assert!(p.has_next_hole(2));
        p.advance();
        assert_eq!(p.current_hole_index, 1);
        assert_eq!(p.strokes_this_hole, 0);
        assert!(!p.has_next_hole(2));
    }

    #[test]
    fn test_course_result_total() {
        let result = CourseResult {
            course_strokes: vec![3, 5, 2],
        };
        assert_eq!(result.total(), 10);
        assert_eq!(result.holes_played(), 3);
        assert_eq!(CourseResult::default().total(), 0);
    }
}
