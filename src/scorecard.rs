//! Course-complete scorecard
//!
//! Text model for the results screen: club name, total, and a per-hole
//! breakdown capped at a handful of lines.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_CLUB_NAME;
use crate::sim::{CourseResult, CourseSummary, HoleScore};

/// Maximum breakdown rows before collapsing the rest
pub const MAX_VISIBLE_HOLES: usize = 8;

/// Summary of a finished round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    pub club_name: String,
    pub result: CourseResult,
    pub total_holes: u32,
}

impl Scorecard {
    pub fn from_summary(summary: &CourseSummary) -> Self {
        let club_name = if summary.club_name.trim().is_empty() {
            DEFAULT_CLUB_NAME.to_string()
        } else {
            summary.club_name.clone()
        };
        let total_holes = if summary.total_holes == 0 {
            summary.result.holes_played() as u32
        } else {
            summary.total_holes
        };
        Self {
            club_name,
            result: summary.result.clone(),
            total_holes,
        }
    }

    pub fn total_strokes(&self) -> u32 {
        self.result.total()
    }

    /// Best (lowest) single-hole score, if any hole was played
    pub fn best_hole(&self) -> Option<(usize, HoleScore)> {
        self.result
            .course_strokes
            .iter()
            .copied()
            .enumerate()
            .min_by_key(|&(_, s)| s)
            .map(|(i, s)| (i + 1, s))
    }

    /// Breakdown lines, with an overflow line past `MAX_VISIBLE_HOLES`
    pub fn breakdown(&self) -> Vec<String> {
        let strokes = &self.result.course_strokes;
        let mut lines: Vec<String> = strokes
            .iter()
            .take(MAX_VISIBLE_HOLES)
            .enumerate()
            .map(|(i, s)| format!("Hole {}: {} strokes", i + 1, s))
            .collect();
        if strokes.len() > MAX_VISIBLE_HOLES {
            lines.push(format!("...and {} more", strokes.len() - MAX_VISIBLE_HOLES));
        }
        lines
    }

    /// Full scorecard text
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("COURSE COMPLETE!\n");
        out.push_str(&self.club_name);
        out.push('\n');
        out.push_str(&format!("Total Strokes: {}\n", self.total_strokes()));
        out.push_str("Hole Breakdown:\n");
        for line in self.breakdown() {
            out.push_str("  ");
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}
