//! Error types
//!
//! Configuration problems block an action and surface as a user-facing
//! message. Hazards (out of bounds, water) are shot outcomes, not errors.

use thiserror::Error;

/// A course or hole that cannot be finalized or played
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CourseError {
    #[error("Need at least 1 hole to play!")]
    NoHoles,
    #[error("Hole {hole} is missing its tee")]
    MissingTee { hole: u32 },
    #[error("Hole {hole} is missing its cup")]
    MissingCup { hole: u32 },
    #[error("Hole {hole} has its tee off the course")]
    TeeOffGrid { hole: u32 },
    #[error("Hole {hole} has its cup off the course")]
    CupOffGrid { hole: u32 },
}

impl CourseError {
    /// Message shown when the editor refuses to finish a hole
    pub fn finalize_message(&self) -> String {
        match self {
            CourseError::MissingTee { .. } => "Cannot finish: Missing Tee!".to_string(),
            CourseError::MissingCup { .. } => "Cannot finish: Missing Cup!".to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
