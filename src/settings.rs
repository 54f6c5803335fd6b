//! Play settings
//!
//! Phase timings and hazard policy. Loaded from a JSON file on native
//! builds; missing fields fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// What a water landing does to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WaterPolicy {
    /// The play session ends outright
    #[default]
    EndSession,
    /// Penalty stroke and a drop at the last valid position, like out of bounds
    DropWithPenalty,
}

impl WaterPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaterPolicy::EndSession => "end_session",
            WaterPolicy::DropWithPenalty => "drop_with_penalty",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "end_session" | "end" => Some(WaterPolicy::EndSession),
            "drop_with_penalty" | "drop" => Some(WaterPolicy::DropWithPenalty),
            _ => None,
        }
    }
}

/// Tunable timings (milliseconds) and policies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Swing ===
    pub swing_ms: f32,
    /// Delay after entering play before swings are accepted
    pub swing_arm_delay_ms: f32,

    // === Flight ===
    pub flight_base_ms: f32,
    pub flight_distance_divisor: f32,
    pub flight_arc_cap: f32,
    pub preview_arc_cap: f32,

    // === Bounce ===
    pub bounce_base_ms: f32,

    // === Resolution ===
    pub reposition_ms: f32,
    pub sink_ms: f32,
    pub win_delay_ms: f32,

    // === Hazards ===
    pub water_policy: WaterPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            swing_ms: SWING_DURATION_MS,
            swing_arm_delay_ms: SWING_ARM_DELAY_MS,

            flight_base_ms: FLIGHT_BASE_MS,
            flight_distance_divisor: FLIGHT_DISTANCE_DIVISOR,
            flight_arc_cap: FLIGHT_ARC_CAP,
            preview_arc_cap: PREVIEW_ARC_CAP,

            bounce_base_ms: BOUNCE_BASE_MS,

            reposition_ms: REPOSITION_MS,
            sink_ms: SINK_MS,
            win_delay_ms: WIN_DELAY_MS,

            water_policy: WaterPolicy::EndSession,
        }
    }
}

impl Settings {
    /// Flight time for a shot of `distance` pixels
    pub fn flight_duration(&self, distance: f32) -> f32 {
        self.flight_base_ms + distance / self.flight_distance_divisor
    }

    /// Bounce time for a bounce of `distance` pixels
    pub fn bounce_duration(&self, distance: f32) -> f32 {
        self.bounce_base_ms + distance
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn read(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::info!("Using default settings ({})", err);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let s = Settings::default();
        assert_eq!(s.swing_ms, 150.0);
        assert_eq!(s.win_delay_ms, 2000.0);
        assert_eq!(s.water_policy, WaterPolicy::EndSession);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "win_delay_ms": 500.0, "water_policy": "drop_with_penalty" }"#)
            .unwrap();
        assert_eq!(s.win_delay_ms, 500.0);
        assert_eq!(s.water_policy, WaterPolicy::DropWithPenalty);
        assert_eq!(s.swing_ms, SWING_DURATION_MS);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Parse(_))
        ));
        assert!(matches!(
            Settings::read("/definitely/not/here.json"),
            Err(SettingsError::Io(_))
        ));
    }

    #[test]
    fn test_durations() {
        let s = Settings::default();
        assert!((s.flight_duration(150.0) - 700.0).abs() < 1e-4);
        assert!((s.bounce_duration(37.5) - 337.5).abs() < 1e-4);
    }

    #[test]
    fn test_water_policy_names() {
        assert_eq!(WaterPolicy::from_str("DROP"), Some(WaterPolicy::DropWithPenalty));
        assert_eq!(
            WaterPolicy::from_str(WaterPolicy::EndSession.as_str()),
            Some(WaterPolicy::EndSession)
        );
        assert_eq!(WaterPolicy::from_str("swim"), None);
    }
}
