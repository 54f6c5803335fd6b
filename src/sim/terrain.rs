//! Terrain physics table
//!
//! Static per-terrain coefficients. `Water` and `Sand` carry zeros as
//! behavioural flags: the shot resolver never bounces or rolls on them.

use serde::{Deserialize, Serialize};

/// Classification of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainKind {
    #[default]
    Grass,
    Fairway,
    Green,
    Rough,
    Sand,
    Water,
    Tee,
    Out,
}

impl TerrainKind {
    pub const ALL: [TerrainKind; 8] = [
        TerrainKind::Grass,
        TerrainKind::Fairway,
        TerrainKind::Green,
        TerrainKind::Rough,
        TerrainKind::Sand,
        TerrainKind::Water,
        TerrainKind::Tee,
        TerrainKind::Out,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TerrainKind::Grass => "grass",
            TerrainKind::Fairway => "fairway",
            TerrainKind::Green => "green",
            TerrainKind::Rough => "rough",
            TerrainKind::Sand => "sand",
            TerrainKind::Water => "water",
            TerrainKind::Tee => "tee",
            TerrainKind::Out => "out",
        }
    }

    /// Parse a tile type name; unknown names are `Out`
    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "grass" => TerrainKind::Grass,
            "fairway" => TerrainKind::Fairway,
            "green" => TerrainKind::Green,
            "rough" => TerrainKind::Rough,
            "sand" => TerrainKind::Sand,
            "water" => TerrainKind::Water,
            "tee" => TerrainKind::Tee,
            _ => TerrainKind::Out,
        }
    }

    /// Coefficients for this terrain
    #[inline]
    pub fn physics(&self) -> TerrainPhysics {
        lookup(*self)
    }
}

/// Per-terrain coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainPhysics {
    /// Per-reference-tick velocity retention while rolling
    pub friction: f32,
    pub bounce_multiplier: f32,
    pub roll_multiplier: f32,
}

impl TerrainPhysics {
    const fn new(friction: f32, bounce_multiplier: f32, roll_multiplier: f32) -> Self {
        Self {
            friction,
            bounce_multiplier,
            roll_multiplier,
        }
    }
}

const FAIRWAY: TerrainPhysics = TerrainPhysics::new(0.92, 0.25, 0.25);
const GREEN: TerrainPhysics = TerrainPhysics::new(0.96, 0.25, 0.275);
const ROUGH: TerrainPhysics = TerrainPhysics::new(0.81, 0.10, 0.075);
const SAND: TerrainPhysics = TerrainPhysics::new(0.0, 0.0, 0.0);
const OUT: TerrainPhysics = TerrainPhysics::new(0.85, 0.25, 0.25);
const GRASS: TerrainPhysics = TerrainPhysics::new(0.92, 0.25, 0.25);
const TEE: TerrainPhysics = TerrainPhysics::new(0.92, 0.25, 0.25);
const WATER: TerrainPhysics = TerrainPhysics::new(0.0, 0.0, 0.0);

/// Coefficients for a terrain kind
pub const fn lookup(kind: TerrainKind) -> TerrainPhysics {
    match kind {
        TerrainKind::Grass => GRASS,
        TerrainKind::Fairway => FAIRWAY,
        TerrainKind::Green => GREEN,
        TerrainKind::Rough => ROUGH,
        TerrainKind::Sand => SAND,
        TerrainKind::Water => WATER,
        TerrainKind::Tee => TEE,
        TerrainKind::Out => OUT,
    }
}

/// Coefficients for a possibly-missing kind; missing resolves to `Out`
pub fn lookup_opt(kind: Option<TerrainKind>) -> TerrainPhysics {
    lookup(kind.unwrap_or(TerrainKind::Out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_unknown_resolve_to_out() {
        assert_eq!(lookup_opt(None), lookup(TerrainKind::Out));
        assert_eq!(TerrainKind::from_name("lava"), TerrainKind::Out);
        assert_eq!(TerrainKind::from_name("Green"), TerrainKind::Green);

        let out = lookup(TerrainKind::Out);
        assert_eq!(out.friction, 0.85);
        assert_eq!(out.bounce_multiplier, 0.25);
        assert_eq!(out.roll_multiplier, 0.25);
    }

    #[test]
    fn test_coefficient_ranges() {
        for kind in TerrainKind::ALL {
            let p = kind.physics();
            assert!(p.bounce_multiplier >= 0.0, "{:?}", kind);
            assert!(p.roll_multiplier >= 0.0, "{:?}", kind);
            if matches!(kind, TerrainKind::Water | TerrainKind::Sand) {
                assert_eq!(p.friction, 0.0, "{:?}", kind);
            } else {
                assert!(p.friction > 0.0 && p.friction <= 1.0, "{:?}", kind);
            }
        }
    }

    #[test]
    fn test_names_round_trip() {
        for kind in TerrainKind::ALL {
            assert_eq!(TerrainKind::from_name(kind.as_str()), kind);
        }
    }

    #[test]
    fn test_hazards_never_bounce() {
        assert_eq!(TerrainKind::Sand.physics().bounce_multiplier, 0.0);
        assert_eq!(TerrainKind::Water.physics().bounce_multiplier, 0.0);
    }
}
