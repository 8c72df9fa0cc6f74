//! Game balance tunables
//!
//! Loaded from JSON; any field left out falls back to its default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scene::FlySpawn;

/// Whether a fly exactly `hit_radius` away from a tap is caught
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HitBoundary {
    /// Rim counts as a hit (`distance <= radius`)
    Inclusive,
    /// Rim is a miss (`distance < radius`)
    #[default]
    Exclusive,
}

impl HitBoundary {
    pub fn is_inclusive(&self) -> bool {
        matches!(self, HitBoundary::Inclusive)
    }
}

/// Errors raised while loading or validating tunables
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("spawn band is empty: spawn_x_min {min} > spawn_x_max {max}")]
    EmptySpawnBand { min: f32, max: f32 },
}

/// Game balance tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Spawning ===
    /// Seconds between spawn attempts
    pub spawn_period: f32,
    /// Title screen rejects spawns once the count exceeds this
    pub title_cap: usize,
    /// Playing ends in game over once the count exceeds this
    pub playing_cap: usize,
    /// Horizontal spawn band (left edge)
    pub spawn_x_min: f32,
    /// Horizontal spawn band (right edge)
    pub spawn_x_max: f32,
    /// Spawn height, above the visible area
    pub spawn_y: f32,

    // === Fly body ===
    pub fly_mass: f32,
    pub fly_damping: f32,
    pub fly_body_radius: f32,

    // === Steering ===
    /// Seconds between steering updates
    pub steer_period: f32,
    /// Attractor; `None` until a target is bound
    pub target: Option<Vec2>,
    pub attraction_x: f32,
    pub attraction_y: f32,
    /// Upper clamp on the attraction term (not on the jitter)
    pub attraction_max: f32,
    pub jitter_x: f32,
    pub jitter_y: f32,
    /// Rotation per unit of horizontal velocity
    pub rotation_factor: f32,
    pub rotation_duration: f32,

    // === Input ===
    pub hit_radius: f32,
    pub hit_boundary: HitBoundary,
    pub score_numerator: u64,

    // === Presentation ===
    /// Cross-fade duration for the title and game-over overlays
    pub overlay_fade: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_period: 1.0,
            title_cap: 4,
            playing_cap: 20,
            spawn_x_min: -350.0,
            spawn_x_max: 350.0,
            spawn_y: 700.0,

            fly_mass: 0.05,
            fly_damping: 1.0,
            fly_body_radius: 1.0,

            steer_period: 1.0 / 60.0,
            target: Some(Vec2::ZERO),
            attraction_x: 0.01,
            attraction_y: 0.005,
            attraction_max: 1.0,
            jitter_x: 3.0,
            jitter_y: 0.5,
            rotation_factor: -0.001,
            rotation_duration: 0.1,

            hit_radius: 60.0,
            hit_boundary: HitBoundary::Exclusive,
            score_numerator: 1000,

            overlay_fade: 0.5,
        }
    }
}

impl Tuning {
    /// Parse and validate tunables from a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tunables from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("spawn_period", self.spawn_period),
            ("steer_period", self.steer_period),
            ("fly_mass", self.fly_mass),
        ];
        for (field, value) in positive {
            // NaN fails this comparison too
            if !(value > 0.0) {
                return Err(TuningError::NonPositive { field, value });
            }
        }
        let non_negative = [
            ("hit_radius", self.hit_radius),
            ("fly_damping", self.fly_damping),
            ("jitter_x", self.jitter_x),
            ("jitter_y", self.jitter_y),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(TuningError::Negative { field, value });
            }
        }
        if self.spawn_x_min > self.spawn_x_max {
            return Err(TuningError::EmptySpawnBand {
                min: self.spawn_x_min,
                max: self.spawn_x_max,
            });
        }
        Ok(())
    }

    /// Prototype descriptor for a fresh fly at `position`
    pub fn fly_prototype(&self, position: Vec2) -> FlySpawn {
        FlySpawn {
            position,
            rotation: 0.0,
            opacity: 1.0,
            body_radius: self.fly_body_radius,
            mass: self.fly_mass,
            damping: self.fly_damping,
            trail: true,
            buzz: true,
        }
    }
}
