//! Data-driven game balance
//!
//! Every number the simulation uses lives here so a run can be retuned from a
//! JSON file without rebuilding. Missing fields fall back to [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Problems loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Simulation balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub max_speed: f64,
    pub acceleration: f64,
    /// Speed multiplier applied each tick without throttle (0..=1)
    pub friction: f64,
    pub steer_step: f64,
    pub lateral_bound: f64,
    pub lane_spacing: f64,
    pub spawn_rate: f64,
    pub spawn_distance: f64,
    pub traffic_base_step: f64,
    pub traffic_speed_factor: f64,
    pub recycle_threshold: f64,
    pub max_traffic: usize,
    pub collision_distance: f64,
    pub near_miss_reward: u64,
    pub near_miss_ticks: u32,
    pub speed_display_scale: f64,
    pub gear_band: u32,
    pub steer_tilt: f64,
    pub pitch_factor: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_speed: MAX_SPEED,
            acceleration: ACCELERATION,
            friction: FRICTION,
            steer_step: STEER_STEP,
            lateral_bound: LATERAL_BOUND,
            lane_spacing: LANE_SPACING,
            spawn_rate: SPAWN_RATE,
            spawn_distance: SPAWN_DISTANCE,
            traffic_base_step: TRAFFIC_BASE_STEP,
            traffic_speed_factor: TRAFFIC_SPEED_FACTOR,
            recycle_threshold: RECYCLE_THRESHOLD,
            max_traffic: MAX_TRAFFIC,
            collision_distance: COLLISION_DISTANCE,
            near_miss_reward: NEAR_MISS_REWARD,
            near_miss_ticks: NEAR_MISS_TICKS,
            speed_display_scale: SPEED_DISPLAY_SCALE,
            gear_band: GEAR_BAND,
            steer_tilt: STEER_TILT,
            pitch_factor: PITCH_FACTOR,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate tuning from a JSON file on disk
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Check that every value keeps the simulation inside its invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        let finite = [
            ("max_speed", self.max_speed),
            ("acceleration", self.acceleration),
            ("friction", self.friction),
            ("steer_step", self.steer_step),
            ("lateral_bound", self.lateral_bound),
            ("lane_spacing", self.lane_spacing),
            ("spawn_rate", self.spawn_rate),
            ("spawn_distance", self.spawn_distance),
            ("traffic_base_step", self.traffic_base_step),
            ("traffic_speed_factor", self.traffic_speed_factor),
            ("recycle_threshold", self.recycle_threshold),
            ("collision_distance", self.collision_distance),
            ("speed_display_scale", self.speed_display_scale),
            ("steer_tilt", self.steer_tilt),
            ("pitch_factor", self.pitch_factor),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be finite",
                });
            }
        }

        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if self.max_speed <= 0.0 {
            return invalid("max_speed", "must be positive");
        }
        if self.acceleration < 0.0 {
            return invalid("acceleration", "must not be negative");
        }
        if !(0.0..=1.0).contains(&self.friction) {
            return invalid("friction", "must be within 0..=1");
        }
        if self.steer_step < 0.0 {
            return invalid("steer_step", "must not be negative");
        }
        if self.lateral_bound < 0.0 {
            return invalid("lateral_bound", "must not be negative");
        }
        if self.spawn_rate < 0.0 {
            return invalid("spawn_rate", "must not be negative");
        }
        // Agents must strictly approach even when the player is stopped
        if self.traffic_base_step <= 0.0 {
            return invalid("traffic_base_step", "must be positive");
        }
        if self.traffic_speed_factor < 0.0 {
            return invalid("traffic_speed_factor", "must not be negative");
        }
        if self.spawn_distance <= self.recycle_threshold {
            return invalid("spawn_distance", "must lie ahead of recycle_threshold");
        }
        if self.collision_distance < 0.0 {
            return invalid("collision_distance", "must not be negative");
        }
        if self.max_traffic == 0 {
            return invalid("max_traffic", "must allow at least one car");
        }
        if self.gear_band == 0 {
            return invalid("gear_band", "must be positive");
        }
        if self.speed_display_scale < 0.0 {
            return invalid("speed_display_scale", "must not be negative");
        }

        Ok(())
    }
}
