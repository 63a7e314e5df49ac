//! Tunables for layout, animation pacing and scoring.
//!
//! Defaults reproduce the classroom version of the game: an 800×400 canvas
//! at 8 px/m, a 50 ms tick that advances 0.1 s of flight, and a 3 s
//! "simulating" window after each launch.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub canvas_width_px: f32,
    pub canvas_height_px: f32,
    /// Pixels per meter.
    pub pixel_scale: f64,
    /// Gap between the canvas edge and the launcher sprite.
    pub left_margin_px: f64,
    pub launcher_width_px: f32,
    pub launcher_height_px: f32,
    pub target_radius_px: f32,
    pub tick_period_ms: u64,
    /// Simulated seconds added per tick.
    pub physics_step_s: f64,
    pub completion_delay_ms: u64,
    /// How far past the target a shot may fly before the animation stops.
    pub overshoot_margin_m: f64,
    pub accuracy_tolerance_mps: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            canvas_width_px: 800.0,
            canvas_height_px: 400.0,
            pixel_scale: 8.0,
            left_margin_px: 50.0,
            launcher_width_px: 20.0,
            launcher_height_px: 40.0,
            target_radius_px: 15.0,
            tick_period_ms: 50,
            physics_step_s: 0.1,
            completion_delay_ms: 3000,
            overshoot_margin_m: 10.0,
            accuracy_tolerance_mps: 0.5,
        }
    }
}

impl SimConfig {
    /// Reads a JSON config; missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("canvas_width_px", f64::from(self.canvas_width_px)),
            ("canvas_height_px", f64::from(self.canvas_height_px)),
            ("pixel_scale", self.pixel_scale),
            ("physics_step_s", self.physics_step_s),
            ("target_radius_px", f64::from(self.target_radius_px)),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.tick_period_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick_period_ms must be at least 1".to_string(),
            ));
        }
        if !(self.left_margin_px.is_finite() && self.left_margin_px >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "left_margin_px must be non-negative, got {}",
                self.left_margin_px
            )));
        }
        if !(self.overshoot_margin_m.is_finite() && self.overshoot_margin_m >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "overshoot_margin_m must be non-negative, got {}",
                self.overshoot_margin_m
            )));
        }
        if !(self.accuracy_tolerance_mps.is_finite() && self.accuracy_tolerance_mps > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "accuracy_tolerance_mps must be positive, got {}",
                self.accuracy_tolerance_mps
            )));
        }
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }
}
