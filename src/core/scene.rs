use std::fmt;
use std::ops::Range;

use macroquad::rand::{gen_range, srand};
use serde::Serialize;

use crate::core::error::SessionError;

pub const GRAVITY_RANGE_MPS2: Range<f64> = 5.0..25.0;
pub const ANGLE_RANGE_DEG: Range<f64> = 15.0..75.0;
pub const LAUNCHER_HEIGHT_RANGE_M: Range<f64> = 0.0..30.0;
pub const TARGET_HEIGHT_RANGE_M: Range<f64> = 0.0..30.0;
pub const DISTANCE_RANGE_M: Range<f64> = 30.0..80.0;
pub const MASS_RANGE_KG: Range<f64> = 1.0..6.0;

/// Launch geometry for one round. Never mutated once generated.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SceneParameters {
    pub gravity_mps2: f64,
    pub launch_angle_deg: f64,
    pub launcher_height_m: f64,
    pub target_height_m: f64,
    pub horizontal_distance_m: f64,
    /// Shown to the player; the physics ignores it.
    pub projectile_mass_kg: f64,
}

impl SceneParameters {
    pub fn correct_speed_mps(&self) -> f64 {
        crate::core::ballistics::correct_launch_speed(
            self.gravity_mps2,
            self.horizontal_distance_m,
            self.launch_angle_deg,
            self.launcher_height_m,
            self.target_height_m,
        )
    }
}

impl fmt::Display for SceneParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "g={:.1} m/s², angle={:.1}°, launcher={:.1} m, target={:.1} m, distance={:.1} m, mass={:.1} kg",
            self.gravity_mps2,
            self.launch_angle_deg,
            self.launcher_height_m,
            self.target_height_m,
            self.horizontal_distance_m,
            self.projectile_mass_kg,
        )
    }
}

/// Supplies a fresh scene whenever a new round starts.
pub trait ParameterSource {
    fn next_scene(&mut self) -> SceneParameters;
}

/// Uniform draws from the classroom ranges.
pub struct RandomSource;

impl RandomSource {
    /// Seeds the shared generator when `seed` is given so a round can be replayed.
    pub fn new(seed: Option<u64>) -> Self {
        if let Some(seed) = seed {
            srand(seed);
        }
        Self
    }
}

impl ParameterSource for RandomSource {
    fn next_scene(&mut self) -> SceneParameters {
        SceneParameters {
            gravity_mps2: draw(GRAVITY_RANGE_MPS2),
            launch_angle_deg: draw(ANGLE_RANGE_DEG),
            launcher_height_m: draw(LAUNCHER_HEIGHT_RANGE_M),
            target_height_m: draw(TARGET_HEIGHT_RANGE_M),
            horizontal_distance_m: draw(DISTANCE_RANGE_M),
            projectile_mass_kg: draw(MASS_RANGE_KG),
        }
    }
}

fn draw(range: Range<f64>) -> f64 {
    // gen_range can land on the upper bound; keep the interval half-open.
    let value = gen_range(range.start, range.end);
    if value >= range.end {
        range.start
    } else {
        value
    }
}

/// Hands out the same scene every round.
pub struct FixedSource(pub SceneParameters);

impl ParameterSource for FixedSource {
    fn next_scene(&mut self) -> SceneParameters {
        self.0
    }
}

/// Parses the player's velocity entry.
///
/// Accepts any finite, non-negative number; surrounding whitespace is ignored.
pub fn parse_velocity(input: &str) -> Result<f64, SessionError> {
    let reject = |reason| SessionError::InvalidInput {
        input: input.to_string(),
        reason,
    };

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(reject("enter a number"));
    }
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| reject("expected a number such as 22.5"))?;
    if !value.is_finite() {
        return Err(reject("must be a finite number"));
    }
    if value < 0.0 {
        return Err(reject("cannot be negative"));
    }
    Ok(value)
}
