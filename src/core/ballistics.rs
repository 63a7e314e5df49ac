use serde::Serialize;

use crate::core::trajectory::TrajectoryPoint;

/// Launch speed (m/s) that carries a projectile fired at `angle_deg` from
/// `launcher_height_m` through the point `distance_m` downrange at
/// `target_height_m`.
///
/// Solves `Δh = d·tanθ − g·d² / (2·v²·cos²θ)` for `v`. The ratio under the
/// root is taken in absolute value: when the target sits above the line the
/// launch angle can reach, the denominator flips sign and the result is a
/// real number with no physical meaning instead of NaN.
///
/// Never fails. `gravity_mps2 > 0`, `distance_m > 0` and an angle strictly
/// inside (0°, 90°) are the caller's preconditions.
pub fn correct_launch_speed(
    gravity_mps2: f64,
    distance_m: f64,
    angle_deg: f64,
    launcher_height_m: f64,
    target_height_m: f64,
) -> f64 {
    let theta = angle_deg.to_radians();
    let cos_theta = theta.cos();
    let rise_m = target_height_m - launcher_height_m;

    let numerator = gravity_mps2 * distance_m * distance_m;
    let mut denominator = 2.0 * cos_theta * cos_theta * (distance_m * theta.tan() - rise_m);
    if denominator == 0.0 {
        // Target exactly on the launch line: no finite speed exists.
        denominator = f64::MIN_POSITIVE;
    }

    (numerator / denominator).abs().sqrt()
}

/// Horizontal and vertical launch velocity components.
pub fn velocity_components(speed_mps: f64, angle_deg: f64) -> (f64, f64) {
    let theta = angle_deg.to_radians();
    (speed_mps * theta.cos(), speed_mps * theta.sin())
}

/// Position `elapsed_s` seconds after launch, relative to the launcher.
///
/// Ideal kinematics with no clamping: `y` goes negative once the projectile
/// drops below the launch height and `x` keeps growing. Bounding the flight
/// is the animation driver's job.
pub fn sample_trajectory_at(
    speed_mps: f64,
    angle_deg: f64,
    gravity_mps2: f64,
    elapsed_s: f64,
) -> TrajectoryPoint {
    let (vx, vy) = velocity_components(speed_mps, angle_deg);
    TrajectoryPoint::new(
        vx * elapsed_s,
        (vy * elapsed_s) - (0.5 * gravity_mps2 * elapsed_s * elapsed_s),
    )
}

/// Time for the projectile to travel `distance_m` downrange.
///
/// Returns `None` when there is no horizontal motion (zero speed).
pub fn time_to_reach(speed_mps: f64, angle_deg: f64, distance_m: f64) -> Option<f64> {
    let (vx, _) = velocity_components(speed_mps, angle_deg);
    if vx <= 0.0 || !vx.is_finite() {
        return None;
    }
    Some(distance_m / vx)
}

/// Verdict on a submitted launch speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Accuracy {
    Accurate,
    Inaccurate,
}

impl Accuracy {
    /// `Accurate` when the guess lies strictly within `tolerance_mps` of the answer.
    pub fn judge(submitted_mps: f64, correct_mps: f64, tolerance_mps: f64) -> Self {
        if (submitted_mps - correct_mps).abs() < tolerance_mps {
            Self::Accurate
        } else {
            Self::Inaccurate
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Self::Accurate => "Perfect Shot!",
            Self::Inaccurate => "Almost there!",
        }
    }
}
