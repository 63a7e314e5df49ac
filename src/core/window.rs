use macroquad::math::{Vec2, vec2};

use crate::core::config::SimConfig;
use crate::core::scene::SceneParameters;
use crate::core::trajectory::TrajectoryPoint;

/// Maps world meters onto canvas pixels: `(x·s + left, base_y − y·s)`.
///
/// World up is pixel down, hence the subtraction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelTransform {
    pub scale: f64,
    pub left_margin: f64,
    pub base_y: f64,
}

impl PixelTransform {
    pub fn to_pixel(&self, point: TrajectoryPoint) -> Vec2 {
        vec2(
            (point.x * self.scale + self.left_margin) as f32,
            (self.base_y - point.y * self.scale) as f32,
        )
    }
}

/// Narrows to `f32` without overflowing to infinity for far off-canvas values.
fn to_finite_px(value: f64) -> f32 {
    value.clamp(f64::from(f32::MIN), f64::from(f32::MAX)) as f32
}

/// The part of `from → to` inside the box `min..=max` (Liang-Barsky), or
/// `None` when the segment misses the box or has a non-finite end.
pub fn clip_segment(from: Vec2, to: Vec2, min: Vec2, max: Vec2) -> Option<(Vec2, Vec2)> {
    if !(from.is_finite() && to.is_finite()) {
        return None;
    }
    let delta = to - from;
    let mut enter = 0.0_f32;
    let mut exit = 1.0_f32;
    let edges = [
        (-delta.x, from.x - min.x),
        (delta.x, max.x - from.x),
        (-delta.y, from.y - min.y),
        (delta.y, max.y - from.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else if p < 0.0 {
            enter = enter.max(q / p);
        } else {
            exit = exit.min(q / p);
        }
    }
    if enter > exit {
        return None;
    }
    let clipped = (from + delta * enter, from + delta * exit);
    (clipped.0.is_finite() && clipped.1.is_finite()).then_some(clipped)
}

/// Fixed canvas geometry: the ground runs along the bottom edge and heights
/// are measured up from it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasLayout {
    pub width: f32,
    pub height: f32,
    pub scale: f64,
    pub left_margin: f64,
}

impl CanvasLayout {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            width: config.canvas_width_px,
            height: config.canvas_height_px,
            scale: config.pixel_scale,
            left_margin: config.left_margin_px,
        }
    }

    pub fn ground_y(&self) -> f32 {
        self.height
    }

    /// Pixel row of something `height_m` above the ground.
    pub fn height_to_y(&self, height_m: f64) -> f32 {
        to_finite_px(f64::from(self.height) - height_m * self.scale)
    }

    /// Pixel column of something `distance_m` downrange of the launcher.
    pub fn distance_to_x(&self, distance_m: f64) -> f32 {
        to_finite_px(distance_m * self.scale + self.left_margin)
    }

    pub fn launcher_y(&self, scene: &SceneParameters) -> f32 {
        self.height_to_y(scene.launcher_height_m)
    }

    pub fn target_center(&self, scene: &SceneParameters) -> Vec2 {
        vec2(
            self.distance_to_x(scene.horizontal_distance_m),
            self.height_to_y(scene.target_height_m),
        )
    }

    /// Transform for trajectory points, whose origin is the launcher.
    pub fn trajectory_transform(&self, scene: &SceneParameters) -> PixelTransform {
        PixelTransform {
            scale: self.scale,
            left_margin: self.left_margin,
            base_y: f64::from(self.height) - scene.launcher_height_m * self.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> SceneParameters {
        SceneParameters {
            gravity_mps2: 9.8,
            launch_angle_deg: 45.0,
            launcher_height_m: 10.0,
            target_height_m: 5.0,
            horizontal_distance_m: 50.0,
            projectile_mass_kg: 1.0,
        }
    }

    #[test]
    fn launch_point_maps_to_launcher_pixel() {
        let layout = CanvasLayout::from_config(&SimConfig::default());
        let transform = layout.trajectory_transform(&scene());

        let origin = transform.to_pixel(TrajectoryPoint::new(0.0, 0.0));
        assert_eq!(origin, vec2(50.0, 320.0));
        assert_eq!(origin.y, layout.launcher_y(&scene()));
    }

    #[test]
    fn world_up_is_pixel_down() {
        let transform = PixelTransform {
            scale: 8.0,
            left_margin: 50.0,
            base_y: 400.0,
        };
        let p = transform.to_pixel(TrajectoryPoint::new(10.0, 5.0));
        assert_eq!(p, vec2(130.0, 360.0));
    }

    #[test]
    fn target_sits_on_its_height_above_ground() {
        let layout = CanvasLayout::from_config(&SimConfig::default());
        assert_eq!(layout.target_center(&scene()), vec2(450.0, 360.0));
    }

    #[test]
    fn absurd_heights_stay_finite() {
        let layout = CanvasLayout::from_config(&SimConfig::default());
        let y = layout.height_to_y(1e38);
        assert!(y.is_finite());
        assert_eq!(y, f32::MIN);
        assert!(layout.distance_to_x(1e300).is_finite());
    }

    #[test]
    fn segment_is_cut_at_the_canvas_edges() {
        let (min, max) = (Vec2::ZERO, vec2(800.0, 400.0));

        let inside = clip_segment(vec2(10.0, 10.0), vec2(20.0, 30.0), min, max);
        assert_eq!(inside, Some((vec2(10.0, 10.0), vec2(20.0, 30.0))));

        let (from, to) = clip_segment(vec2(40.0, 390.0), vec2(40.0, -1.0e30), min, max)
            .expect("crosses the canvas");
        assert_eq!(from, vec2(40.0, 390.0));
        assert!(to.y.abs() < 1e-3, "clipped at the top edge, y={}", to.y);

        let (from, to) = clip_segment(vec2(-100.0, 200.0), vec2(900.0, 200.0), min, max)
            .expect("spans the canvas");
        assert_eq!((from.x, to.x), (0.0, 800.0));
    }

    #[test]
    fn segments_off_canvas_or_non_finite_are_dropped() {
        let (min, max) = (Vec2::ZERO, vec2(800.0, 400.0));
        assert_eq!(
            clip_segment(vec2(-50.0, -10.0), vec2(900.0, -20.0), min, max),
            None
        );
        assert_eq!(
            clip_segment(vec2(10.0, 10.0), vec2(10.0, f32::NEG_INFINITY), min, max),
            None
        );
        assert_eq!(
            clip_segment(vec2(f32::NAN, 10.0), vec2(10.0, 10.0), min, max),
            None
        );
    }
}
