use log::debug;
use macroquad::math::vec2;

use crate::core::config::SimConfig;
use crate::core::draw::{DrawSurface, Frame, palette, replay};
use crate::core::render::{
    draw_angle_indicator, draw_height_indicator, draw_target, draw_trajectory_path,
};
use crate::core::scene::SceneParameters;
use crate::core::trajectory::TrajectorySequence;
use crate::core::window::CanvasLayout;

const GROUND_WIDTH: f32 = 2.0;
const ANGLE_RAY_PX: f32 = 50.0;
/// The angle ray starts at the launcher sprite's horizontal middle.
const ANGLE_ORIGIN_OFFSET_PX: f32 = 10.0;
const LAUNCHER_HEIGHT_MARKER_X: f32 = 40.0;
const TARGET_HEIGHT_MARKER_GAP_PX: f32 = 30.0;

/// Everything the scene picture depends on.
#[derive(Clone, Copy, Debug)]
pub struct SceneInputs<'a> {
    pub scene: &'a SceneParameters,
    pub trajectory: &'a TrajectorySequence,
    pub config: &'a SimConfig,
}

/// Builds the frame for one redraw.
///
/// Order is fixed: background, ground, launcher, target, angle ray, height
/// markers, then the trajectory on top. The result depends on the inputs
/// alone, so equal inputs always give equal frames.
pub fn compose_scene(inputs: SceneInputs<'_>) -> Frame {
    let SceneInputs {
        scene,
        trajectory,
        config,
    } = inputs;
    let layout = CanvasLayout::from_config(config);
    let mut frame = Frame::new(layout.width, layout.height);

    frame.clear(palette::CANVAS_BG);

    let ground_y = layout.ground_y();
    frame.line(
        vec2(0.0, ground_y),
        vec2(layout.width, ground_y),
        GROUND_WIDTH,
        palette::GROUND,
    );

    let launcher_x = layout.left_margin as f32;
    let launcher_y = layout.launcher_y(scene);
    frame.fill_rect(
        vec2(launcher_x, launcher_y - config.launcher_height_px),
        vec2(config.launcher_width_px, config.launcher_height_px),
        palette::LAUNCHER,
    );

    let target = layout.target_center(scene);
    draw_target(&mut frame, target, config.target_radius_px);

    draw_angle_indicator(
        &mut frame,
        vec2(launcher_x + ANGLE_ORIGIN_OFFSET_PX, launcher_y),
        scene.launch_angle_deg,
        ANGLE_RAY_PX,
        palette::ANGLE_INDICATOR,
    );

    draw_height_indicator(
        &mut frame,
        LAUNCHER_HEIGHT_MARKER_X,
        ground_y,
        launcher_y,
        &format!("{:.1}m", scene.launcher_height_m),
        palette::HEIGHT_INDICATOR,
    );
    draw_height_indicator(
        &mut frame,
        target.x + TARGET_HEIGHT_MARKER_GAP_PX,
        ground_y,
        target.y,
        &format!("{:.1}m", scene.target_height_m),
        palette::HEIGHT_INDICATOR,
    );

    if !trajectory.is_empty() {
        draw_trajectory_path(
            &mut frame,
            trajectory.points(),
            &layout.trajectory_transform(scene),
            palette::TRAJECTORY,
        );
    }

    frame
}

/// Holds the drawing surface once it exists and the last composed frame.
///
/// Until a surface is attached nothing is composed or drawn. After that the
/// frame is rebuilt only when the caller's revision changes; otherwise the
/// cached frame is replayed (immediate-mode surfaces need a full redraw
/// every display frame).
pub struct SceneView<S> {
    surface: Option<S>,
    cached: Option<(u64, Frame)>,
}

impl<S> Default for SceneView<S> {
    fn default() -> Self {
        Self {
            surface: None,
            cached: None,
        }
    }
}

impl<S: DrawSurface> SceneView<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, surface: S) {
        self.surface = Some(surface);
    }

    pub fn detach(&mut self) -> Option<S> {
        self.cached = None;
        self.surface.take()
    }

    pub fn is_ready(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Draws the scene for `revision`, composing with `compose` only when
    /// the revision differs from the cached one. Returns `Ok(false)` when
    /// no surface is attached yet.
    pub fn present<F>(&mut self, revision: u64, compose: F) -> Result<bool, S::Error>
    where
        F: FnOnce() -> Frame,
    {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(false);
        };

        let frame = match &mut self.cached {
            Some((cached_revision, frame)) if *cached_revision == revision => &*frame,
            cached => {
                debug!("recomposing scene for revision {revision}");
                &cached.insert((revision, compose())).1
            }
        };
        replay(surface, frame)?;
        Ok(true)
    }
}
