//! Stateless pixel-space drawing primitives.
//!
//! Each function takes explicit pixel coordinates and appends commands to a
//! [`Frame`]; nothing here knows about meters except
//! [`draw_trajectory_path`], which is handed its transform.

use std::f32::consts::FRAC_PI_6;

use macroquad::color::Color;
use macroquad::math::{Vec2, vec2};

use crate::core::draw::{Frame, TextAlign, palette};
use crate::core::trajectory::TrajectoryPoint;
use crate::core::window::{PixelTransform, clip_segment};

pub const ARROW_HEAD_PX: f32 = 10.0;
pub const ARROW_SHAFT_WIDTH: f32 = 2.0;
pub const DASH_PX: f32 = 5.0;
pub const TRAJECTORY_WIDTH: f32 = 2.0;
pub const LABEL_FONT_SIZE: u16 = 14;

const HEIGHT_ARROW_PAD_PX: f32 = 10.0;
const HEIGHT_ARROW_SHAFT_PX: f32 = 10.0;
const HEIGHT_ARROW_HEAD_PX: f32 = 8.0;
const HEIGHT_LABEL_PAD_PX: f32 = 5.0;
const ANGLE_LABEL_GAP_PX: f32 = 5.0;

/// Shaft from `start` to `end` with a filled head at `end`, wings ±30° off the shaft.
pub fn draw_solid_arrow(frame: &mut Frame, start: Vec2, end: Vec2, color: Color, head_size: f32) {
    let angle = (end.y - start.y).atan2(end.x - start.x);
    frame.line(start, end, ARROW_SHAFT_WIDTH, color);

    let wing = |offset: f32| {
        let a = angle + offset;
        end - vec2(a.cos(), a.sin()) * head_size
    };
    frame.fill_triangle(end, wing(-FRAC_PI_6), wing(FRAC_PI_6), color);
}

/// Evenly spaced dashes from `from` towards `to`, each `dash_len` long with
/// an equal gap. Returns how many dashes were drawn: none when the visible
/// part of the line is shorter than one dash plus one gap.
///
/// The line is first cut to the frame, so the dash count never exceeds what
/// the frame's diagonal can hold.
pub fn draw_dashed_line(
    frame: &mut Frame,
    from: Vec2,
    to: Vec2,
    dash_len: f32,
    width: f32,
    color: Color,
) -> usize {
    if !(dash_len > 0.0) {
        return 0;
    }
    let bounds = vec2(frame.width(), frame.height());
    let Some((from, to)) = clip_segment(from, to, Vec2::ZERO, bounds) else {
        return 0;
    };
    let delta = to - from;
    let count = (delta.length() / (2.0 * dash_len)).floor() as usize;
    if count == 0 {
        return 0;
    }

    let period = delta / count as f32;
    for i in 0..count {
        let start = from + period * i as f32;
        frame.line(start, start + period * 0.5, width, color);
    }
    count
}

/// Vertical dimension line between `bottom_y` and `top_y` at column `x`,
/// inset by a small pad at both ends. A short arrow leaves each inset end
/// heading further along the line; `label` sits right-aligned beside the midpoint.
pub fn draw_height_indicator(
    frame: &mut Frame,
    x: f32,
    bottom_y: f32,
    top_y: f32,
    label: &str,
    color: Color,
) {
    let lower = vec2(x, bottom_y - HEIGHT_ARROW_PAD_PX);
    let upper = vec2(x, top_y + HEIGHT_ARROW_PAD_PX);

    draw_dashed_line(frame, lower, upper, DASH_PX, 1.0, color);
    draw_solid_arrow(
        frame,
        lower,
        lower - vec2(0.0, HEIGHT_ARROW_SHAFT_PX),
        color,
        HEIGHT_ARROW_HEAD_PX,
    );
    draw_solid_arrow(
        frame,
        upper,
        upper + vec2(0.0, HEIGHT_ARROW_SHAFT_PX),
        color,
        HEIGHT_ARROW_HEAD_PX,
    );

    frame.text(
        label,
        vec2(x - HEIGHT_LABEL_PAD_PX, (bottom_y + top_y) * 0.5),
        LABEL_FONT_SIZE,
        false,
        TextAlign::Right,
        color,
    );
}

/// Short ray from the launcher at `angle_deg` above horizontal, labelled in degrees.
pub fn draw_angle_indicator(
    frame: &mut Frame,
    origin: Vec2,
    angle_deg: f64,
    length: f32,
    color: Color,
) {
    let theta = angle_deg.to_radians() as f32;
    let end = origin + vec2(theta.cos(), -theta.sin()) * length;
    draw_solid_arrow(frame, origin, end, color, ARROW_HEAD_PX);
    frame.text(
        format!("{angle_deg:.1}°"),
        end + vec2(ANGLE_LABEL_GAP_PX, 0.0),
        LABEL_FONT_SIZE,
        true,
        TextAlign::Left,
        color,
    );
}

/// Bullseye: three concentric discs at 1.0×, 0.7× and 0.4× of `radius`.
pub fn draw_target(frame: &mut Frame, center: Vec2, radius: f32) {
    let rings = [
        (1.0, palette::TARGET_OUTER),
        (0.7, palette::TARGET_MIDDLE),
        (0.4, palette::TARGET_INNER),
    ];
    for (factor, fill) in rings {
        frame.circle(center, radius * factor, fill, palette::TARGET_OUTLINE);
    }
}

/// Straight segments through the sampled points, no smoothing.
pub fn draw_trajectory_path(
    frame: &mut Frame,
    points: &[TrajectoryPoint],
    transform: &PixelTransform,
    color: Color,
) {
    if points.is_empty() {
        return;
    }
    let pixels = points.iter().map(|p| transform.to_pixel(*p)).collect();
    frame.polyline(pixels, TRAJECTORY_WIDTH, color);
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::core::draw::DrawCommand;

    const RED: Color = palette::TARGET_OUTER;

    fn lines(frame: &Frame) -> Vec<(Vec2, Vec2)> {
        frame
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn arrow_head_wings_sit_thirty_degrees_off_the_shaft() {
        let mut frame = Frame::new(800.0, 400.0);
        draw_solid_arrow(&mut frame, vec2(0.0, 0.0), vec2(100.0, 0.0), RED, 10.0);

        let [shaft, head] = frame.commands() else {
            panic!("expected shaft and head, got {:?}", frame.commands());
        };
        assert!(matches!(shaft, DrawCommand::Line { width, .. } if *width == ARROW_SHAFT_WIDTH));
        let DrawCommand::FillTriangle { a, b, c, .. } = head else {
            panic!("head should be a filled triangle");
        };
        assert_eq!(*a, vec2(100.0, 0.0));
        let back = 100.0 - 10.0 * FRAC_PI_6.cos();
        assert_abs_diff_eq!(b.x, back, epsilon = 1e-4);
        assert_abs_diff_eq!(b.y, 5.0, epsilon = 1e-4);
        assert_abs_diff_eq!(c.x, back, epsilon = 1e-4);
        assert_abs_diff_eq!(c.y, -5.0, epsilon = 1e-4);
    }

    #[test]
    fn dashes_are_evenly_spaced() {
        let mut frame = Frame::new(800.0, 400.0);
        let drawn = draw_dashed_line(&mut frame, vec2(0.0, 0.0), vec2(100.0, 0.0), 5.0, 1.0, RED);

        assert_eq!(drawn, 10);
        let segments = lines(&frame);
        assert_eq!(segments.len(), 10);
        for (i, (from, to)) in segments.iter().enumerate() {
            assert_abs_diff_eq!(from.x, 10.0 * i as f32, epsilon = 1e-4);
            assert_abs_diff_eq!(to.x - from.x, 5.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn short_span_draws_no_dashes() {
        let mut frame = Frame::new(800.0, 400.0);
        let drawn = draw_dashed_line(&mut frame, vec2(0.0, 0.0), vec2(0.0, 9.0), 5.0, 1.0, RED);
        assert_eq!(drawn, 0);
        assert!(frame.commands().is_empty());

        let drawn = draw_dashed_line(&mut frame, vec2(3.0, 3.0), vec2(3.0, 3.0), 5.0, 1.0, RED);
        assert_eq!(drawn, 0);
        assert!(frame.commands().is_empty());
    }

    #[test]
    fn non_finite_ends_draw_no_dashes() {
        let mut frame = Frame::new(800.0, 400.0);
        let drawn = draw_dashed_line(
            &mut frame,
            vec2(40.0, 390.0),
            vec2(40.0, f32::NEG_INFINITY),
            5.0,
            1.0,
            RED,
        );
        assert_eq!(drawn, 0);
        assert!(frame.commands().is_empty());
    }

    #[test]
    fn dashes_stop_at_the_frame_edge() {
        let mut frame = Frame::new(800.0, 400.0);
        let drawn = draw_dashed_line(
            &mut frame,
            vec2(40.0, 385.0),
            vec2(40.0, -8.0e6),
            5.0,
            1.0,
            RED,
        );

        assert_eq!(drawn, 38);
        assert!(
            lines(&frame)
                .iter()
                .all(|(from, to)| from.y <= 385.0 && to.y >= -1e-3)
        );
    }

    #[test]
    fn height_arrow_heads_point_inward_from_the_padded_ends() {
        let mut frame = Frame::new(800.0, 400.0);
        draw_height_indicator(&mut frame, 40.0, 400.0, 200.0, "25.0m", RED);

        let heads: Vec<Vec2> = frame
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillTriangle { a, .. } => Some(*a),
                _ => None,
            })
            .collect();
        assert_eq!(heads, vec![vec2(40.0, 380.0), vec2(40.0, 220.0)]);

        let shafts: Vec<(Vec2, Vec2)> = frame
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { from, to, width, .. } if *width == ARROW_SHAFT_WIDTH => {
                    Some((*from, *to))
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            shafts,
            vec![
                (vec2(40.0, 390.0), vec2(40.0, 380.0)),
                (vec2(40.0, 210.0), vec2(40.0, 220.0)),
            ]
        );
    }

    #[test]
    fn height_indicator_labels_the_midpoint_right_aligned() {
        let mut frame = Frame::new(800.0, 400.0);
        draw_height_indicator(&mut frame, 40.0, 400.0, 200.0, "25.0m", RED);

        let heads = frame
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillTriangle { .. }))
            .count();
        assert_eq!(heads, 2);

        let Some(DrawCommand::Text {
            text,
            anchor,
            align,
            ..
        }) = frame.commands().last()
        else {
            panic!("label should be drawn last");
        };
        assert_eq!(text, "25.0m");
        assert_eq!(*anchor, vec2(35.0, 300.0));
        assert_eq!(*align, TextAlign::Right);
    }

    #[test]
    fn angle_indicator_points_up_and_right() {
        let mut frame = Frame::new(800.0, 400.0);
        draw_angle_indicator(&mut frame, vec2(60.0, 300.0), 30.0, 50.0, RED);

        let Some(DrawCommand::Line { to, .. }) = frame.commands().first() else {
            panic!("shaft should come first");
        };
        assert_abs_diff_eq!(to.x, 60.0 + 50.0 * 30f32.to_radians().cos(), epsilon = 1e-3);
        assert_abs_diff_eq!(to.y, 300.0 - 25.0, epsilon = 1e-3);
        assert!(matches!(
            frame.commands().last(),
            Some(DrawCommand::Text { text, bold: true, .. }) if text == "30.0°"
        ));
    }

    #[test]
    fn target_rings_shrink_inwards() {
        let mut frame = Frame::new(800.0, 400.0);
        draw_target(&mut frame, vec2(450.0, 360.0), 15.0);

        let radii: Vec<f32> = frame
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Circle { radius, outline, .. } => {
                    assert_eq!(*outline, palette::TARGET_OUTLINE);
                    Some(*radius)
                }
                _ => None,
            })
            .collect();
        assert_eq!(radii.len(), 3);
        assert_abs_diff_eq!(radii[0], 15.0);
        assert_abs_diff_eq!(radii[1], 10.5, epsilon = 1e-5);
        assert_abs_diff_eq!(radii[2], 6.0, epsilon = 1e-5);
    }

    #[test]
    fn trajectory_path_transforms_every_point() {
        let mut frame = Frame::new(800.0, 400.0);
        let transform = PixelTransform {
            scale: 8.0,
            left_margin: 50.0,
            base_y: 400.0,
        };
        let points = [
            TrajectoryPoint::new(0.0, 0.0),
            TrajectoryPoint::new(1.0, 1.0),
            TrajectoryPoint::new(2.0, 0.5),
        ];
        draw_trajectory_path(&mut frame, &points, &transform, palette::TRAJECTORY);

        let [DrawCommand::Polyline { points, .. }] = frame.commands() else {
            panic!("expected one polyline");
        };
        assert_eq!(
            points,
            &vec![vec2(50.0, 400.0), vec2(58.0, 392.0), vec2(66.0, 396.0)]
        );

        let mut empty = Frame::new(800.0, 400.0);
        draw_trajectory_path(&mut empty, &[], &transform, palette::TRAJECTORY);
        assert!(empty.commands().is_empty());
    }
}
