//! SVG snapshots of a composed frame, drawn through plotters.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::info;
use macroquad::color::Color;
use macroquad::math::Vec2;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Circle, PathElement, Polygon, Rectangle};
use plotters::prelude::SVGBackend;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color as _, FontDesc, FontFamily, FontStyle, RGBAColor, TextStyle};

use crate::core::draw::{DrawCommand, DrawSurface, Frame, TextAlign, replay};
use crate::core::error::ExportError;

/// Replays frames into an SVG document held in a caller-owned string.
pub struct SvgSurface<'a> {
    area: DrawingArea<SVGBackend<'a>, Shift>,
}

impl<'a> SvgSurface<'a> {
    pub fn new(buffer: &'a mut String, width: f32, height: f32) -> Self {
        let size = (width.max(1.0).round() as u32, height.max(1.0).round() as u32);
        Self {
            area: SVGBackend::with_string(buffer, size).into_drawing_area(),
        }
    }
}

fn rgba(color: Color) -> RGBAColor {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    RGBAColor(
        channel(color.r),
        channel(color.g),
        channel(color.b),
        f64::from(color.a.clamp(0.0, 1.0)),
    )
}

fn pixel(point: Vec2) -> (i32, i32) {
    (point.x.round() as i32, point.y.round() as i32)
}

fn stroke(width: f32) -> u32 {
    width.max(1.0).round() as u32
}

fn draw_error(err: impl std::fmt::Display) -> ExportError {
    ExportError::Draw(err.to_string())
}

impl DrawSurface for SvgSurface<'_> {
    type Error = ExportError;

    fn execute(&mut self, command: &DrawCommand) -> Result<(), Self::Error> {
        match command {
            DrawCommand::Clear { color } => self.area.fill(&rgba(*color)).map_err(draw_error),
            DrawCommand::Line {
                from,
                to,
                width,
                color,
            } => self
                .area
                .draw(&PathElement::new(
                    vec![pixel(*from), pixel(*to)],
                    rgba(*color).stroke_width(stroke(*width)),
                ))
                .map_err(draw_error),
            DrawCommand::Polyline {
                points,
                width,
                color,
            } => {
                if points.len() < 2 {
                    return Ok(());
                }
                self.area
                    .draw(&PathElement::new(
                        points.iter().copied().map(pixel).collect::<Vec<_>>(),
                        rgba(*color).stroke_width(stroke(*width)),
                    ))
                    .map_err(draw_error)
            }
            DrawCommand::FillTriangle { a, b, c, color } => self
                .area
                .draw(&Polygon::new(
                    vec![pixel(*a), pixel(*b), pixel(*c)],
                    rgba(*color).filled(),
                ))
                .map_err(draw_error),
            DrawCommand::FillRect {
                origin,
                size,
                color,
            } => self
                .area
                .draw(&Rectangle::new(
                    [pixel(*origin), pixel(*origin + *size)],
                    rgba(*color).filled(),
                ))
                .map_err(draw_error),
            DrawCommand::Circle {
                center,
                radius,
                fill,
                outline,
                outline_width,
            } => {
                let center = pixel(*center);
                let radius = radius.max(0.0).round() as u32;
                self.area
                    .draw(&Circle::new(center, radius, rgba(*fill).filled()))
                    .map_err(draw_error)?;
                self.area
                    .draw(&Circle::new(
                        center,
                        radius,
                        rgba(*outline).stroke_width(stroke(*outline_width)),
                    ))
                    .map_err(draw_error)
            }
            DrawCommand::Text {
                text,
                anchor,
                size,
                bold,
                align,
                color,
            } => {
                let weight = if *bold {
                    FontStyle::Bold
                } else {
                    FontStyle::Normal
                };
                let h_pos = match align {
                    TextAlign::Left => HPos::Left,
                    TextAlign::Right => HPos::Right,
                };
                let ink = rgba(*color);
                let style = TextStyle::from(FontDesc::new(
                    FontFamily::SansSerif,
                    f64::from(*size),
                    weight,
                ))
                .color(&ink)
                .pos(Pos::new(h_pos, VPos::Bottom));
                self.area
                    .draw_text(text, &style, pixel(*anchor))
                    .map_err(draw_error)
            }
        }
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        self.area.present().map_err(draw_error)
    }
}

/// The frame as a standalone SVG document.
pub fn render_svg(frame: &Frame) -> Result<String, ExportError> {
    let mut svg = String::new();
    {
        let mut surface = SvgSurface::new(&mut svg, frame.width(), frame.height());
        replay(&mut surface, frame)?;
    }
    Ok(svg)
}

pub fn export_svg(frame: &Frame, path: &Path) -> Result<(), ExportError> {
    let svg = render_svg(frame)?;
    fs::write(path, svg).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "wrote {} draw commands to {}",
        frame.commands().len(),
        path.display()
    );
    Ok(())
}

/// `frame-YYYYMMDD-HHMMSS.svg` for snapshots taken without an explicit path.
pub fn default_snapshot_path(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(now.format("frame-%Y%m%d-%H%M%S.svg").to_string())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::core::compose::{SceneInputs, compose_scene};
    use crate::core::config::SimConfig;
    use crate::core::scene::SceneParameters;
    use crate::core::trajectory::{TrajectoryPoint, TrajectorySequence};

    fn frame() -> Frame {
        let scene = SceneParameters {
            gravity_mps2: 9.8,
            launch_angle_deg: 45.0,
            launcher_height_m: 10.0,
            target_height_m: 5.0,
            horizontal_distance_m: 50.0,
            projectile_mass_kg: 2.0,
        };
        let trajectory: TrajectorySequence = (0..10)
            .map(|i| {
                let t = f64::from(i) * 0.1;
                TrajectoryPoint::new(15.0 * t, 15.0 * t - 4.9 * t * t)
            })
            .collect();
        compose_scene(SceneInputs {
            scene: &scene,
            trajectory: &trajectory,
            config: &SimConfig::default(),
        })
    }

    #[test]
    fn snapshot_contains_every_kind_of_element() {
        let svg = render_svg(&frame()).expect("svg rendering succeeds");

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.matches("<circle").count() >= 3);
        assert!(svg.contains("<text"));
        assert!(svg.contains("45.0°"));
        assert!(svg.contains("10.0m"));
    }

    #[test]
    fn towering_target_still_renders() {
        let scene = SceneParameters {
            gravity_mps2: 9.8,
            launch_angle_deg: 45.0,
            launcher_height_m: 10.0,
            target_height_m: 1e6,
            horizontal_distance_m: 50.0,
            projectile_mass_kg: 2.0,
        };
        let frame = compose_scene(SceneInputs {
            scene: &scene,
            trajectory: &TrajectorySequence::new(),
            config: &SimConfig::default(),
        });

        let svg = render_svg(&frame).expect("svg rendering succeeds");
        assert!(svg.contains("1000000.0m"));
        assert!(svg.len() < 64 * 1024, "{} bytes", svg.len());
    }

    #[test]
    fn rendering_is_deterministic() {
        let frame = frame();
        assert_eq!(
            render_svg(&frame).expect("first render"),
            render_svg(&frame).expect("second render")
        );
    }

    #[test]
    fn export_reports_unwritable_paths() {
        let path = std::env::temp_dir()
            .join("parabolic_target_missing_dir")
            .join("nested")
            .join("frame.svg");
        let err = export_svg(&frame(), &path).expect_err("parent directory is missing");
        assert!(matches!(err, ExportError::Write { .. }));
    }

    #[test]
    fn export_writes_the_document() {
        let path = std::env::temp_dir().join(format!(
            "parabolic_target_export_{}.svg",
            std::process::id()
        ));
        export_svg(&frame(), &path).expect("export succeeds");

        let written = fs::read_to_string(&path).expect("snapshot exists");
        assert!(written.contains("<svg"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn default_path_is_timestamped() {
        let now = Local
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
            .single()
            .expect("unambiguous local time");
        assert_eq!(
            default_snapshot_path(now),
            PathBuf::from("frame-20240309-140507.svg")
        );
    }
}
