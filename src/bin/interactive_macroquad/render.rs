use std::convert::Infallible;

use macroquad::prelude::*;

use parabolic_target::core::draw::{DrawCommand, DrawSurface, TextAlign};
use parabolic_target::core::window::clip_segment;

/// Offset for the second pass of faux-bold text.
const BOLD_OFFSET_PX: f32 = 0.6;

pub(crate) fn draw_ui_text(
    text: &str,
    x: f32,
    y: f32,
    font_size: u16,
    color: Color,
    font: Option<&Font>,
) {
    draw_text_ex(
        text,
        x,
        y,
        TextParams {
            font,
            font_size,
            color,
            ..Default::default()
        },
    );
}

/// Draws scene frames straight into the window, shifted to the canvas origin.
///
/// Segments are cut at the canvas edges and shapes lying wholly outside are
/// skipped, so nothing spills over the surrounding page.
pub(crate) struct MacroquadSurface {
    origin: Vec2,
    size: Vec2,
    font: Option<Font>,
}

impl MacroquadSurface {
    pub(crate) fn new(origin: Vec2, size: Vec2, font: Option<Font>) -> Self {
        Self { origin, size, font }
    }

    fn at(&self, point: Vec2) -> Vec2 {
        self.origin + point
    }

    /// Visible part of a canvas-space segment, in window coordinates.
    fn clip(&self, from: Vec2, to: Vec2) -> Option<(Vec2, Vec2)> {
        clip_segment(from, to, Vec2::ZERO, self.size).map(|(a, b)| (self.at(a), self.at(b)))
    }

    /// Whether the canvas-space box `min..=max` overlaps the canvas at all.
    fn overlaps(&self, min: Vec2, max: Vec2) -> bool {
        min.x <= self.size.x && min.y <= self.size.y && max.x >= 0.0 && max.y >= 0.0
    }

    fn draw_segment(&self, from: Vec2, to: Vec2, width: f32, color: Color) {
        if let Some((a, b)) = self.clip(from, to) {
            draw_line(a.x, a.y, b.x, b.y, width, color);
        }
    }
}

impl DrawSurface for MacroquadSurface {
    type Error = Infallible;

    fn execute(&mut self, command: &DrawCommand) -> Result<(), Self::Error> {
        match command {
            DrawCommand::Clear { color } => {
                draw_rectangle(self.origin.x, self.origin.y, self.size.x, self.size.y, *color);
            }
            DrawCommand::Line {
                from,
                to,
                width,
                color,
            } => self.draw_segment(*from, *to, *width, *color),
            DrawCommand::Polyline {
                points,
                width,
                color,
            } => {
                for pair in points.windows(2) {
                    self.draw_segment(pair[0], pair[1], *width, *color);
                }
            }
            DrawCommand::FillTriangle { a, b, c, color } => {
                if self.overlaps(a.min(*b).min(*c), a.max(*b).max(*c)) {
                    draw_triangle(self.at(*a), self.at(*b), self.at(*c), *color);
                }
            }
            DrawCommand::FillRect {
                origin,
                size,
                color,
            } => {
                if self.overlaps(*origin, *origin + *size) {
                    let p = self.at(*origin);
                    draw_rectangle(p.x, p.y, size.x, size.y, *color);
                }
            }
            DrawCommand::Circle {
                center,
                radius,
                fill,
                outline,
                outline_width,
            } => {
                let reach = Vec2::splat(*radius);
                if self.overlaps(*center - reach, *center + reach) {
                    let c = self.at(*center);
                    draw_circle(c.x, c.y, *radius, *fill);
                    draw_circle_lines(c.x, c.y, *radius, *outline_width, *outline);
                }
            }
            DrawCommand::Text {
                text,
                anchor,
                size,
                bold,
                align,
                color,
            } => {
                if !self.overlaps(*anchor, *anchor) {
                    return Ok(());
                }
                let font = self.font.as_ref();
                let mut p = self.at(*anchor);
                if *align == TextAlign::Right {
                    p.x -= measure_text(text, font, *size, 1.0).width;
                }
                draw_ui_text(text, p.x, p.y, *size, *color, font);
                if *bold {
                    draw_ui_text(text, p.x + BOLD_OFFSET_PX, p.y, *size, *color, font);
                }
            }
        }
        Ok(())
    }
}
