//! Pixel-space drawing commands and the surfaces that replay them.
//!
//! Rendering never touches a real canvas: primitives append commands to a
//! [`Frame`], and a [`DrawSurface`] (the window, an SVG snapshot, a test
//! recorder) replays the frame. Commands cover lines, filled triangles and
//! rectangles, outlined circles and text.

use macroquad::color::Color;
use macroquad::math::Vec2;

/// `0xRRGGBB` to an opaque color.
pub const fn hex(rgb: u32) -> Color {
    Color::new(
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        1.0,
    )
}

pub mod palette {
    use macroquad::color::Color;

    use super::hex;

    pub const CANVAS_BG: Color = hex(0xf9fafb);
    pub const GROUND: Color = hex(0x2d3748);
    pub const LAUNCHER: Color = hex(0x4a5568);
    pub const ANGLE_INDICATOR: Color = hex(0x4a5568);
    pub const HEIGHT_INDICATOR: Color = hex(0x718096);
    pub const TRAJECTORY: Color = hex(0x4299e1);
    pub const TARGET_OUTER: Color = hex(0xe53e3e);
    pub const TARGET_MIDDLE: Color = hex(0xfc8181);
    pub const TARGET_INNER: Color = hex(0xfeb2b2);
    pub const TARGET_OUTLINE: Color = hex(0xffffff);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear {
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    /// Connected segments through `points`; fewer than two points draws nothing.
    Polyline {
        points: Vec<Vec2>,
        width: f32,
        color: Color,
    },
    FillTriangle {
        a: Vec2,
        b: Vec2,
        c: Vec2,
        color: Color,
    },
    FillRect {
        origin: Vec2,
        size: Vec2,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        fill: Color,
        outline: Color,
        outline_width: f32,
    },
    /// `anchor` is the baseline point; `align` says which end of the text it marks.
    Text {
        text: String,
        anchor: Vec2,
        size: u16,
        bold: bool,
        align: TextAlign,
        color: Color,
    },
}

/// One composed picture of the scene: canvas size plus ordered commands.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn clear(&mut self, color: Color) {
        self.push(DrawCommand::Clear { color });
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    pub fn polyline(&mut self, points: Vec<Vec2>, width: f32, color: Color) {
        self.push(DrawCommand::Polyline {
            points,
            width,
            color,
        });
    }

    pub fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        self.push(DrawCommand::FillTriangle { a, b, c, color });
    }

    pub fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.push(DrawCommand::FillRect {
            origin,
            size,
            color,
        });
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, fill: Color, outline: Color) {
        self.push(DrawCommand::Circle {
            center,
            radius,
            fill,
            outline,
            outline_width: 1.0,
        });
    }

    pub fn text(
        &mut self,
        text: impl Into<String>,
        anchor: Vec2,
        size: u16,
        bold: bool,
        align: TextAlign,
        color: Color,
    ) {
        self.push(DrawCommand::Text {
            text: text.into(),
            anchor,
            size,
            bold,
            align,
            color,
        });
    }
}

/// Anything that can execute drawing commands on a fixed-size pixel canvas.
pub trait DrawSurface {
    type Error: std::fmt::Display;

    fn execute(&mut self, command: &DrawCommand) -> Result<(), Self::Error>;

    /// Called once after the last command of a frame.
    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Replays every command of `frame` in order.
pub fn replay<S: DrawSurface + ?Sized>(surface: &mut S, frame: &Frame) -> Result<(), S::Error> {
    for command in frame.commands() {
        surface.execute(command)?;
    }
    surface.finish()
}
