use macroquad::prelude::{Color, Vec2, vec2};

pub const INITIAL_WINDOW_WIDTH: i32 = 1220;
pub const INITIAL_WINDOW_HEIGHT: i32 = 660;
pub const MSAA_SAMPLES: i32 = 4;
pub const UI_FONT_PATH: &str = "assets/fonts/Lato-Regular.ttf";

/// Top-left corner of the 800×400 scene canvas inside the window.
pub const CANVAS_ORIGIN: Vec2 = vec2(390.0, 110.0);

pub const PANEL_POS: Vec2 = vec2(18.0, 110.0);
pub const PANEL_SIZE: Vec2 = vec2(350.0, 330.0);

pub const TITLE_Y: f32 = 46.0;
pub const CONTROLS_Y: f32 = 80.0;
pub const RESULT_BOX_GAP: f32 = 20.0;
pub const RESULT_BOX_HEIGHT: f32 = 76.0;

pub const PAGE_BG: Color = Color::new(0.98, 0.98, 0.99, 1.0);
pub const HEADER_COLOR: Color = Color::new(0.12, 0.12, 0.14, 1.0);
pub const SUCCESS_BG: Color = Color::new(0.78, 0.96, 0.85, 1.0);
pub const SUCCESS_TEXT: Color = Color::new(0.13, 0.47, 0.25, 1.0);
pub const WARNING_BG: Color = Color::new(1.0, 0.92, 0.78, 1.0);
pub const WARNING_TEXT: Color = Color::new(0.61, 0.33, 0.05, 1.0);
