use macroquad::prelude::*;

use parabolic_target::core::ballistics::Accuracy;
use parabolic_target::core::session::ShotReport;

use crate::constants::{
    CONTROLS_Y, HEADER_COLOR, RESULT_BOX_GAP, RESULT_BOX_HEIGHT, SUCCESS_BG, SUCCESS_TEXT,
    TITLE_Y, WARNING_BG, WARNING_TEXT,
};
use crate::render::draw_ui_text;
use crate::state::AppRuntime;

pub(crate) fn draw_hud(state: &AppRuntime, canvas: Rect, font: Option<&Font>) {
    draw_header_block(canvas.x, font);
    if let Some(report) = state.session.report() {
        draw_result_box(report, canvas, font);
    }
    draw_ui_text(
        &state.status_line,
        canvas.x,
        canvas.bottom() + RESULT_BOX_GAP + RESULT_BOX_HEIGHT + 30.0,
        18,
        DARKGRAY,
        font,
    );
}

fn draw_header_block(left: f32, font: Option<&Font>) {
    draw_ui_text("Parabolic Target", left, TITLE_Y, 30, HEADER_COLOR, font);
    draw_ui_text(
        "Type a launch velocity | Enter launch | N new game | Esc quit",
        left,
        CONTROLS_Y,
        20,
        DARKGRAY,
        font,
    );
}

/// Verdict banner under the canvas; stays up until the next round.
fn draw_result_box(report: &ShotReport, canvas: Rect, font: Option<&Font>) {
    let (fill, ink) = match report.accuracy {
        Accuracy::Accurate => (SUCCESS_BG, SUCCESS_TEXT),
        Accuracy::Inaccurate => (WARNING_BG, WARNING_TEXT),
    };
    let y = canvas.bottom() + RESULT_BOX_GAP;
    draw_rectangle(canvas.x, y, canvas.w, RESULT_BOX_HEIGHT, fill);
    draw_rectangle_lines(canvas.x, y, canvas.w, RESULT_BOX_HEIGHT, 2.0, ink);

    draw_ui_text(report.accuracy.headline(), canvas.x + 16.0, y + 30.0, 26, ink, font);
    draw_ui_text(
        &format!(
            "You entered {:.2} m/s. The correct velocity is {:.2} m/s.",
            report.submitted_mps, report.correct_mps
        ),
        canvas.x + 16.0,
        y + 58.0,
        20,
        ink,
        font,
    );
}
