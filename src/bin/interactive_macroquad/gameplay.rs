use parabolic_target::core::error::SessionError;

use crate::controls::FrameActions;
use crate::state::AppRuntime;

pub(crate) fn apply_actions(state: &mut AppRuntime, actions: FrameActions) {
    if actions.new_game {
        state.session.new_round();
        state.velocity_input.clear();
        state.set_round_status();
        return;
    }

    if actions.launch {
        state.status_line = match state.session.submit_text(&state.velocity_input) {
            Ok(report) => {
                state.velocity_input.clear();
                format!(
                    "Launched at {:.2} m/s: {}",
                    report.submitted_mps,
                    report.accuracy.headline()
                )
            }
            Err(SessionError::Busy) => "Wait for the current shot to finish".to_string(),
            Err(err) => err.to_string(),
        };
    }
}
