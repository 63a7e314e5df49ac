use macroquad::prelude::*;
use macroquad::ui::{hash, root_ui, widgets};

use crate::constants::{PANEL_POS, PANEL_SIZE};
use crate::state::AppRuntime;

#[derive(Default, Clone, Copy)]
pub(crate) struct FrameActions {
    pub(crate) launch: bool,
    pub(crate) new_game: bool,
    pub(crate) quit: bool,
}

impl FrameActions {
    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            launch: self.launch || other.launch,
            new_game: self.new_game || other.new_game,
            quit: self.quit || other.quit,
        }
    }
}

pub(crate) fn hotkey_actions() -> FrameActions {
    FrameActions {
        launch: is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter),
        new_game: is_key_pressed(KeyCode::N),
        quit: is_key_pressed(KeyCode::Escape),
    }
}

pub(crate) fn draw_control_panel(state: &mut AppRuntime) -> FrameActions {
    let scene = *state.session.scene();
    let simulating = state.session.is_simulating();

    let mut actions = FrameActions::default();
    widgets::Window::new(hash!(), PANEL_POS, PANEL_SIZE)
        .label(&format!("Round {}", state.session.round()))
        .movable(false)
        .ui(&mut *root_ui(), |ui| {
            ui.label(None, &format!("Gravity: {:.1} m/s^2", scene.gravity_mps2));
            ui.label(None, &format!("Launch angle: {:.1} deg", scene.launch_angle_deg));
            ui.label(None, &format!("Launcher height: {:.1} m", scene.launcher_height_m));
            ui.label(None, &format!("Target height: {:.1} m", scene.target_height_m));
            ui.label(None, &format!("Distance: {:.1} m", scene.horizontal_distance_m));
            ui.label(None, &format!("Projectile mass: {:.1} kg", scene.projectile_mass_kg));
            ui.separator();
            ui.input_text(hash!(), "Velocity (m/s)", &mut state.velocity_input);
            ui.separator();
            if simulating {
                ui.label(None, "Simulating...");
            } else if ui.button(None, "Launch (Enter)") {
                actions.launch = true;
            }
            if ui.button(None, "New Game (N)") {
                actions.new_game = true;
            }
            ui.label(
                None,
                if state.session.is_animating() {
                    "Flight: in the air"
                } else {
                    "Flight: idle"
                },
            );
        });

    actions
}
