use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::{info, warn};
use macroquad::prelude::*;

use parabolic_target::core::compose::SceneView;
use parabolic_target::core::config::SimConfig;
use parabolic_target::logging;

use crate::constants::{
    CANVAS_ORIGIN, INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH, MSAA_SAMPLES, PAGE_BG,
    UI_FONT_PATH,
};
use crate::controls::{draw_control_panel, hotkey_actions};
use crate::gameplay::apply_actions;
use crate::hud::draw_hud;
use crate::render::MacroquadSurface;
use crate::state::AppRuntime;

pub(crate) fn window_conf() -> Conf {
    Conf {
        window_title: "Parabolic Target".to_string(),
        window_width: INITIAL_WINDOW_WIDTH,
        window_height: INITIAL_WINDOW_HEIGHT,
        high_dpi: true,
        sample_count: MSAA_SAMPLES,
        ..Default::default()
    }
}

/// Play the projectile guessing game in a window.
#[derive(Debug, Parser)]
#[command(name = "interactive_macroquad", version)]
pub(crate) struct WindowArgs {
    /// JSON file overriding layout, pacing and scoring defaults.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Debug logging (per tick).
    #[arg(short, long)]
    verbose: bool,
}

impl WindowArgs {
    /// A config file that fails to load falls back to defaults.
    fn load_config(&self) -> SimConfig {
        let Some(path) = &self.config else {
            return SimConfig::default();
        };
        match SimConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                warn!("{err}. Falling back to default settings.");
                SimConfig::default()
            }
        }
    }
}

pub(crate) async fn run(args: WindowArgs) {
    logging::init(args.verbose);

    let ui_font = match load_ttf_font(UI_FONT_PATH).await {
        Ok(font) => Some(font),
        Err(err) => {
            warn!("Could not load '{UI_FONT_PATH}': {err}. Falling back to default font.");
            None
        }
    };

    let config = args.load_config();
    let canvas = Rect::new(
        CANVAS_ORIGIN.x,
        CANVAS_ORIGIN.y,
        config.canvas_width_px,
        config.canvas_height_px,
    );
    let seed = macroquad::miniquad::date::now() as u64;
    let mut state = AppRuntime::new(config, seed);
    state.set_round_status();

    let mut view = SceneView::new();
    view.attach(MacroquadSurface::new(
        canvas.point(),
        canvas.size(),
        ui_font.clone(),
    ));

    loop {
        let frame_dt = get_frame_time();

        let actions = hotkey_actions().merge(draw_control_panel(&mut state));
        if actions.quit {
            break;
        }
        apply_actions(&mut state, actions);

        state
            .session
            .advance(Duration::from_secs_f32(frame_dt.max(0.0)));

        clear_background(PAGE_BG);
        let session = &state.session;
        if let Err(err) = view.present(session.revision(), || session.frame()) {
            warn!("scene redraw failed: {err}");
        }
        draw_hud(&state, canvas, ui_font.as_ref());

        next_frame().await;
    }

    state.session.teardown();
    view.detach();
    info!("window closed after {} rounds", state.session.round());
}
