use parabolic_target::core::config::SimConfig;
use parabolic_target::core::scene::RandomSource;
use parabolic_target::core::session::Session;

pub(crate) struct AppRuntime {
    pub(crate) session: Session<RandomSource>,
    /// Raw text of the velocity field; parsed only on launch.
    pub(crate) velocity_input: String,
    pub(crate) status_line: String,
}

impl AppRuntime {
    pub(crate) fn new(config: SimConfig, seed: u64) -> Self {
        Self {
            session: Session::new(config, RandomSource::new(Some(seed))),
            velocity_input: String::new(),
            status_line: "Enter a launch velocity and press Launch".to_string(),
        }
    }

    pub(crate) fn set_round_status(&mut self) {
        self.status_line = format!("Round {}: find the velocity", self.session.round());
    }
}
