//! One player's game: the current round, its animation and the last verdict.

use std::time::Duration;

use log::{info, warn};
use serde::Serialize;

use crate::core::animation::{AnimationDriver, AnimationEvent, AnimationState};
use crate::core::ballistics::Accuracy;
use crate::core::compose::{SceneInputs, compose_scene};
use crate::core::config::SimConfig;
use crate::core::draw::Frame;
use crate::core::error::SessionError;
use crate::core::scene::{ParameterSource, SceneParameters, parse_velocity};
use crate::core::scheduler::Scheduler;
use crate::core::trajectory::TrajectorySequence;

/// Outcome of the latest submission, kept until the next round.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ShotReport {
    pub submitted_mps: f64,
    pub correct_mps: f64,
    pub accuracy: Accuracy,
}

pub struct Session<P> {
    config: SimConfig,
    source: P,
    scene: SceneParameters,
    scheduler: Scheduler,
    animation: AnimationDriver,
    report: Option<ShotReport>,
    round: u32,
    revision: u64,
}

impl<P: ParameterSource> Session<P> {
    /// Starts round 1 with a scene drawn from `source`.
    pub fn new(config: SimConfig, mut source: P) -> Self {
        let scene = source.next_scene();
        info!("round 1: {scene}");
        Self {
            animation: AnimationDriver::new(&config),
            config,
            source,
            scene,
            scheduler: Scheduler::new(),
            report: None,
            round: 1,
            revision: 0,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn scene(&self) -> &SceneParameters {
        &self.scene
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Bumped whenever the picture may have changed (new scene, new point).
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn trajectory(&self) -> &TrajectorySequence {
        self.animation.sequence()
    }

    pub fn animation_state(&self) -> AnimationState {
        self.animation.state()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.state() == AnimationState::Running
    }

    /// True for the fixed completion delay after each launch; new shots are
    /// refused meanwhile.
    pub fn is_simulating(&self) -> bool {
        self.animation.is_simulating()
    }

    pub fn report(&self) -> Option<&ShotReport> {
        self.report.as_ref()
    }

    pub fn correct_speed_mps(&self) -> f64 {
        self.scene.correct_speed_mps()
    }

    /// Parses and submits the text of the velocity field.
    pub fn submit_text(&mut self, input: &str) -> Result<ShotReport, SessionError> {
        let speed = parse_velocity(input).inspect_err(|err| warn!("{err}"))?;
        self.submit(speed)
    }

    /// Launches a shot at `speed_mps`: scores it and starts the animation.
    /// Rejected submissions leave the round exactly as it was.
    pub fn submit(&mut self, speed_mps: f64) -> Result<ShotReport, SessionError> {
        if !(speed_mps.is_finite() && speed_mps >= 0.0) {
            let err = SessionError::InvalidInput {
                input: speed_mps.to_string(),
                reason: "must be a finite, non-negative number",
            };
            warn!("{err}");
            return Err(err);
        }
        if self.is_simulating() {
            warn!("ignoring {speed_mps:.2} m/s: previous shot still simulating");
            return Err(SessionError::Busy);
        }

        let correct_mps = self.correct_speed_mps();
        let report = ShotReport {
            submitted_mps: speed_mps,
            correct_mps,
            accuracy: Accuracy::judge(speed_mps, correct_mps, self.config.accuracy_tolerance_mps),
        };
        info!(
            "round {}: launched at {speed_mps:.2} m/s, correct {correct_mps:.2} m/s ({:?})",
            self.round, report.accuracy
        );

        self.report = Some(report);
        self.animation.start(&mut self.scheduler, speed_mps);
        self.revision += 1;
        Ok(report)
    }

    /// Throws the current round away and draws a fresh scene.
    pub fn new_round(&mut self) {
        self.animation.cancel(&mut self.scheduler);
        self.animation.clear_trajectory();
        self.scene = self.source.next_scene();
        self.report = None;
        self.round += 1;
        self.revision += 1;
        info!("round {}: {}", self.round, self.scene);
    }

    /// Advances the round clock and runs every timer that came due.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<AnimationEvent> {
        self.scheduler.advance(elapsed);
        let mut events = Vec::new();
        while let Some(task) = self.scheduler.poll() {
            let Some(event) = self.animation.handle(&mut self.scheduler, task, &self.scene) else {
                continue;
            };
            if matches!(
                event,
                AnimationEvent::Sampled(_) | AnimationEvent::Stopped { .. }
            ) {
                self.revision += 1;
            }
            events.push(event);
        }
        events
    }

    /// Stops every pending timer, e.g. when the drawing surface goes away.
    pub fn teardown(&mut self) {
        self.animation.cancel(&mut self.scheduler);
        self.scheduler.cancel_all();
    }

    /// The scene as it should look right now.
    pub fn frame(&self) -> Frame {
        compose_scene(SceneInputs {
            scene: &self.scene,
            trajectory: self.animation.sequence(),
            config: &self.config,
        })
    }
}
