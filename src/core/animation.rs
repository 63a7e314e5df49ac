//! Tick-driven sampling of the player's shot.
//!
//! `Idle → Running` on launch; every tick samples the trajectory at the
//! current simulated time and appends the point; `Running → Idle` once the
//! projectile drops below the ground margin or flies past the target. A
//! separate completion timer, started with the run, clears the
//! "simulating" flag after a fixed delay whether or not the flight is over.

use std::time::Duration;

use log::{debug, info};
use serde::Serialize;

use crate::core::ballistics::sample_trajectory_at;
use crate::core::config::SimConfig;
use crate::core::scene::SceneParameters;
use crate::core::scheduler::{Scheduler, TaskId};
use crate::core::trajectory::{TrajectoryPoint, TrajectorySequence};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    Running,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum StopReason {
    /// Dropped below the launch point by more than `launcher_height_m / pixel_scale`,
    /// i.e. meters divided by pixels per meter.
    BelowGround,
    /// Passed the target by more than the overshoot margin.
    Overshot,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationEvent {
    Sampled(TrajectoryPoint),
    Stopped {
        point: TrajectoryPoint,
        reason: StopReason,
    },
    /// The completion timer fired.
    Completed,
}

#[derive(Clone, Copy, Debug)]
struct Pacing {
    tick_period: Duration,
    completion_delay: Duration,
    physics_step_s: f64,
    pixel_scale: f64,
    overshoot_margin_m: f64,
}

/// The one shot currently being animated.
#[derive(Clone, Copy, Debug)]
struct AnimationRun {
    speed_mps: f64,
    elapsed_s: f64,
    tick: Option<TaskId>,
    completion: Option<TaskId>,
}

impl AnimationRun {
    fn is_finished(&self) -> bool {
        self.tick.is_none() && self.completion.is_none()
    }
}

#[derive(Debug)]
pub struct AnimationDriver {
    pacing: Pacing,
    sequence: TrajectorySequence,
    run: Option<AnimationRun>,
}

impl AnimationDriver {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            pacing: Pacing {
                tick_period: config.tick_period(),
                completion_delay: config.completion_delay(),
                physics_step_s: config.physics_step_s,
                pixel_scale: config.pixel_scale,
                overshoot_margin_m: config.overshoot_margin_m,
            },
            sequence: TrajectorySequence::new(),
            run: None,
        }
    }

    pub fn state(&self) -> AnimationState {
        match self.run {
            Some(AnimationRun { tick: Some(_), .. }) => AnimationState::Running,
            _ => AnimationState::Idle,
        }
    }

    /// True until the completion timer of the latest run fires.
    pub fn is_simulating(&self) -> bool {
        self.run.is_some_and(|run| run.completion.is_some())
    }

    pub fn sequence(&self) -> &TrajectorySequence {
        &self.sequence
    }

    /// Starts animating a shot at `speed_mps`, replacing any run in progress.
    pub fn start(&mut self, scheduler: &mut Scheduler, speed_mps: f64) {
        self.cancel(scheduler);
        self.sequence.clear();
        self.run = Some(AnimationRun {
            speed_mps,
            elapsed_s: 0.0,
            tick: Some(scheduler.every(self.pacing.tick_period)),
            completion: Some(scheduler.after(self.pacing.completion_delay)),
        });
        debug!("animation started at {speed_mps:.2} m/s");
    }

    /// Cancels both timers of the current run. Safe to call at any time.
    pub fn cancel(&mut self, scheduler: &mut Scheduler) {
        if let Some(run) = self.run.take() {
            for id in [run.tick, run.completion].into_iter().flatten() {
                scheduler.cancel(id);
            }
        }
    }

    /// Forgets the drawn trajectory, e.g. when the scene changes.
    pub fn clear_trajectory(&mut self) {
        self.sequence.clear();
    }

    /// Handles a task delivered by the scheduler. Tasks that do not belong
    /// to the current run are ignored.
    pub fn handle(
        &mut self,
        scheduler: &mut Scheduler,
        task: TaskId,
        scene: &SceneParameters,
    ) -> Option<AnimationEvent> {
        let mut run = self.run?;
        let event = if run.tick == Some(task) {
            let event = self.tick(scheduler, &mut run, scene);
            Some(event)
        } else if run.completion == Some(task) {
            run.completion = None;
            Some(AnimationEvent::Completed)
        } else {
            None
        };

        self.run = (!run.is_finished()).then_some(run);
        event
    }

    fn tick(
        &mut self,
        scheduler: &mut Scheduler,
        run: &mut AnimationRun,
        scene: &SceneParameters,
    ) -> AnimationEvent {
        let point = sample_trajectory_at(
            run.speed_mps,
            scene.launch_angle_deg,
            scene.gravity_mps2,
            run.elapsed_s,
        );
        self.sequence.push(point);
        run.elapsed_s += self.pacing.physics_step_s;

        match self.stop_reason(point, scene) {
            Some(reason) => {
                if let Some(tick) = run.tick.take() {
                    scheduler.cancel(tick);
                }
                info!(
                    "shot stopped ({reason:?}) at x={:.2} m, y={:.2} m after {} samples",
                    point.x,
                    point.y,
                    self.sequence.len()
                );
                AnimationEvent::Stopped { point, reason }
            }
            None => {
                debug!("sampled x={:.2} m, y={:.2} m", point.x, point.y);
                AnimationEvent::Sampled(point)
            }
        }
    }

    fn stop_reason(&self, point: TrajectoryPoint, scene: &SceneParameters) -> Option<StopReason> {
        if point.y < -scene.launcher_height_m / self.pacing.pixel_scale {
            Some(StopReason::BelowGround)
        } else if point.x > scene.horizontal_distance_m + self.pacing.overshoot_margin_m {
            Some(StopReason::Overshot)
        } else {
            None
        }
    }
}
