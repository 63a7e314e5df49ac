use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail, ensure};
use chrono::Local;
use clap::Parser;
use serde::Serialize;

use parabolic_target::core::animation::{AnimationEvent, StopReason};
use parabolic_target::core::config::SimConfig;
use parabolic_target::core::export::{default_snapshot_path, export_svg};
use parabolic_target::core::scene::{FixedSource, ParameterSource, RandomSource, SceneParameters};
use parabolic_target::core::session::{Session, ShotReport};
use parabolic_target::core::trajectory::{TrajectoryPoint, TrajectorySequence};
use parabolic_target::logging;

/// Upper bound on simulated time per shot.
const MAX_FLIGHT: Duration = Duration::from_secs(600);

/// Guess the launch speed that lands the projectile on the target.
///
/// Scene values not given on the command line are drawn at random.
#[derive(Debug, Parser)]
#[command(
    name = "parabolic_target",
    version,
    allow_negative_numbers = true,
    args_override_self = true
)]
struct Cli {
    /// Gravitational acceleration (m/s²).
    #[arg(long)]
    gravity: Option<f64>,
    /// Launch angle above horizontal (degrees).
    #[arg(long)]
    angle: Option<f64>,
    /// Launcher height above ground (m).
    #[arg(long)]
    launcher_height: Option<f64>,
    /// Target height above ground (m).
    #[arg(long)]
    target_height: Option<f64>,
    /// Horizontal launcher-to-target distance (m).
    #[arg(long)]
    distance: Option<f64>,
    /// Projectile mass (kg); display only.
    #[arg(long)]
    mass: Option<f64>,
    /// Your guess for the launch speed (m/s).
    #[arg(long)]
    velocity: Option<String>,
    /// JSON file overriding layout, pacing and scoring defaults.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Write the final frame as SVG; without a value a timestamped name is used.
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    snapshot: Option<Option<PathBuf>>,
    /// Seed for the random scene.
    #[arg(long)]
    seed: Option<u64>,
    /// Print the scene, verdict and trajectory as JSON.
    #[arg(long)]
    json: bool,
    /// Debug logging (per tick).
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn scene(&self, drawn: SceneParameters) -> Result<SceneParameters> {
        let scene = SceneParameters {
            gravity_mps2: self.gravity.unwrap_or(drawn.gravity_mps2),
            launch_angle_deg: self.angle.unwrap_or(drawn.launch_angle_deg),
            launcher_height_m: self.launcher_height.unwrap_or(drawn.launcher_height_m),
            target_height_m: self.target_height.unwrap_or(drawn.target_height_m),
            horizontal_distance_m: self.distance.unwrap_or(drawn.horizontal_distance_m),
            projectile_mass_kg: self.mass.unwrap_or(drawn.projectile_mass_kg),
        };
        let values = [
            scene.gravity_mps2,
            scene.launch_angle_deg,
            scene.launcher_height_m,
            scene.target_height_m,
            scene.horizontal_distance_m,
            scene.projectile_mass_kg,
        ];
        ensure!(
            values.iter().all(|v| v.is_finite()),
            "scene values must be finite numbers"
        );
        ensure!(
            scene.gravity_mps2 > 0.0,
            "gravity must be positive, got {}",
            scene.gravity_mps2
        );
        ensure!(
            scene.launch_angle_deg > 0.0 && scene.launch_angle_deg < 90.0,
            "launch angle must lie strictly between 0° and 90°, got {}",
            scene.launch_angle_deg
        );
        ensure!(
            scene.horizontal_distance_m > 0.0,
            "distance must be positive, got {}",
            scene.horizontal_distance_m
        );
        ensure!(
            scene.launcher_height_m >= 0.0 && scene.target_height_m >= 0.0,
            "heights must not be negative, got launcher {} and target {}",
            scene.launcher_height_m,
            scene.target_height_m
        );
        ensure!(
            scene.projectile_mass_kg > 0.0,
            "mass must be positive, got {}",
            scene.projectile_mass_kg
        );
        Ok(scene)
    }
}

/// How a simulated shot ended.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
struct Flight {
    points: usize,
    stop: Option<(TrajectoryPoint, StopReason)>,
}

/// Runs the session clock in tick-sized steps until the shot has landed and
/// the completion delay has passed.
fn fly<P: ParameterSource>(session: &mut Session<P>) -> Result<Flight> {
    let step = session.config().tick_period();
    let mut elapsed = Duration::ZERO;
    let mut stop = None;

    while session.is_animating() || session.is_simulating() {
        if elapsed >= MAX_FLIGHT {
            bail!(
                "shot still airborne after {} s of simulated time",
                MAX_FLIGHT.as_secs()
            );
        }
        for event in session.advance(step) {
            if let AnimationEvent::Stopped { point, reason } = event {
                stop = Some((point, reason));
            }
        }
        elapsed += step;
    }

    Ok(Flight {
        points: session.trajectory().len(),
        stop,
    })
}

/// Machine-readable outcome of one run.
#[derive(Debug, Serialize)]
struct Summary<'a> {
    scene: &'a SceneParameters,
    correct_mps: f64,
    report: Option<&'a ShotReport>,
    flight: Option<Flight>,
    trajectory: &'a TrajectorySequence,
}

fn summary_json<P: ParameterSource>(
    session: &Session<P>,
    flight: Option<Flight>,
) -> Result<String> {
    let summary = Summary {
        scene: session.scene(),
        correct_mps: session.correct_speed_mps(),
        report: session.report(),
        flight,
        trajectory: session.trajectory(),
    };
    serde_json::to_string_pretty(&summary).context("failed to serialize summary")
}

fn print_report(report: &ShotReport, flight: &Flight) {
    println!(
        "{}  You entered {:.2} m/s; the correct velocity is {:.2} m/s.",
        report.accuracy.headline(),
        report.submitted_mps,
        report.correct_mps
    );
    println!("Trajectory points: {}", flight.points);
    match flight.stop {
        Some((point, StopReason::BelowGround)) => {
            println!("Hit the ground at x = {:.2} m.", point.x);
        }
        Some((point, StopReason::Overshot)) => {
            println!("Overshot the target, last seen at x = {:.2} m.", point.x);
        }
        None => println!("Animation was cancelled before the shot landed."),
    }
}

fn run(cli: Cli) -> Result<()> {
    logging::init(cli.verbose);

    let config = match &cli.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SimConfig::default(),
    };
    let scene = cli.scene(RandomSource::new(cli.seed).next_scene())?;
    let mut session = Session::new(config, FixedSource(scene));

    let flight = match &cli.velocity {
        Some(input) => {
            session.submit_text(input)?;
            Some(fly(&mut session)?)
        }
        None => None,
    };

    if cli.json {
        println!("{}", summary_json(&session, flight)?);
    } else {
        println!("Scene: {scene}");
        match (session.report(), flight) {
            (Some(report), Some(flight)) => print_report(report, &flight),
            _ => println!(
                "Correct velocity: {:.2} m/s",
                session.correct_speed_mps()
            ),
        }
    }

    if let Some(path) = cli.snapshot {
        let path = path.unwrap_or_else(|| default_snapshot_path(Local::now()));
        export_svg(&session.frame(), &path)
            .with_context(|| format!("failed to write snapshot {}", path.display()))?;
        if !cli.json {
            println!("Snapshot: {}", path.display());
        }
    }

    session.teardown();
    Ok(())
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
