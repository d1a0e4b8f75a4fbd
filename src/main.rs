//! Lane Dodge headless entry point
//!
//! Drives the simulation with a fixed timestep loop and the autopilot in
//! place of a player, then prints a JSON summary of the session.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use lane_dodge::autopilot::Autopilot;
use lane_dodge::consts::*;
use lane_dodge::sim::{
    GameEvent, GameState, InputEvent, Snapshot, TickInput, approach_offset, tick,
};
use lane_dodge::{HighScores, MovementInput, Settings};

#[derive(Parser, Debug)]
#[command(name = "lane-dodge")]
#[command(about = "Headless lane-dodge session driven by the autopilot")]
struct Cli {
    /// Run seed
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Number of runs to play
    #[arg(long, default_value_t = 3)]
    runs: u32,
    /// Give up on a run after this many ticks
    #[arg(long, default_value_t = 36_000)]
    max_ticks: u64,
    /// Steering mode override (gestures | tilt)
    #[arg(long)]
    mode: Option<String>,
    /// Settings file (JSON); defaults are used when missing
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Write the effective settings back to the settings file
    #[arg(long)]
    save_settings: bool,
    /// Clear the score before each new run (dev mode only)
    #[arg(long)]
    reset_between_runs: bool,
    /// Log a snapshot every N ticks (0 = never)
    #[arg(long, default_value_t = 0)]
    snapshot_every: u64,
    /// Screen width the swipe threshold is measured against
    #[arg(long)]
    screen_width: Option<f32>,
    /// Switch between gestures and tilt after every run
    #[arg(long)]
    alternate_modes: bool,
}

/// One finished (or abandoned) run
#[derive(Debug, Serialize)]
struct RunReport {
    run: u32,
    movement_input: &'static str,
    score: u64,
    ticks: u64,
    crashed: bool,
}

/// Session summary printed on exit
#[derive(Debug, Serialize)]
struct Summary {
    seed: u64,
    movement_input: &'static str,
    runs: Vec<RunReport>,
    high_score: u64,
    leaderboard: HighScores,
    last_frame: Snapshot,
}

/// Game instance holding all state
struct Game {
    state: GameState,
    autopilot: Autopilot,
    high_scores: HighScores,
    accumulator: f32,
    input: TickInput,
    /// Render-side car offset, eased toward the lane index
    car_offset: f32,
    snapshot_every: u64,
}

impl Game {
    fn new(seed: u64, settings: &Settings, snapshot_every: u64) -> Self {
        let state = GameState::new(seed, settings);
        let car_offset = state.car.lane() as f32;
        Self {
            state,
            autopilot: Autopilot::default(),
            high_scores: HighScores::new(),
            accumulator: 0.0,
            input: TickInput::default(),
            car_offset,
            snapshot_every,
        }
    }

    /// Run simulation ticks for one rendered frame
    fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let pilot_events: Vec<InputEvent> = self.autopilot.drive(&self.state);
            self.input.events.extend(pilot_events);
            self.input.car_offset = Some(self.car_offset);

            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input = TickInput::default();

            if self.snapshot_every > 0 && self.state.time_ticks % self.snapshot_every == 0 {
                let snapshot = self.state.snapshot(self.car_offset);
                if let Ok(json) = serde_json::to_string(&snapshot) {
                    log::debug!("{}", json);
                }
            }
            events.extend(self.state.drain_events());
        }

        self.high_scores.record(&events);

        // Render pass: ease the drawn car toward its lane
        let target = self.state.car.lane() as f32;
        self.car_offset = approach_offset(self.car_offset, target, dt, CAR_OFFSET_SPEED);

        events
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    if let Some(mode) = &cli.mode {
        settings.movement_input =
            MovementInput::from_str(mode).ok_or_else(|| anyhow!("unknown movement input: {mode}"))?;
    }
    if cli.save_settings {
        let path = cli
            .settings
            .as_ref()
            .ok_or_else(|| anyhow!("--save-settings needs --settings <path>"))?;
        settings.save(path)?;
    }

    log::info!(
        "Lane Dodge (headless) seed={} input={}",
        cli.seed,
        settings.movement_input.as_str()
    );

    let mut game = Game::new(cli.seed, &settings, cli.snapshot_every);
    if let Some(width) = cli.screen_width {
        if !(width.is_finite() && width > 0.0) {
            return Err(anyhow!("screen width must be positive, got {width}"));
        }
        game.state
            .input
            .set_screen_width(width, settings.tuning.swipe_min_offset_divisor);
        log::info!("Swipe threshold {:.1}", game.state.input.swipe_threshold());
    }
    // Frame pacing jitter, independent of the simulation RNG
    let mut frame_rng = Pcg32::seed_from_u64(cli.seed ^ 0x5eed);
    let mut reports = Vec::new();

    for run in 1..=cli.runs {
        if cli.alternate_modes && run > 1 {
            let next = match game.state.input.mode() {
                MovementInput::Gestures => MovementInput::Accelerometer,
                MovementInput::Accelerometer => MovementInput::Gestures,
            };
            game.state.input.set_mode(next);
        }
        game.input.start = true;
        // Honoured by the tick only in dev mode
        game.input.reset_score = run > 1 && cli.reset_between_runs;

        let start_tick = game.state.time_ticks;
        let mut crashed = false;
        while game.state.time_ticks - start_tick < cli.max_ticks {
            let dt = SIM_DT * frame_rng.random_range(0.5f32..2.0);
            let events = game.update(dt);
            if events.iter().any(|e| matches!(e, GameEvent::Crashed { .. })) {
                crashed = true;
                break;
            }
        }

        if !crashed {
            log::info!("Run {} reached the tick limit", run);
            game.input.pause = true;
            game.update(SIM_DT);
        }

        reports.push(RunReport {
            run,
            movement_input: game.state.input.mode().as_str(),
            score: game.state.score,
            ticks: game.state.run_ticks,
            crashed,
        });

        // A paused run would only resume on the next start
        if !crashed {
            break;
        }
    }

    let summary = Summary {
        seed: cli.seed,
        movement_input: settings.movement_input.as_str(),
        runs: reports,
        high_score: game.high_scores.high_score(game.state.score),
        last_frame: game.state.snapshot(game.car_offset),
        leaderboard: game.high_scores,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
