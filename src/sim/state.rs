//! Game state and core simulation types

use serde::{Deserialize, Serialize};

use super::car::CarModel;
use super::collision;
use super::geometry::Rect;
use super::input::InputRouter;
use super::obstacles::ObstacleField;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Run status of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Road scrolls, score grows, collisions are checked
    Running,
    /// Frozen mid-run
    Paused,
    /// Not started yet, or crashed
    #[default]
    Stopped,
}

impl GameStatus {
    pub fn is_running(&self) -> bool {
        *self == GameStatus::Running
    }

    pub fn is_paused(&self) -> bool {
        *self == GameStatus::Paused
    }

    pub fn is_stopped(&self) -> bool {
        *self == GameStatus::Stopped
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Running => "RUNNING",
            GameStatus::Paused => "PAUSED",
            GameStatus::Stopped => "STOPPED",
        }
    }
}

/// Inputs to the status state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusEvent {
    /// Start a run, or resume a paused one
    Start,
    Pause,
    /// Car hit an obstacle
    Collision,
}

/// Next status for `event`; pairs without a transition keep the status
pub fn transition(status: GameStatus, event: StatusEvent) -> GameStatus {
    use GameStatus::*;
    use StatusEvent::*;

    match (status, event) {
        (Stopped, Start) | (Paused, Start) => Running,
        (Running, Pause) => Paused,
        (Running, Collision) => Stopped,
        (status, _) => status,
    }
}

/// Speed in units per tick for a given score
pub fn speed_for_score(score: u64, tuning: &Tuning) -> u32 {
    let steps = score / tuning.score_to_velocity_ratio.max(1);
    u32::try_from(steps)
        .unwrap_or(u32::MAX)
        .saturating_add(tuning.initial_velocity)
}

/// Things that happened during a tick, for UI and bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh run began
    Started { run: u32 },
    Paused,
    Resumed,
    LaneChanged { lane: u32 },
    /// Run ended on a collision
    Crashed { score: u64, run_ticks: u64 },
    ScoreReset,
}

/// Immutable per-tick view for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub time_ticks: u64,
    pub status: GameStatus,
    pub score: u64,
    pub speed: u32,
    pub lane: u32,
    pub lean: f32,
    pub car: Rect,
    pub obstacles: Vec<Rect>,
    /// Background scroll position in `[0, field_height)`
    pub scroll_offset: f32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub status: GameStatus,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Ticks spent running in the current run
    pub run_ticks: u64,
    /// Runs started so far
    pub runs: u32,
    pub car: CarModel,
    pub obstacles: ObstacleField,
    pub input: InputRouter,
    /// Background scroll position
    pub scroll_offset: f32,
    /// Score reset is only honoured in dev mode
    pub dev_mode: bool,
    /// Distance scrolled toward the next score point
    distance_since_point: f32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a stopped game with the given seed
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let tuning = settings.tuning.validated();
        Self {
            seed,
            car: CarModel::new(&tuning),
            obstacles: ObstacleField::new(&tuning, seed),
            input: InputRouter::from_settings(settings),
            tuning,
            status: GameStatus::Stopped,
            score: 0,
            time_ticks: 0,
            run_ticks: 0,
            runs: 0,
            scroll_offset: 0.0,
            dev_mode: settings.dev_mode,
            distance_since_point: 0.0,
            events: Vec::new(),
        }
    }

    /// Current scroll speed
    pub fn speed(&self) -> u32 {
        speed_for_score(self.score, &self.tuning)
    }

    /// Feed an event to the state machine. Returns true if the status changed.
    ///
    /// Starting from Stopped begins a new run: the road and the car are
    /// rebuilt. The score is left alone; see [`GameState::reset_score`].
    pub fn apply(&mut self, event: StatusEvent) -> bool {
        let from = self.status;
        let to = transition(from, event);
        if from == to {
            return false;
        }
        log::info!("Game {} -> {}", from.as_str(), to.as_str());
        self.status = to;

        match (from, to) {
            (GameStatus::Stopped, GameStatus::Running) => self.begin_run(),
            (GameStatus::Paused, GameStatus::Running) => self.events.push(GameEvent::Resumed),
            (GameStatus::Running, GameStatus::Paused) => self.events.push(GameEvent::Paused),
            (GameStatus::Running, GameStatus::Stopped) => {
                log::info!("Crashed with score {} after {} ticks", self.score, self.run_ticks);
                self.events.push(GameEvent::Crashed {
                    score: self.score,
                    run_ticks: self.run_ticks,
                });
            }
            _ => {}
        }
        true
    }

    fn begin_run(&mut self) {
        self.runs += 1;
        // Mix the run number into the seed so every run gets a new road
        let run_seed = (self.runs as u64)
            .wrapping_mul(2654435761)
            .wrapping_add(self.seed);
        self.car = CarModel::new(&self.tuning);
        self.obstacles = ObstacleField::new(&self.tuning, run_seed);
        self.run_ticks = 0;
        self.distance_since_point = 0.0;
        self.events.push(GameEvent::Started { run: self.runs });
    }

    /// Per-tick score/status update.
    ///
    /// Only acts while running: a collision stops the game, otherwise the
    /// scrolled `distance` counts toward score points.
    pub fn update(&mut self, collided: bool, distance: u32) {
        if !self.status.is_running() {
            return;
        }
        if collided {
            self.apply(StatusEvent::Collision);
            return;
        }

        self.run_ticks += 1;
        self.distance_since_point += distance as f32;
        let per_point = self.tuning.distance_per_point;
        let points = (self.distance_since_point / per_point).floor();
        if points >= 1.0 {
            self.score = self.score.saturating_add(points as u64);
            self.distance_since_point %= per_point;
        }
    }

    /// Clear the score; independent of the run status
    pub fn reset_score(&mut self) {
        self.score = 0;
        self.distance_since_point = 0.0;
        self.events.push(GameEvent::ScoreReset);
    }

    /// Scroll the background (moves unless paused)
    pub fn scroll_background(&mut self, speed: u32) {
        if self.status.is_paused() {
            return;
        }
        self.scroll_offset = (self.scroll_offset + speed as f32) % self.tuning.field_height;
    }

    /// Collision test for the car drawn at `offset_index`
    pub fn car_collides(&self, offset_index: f32) -> bool {
        let car_box = self.car.bounding_box(offset_index);
        let boxes = self.obstacles.bounding_boxes();
        match collision::first_hit(&car_box, &boxes) {
            Some(index) => {
                if let Some(obstacle) = self.obstacles.iter().nth(index) {
                    log::debug!("Car hit obstacle {} in lane {}", obstacle.id, obstacle.lane);
                }
                true
            }
            None => false,
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for rendering
    pub fn snapshot(&self, offset_index: f32) -> Snapshot {
        Snapshot {
            time_ticks: self.time_ticks,
            status: self.status,
            score: self.score,
            speed: self.speed(),
            lane: self.car.lane(),
            lean: self.car.lean(offset_index),
            car: self.car.bounding_box(offset_index),
            obstacles: self.obstacles.bounding_boxes(),
            scroll_offset: self.scroll_offset,
        }
    }
}
