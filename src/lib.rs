//! Lane Dodge - A lane-dodging arcade driving game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (car, obstacles, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (movement input, dev mode)
//! - `highscores`: Session leaderboard
//! - `autopilot`: Demo driver that plays the game

pub mod autopilot;
pub mod highscores;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use settings::{MovementInput, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Number of lanes on the road
    pub const LANE_COUNT: u32 = 3;

    /// Logical playfield dimensions (portrait phone)
    pub const FIELD_WIDTH: f32 = 360.0;
    pub const FIELD_HEIGHT: f32 = 640.0;

    /// Speed (units per tick) at score 0
    pub const INITIAL_VELOCITY: u32 = 4;
    /// Score points needed for each +1 of speed
    pub const SCORE_TO_VELOCITY_RATIO: u64 = 10;

    /// Minimum swipe distance is screen width divided by this
    pub const SWIPE_MIN_OFFSET_FROM_MAX_WIDTH: f32 = 8.0;

    /// Tilt value (device axis units) that maps to the outermost lane
    pub const TILT_RANGE: f32 = 5.0;

    /// Max lanes per second the rendered car offset may travel
    pub const CAR_OFFSET_SPEED: f32 = 8.0;
}
