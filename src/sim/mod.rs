//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Discrete ticks only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod car;
pub mod collision;
pub mod geometry;
pub mod input;
pub mod obstacles;
pub mod state;
pub mod tick;

pub use car::{CarModel, SwipeDirection, approach_offset};
pub use collision::check;
pub use geometry::{LaneLayout, Rect};
pub use input::{InputEvent, InputRouter, MoveCommand, classify_swipe};
pub use obstacles::{Obstacle, ObstacleField};
pub use state::{
    GameEvent, GameState, GameStatus, Snapshot, StatusEvent, speed_for_score, transition,
};
pub use tick::{TickInput, tick};
