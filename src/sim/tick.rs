//! Fixed timestep simulation tick
//!
//! Core game loop step: commands, input, road, collision, score.

use super::input::InputEvent;
use super::state::{GameEvent, GameState, StatusEvent};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start a run or resume a paused one
    pub start: bool,
    /// Pause a running game
    pub pause: bool,
    /// Clear the score; ignored unless the state is in dev mode
    pub reset_score: bool,
    /// Platform input events received since the last tick, in order
    pub events: Vec<InputEvent>,
    /// Offset index the car is currently drawn at; the lane index if `None`
    pub car_offset: Option<f32>,
}

/// Advance the game state by one tick.
///
/// `dt` is only carried for callers that animate alongside the tick; the
/// road moves by whole speed units per tick.
pub fn tick(state: &mut GameState, input: &TickInput, _dt: f32) {
    state.time_ticks += 1;

    if input.reset_score {
        if state.dev_mode {
            state.reset_score();
        } else {
            log::warn!("Score reset requested outside dev mode, ignored");
        }
    }
    if input.start {
        state.apply(StatusEvent::Start);
    }
    if input.pause {
        state.apply(StatusEvent::Pause);
    }

    let status = state.status;
    if state.input.route(&input.events, status, &mut state.car) {
        let lane = state.car.lane();
        log::debug!("Car moved to lane {}", lane);
        state.push_event(GameEvent::LaneChanged { lane });
    }

    let speed = state.speed();
    state.scroll_background(speed);

    if !state.status.is_running() {
        return;
    }

    state.obstacles.advance(speed);
    let offset = input.car_offset.unwrap_or(state.car.lane() as f32);
    let collided = state.car_collides(offset);
    state.update(collided, speed);
}
