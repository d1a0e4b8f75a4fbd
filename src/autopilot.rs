//! Demo driver
//!
//! Plays the game by producing the same raw input a player would: swipes in
//! gesture mode, tilt samples in accelerometer mode. Steers toward the lane
//! whose nearest oncoming obstacle is farthest away.

use crate::settings::MovementInput;
use crate::sim::{GameState, InputEvent};

/// Ticks to wait after a swipe before swiping again
pub const DEFAULT_SWIPE_COOLDOWN: u32 = 6;

/// Scripted player
#[derive(Debug, Clone)]
pub struct Autopilot {
    swipe_cooldown: u32,
    ticks_since_swipe: u32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_COOLDOWN)
    }
}

impl Autopilot {
    pub fn new(swipe_cooldown: u32) -> Self {
        Self {
            swipe_cooldown,
            ticks_since_swipe: swipe_cooldown,
        }
    }

    /// Free space ahead of the car in `lane` (infinite when the lane is clear)
    fn clearance(state: &GameState, lane: u32) -> f32 {
        let car_top = state.car.bounding_box(state.car.lane() as f32).top();
        state
            .obstacles
            .iter()
            .filter(|o| o.lane == lane)
            .map(|o| state.obstacles.bounding_box(o))
            .filter(|b| b.top() < car_top + state.tuning.car_height)
            .map(|b| car_top - b.bottom())
            .fold(f32::INFINITY, f32::min)
    }

    /// Lane to head for; the current lane wins ties
    pub fn target_lane(state: &GameState) -> u32 {
        let current = state.car.lane();
        let mut best = current;
        let mut best_clearance = Self::clearance(state, current);

        for lane in 0..state.car.layout().lane_count {
            let clearance = Self::clearance(state, lane);
            let closer = lane.abs_diff(current) < best.abs_diff(current);
            if clearance > best_clearance || (clearance == best_clearance && closer) {
                best = lane;
                best_clearance = clearance;
            }
        }
        best
    }

    /// Input events for the next tick
    pub fn drive(&mut self, state: &GameState) -> Vec<InputEvent> {
        self.ticks_since_swipe = self.ticks_since_swipe.saturating_add(1);
        if !state.status.is_running() {
            return Vec::new();
        }

        let target = Self::target_lane(state);
        match state.input.mode() {
            MovementInput::Accelerometer => {
                let value = state.car.analog_value_for_lane(target);
                let raw = if state.input.invert_tilt() { -value } else { value };
                vec![InputEvent::Tilt(raw)]
            }
            MovementInput::Gestures => {
                let current = state.car.lane();
                if target == current || self.ticks_since_swipe < self.swipe_cooldown {
                    return Vec::new();
                }
                let next = if target < current { current - 1 } else { current + 1 };
                // Never pass through a lane that is worse than staying
                if next != target && Self::clearance(state, next) < Self::clearance(state, current) {
                    return Vec::new();
                }
                self.ticks_since_swipe = 0;
                let sign = if target < current { -1.0 } else { 1.0 };
                // Each sample stays under the threshold, their sum clears it
                let step = sign * state.input.swipe_threshold() * 0.6;
                log::debug!("Autopilot swipes toward lane {}", target);
                vec![
                    InputEvent::DragDelta(step),
                    InputEvent::DragDelta(step),
                    InputEvent::DragEnd,
                ]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::Settings;
    use crate::sim::{StatusEvent, TickInput, tick};

    fn running(settings: &Settings) -> GameState {
        let mut state = GameState::new(5, settings);
        state.apply(StatusEvent::Start);
        state
    }

    #[test]
    fn test_idle_when_not_running() {
        let state = GameState::new(5, &Settings::default());
        let mut pilot = Autopilot::default();
        assert!(pilot.drive(&state).is_empty());
    }

    #[test]
    fn test_stays_put_on_clear_road() {
        let state = running(&Settings::default());
        assert_eq!(Autopilot::target_lane(&state), state.car.lane());
        let mut pilot = Autopilot::default();
        assert!(pilot.drive(&state).is_empty());
    }

    #[test]
    fn test_dodges_obstacle_in_own_lane() {
        let mut state = running(&Settings::default());
        while state.obstacles.is_empty() {
            state.obstacles.advance(4);
        }
        // Park the car in the only occupied lane
        let blocked = state.obstacles.iter().next().map(|o| o.lane).unwrap();
        let value = state.car.analog_value_for_lane(blocked);
        state.car.move_with_analog_input(value);
        assert_eq!(state.car.lane(), blocked);
        assert_ne!(Autopilot::target_lane(&state), blocked);

        let mut pilot = Autopilot::default();
        let events = pilot.drive(&state);
        assert_eq!(events.last(), Some(&InputEvent::DragEnd));

        // The drag is split into samples that only pass the threshold summed
        let threshold = state.input.swipe_threshold();
        let deltas: Vec<f32> = events
            .iter()
            .filter_map(|e| match e {
                InputEvent::DragDelta(dx) => Some(*dx),
                _ => None,
            })
            .collect();
        assert_eq!(deltas.len(), 2);
        assert!(deltas.iter().all(|dx| dx.abs() < threshold));
        assert!(deltas.iter().sum::<f32>().abs() > threshold);

        state.input.route(&events, state.status, &mut state.car);
        assert_ne!(state.car.lane(), blocked);
    }

    #[test]
    fn test_tilt_mode_emits_samples() {
        let settings = Settings {
            movement_input: MovementInput::Accelerometer,
            ..Default::default()
        };
        let state = running(&settings);
        let mut pilot = Autopilot::default();
        let events = pilot.drive(&state);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], InputEvent::Tilt(_)));
    }

    #[test]
    fn test_outlasts_a_static_player() {
        let run = |pilot: Option<&mut Autopilot>| {
            let mut state = GameState::new(11, &Settings::default());
            tick(&mut state, &TickInput { start: true, ..Default::default() }, SIM_DT);
            let mut pilot = pilot;
            let mut ticks = 0u32;
            while state.status.is_running() && ticks < 20_000 {
                let events = match pilot.as_mut() {
                    Some(p) => p.drive(&state),
                    None => Vec::new(),
                };
                tick(&mut state, &TickInput { events, ..Default::default() }, SIM_DT);
                ticks += 1;
            }
            ticks
        };

        let mut pilot = Autopilot::default();
        assert!(run(Some(&mut pilot)) > run(None));
    }
}
