//! Input routing
//!
//! Turns either swipe gestures or tilt samples into a single move command for
//! the car. Movement only reaches the car while the game is running; drag
//! accumulation itself keeps going across a pause.

use serde::{Deserialize, Serialize};

use super::car::{CarModel, SwipeDirection};
use super::state::GameStatus;
use crate::settings::{MovementInput, Settings};

/// Raw input events delivered by the platform between ticks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Tilt sensor sample (device axis units)
    Tilt(f32),
    /// Horizontal pointer movement during a drag (pixels)
    DragDelta(f32),
    /// Pointer released
    DragEnd,
}

/// A resolved command for the car
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveCommand {
    Step(SwipeDirection),
    Analog(f32),
}

impl MoveCommand {
    /// Apply to the car; returns true if the lane changed
    pub fn apply(self, car: &mut CarModel) -> bool {
        match self {
            MoveCommand::Step(direction) => car.request_move(direction),
            MoveCommand::Analog(value) => car.move_with_analog_input(value),
        }
    }
}

/// Classify a finished drag.
///
/// Left if the net delta is negative and its magnitude exceeds `threshold`,
/// Right if positive and exceeding it, otherwise no move.
pub fn classify_swipe(delta: f32, threshold: f32) -> Option<SwipeDirection> {
    if delta < 0.0 && delta.abs() > threshold {
        Some(SwipeDirection::Left)
    } else if delta > 0.0 && delta.abs() > threshold {
        Some(SwipeDirection::Right)
    } else {
        None
    }
}

/// Per-mode input state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRouter {
    mode: MovementInput,
    /// Minimum drag distance that counts as a swipe
    swipe_threshold: f32,
    invert_tilt: bool,
    /// Net horizontal drag since the last drag end
    drag_delta: f32,
    /// Latest tilt sample not yet forwarded
    pending_tilt: Option<f32>,
}

impl InputRouter {
    pub fn new(mode: MovementInput, swipe_threshold: f32) -> Self {
        Self {
            mode,
            swipe_threshold,
            invert_tilt: false,
            drag_delta: 0.0,
            pending_tilt: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            invert_tilt: settings.invert_tilt,
            ..Self::new(settings.movement_input, settings.tuning.swipe_threshold())
        }
    }

    pub fn mode(&self) -> MovementInput {
        self.mode
    }

    /// Switch steering mode, dropping any half-finished input
    pub fn set_mode(&mut self, mode: MovementInput) {
        if mode != self.mode {
            log::info!("Movement input: {} -> {}", self.mode.as_str(), mode.as_str());
            self.mode = mode;
            self.drag_delta = 0.0;
            self.pending_tilt = None;
        }
    }

    /// Recompute the swipe threshold for a new screen width
    pub fn set_screen_width(&mut self, width: f32, divisor: f32) {
        self.swipe_threshold = width / divisor;
    }

    pub fn swipe_threshold(&self) -> f32 {
        self.swipe_threshold
    }

    pub fn invert_tilt(&self) -> bool {
        self.invert_tilt
    }

    pub fn drag_delta(&self) -> f32 {
        self.drag_delta
    }

    /// Feed one event. Returns a command when a drag ends as a swipe while
    /// the game is running. Events for the inactive mode are ignored.
    pub fn handle(&mut self, event: InputEvent, status: GameStatus) -> Option<MoveCommand> {
        match (self.mode, event) {
            (MovementInput::Gestures, InputEvent::DragDelta(dx)) => {
                if dx.is_finite() {
                    self.drag_delta += dx;
                }
                None
            }
            (MovementInput::Gestures, InputEvent::DragEnd) => {
                let direction = classify_swipe(self.drag_delta, self.swipe_threshold);
                self.drag_delta = 0.0;
                direction
                    .filter(|_| status.is_running())
                    .map(MoveCommand::Step)
            }
            (MovementInput::Accelerometer, InputEvent::Tilt(value)) => {
                self.pending_tilt = Some(if self.invert_tilt { -value } else { value });
                None
            }
            _ => None,
        }
    }

    /// Take the latest tilt sample as a command; only while running
    pub fn flush(&mut self, status: GameStatus) -> Option<MoveCommand> {
        let tilt = self.pending_tilt.take()?;
        status.is_running().then_some(MoveCommand::Analog(tilt))
    }

    /// Feed a batch of events and apply the resulting commands to the car.
    /// Returns true if the car changed lane.
    pub fn route(&mut self, events: &[InputEvent], status: GameStatus, car: &mut CarModel) -> bool {
        let mut changed = false;
        for &event in events {
            if let Some(command) = self.handle(event, status) {
                changed |= command.apply(car);
            }
        }
        if let Some(command) = self.flush(status) {
            changed |= command.apply(car);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn car() -> CarModel {
        CarModel::new(&Tuning::default())
    }

    #[test]
    fn test_classify_swipe() {
        assert_eq!(classify_swipe(-50.0, 30.0), Some(SwipeDirection::Left));
        assert_eq!(classify_swipe(50.0, 30.0), Some(SwipeDirection::Right));
        assert_eq!(classify_swipe(10.0, 30.0), None);
        assert_eq!(classify_swipe(-30.0, 30.0), None);
        assert_eq!(classify_swipe(0.0, 0.0), None);
    }

    #[test]
    fn test_drag_accumulates_until_end() {
        let mut router = InputRouter::new(MovementInput::Gestures, 30.0);
        let running = GameStatus::Running;
        assert_eq!(router.handle(InputEvent::DragDelta(-20.0), running), None);
        assert_eq!(router.handle(InputEvent::DragDelta(-30.0), running), None);
        assert_eq!(router.drag_delta(), -50.0);
        assert_eq!(
            router.handle(InputEvent::DragEnd, running),
            Some(MoveCommand::Step(SwipeDirection::Left))
        );
        assert_eq!(router.drag_delta(), 0.0);
    }

    #[test]
    fn test_small_drag_is_ignored() {
        let mut router = InputRouter::new(MovementInput::Gestures, 30.0);
        router.handle(InputEvent::DragDelta(10.0), GameStatus::Running);
        assert_eq!(router.handle(InputEvent::DragEnd, GameStatus::Running), None);
    }

    #[test]
    fn test_swipe_outside_running_is_dropped() {
        let mut router = InputRouter::new(MovementInput::Gestures, 30.0);
        for status in [GameStatus::Paused, GameStatus::Stopped] {
            router.handle(InputEvent::DragDelta(80.0), status);
            assert_eq!(router.handle(InputEvent::DragEnd, status), None);
            assert_eq!(router.drag_delta(), 0.0);
        }
    }

    #[test]
    fn test_drag_survives_pause() {
        let mut router = InputRouter::new(MovementInput::Gestures, 30.0);
        router.handle(InputEvent::DragDelta(40.0), GameStatus::Paused);
        assert_eq!(
            router.handle(InputEvent::DragEnd, GameStatus::Running),
            Some(MoveCommand::Step(SwipeDirection::Right))
        );
    }

    #[test]
    fn test_latest_tilt_wins() {
        let mut router = InputRouter::new(MovementInput::Accelerometer, 30.0);
        router.handle(InputEvent::Tilt(-5.0), GameStatus::Running);
        router.handle(InputEvent::Tilt(5.0), GameStatus::Running);
        assert_eq!(router.flush(GameStatus::Running), Some(MoveCommand::Analog(5.0)));
        assert_eq!(router.flush(GameStatus::Running), None);
    }

    #[test]
    fn test_tilt_outside_running_is_dropped() {
        let mut router = InputRouter::new(MovementInput::Accelerometer, 30.0);
        let mut car = car();
        assert!(!router.route(&[InputEvent::Tilt(5.0)], GameStatus::Paused, &mut car));
        assert_eq!(car.lane(), 1);
        // Sample was consumed, not kept for later
        assert_eq!(router.flush(GameStatus::Running), None);
    }

    #[test]
    fn test_inverted_tilt() {
        let settings = Settings {
            movement_input: MovementInput::Accelerometer,
            invert_tilt: true,
            ..Default::default()
        };
        let mut router = InputRouter::from_settings(&settings);
        let mut car = car();
        assert!(router.route(&[InputEvent::Tilt(5.0)], GameStatus::Running, &mut car));
        assert_eq!(car.lane(), 0);
    }

    #[test]
    fn test_inactive_mode_events_are_ignored() {
        let mut router = InputRouter::new(MovementInput::Gestures, 30.0);
        let mut car = car();
        assert!(!router.route(&[InputEvent::Tilt(5.0)], GameStatus::Running, &mut car));

        router.set_mode(MovementInput::Accelerometer);
        let events = [InputEvent::DragDelta(100.0), InputEvent::DragEnd];
        assert!(!router.route(&events, GameStatus::Running, &mut car));
        assert_eq!(car.lane(), 1);
    }

    #[test]
    fn test_set_mode_clears_pending_input() {
        let mut router = InputRouter::new(MovementInput::Gestures, 30.0);
        router.handle(InputEvent::DragDelta(100.0), GameStatus::Running);
        router.set_mode(MovementInput::Accelerometer);
        router.set_mode(MovementInput::Gestures);
        assert_eq!(router.drag_delta(), 0.0);
    }

    #[test]
    fn test_route_applies_swipe() {
        let settings = Settings::default();
        let mut router = InputRouter::from_settings(&settings);
        let mut car = car();
        let events = [InputEvent::DragDelta(-200.0), InputEvent::DragEnd];
        assert!(router.route(&events, GameStatus::Running, &mut car));
        assert_eq!(car.lane(), 0);
    }

    #[test]
    fn test_screen_width_threshold() {
        let mut router = InputRouter::new(MovementInput::Gestures, 1.0);
        router.set_screen_width(240.0, 8.0);
        assert_eq!(router.swipe_threshold(), 30.0);
    }
}
