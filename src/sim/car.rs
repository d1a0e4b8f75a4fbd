//! The player's car
//!
//! Game logic only knows the lane index. The smoothed offset index the car is
//! drawn at belongs to the renderer and is passed in where a box is needed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{LaneLayout, Rect};
use crate::tuning::Tuning;

/// Discrete lane change direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    #[inline]
    pub fn step(self) -> i64 {
        match self {
            SwipeDirection::Left => -1,
            SwipeDirection::Right => 1,
        }
    }
}

/// Car lane position and dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarModel {
    lane: u32,
    layout: LaneLayout,
    size: Vec2,
    /// Y of the car's top edge
    top: f32,
    tilt_range: f32,
}

impl CarModel {
    /// Car parked in the middle lane
    pub fn new(tuning: &Tuning) -> Self {
        let layout = LaneLayout::new(tuning.lane_count, tuning.field_width);
        let size = Vec2::new(
            layout.lane_width() * tuning.car_width_ratio,
            tuning.car_height,
        );
        let top = tuning.field_height - tuning.car_bottom_margin - tuning.car_height;
        Self {
            lane: layout.last_lane() / 2,
            layout,
            size,
            top,
            tilt_range: tuning.tilt_range,
        }
    }

    #[inline]
    pub fn lane(&self) -> u32 {
        self.lane
    }

    pub fn layout(&self) -> &LaneLayout {
        &self.layout
    }

    /// Shift one lane; clamps silently at the road edges.
    /// Returns true if the lane changed.
    pub fn request_move(&mut self, direction: SwipeDirection) -> bool {
        let target = self.layout.clamp_lane(self.lane as i64 + direction.step());
        self.set_lane(target)
    }

    /// Map a tilt value onto a lane.
    ///
    /// `[-tilt_range, tilt_range]` spans the road linearly from the leftmost
    /// to the rightmost lane; values past the range pin to the boundary lane.
    /// Returns true if the lane changed.
    pub fn move_with_analog_input(&mut self, value: f32) -> bool {
        if value.is_nan() {
            return false;
        }
        let t = ((value + self.tilt_range) / (2.0 * self.tilt_range)).clamp(0.0, 1.0);
        let lane = (t * self.layout.lane_count as f32).floor() as i64;
        let target = self.layout.clamp_lane(lane);
        self.set_lane(target)
    }

    /// Tilt value that lands in the middle of `lane`
    pub fn analog_value_for_lane(&self, lane: u32) -> f32 {
        let lane = self.layout.clamp_lane(lane as i64) as f32;
        let t = (lane + 0.5) / self.layout.lane_count as f32;
        t * 2.0 * self.tilt_range - self.tilt_range
    }

    fn set_lane(&mut self, lane: u32) -> bool {
        let changed = lane != self.lane;
        self.lane = lane;
        changed
    }

    /// Car rectangle when drawn at `offset_index` (fractional lane)
    pub fn bounding_box(&self, offset_index: f32) -> Rect {
        let left = self.layout.centered_left(offset_index, self.size.x);
        Rect::from_origin_size(Vec2::new(left, self.top), self.size)
    }

    /// Lean toward the target lane in `[-1, 1]` (negative leans left)
    pub fn lean(&self, offset_index: f32) -> f32 {
        (self.lane as f32 - offset_index).clamp(-1.0, 1.0)
    }
}

/// Move a rendered offset index toward `target` at no more than
/// `max_speed` lanes per second
pub fn approach_offset(current: f32, target: f32, dt: f32, max_speed: f32) -> f32 {
    let max_delta = max_speed * dt;
    current + (target - current).clamp(-max_delta, max_delta)
}
