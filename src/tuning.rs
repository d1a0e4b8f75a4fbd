//! Data-driven game balance
//!
//! Everything that shapes how the road plays lives here so that a settings
//! file can rebalance the game without touching the simulation.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Smallest scrolled distance that may be worth a point
pub const MIN_DISTANCE_PER_POINT: f32 = 1.0;

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Number of discrete lanes
    pub lane_count: u32,
    /// Playfield width (units)
    pub field_width: f32,
    /// Playfield height (units), obstacles enter at 0 and leave past this
    pub field_height: f32,

    /// Car width as a fraction of lane width
    pub car_width_ratio: f32,
    pub car_height: f32,
    /// Gap between the car's bottom edge and the bottom of the field
    pub car_bottom_margin: f32,

    /// Obstacle width as a fraction of lane width
    pub obstacle_width_ratio: f32,
    pub obstacle_height: f32,
    /// Scrolled distance between two obstacle spawns
    pub spawn_spacing: f32,

    /// Speed at score 0 (units per tick)
    pub initial_velocity: u32,
    /// Score points per +1 speed
    pub score_to_velocity_ratio: u64,
    /// Scrolled distance worth one score point
    pub distance_per_point: f32,

    /// Minimum swipe = screen width / this
    pub swipe_min_offset_divisor: f32,
    /// Tilt value that maps to the outermost lane
    pub tilt_range: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lane_count: LANE_COUNT,
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            car_width_ratio: 0.6,
            car_height: 96.0,
            car_bottom_margin: 24.0,

            obstacle_width_ratio: 0.7,
            obstacle_height: 48.0,
            spawn_spacing: 280.0,

            initial_velocity: INITIAL_VELOCITY,
            score_to_velocity_ratio: SCORE_TO_VELOCITY_RATIO,
            // One point per full background scroll
            distance_per_point: FIELD_HEIGHT,

            swipe_min_offset_divisor: SWIPE_MIN_OFFSET_FROM_MAX_WIDTH,
            tilt_range: TILT_RANGE,
        }
    }
}

impl Tuning {
    /// Return a copy with every value forced into its usable range.
    ///
    /// Values that would break an invariant (zero lanes, zero divisors,
    /// non-positive sizes) fall back to the defaults.
    pub fn validated(&self) -> Self {
        let defaults = Self::default();
        let positive = |v: f32, d: f32| if v.is_finite() && v > 0.0 { v } else { d };
        let ratio = |v: f32, d: f32| if v.is_finite() && v > 0.0 && v <= 1.0 { v } else { d };

        let tuning = Self {
            lane_count: self.lane_count.max(1),
            field_width: positive(self.field_width, defaults.field_width),
            field_height: positive(self.field_height, defaults.field_height),
            car_width_ratio: ratio(self.car_width_ratio, defaults.car_width_ratio),
            car_height: positive(self.car_height, defaults.car_height),
            car_bottom_margin: if self.car_bottom_margin.is_finite() {
                self.car_bottom_margin.max(0.0)
            } else {
                defaults.car_bottom_margin
            },
            obstacle_width_ratio: ratio(self.obstacle_width_ratio, defaults.obstacle_width_ratio),
            obstacle_height: positive(self.obstacle_height, defaults.obstacle_height),
            spawn_spacing: positive(self.spawn_spacing, defaults.spawn_spacing),
            initial_velocity: self.initial_velocity,
            score_to_velocity_ratio: self.score_to_velocity_ratio.max(1),
            distance_per_point: if self.distance_per_point.is_finite() {
                self.distance_per_point.max(MIN_DISTANCE_PER_POINT)
            } else {
                defaults.distance_per_point
            },
            swipe_min_offset_divisor: positive(
                self.swipe_min_offset_divisor,
                defaults.swipe_min_offset_divisor,
            ),
            tilt_range: positive(self.tilt_range, defaults.tilt_range),
        };

        if tuning != *self {
            log::warn!("Tuning contained out-of-range values, clamped");
        }
        tuning
    }

    /// Minimum drag distance that counts as a swipe
    pub fn swipe_threshold(&self) -> f32 {
        self.field_width / self.swipe_min_offset_divisor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert_eq!(tuning.validated(), tuning);
        assert_eq!(tuning.lane_count, 3);
    }

    #[test]
    fn test_validated_fixes_broken_values() {
        let tuning = Tuning {
            lane_count: 0,
            score_to_velocity_ratio: 0,
            field_height: -1.0,
            car_width_ratio: 2.0,
            tilt_range: f32::NAN,
            ..Default::default()
        }
        .validated();

        assert_eq!(tuning.lane_count, 1);
        assert_eq!(tuning.score_to_velocity_ratio, 1);
        assert_eq!(tuning.field_height, FIELD_HEIGHT);
        assert_eq!(tuning.car_width_ratio, 0.6);
        assert_eq!(tuning.tilt_range, TILT_RANGE);
    }

    #[test]
    fn test_validated_floors_distance_per_point() {
        let tiny = Tuning {
            distance_per_point: 1e-8,
            ..Default::default()
        };
        assert_eq!(tiny.validated().distance_per_point, MIN_DISTANCE_PER_POINT);

        let negative = Tuning {
            distance_per_point: -3.0,
            ..Default::default()
        };
        assert_eq!(negative.validated().distance_per_point, MIN_DISTANCE_PER_POINT);
    }

    #[test]
    fn test_swipe_threshold() {
        let tuning = Tuning {
            field_width: 240.0,
            swipe_min_offset_divisor: 8.0,
            ..Default::default()
        };
        assert_eq!(tuning.swipe_threshold(), 30.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "lane_count": 5 }"#).unwrap();
        assert_eq!(tuning.lane_count, 5);
        assert_eq!(tuning.field_width, FIELD_WIDTH);
    }
}
