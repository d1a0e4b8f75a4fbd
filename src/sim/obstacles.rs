//! Scrolling obstacle blocks
//!
//! Obstacles enter above the top edge, move down by the current speed every
//! running tick and are dropped once they leave past the bottom edge.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{LaneLayout, Rect};
use crate::tuning::Tuning;

/// A single obstacle block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub lane: u32,
    /// Y of the block's top edge
    pub y: f32,
}

/// The set of live obstacles plus the spawn policy
#[derive(Debug, Clone)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    layout: LaneLayout,
    size: Vec2,
    field_height: f32,
    spawn_spacing: f32,
    /// Distance scrolled since the last spawn
    since_spawn: f32,
    rng: Pcg32,
    next_id: u32,
}

impl ObstacleField {
    /// Empty road; the first obstacle appears after one spawn spacing
    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        let layout = LaneLayout::new(tuning.lane_count, tuning.field_width);
        Self {
            obstacles: Vec::new(),
            size: Vec2::new(
                layout.lane_width() * tuning.obstacle_width_ratio,
                tuning.obstacle_height,
            ),
            layout,
            field_height: tuning.field_height,
            spawn_spacing: tuning.spawn_spacing,
            since_spawn: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Scroll every obstacle down by `speed` units, recycle the ones past the
    /// exit edge and spawn a new one once the spacing has been covered.
    ///
    /// A zero speed changes nothing.
    pub fn advance(&mut self, speed: u32) {
        if speed == 0 {
            return;
        }
        let delta = speed as f32;

        for obstacle in &mut self.obstacles {
            obstacle.y += delta;
        }
        let field_height = self.field_height;
        self.obstacles.retain(|o| o.y <= field_height);

        self.since_spawn += delta;
        if self.since_spawn > self.spawn_spacing {
            // One spawn per call; the leftover never exceeds one spacing
            self.since_spawn = (self.since_spawn - self.spawn_spacing).min(self.spawn_spacing);
            self.spawn();
        }
    }

    fn spawn(&mut self) {
        let lane = self.rng.random_range(0..self.layout.lane_count);
        let id = self.next_id;
        self.next_id += 1;
        log::debug!("Spawned obstacle {} in lane {}", id, lane);
        self.obstacles.push(Obstacle {
            id,
            lane,
            y: -self.size.y,
        });
    }

    /// Rectangle of one obstacle
    pub fn bounding_box(&self, obstacle: &Obstacle) -> Rect {
        let left = self.layout.centered_left(obstacle.lane as f32, self.size.x);
        Rect::from_origin_size(Vec2::new(left, obstacle.y), self.size)
    }

    /// Rectangles of every live obstacle, oldest first
    pub fn bounding_boxes(&self) -> Vec<Rect> {
        self.obstacles.iter().map(|o| self.bounding_box(o)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}
