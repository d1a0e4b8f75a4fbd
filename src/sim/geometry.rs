//! Rectangle and lane geometry
//!
//! Screen-style coordinates: x grows to the right, y grows downward. Obstacles
//! enter at y = 0 and scroll toward larger y.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle from left/top/right/bottom edges
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(Vec2::new(left, top), Vec2::new(right, bottom))
    }

    /// Rectangle from its top-left corner and size
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin, origin + size)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Same rectangle moved by `delta`
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }
}

/// Horizontal lane layout of the road
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneLayout {
    pub lane_count: u32,
    pub field_width: f32,
}

impl LaneLayout {
    pub fn new(lane_count: u32, field_width: f32) -> Self {
        Self {
            lane_count: lane_count.max(1),
            field_width,
        }
    }

    #[inline]
    pub fn lane_width(&self) -> f32 {
        self.field_width / self.lane_count as f32
    }

    /// Highest valid lane index
    #[inline]
    pub fn last_lane(&self) -> u32 {
        self.lane_count - 1
    }

    /// Clamp any signed lane index into `[0, lane_count)`
    pub fn clamp_lane(&self, lane: i64) -> u32 {
        lane.clamp(0, self.last_lane() as i64) as u32
    }

    /// X of a lane's left edge; fractional indices land between lanes
    pub fn lane_left(&self, offset_index: f32) -> f32 {
        offset_index * self.lane_width()
    }

    /// X of a lane's center line
    pub fn lane_center(&self, offset_index: f32) -> f32 {
        self.lane_left(offset_index) + self.lane_width() / 2.0
    }

    /// Left x of a box of `width` centered in the lane at `offset_index`
    pub fn centered_left(&self, offset_index: f32, width: f32) -> f32 {
        self.lane_center(offset_index) - width / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_rects_intersect() {
        let car = Rect::from_ltrb(0.0, 0.0, 10.0, 10.0);
        let obstacle = Rect::from_ltrb(5.0, 5.0, 15.0, 15.0);
        assert!(car.intersects(&obstacle));
        assert!(obstacle.intersects(&car));
    }

    #[test]
    fn test_disjoint_rects_do_not_intersect() {
        let car = Rect::from_ltrb(0.0, 0.0, 10.0, 10.0);
        let obstacle = Rect::from_ltrb(20.0, 20.0, 30.0, 30.0);
        assert!(!car.intersects(&obstacle));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::from_ltrb(0.0, 0.0, 10.0, 10.0);
        let b = Rect::from_ltrb(10.0, 0.0, 20.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_rect_accessors() {
        let r = Rect::from_origin_size(Vec2::new(2.0, 4.0), Vec2::new(6.0, 8.0));
        assert_eq!(r.width(), 6.0);
        assert_eq!(r.height(), 8.0);
        assert_eq!(r.center(), Vec2::new(5.0, 8.0));
        assert_eq!(r.translated(Vec2::new(0.0, 2.0)).top(), 6.0);
    }

    #[test]
    fn test_lane_math() {
        let layout = LaneLayout::new(3, 300.0);
        assert_eq!(layout.lane_width(), 100.0);
        assert_eq!(layout.lane_center(1.0), 150.0);
        assert_eq!(layout.centered_left(2.0, 60.0), 220.0);
        assert_eq!(layout.clamp_lane(-4), 0);
        assert_eq!(layout.clamp_lane(7), 2);
        assert_eq!(layout.clamp_lane(1), 1);
    }

    #[test]
    fn test_zero_lanes_becomes_one() {
        let layout = LaneLayout::new(0, 100.0);
        assert_eq!(layout.lane_count, 1);
        assert_eq!(layout.last_lane(), 0);
    }
}
