//! Collision detection between the car and the obstacle blocks

use super::geometry::Rect;

/// True if any obstacle overlaps the car.
///
/// Pure axis-aligned overlap test; an empty obstacle set never collides.
pub fn check(car_box: &Rect, obstacle_boxes: &[Rect]) -> bool {
    first_hit(car_box, obstacle_boxes).is_some()
}

/// Index of the first obstacle overlapping the car, if any
pub fn first_hit(car_box: &Rect, obstacle_boxes: &[Rect]) -> Option<usize> {
    obstacle_boxes.iter().position(|obs| car_box.intersects(obs))
}
