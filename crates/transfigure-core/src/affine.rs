//! Rotation helpers shared by geometry, hit testing and rendering.

use crate::shape::Shape;
use kurbo::{Affine, Point};

/// Rotation by `degrees` about `pivot`.
pub fn rotation_about(degrees: f64, pivot: Point) -> Affine {
    Affine::rotate_about(degrees.to_radians(), pivot)
}

/// Rotate `point` by `degrees` about `pivot`.
pub fn rotate_about_point(point: Point, degrees: f64, pivot: Point) -> Point {
    rotation_about(degrees, pivot) * point
}

/// Map a document-space point into the shape's unrotated frame.
pub fn to_local(point: Point, shape: &Shape) -> Point {
    rotate_about_point(point, -shape.angle, shape.center())
}

/// Map a point in the shape's unrotated frame back to document space.
pub fn to_world(point: Point, shape: &Shape) -> Point {
    rotate_about_point(point, shape.angle, shape.center())
}

/// Signed angle in degrees swept from `from` to `to` around `center`.
pub fn angle_between(center: Point, from: Point, to: Point) -> f64 {
    let start = (from.y - center.y).atan2(from.x - center.x);
    let current = (to.y - center.y).atan2(to.x - center.x);
    (current - start).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_rotate_quarter_turn() {
        // Screen space is y-down, so a positive angle turns clockwise.
        let p = rotate_about_point(Point::new(10.0, 0.0), 90.0, Point::ZERO);
        assert!((p.x - 0.0).abs() < EPS);
        assert!((p.y - 10.0).abs() < EPS);
    }

    #[test]
    fn test_rotate_about_pivot() {
        let pivot = Point::new(100.0, 100.0);
        let p = rotate_about_point(Point::new(150.0, 100.0), 180.0, pivot);
        assert!((p.x - 50.0).abs() < EPS);
        assert!((p.y - 100.0).abs() < EPS);
    }

    #[test]
    fn test_local_world_inverse() {
        let shape = Shape::rect(20.0, 30.0, 120.0, 80.0).with_angle(33.0);
        let p = Point::new(71.5, -12.25);
        let back = to_world(to_local(p, &shape), &shape);
        assert!((back.x - p.x).abs() < 1e-9);
        assert!((back.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn test_angle_between() {
        let center = Point::new(100.0, 100.0);
        let angle = angle_between(center, Point::new(150.0, 100.0), Point::new(100.0, 150.0));
        assert!((angle - 90.0).abs() < EPS);

        let same = angle_between(center, Point::new(130.0, 140.0), Point::new(130.0, 140.0));
        assert!(same.abs() < EPS);
    }
}
