//! Basic 2D geometry types shared by every scene node.

use serde::{Deserialize, Serialize};

/// A 2D point. Whether it is in device or image space depends on the caller.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point.
    pub fn distance_to(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Distance from this point to the segment `a`-`b`.
    pub fn distance_to_segment(&self, a: &Point, b: &Point) -> f32 {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let len_sq = dx * dx + dy * dy;
        if len_sq == 0.0 {
            return self.distance_to(a);
        }
        let t = (((self.x - a.x) * dx + (self.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
        self.distance_to(&Point::new(a.x + t * dx, a.y + t * dy))
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero, e.g. before an image has loaded.
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

/// An inclusive rectangle given by two corners.
///
/// No ordering is enforced between the corners; [`Bounds::clamp`] checks the
/// lower edge first and the upper edge last.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Bounds {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Bounds spanning `(0, 0)` to `(width, height)`.
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Clamp a point into the bounds, inclusive on every edge.
    ///
    /// A NaN coordinate lands on the lower edge.
    pub fn clamp(&self, point: Point) -> Point {
        let mut x = point.x;
        let mut y = point.y;
        if x.is_nan() || x < self.x1 {
            x = self.x1;
        }
        if x > self.x2 {
            x = self.x2;
        }
        if y.is_nan() || y < self.y1 {
            y = self.y1;
        }
        if y > self.y2 {
            y = self.y2;
        }
        Point::new(x, y)
    }

    /// Check if a point lies inside the bounds (edges included).
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.x1 && point.x <= self.x2 && point.y >= self.y1 && point.y <= self.y2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert!((p1.distance_to(&p2) - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_distance_to_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((Point::new(5.0, 3.0).distance_to_segment(&a, &b) - 3.0).abs() < 0.001);
        assert!((Point::new(13.0, 4.0).distance_to_segment(&a, &b) - 5.0).abs() < 0.001);
        // Degenerate segment
        assert!((Point::new(3.0, 4.0).distance_to_segment(&a, &a) - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_size_is_empty() {
        assert!(Size::ZERO.is_empty());
        assert!(Size::new(100.0, 0.0).is_empty());
        assert!(!Size::new(1.0, 1.0).is_empty());
    }

    #[test]
    fn test_bounds_clamp() {
        let bounds = Bounds::new(0.0, 0.0, 200.0, 100.0);
        assert_eq!(bounds.clamp(Point::new(-5.0, 50.0)), Point::new(0.0, 50.0));
        assert_eq!(bounds.clamp(Point::new(500.0, 500.0)), Point::new(200.0, 100.0));
        assert_eq!(bounds.clamp(Point::new(20.0, 30.0)), Point::new(20.0, 30.0));
        // Edges are inclusive
        assert_eq!(bounds.clamp(Point::new(200.0, 0.0)), Point::new(200.0, 0.0));
    }

    #[test]
    fn test_bounds_clamp_nan() {
        let bounds = Bounds::new(0.0, 0.0, 200.0, 200.0);
        assert_eq!(bounds.clamp(Point::new(f32::NAN, 5.0)), Point::new(0.0, 5.0));
        assert_eq!(bounds.clamp(Point::new(5.0, f32::NAN)), Point::new(5.0, 0.0));
        assert!(bounds.contains(&bounds.clamp(Point::new(f32::NAN, f32::NAN))));
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = Bounds::from_size(Size::new(10.0, 10.0));
        assert!(bounds.contains(&Point::new(0.0, 10.0)));
        assert!(!bounds.contains(&Point::new(-0.1, 5.0)));
    }
}
