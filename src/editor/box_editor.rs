//! Corner handles of a box.

use liveview_scene::{Bounds, Point};

use crate::model::{Box2d, BoxPatch};

/// A draggable corner. Names describe a box that is not inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    LeftTop,
    RightTop,
    RightBottom,
    LeftBottom,
}

impl Corner {
    /// All corners in handle order.
    pub const ALL: [Corner; 4] = [
        Corner::LeftTop,
        Corner::RightTop,
        Corner::RightBottom,
        Corner::LeftBottom,
    ];

    /// Where this corner's handle sits on `b`.
    pub fn position(&self, b: &Box2d) -> Point {
        match self {
            Corner::LeftTop => Point::new(b.x1, b.y1),
            Corner::RightTop => Point::new(b.x2, b.y1),
            Corner::RightBottom => Point::new(b.x2, b.y2),
            Corner::LeftBottom => Point::new(b.x1, b.y2),
        }
    }

    /// The fields this corner owns, set to `point`.
    pub fn patch(&self, point: Point) -> BoxPatch {
        let (x, y) = (Some(point.x), Some(point.y));
        match self {
            Corner::LeftTop => BoxPatch {
                x1: x,
                y1: y,
                ..Default::default()
            },
            Corner::RightTop => BoxPatch {
                x2: x,
                y1: y,
                ..Default::default()
            },
            Corner::RightBottom => BoxPatch {
                x2: x,
                y2: y,
                ..Default::default()
            },
            Corner::LeftBottom => BoxPatch {
                x1: x,
                y2: y,
                ..Default::default()
            },
        }
    }
}

/// Outline in the order the box is stroked.
pub fn outline(b: &Box2d) -> Vec<Point> {
    vec![
        Point::new(b.x1, b.y1),
        Point::new(b.x1, b.y2),
        Point::new(b.x2, b.y2),
        Point::new(b.x2, b.y1),
    ]
}

/// Move `corner` to `point`, kept inside `boundary`.
pub fn drag(corner: Corner, point: Point, boundary: &Bounds) -> BoxPatch {
    corner.patch(boundary.clamp(point))
}

/// The delete button hangs above the first corner.
pub fn delete_anchor(b: &Box2d) -> Point {
    Point::new(b.x1, b.y1)
}
