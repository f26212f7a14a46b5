//! Vertex handles of polygons and lines.

use liveview_scene::{Bounds, Point};

use crate::model::AnnoPatch;

/// Move vertex `index` to `point`, kept inside `boundary`.
pub fn drag(index: usize, point: Point, boundary: &Bounds) -> AnnoPatch {
    AnnoPatch::vertex(index, boundary.clamp(point))
}

/// The top-most vertex. Ties go to the earliest vertex.
pub fn top_point(vertices: &[Point]) -> Option<Point> {
    let mut top: Option<Point> = None;
    for v in vertices {
        if top.is_none_or(|t| v.y < t.y) {
            top = Some(*v);
        }
    }
    top
}
