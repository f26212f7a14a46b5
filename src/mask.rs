//! Dimming mask over everything outside the areas of interest.
//!
//! The mask is one path: the full image rectangle followed by one subpath per
//! hole. It is filled with the nonzero rule, so a hole only stays clear when
//! it winds opposite to the outer rectangle. The outer rectangle has a
//! positive signed area (clockwise on screen), hence every hole is traced
//! with a negative one.

use liveview_scene::{signed_area, Path, Point, Size};

use crate::model::Geometry;

/// Signed shoelace area, `Σ(x_i·y_{i+1} − x_{i+1}·y_i) / 2`.
///
/// Positive means clockwise on screen (y grows downwards).
pub fn polygon_area(vertices: &[Point]) -> f32 {
    signed_area(vertices)
}

/// Vertices of the hole a shape cuts, ordered to wind against the boundary.
///
/// Lines enclose no area and cut nothing.
pub fn hole_trace(geometry: &Geometry) -> Option<Vec<Point>> {
    let mut trace = match geometry {
        Geometry::BBox(b) => {
            let trace = vec![
                Point::new(b.x1, b.y1),
                Point::new(b.x1, b.y2),
                Point::new(b.x2, b.y2),
                Point::new(b.x2, b.y1),
            ];
            // The fixed order above only winds negatively for boxes that are
            // not mirrored.
            if b.is_mirrored() {
                log::trace!("Mirrored box hole {:?}, reversing trace", b);
                trace.into_iter().rev().collect()
            } else {
                trace
            }
        }
        Geometry::Polygon(vertices) if !vertices.is_empty() => vertices.clone(),
        Geometry::Polygon(_) | Geometry::Line(_) => return None,
    };
    if polygon_area(&trace) > 0.0 {
        trace.reverse();
    }
    Some(trace)
}

/// Build the mask path for an image of `size` with the given holes.
pub fn mask_path<'a>(size: Size, holes: impl IntoIterator<Item = &'a Geometry>) -> Path {
    let mut path = Path::new();
    path.move_to(Point::new(0.0, 0.0))
        .line_to(Point::new(size.width, 0.0))
        .line_to(Point::new(size.width, size.height))
        .line_to(Point::new(0.0, size.height))
        .line_to(Point::new(0.0, 0.0));

    for trace in holes.into_iter().filter_map(hole_trace) {
        let head = trace[0];
        path.move_to(head);
        for p in &trace[1..] {
            path.line_to(*p);
        }
        path.line_to(head);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Box2d;
    use liveview_scene::FillRule;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn square(clockwise: bool) -> Vec<Point> {
        let mut v = vec![
            Point::new(20.0, 20.0),
            Point::new(60.0, 20.0),
            Point::new(60.0, 60.0),
            Point::new(20.0, 60.0),
        ];
        if !clockwise {
            v.reverse();
        }
        v
    }

    fn image() -> Size {
        Size::new(100.0, 100.0)
    }

    #[test]
    fn test_polygon_area_sign() {
        assert!(approx_eq(polygon_area(&square(true)), 1600.0));
        assert!(approx_eq(polygon_area(&square(false)), -1600.0));
        assert_eq!(polygon_area(&[]), 0.0);
    }

    #[test]
    fn test_boundary_winds_positive() {
        let path = mask_path(image(), []);
        let subpaths = path.subpaths();
        assert_eq!(subpaths.len(), 1);
        assert!(polygon_area(&subpaths[0]) > 0.0);
    }

    #[test]
    fn test_clockwise_polygon_is_reversed() {
        let trace = hole_trace(&Geometry::Polygon(square(true))).expect("hole");
        let mut expected = square(true);
        expected.reverse();
        assert_eq!(trace, expected);
    }

    #[test]
    fn test_counter_clockwise_polygon_traced_as_given() {
        let trace = hole_trace(&Geometry::Polygon(square(false))).expect("hole");
        assert_eq!(trace, square(false));
    }

    #[test]
    fn test_polygon_hole_is_clear_either_way() {
        for clockwise in [true, false] {
            let hole = Geometry::Polygon(square(clockwise));
            let path = mask_path(image(), [&hole]);
            assert!(!path.contains(Point::new(40.0, 40.0), FillRule::NonZero));
            assert!(path.contains(Point::new(80.0, 80.0), FillRule::NonZero));
        }
    }

    #[test]
    fn test_box_hole_winding_all_orientations() {
        let (lo, hi) = (20.0, 60.0);
        let boxes = [
            Box2d::new(lo, lo, hi, hi),
            Box2d::new(hi, lo, lo, hi),
            Box2d::new(lo, hi, hi, lo),
            Box2d::new(hi, hi, lo, lo),
        ];
        for b in boxes {
            let hole = Geometry::BBox(b);
            let trace = hole_trace(&hole).expect("box hole");
            assert!(polygon_area(&trace) < 0.0, "box {:?} winds the wrong way", b);

            let path = mask_path(image(), [&hole]);
            assert_eq!(path.winding_number(Point::new(40.0, 40.0)), 0);
            assert!(path.contains(Point::new(5.0, 5.0), FillRule::NonZero));
        }
    }

    #[test]
    fn test_regular_box_uses_fixed_order() {
        let trace = hole_trace(&Geometry::BBox(Box2d::new(1.0, 2.0, 3.0, 4.0))).expect("hole");
        assert_eq!(
            trace,
            vec![
                Point::new(1.0, 2.0),
                Point::new(1.0, 4.0),
                Point::new(3.0, 4.0),
                Point::new(3.0, 2.0),
            ]
        );
    }

    #[test]
    fn test_lines_cut_no_hole() {
        let line = Geometry::Line(vec![Point::new(0.0, 0.0), Point::new(50.0, 50.0)]);
        assert!(hole_trace(&line).is_none());
        assert!(hole_trace(&Geometry::Polygon(Vec::new())).is_none());
        assert_eq!(mask_path(image(), [&line]).subpaths().len(), 1);
    }

    #[test]
    fn test_multiple_holes() {
        let a = Geometry::BBox(Box2d::new(0.0, 0.0, 10.0, 10.0));
        let b = Geometry::Polygon(square(true));
        let path = mask_path(image(), [&a, &b]);
        assert_eq!(path.subpaths().len(), 3);
        assert!(!path.contains(Point::new(5.0, 5.0), FillRule::NonZero));
        assert!(!path.contains(Point::new(30.0, 30.0), FillRule::NonZero));
        assert!(path.contains(Point::new(90.0, 10.0), FillRule::NonZero));
    }
}
