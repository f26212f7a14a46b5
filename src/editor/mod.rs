//! Shape editors: outlines, draggable handles and the hover-only delete cross.
//!
//! Every shape is rendered as one [`Group`] whose children are laid out as
//! `[outline, handle.., delete cross]`. Hit tests on the group report a child
//! index, which [`part_at`] maps back to what the pointer is over.
//!
//! Sizes in [`EditorStyle`] are already divided by the view scale, so
//! handles and strokes keep a constant size on screen whatever the zoom.

mod box_editor;
mod polygon_editor;

pub use box_editor::Corner;

use liveview_scene::{Bounds, Color, Group, Node, Point};

use crate::config::SceneConfig;
use crate::model::{AnnoPatch, AnnoTag, Geometry, ShapeId};

/// Scale-aware drawing parameters for one tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorStyle {
    pub color: Color,
    pub cross_color: Color,
    pub handle_radius: f32,
    pub stroke_width: f32,
    pub hit_stroke_width: f32,
    pub delete_offset: f32,
    pub cross_size: f32,
    pub cross_stroke_width: f32,
}

impl EditorStyle {
    /// Style for shapes tagged `tag` drawn at view `scale`.
    ///
    /// A scale that is not positive falls back to 1.
    pub fn new(config: &SceneConfig, tag: AnnoTag, scale: f32) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        Self {
            color: config.color_for(tag),
            cross_color: config.cross_color,
            handle_radius: config.handle_radius / scale,
            stroke_width: config.stroke_width / scale,
            hit_stroke_width: config.hit_stroke_width / scale,
            delete_offset: config.delete_offset / scale,
            cross_size: config.cross_size / scale,
            cross_stroke_width: config.cross_stroke_width / scale,
        }
    }
}

/// A draggable handle of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Corner(Corner),
    Vertex(usize),
}

/// The part of a rendered shape under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPart {
    Outline,
    Handle(Handle),
    Delete,
}

/// Handles of `geometry` with their positions, in child order.
pub fn handles(geometry: &Geometry) -> Vec<(Handle, Point)> {
    match geometry {
        Geometry::BBox(b) => Corner::ALL
            .iter()
            .map(|c| (Handle::Corner(*c), c.position(b)))
            .collect(),
        Geometry::Polygon(v) | Geometry::Line(v) => v
            .iter()
            .enumerate()
            .map(|(i, p)| (Handle::Vertex(i), *p))
            .collect(),
    }
}

/// Anchor of the delete cross, `None` for a shape without vertices.
pub fn delete_anchor(geometry: &Geometry) -> Option<Point> {
    match geometry {
        Geometry::BBox(b) => Some(box_editor::delete_anchor(b)),
        Geometry::Polygon(v) | Geometry::Line(v) => polygon_editor::top_point(v),
    }
}

/// Build the scene group for one shape.
///
/// `show_delete` controls the cross; it is still emitted while hidden so the
/// child layout does not change with hover state.
///
/// Boxes and polygons are closed. A line is drawn and hit-tested as an open
/// polyline, so there is no segment from its last vertex back to the first.
pub fn render(id: ShapeId, geometry: &Geometry, style: &EditorStyle, show_delete: bool) -> Group {
    let mut group = Group::new(Some(id));

    let (points, closed) = match geometry {
        Geometry::BBox(b) => (box_editor::outline(b), true),
        Geometry::Polygon(v) => (v.clone(), true),
        Geometry::Line(v) => (v.clone(), false),
    };
    group.push(Node::Polyline {
        points,
        closed,
        stroke: style.color,
        stroke_width: style.stroke_width,
        hit_stroke_width: style.hit_stroke_width,
    });

    // Corner handles sit on top of the box outline, so only vertex handles
    // get the wide hit stroke.
    let handle_hit = match geometry {
        Geometry::BBox(_) => 0.0,
        Geometry::Polygon(_) | Geometry::Line(_) => style.hit_stroke_width,
    };
    for (_, center) in handles(geometry) {
        group.push(Node::Circle {
            center,
            radius: style.handle_radius,
            fill: style.color,
            hit_stroke_width: handle_hit,
        });
    }

    if let Some(anchor) = delete_anchor(geometry) {
        group.push(Node::Cross {
            origin: Point::new(anchor.x, anchor.y - style.delete_offset),
            size: style.cross_size,
            stroke: style.cross_color,
            stroke_width: style.cross_stroke_width,
            visible: show_delete,
        });
    }
    group
}

/// Map a child index of a group built by [`render`] to the part it draws.
pub fn part_at(geometry: &Geometry, child: usize) -> Option<EditorPart> {
    let handles = handles(geometry);
    match child {
        0 => Some(EditorPart::Outline),
        i if i <= handles.len() => Some(EditorPart::Handle(handles[i - 1].0)),
        i if i == handles.len() + 1 && delete_anchor(geometry).is_some() => {
            Some(EditorPart::Delete)
        }
        _ => None,
    }
}

/// The update produced by dragging `handle` to `point`.
///
/// The point is clamped into `boundary` first. Returns `None` when the handle
/// does not belong to this kind of geometry.
pub fn drag(
    geometry: &Geometry,
    handle: Handle,
    point: Point,
    boundary: &Bounds,
) -> Option<AnnoPatch> {
    match (geometry, handle) {
        (Geometry::BBox(_), Handle::Corner(corner)) => Some(AnnoPatch::Box(box_editor::drag(
            corner, point, boundary,
        ))),
        (Geometry::Polygon(v) | Geometry::Line(v), Handle::Vertex(i)) if i < v.len() => {
            Some(polygon_editor::drag(i, point, boundary))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Box2d;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn triangle() -> Geometry {
        Geometry::Polygon(vec![
            Point::new(10.0, 50.0),
            Point::new(40.0, 20.0),
            Point::new(70.0, 50.0),
        ])
    }

    #[test]
    fn test_style_is_scale_aware() {
        let style = EditorStyle::new(&SceneConfig::default(), AnnoTag::Aoi, 0.5);
        assert!(approx_eq(style.handle_radius, 10.0));
        assert!(approx_eq(style.stroke_width, 4.0));
        assert!(approx_eq(style.hit_stroke_width, 100.0));
        assert!(approx_eq(style.delete_offset, 60.0));

        let fallback = EditorStyle::new(&SceneConfig::default(), AnnoTag::DangerZone, 0.0);
        assert!(approx_eq(fallback.handle_radius, 5.0));
        assert_eq!(fallback.color, Color::YELLOW);
    }

    #[test]
    fn test_render_layout() {
        let style = EditorStyle::new(&SceneConfig::default(), AnnoTag::Aoi, 1.0);
        let group = render(4, &triangle(), &style, false);
        assert_eq!(group.key, Some(4));
        assert_eq!(group.children.len(), 5);
        assert!(matches!(group.children[0], Node::Polyline { closed: true, .. }));
        assert!(matches!(
            group.children[4],
            Node::Cross { visible: false, origin, .. } if origin == Point::new(40.0, -10.0)
        ));
    }

    #[test]
    fn test_line_outline_is_open() {
        let style = EditorStyle::new(&SceneConfig::default(), AnnoTag::CountingLine, 1.0);
        let line = Geometry::Line(vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)]);
        let group = render(1, &line, &style, true);
        assert!(matches!(group.children[0], Node::Polyline { closed: false, .. }));
    }

    #[test]
    fn test_box_delete_cross_above_first_corner() {
        let style = EditorStyle::new(&SceneConfig::default(), AnnoTag::Aoi, 2.0);
        let b = Geometry::BBox(Box2d::new(100.0, 80.0, 20.0, 200.0));
        let group = render(1, &b, &style, true);
        match &group.children[5] {
            Node::Cross {
                origin,
                size,
                visible,
                ..
            } => {
                assert_eq!(*origin, Point::new(100.0, 65.0));
                assert!(approx_eq(*size, 10.0));
                assert!(*visible);
            }
            other => panic!("expected cross, got {:?}", other),
        }
    }

    #[test]
    fn test_part_at() {
        let g = triangle();
        assert_eq!(part_at(&g, 0), Some(EditorPart::Outline));
        assert_eq!(part_at(&g, 1), Some(EditorPart::Handle(Handle::Vertex(0))));
        assert_eq!(part_at(&g, 3), Some(EditorPart::Handle(Handle::Vertex(2))));
        assert_eq!(part_at(&g, 4), Some(EditorPart::Delete));
        assert_eq!(part_at(&g, 5), None);

        let b = Geometry::BBox(Box2d::default());
        assert_eq!(
            part_at(&b, 3),
            Some(EditorPart::Handle(Handle::Corner(Corner::RightBottom)))
        );
        assert_eq!(part_at(&Geometry::Line(Vec::new()), 1), None);
    }

    #[test]
    fn test_drag_results_stay_inside_boundary() {
        let boundary = Bounds::new(0.0, 0.0, 640.0, 480.0);
        let targets = [
            Point::new(-100.0, -100.0),
            Point::new(1000.0, 240.0),
            Point::new(320.0, 900.0),
            Point::new(640.0, 480.0),
            Point::new(f32::MAX, f32::MIN),
            Point::new(f32::NAN, 5.0),
            Point::new(300.0, f32::NAN),
            Point::new(f32::INFINITY, f32::NEG_INFINITY),
        ];
        let shapes = [triangle(), Geometry::BBox(Box2d::new(10.0, 10.0, 50.0, 50.0))];
        for shape in &shapes {
            for (handle, _) in handles(shape) {
                for target in targets {
                    let mut edited = shape.clone();
                    let patch = drag(shape, handle, target, &boundary).expect("patch");
                    assert!(edited.apply(&patch));
                    for v in edited.vertices() {
                        assert!(boundary.contains(&v), "{:?} escaped via {:?}", v, handle);
                    }
                }
            }
        }
    }

    #[test]
    fn test_drag_rejects_foreign_handles() {
        let boundary = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Geometry::BBox(Box2d::default());
        assert!(drag(&b, Handle::Vertex(0), Point::ORIGIN, &boundary).is_none());
        assert!(drag(&triangle(), Handle::Corner(Corner::LeftTop), Point::ORIGIN, &boundary).is_none());
        assert!(drag(&triangle(), Handle::Vertex(3), Point::ORIGIN, &boundary).is_none());
    }
}
