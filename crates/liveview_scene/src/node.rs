//! Render nodes and node groups.
//!
//! All coordinates are in the space of the layer the node lives in, so
//! sizes that must look constant on screen are divided by the layer scale
//! by whoever builds the node.

use crate::color::Color;
use crate::geometry::{Point, Size};
use crate::path::{FillRule, Path};

/// A drawable scene element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// The background frame, drawn at the layer origin with its natural size.
    Image { size: Size },
    /// A filled path. Non-listening paths are skipped by hit tests.
    Path {
        path: Path,
        fill: Color,
        fill_rule: FillRule,
        listening: bool,
    },
    /// A stroked polyline, optionally closed back to the first point.
    Polyline {
        points: Vec<Point>,
        closed: bool,
        stroke: Color,
        stroke_width: f32,
        hit_stroke_width: f32,
    },
    /// A filled circle, used for draggable handles.
    Circle {
        center: Point,
        radius: f32,
        fill: Color,
        hit_stroke_width: f32,
    },
    /// An "x" mark occupying the square `origin`..`origin + size`.
    Cross {
        origin: Point,
        size: f32,
        stroke: Color,
        stroke_width: f32,
        visible: bool,
    },
}

impl Node {
    /// Check whether `point` hits this node.
    pub fn hit(&self, point: Point) -> bool {
        match self {
            Node::Image { size } => {
                point.x >= 0.0 && point.y >= 0.0 && point.x <= size.width && point.y <= size.height
            }
            Node::Path {
                path,
                fill_rule,
                listening,
                ..
            } => *listening && path.contains(point, *fill_rule),
            Node::Polyline {
                points,
                closed,
                stroke_width,
                hit_stroke_width,
                ..
            } => {
                let tolerance = stroke_width.max(*hit_stroke_width) / 2.0;
                match points.len() {
                    0 => false,
                    1 => point.distance_to(&points[0]) <= tolerance,
                    n => {
                        let open_hit = points
                            .windows(2)
                            .any(|w| point.distance_to_segment(&w[0], &w[1]) <= tolerance);
                        open_hit
                            || (*closed
                                && point.distance_to_segment(&points[n - 1], &points[0])
                                    <= tolerance)
                    }
                }
            }
            Node::Circle {
                center,
                radius,
                hit_stroke_width,
                ..
            } => point.distance_to(center) <= radius + hit_stroke_width / 2.0,
            Node::Cross {
                origin,
                size,
                visible,
                ..
            } => {
                *visible
                    && point.x >= origin.x
                    && point.x <= origin.x + size
                    && point.y >= origin.y
                    && point.y <= origin.y + size
            }
        }
    }
}

/// A list of nodes sharing visibility and event listening.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Caller-defined identifier, e.g. the shape id the group renders.
    pub key: Option<u64>,
    pub visible: bool,
    pub listening: bool,
    pub children: Vec<Node>,
}

impl Group {
    pub fn new(key: Option<u64>) -> Self {
        Self {
            key,
            visible: true,
            listening: true,
            children: Vec::new(),
        }
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_listening(mut self, listening: bool) -> Self {
        self.listening = listening;
        self
    }

    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Index of the topmost child hit by `point`.
    ///
    /// Hidden or non-listening groups never report hits.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        if !self.visible || !self.listening {
            return None;
        }
        self.children.iter().rposition(|node| node.hit(point))
    }
}
