//! Video annotation shapes.
//!
//! A shape pairs a geometric variant (box, polygon, line) with a semantic
//! tag (AOI, counting line, danger zone). All coordinates are in image space.

use liveview_scene::{signed_area, Bounds, Point};
use serde::{Deserialize, Serialize};

use super::patch::AnnoPatch;

/// Unique identifier for a video annotation. Never reused by a store.
pub type ShapeId = u64;

/// What an annotation is used for. Decides its layer and rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnoTag {
    /// Area of interest, also punched out of the dimming mask
    Aoi,
    /// Line used to count crossing objects
    CountingLine,
    /// Restricted safety region
    DangerZone,
}

impl AnnoTag {
    /// Get the display name for this tag.
    pub fn name(&self) -> &'static str {
        match self {
            AnnoTag::Aoi => "Area of Interest",
            AnnoTag::CountingLine => "Counting Line",
            AnnoTag::DangerZone => "Danger Zone",
        }
    }

    /// All tags in layer draw order.
    pub fn all() -> &'static [AnnoTag] {
        &[AnnoTag::Aoi, AnnoTag::CountingLine, AnnoTag::DangerZone]
    }

    /// Whether shapes with this tag cut holes into the mask.
    pub fn is_mask_hole(&self) -> bool {
        matches!(self, AnnoTag::Aoi)
    }
}

/// The geometric variant to draw in a creation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeType {
    #[serde(rename = "bbox")]
    BBox,
    Polygon,
    Line,
}

impl ShapeType {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeType::BBox => "Bounding Box",
            ShapeType::Polygon => "Polygon",
            ShapeType::Line => "Line",
        }
    }
}

/// An axis-aligned box given by two opposite corners.
///
/// The corners are not ordered: after a handle is dragged across the opposite
/// corner, `x1 > x2` or `y1 > y2` is possible and kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Box2d {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Box2d {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// A zero-sized box at `point`, the first state of a box being drawn.
    pub fn at(point: Point) -> Self {
        Self::new(point.x, point.y, point.x, point.y)
    }

    /// Corners in the order left-top, right-top, right-bottom, left-bottom
    /// (named after a non-inverted box).
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x1, self.y1),
            Point::new(self.x2, self.y1),
            Point::new(self.x2, self.y2),
            Point::new(self.x1, self.y2),
        ]
    }

    /// True when exactly one axis is inverted, which flips the winding of
    /// [`Box2d::corners`].
    pub fn is_mirrored(&self) -> bool {
        (self.x1 > self.x2) != (self.y1 > self.y2)
    }

    /// The same box with `x1 <= x2` and `y1 <= y2`.
    pub fn normalized(&self) -> Self {
        Self::new(
            self.x1.min(self.x2),
            self.y1.min(self.y2),
            self.x1.max(self.x2),
            self.y1.max(self.y2),
        )
    }
}

/// Shape geometry, one variant per shape type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "vertices", rename_all = "snake_case")]
pub enum Geometry {
    #[serde(rename = "bbox")]
    BBox(Box2d),
    Polygon(Vec<Point>),
    Line(Vec<Point>),
}

impl Geometry {
    /// The initial geometry of a shape whose first point is `point`.
    pub fn start(shape_type: ShapeType, point: Point) -> Self {
        match shape_type {
            ShapeType::BBox => Geometry::BBox(Box2d::at(point)),
            ShapeType::Polygon => Geometry::Polygon(vec![point]),
            ShapeType::Line => Geometry::Line(vec![point]),
        }
    }

    pub fn shape_type(&self) -> ShapeType {
        match self {
            Geometry::BBox(_) => ShapeType::BBox,
            Geometry::Polygon(_) => ShapeType::Polygon,
            Geometry::Line(_) => ShapeType::Line,
        }
    }

    /// Vertices in drawing order; box corners for boxes.
    pub fn vertices(&self) -> Vec<Point> {
        match self {
            Geometry::BBox(b) => b.corners().to_vec(),
            Geometry::Polygon(v) | Geometry::Line(v) => v.clone(),
        }
    }

    /// Signed shoelace area of the closed outline.
    pub fn signed_area(&self) -> f32 {
        signed_area(&self.vertices())
    }

    /// Normalized bounding rectangle, `None` for an empty vertex list.
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Geometry::BBox(b) => {
                let n = b.normalized();
                Some(Bounds::new(n.x1, n.y1, n.x2, n.y2))
            }
            Geometry::Polygon(v) | Geometry::Line(v) => {
                let first = v.first()?;
                Some(v.iter().fold(
                    Bounds::new(first.x, first.y, first.x, first.y),
                    |acc, p| {
                        Bounds::new(acc.x1.min(p.x), acc.y1.min(p.y), acc.x2.max(p.x), acc.y2.max(p.y))
                    },
                ))
            }
        }
    }

    /// Apply a partial update. Returns `false` when the patch does not fit
    /// this geometry (wrong variant or vertex index out of range).
    pub fn apply(&mut self, patch: &AnnoPatch) -> bool {
        match (self, patch) {
            (Geometry::BBox(b), AnnoPatch::Box(p)) => {
                p.apply_to(b);
                true
            }
            (Geometry::Polygon(v) | Geometry::Line(v), AnnoPatch::Vertex { index, point }) => {
                match index.resolve(v.len()) {
                    Some(i) => {
                        v[i] = *point;
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }

    /// Append a vertex. Boxes instead move their second corner.
    pub fn push_point(&mut self, point: Point) {
        match self {
            Geometry::BBox(b) => {
                b.x2 = point.x;
                b.y2 = point.y;
            }
            Geometry::Polygon(v) | Geometry::Line(v) => v.push(point),
        }
    }
}

/// A video annotation as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoAnno {
    pub id: ShapeId,
    pub tag: AnnoTag,
    pub geometry: Geometry,
}

impl VideoAnno {
    pub fn new(id: ShapeId, tag: AnnoTag, geometry: Geometry) -> Self {
        Self { id, tag, geometry }
    }

    pub fn shape_type(&self) -> ShapeType {
        self.geometry.shape_type()
    }
}
