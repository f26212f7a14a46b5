//! Data models for the live-view annotation canvas.

mod patch;
mod shape;

pub use patch::{AnnoPatch, BoxPatch, VertexIndex};
pub use shape::{AnnoTag, Box2d, Geometry, ShapeId, ShapeType, VideoAnno};
