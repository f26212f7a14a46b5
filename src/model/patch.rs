//! Partial shape updates emitted by editors and the creation session.

use liveview_scene::Point;
use serde::{Deserialize, Serialize};

use super::shape::Box2d;

/// Which vertex a vertex patch addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VertexIndex {
    At(usize),
    /// The most recently added vertex
    Last,
}

impl VertexIndex {
    /// Resolve against a vertex list of length `len`.
    pub fn resolve(&self, len: usize) -> Option<usize> {
        match *self {
            VertexIndex::At(i) if i < len => Some(i),
            VertexIndex::At(_) => None,
            VertexIndex::Last => len.checked_sub(1),
        }
    }
}

/// Box fields to overwrite. `None` leaves the field unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x1: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y1: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x2: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y2: Option<f32>,
}

impl BoxPatch {
    pub fn apply_to(&self, b: &mut Box2d) {
        if let Some(x1) = self.x1 {
            b.x1 = x1;
        }
        if let Some(y1) = self.y1 {
            b.y1 = y1;
        }
        if let Some(x2) = self.x2 {
            b.x2 = x2;
        }
        if let Some(y2) = self.y2 {
            b.y2 = y2;
        }
    }
}

/// A partial update to one shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnoPatch {
    Box(BoxPatch),
    Vertex { index: VertexIndex, point: Point },
}

impl AnnoPatch {
    /// Move vertex `index` to `point`.
    pub fn vertex(index: usize, point: Point) -> Self {
        AnnoPatch::Vertex {
            index: VertexIndex::At(index),
            point,
        }
    }
}
