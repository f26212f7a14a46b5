//! Uniform scale + offset transform between image space and device space.

use crate::geometry::{Point, Size};

/// Maps image-space coordinates to device (canvas) coordinates:
/// `device = image * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Transform {
    /// Create a new transform with the given scale and offset.
    pub fn new(scale: f32, offset_x: f32, offset_y: f32) -> Self {
        Self {
            scale,
            offset_x,
            offset_y,
        }
    }

    /// Create an identity transform (scale=1, no offset).
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// Fit `content` inside `container`, preserving aspect ratio and
    /// centering it.
    ///
    /// `scale = min(cw / iw, ch / ih)`, and the offset splits the leftover
    /// space evenly on both sides. Returns `None` when either size has a zero
    /// dimension, since a zero scale cannot be inverted.
    pub fn fit_centered(container: Size, content: Size) -> Option<Transform> {
        if content.is_empty() || container.is_empty() {
            return None;
        }
        let scale = (container.width / content.width).min(container.height / content.height);
        if !scale.is_finite() || scale <= 0.0 {
            return None;
        }
        let offset_x = (container.width - content.width * scale) / 2.0;
        let offset_y = (container.height - content.height * scale) / 2.0;
        Some(Transform::new(scale, offset_x, offset_y))
    }

    /// Image space to device space.
    pub fn apply(&self, point: Point) -> Point {
        Point::new(
            point.x * self.scale + self.offset_x,
            point.y * self.scale + self.offset_y,
        )
    }

    /// Device space to image space.
    pub fn invert(&self, point: Point) -> Point {
        Point::new(
            (point.x - self.offset_x) / self.scale,
            (point.y - self.offset_y) / self.scale,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
