//! Global constants for the live-view canvas

/// Handle radius in screen pixels
pub const HANDLE_RADIUS: f32 = 5.0;

/// Outline stroke width in screen pixels
pub const STROKE_WIDTH: f32 = 2.0;

/// Invisible stroke width used for hit testing outlines
pub const HIT_STROKE_WIDTH: f32 = 50.0;

/// Distance of the delete cross above its anchor point
pub const DELETE_OFFSET: f32 = 30.0;

/// Side length of the delete cross
pub const CROSS_SIZE: f32 = 20.0;

/// Stroke width of the delete cross
pub const CROSS_STROKE_WIDTH: f32 = 5.0;

/// Opacity of the area outside every AOI
pub const MASK_ALPHA: f32 = 0.5;

/// Key that completes the shape being drawn
pub const DEFAULT_FINISH_KEY: char = 'd';
