//! liveview_scene - a small retained scene graph for annotation overlays
//!
//! This crate provides the drawing primitives the live-view canvas is built
//! from: paths with fill rules, stroked polylines, handle circles, grouped
//! nodes with visibility, a scaled/offset layer transform, a frame clock for
//! continuously refreshing backgrounds and a tiny-skia rasterizer.

mod animation;
mod color;
mod event;
mod geometry;
mod node;
mod path;
mod raster;
mod stage;
mod transform;

pub use animation::{Animation, Frame, FrameClock};
pub use color::Color;
pub use event::{Event, Key, MouseButton};
pub use geometry::{Bounds, Point, Size};
pub use node::{Group, Node};
pub use path::{signed_area, FillRule, Path, PathCommand};
pub use raster::{frame_from_rgba8, pixmap_to_rgba8, render_stage, RenderError};
pub use stage::{Cursor, Layer, Stage};
pub use transform::Transform;

pub use tiny_skia::Pixmap;
