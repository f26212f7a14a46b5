//! liveview-annotate - live-view annotation canvas
//!
//! Draw and edit areas of interest, counting lines and danger zones over a
//! continuously refreshing camera frame, and derive the settings the edge
//! inference scenarios consume from them.

pub mod config;
pub mod constants;
pub mod coordinator;
pub mod editor;
pub mod export;
pub mod mask;
pub mod model;
pub mod replay;
pub mod store;

#[cfg(test)]
mod tests;

pub use config::{AppConfig, ConfigError, LayerVisibility, LogLevel, SceneConfig};
pub use coordinator::{
    CreationEvent, CreationMode, CreationSession, ImageInfo, LiveViewScene, LoadStatus,
    SceneResponse,
};
pub use export::{ExportError, InferenceSettings};
pub use model::{AnnoPatch, AnnoTag, Box2d, BoxPatch, Geometry, ShapeId, ShapeType, VideoAnno};
pub use replay::{ReplayError, ReplayScript};
pub use store::{AnnoList, StoreError, VideoAnnoStore};
