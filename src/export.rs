//! Settings handed to the edge inference scenarios.
//!
//! Counting scenarios take a line as `x1, y1, x2, y2`, danger-zone scenarios
//! take axis-aligned rectangles, and AOI filtering takes polygons. All values
//! are image pixels.

use liveview_scene::{Point, Size};
use serde::{Deserialize, Serialize};

use crate::model::{AnnoTag, Geometry, ShapeId, VideoAnno};

/// Errors that can occur when exporting inference settings.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to serialize inference settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A counting line, identified by the shape it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountingLine {
    pub id: ShapeId,
    pub line: [f32; 4],
}

/// A danger zone as `[x1, y1, x2, y2]` with `x1 <= x2` and `y1 <= y2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DangerZone {
    pub id: ShapeId,
    pub rect: [f32; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceSettings {
    pub width: f32,
    pub height: f32,
    pub use_aoi: bool,
    pub aois: Vec<Vec<Point>>,
    pub counting_lines: Vec<CountingLine>,
    pub danger_zones: Vec<DangerZone>,
}

impl InferenceSettings {
    /// Derive the settings from the annotations of one camera.
    pub fn from_annos(annos: &[VideoAnno], image: Size) -> Self {
        let mut settings = Self {
            width: image.width,
            height: image.height,
            use_aoi: false,
            aois: Vec::new(),
            counting_lines: Vec::new(),
            danger_zones: Vec::new(),
        };

        for anno in annos {
            match anno.tag {
                AnnoTag::Aoi => match &anno.geometry {
                    Geometry::Line(_) => {
                        log::warn!("AOI {} is a line and encloses nothing, skipping", anno.id)
                    }
                    geometry => settings.aois.push(geometry.vertices()),
                },
                AnnoTag::CountingLine => {
                    let vertices = anno.geometry.vertices();
                    match (vertices.first(), vertices.last()) {
                        (Some(a), Some(b)) if vertices.len() >= 2 => {
                            settings.counting_lines.push(CountingLine {
                                id: anno.id,
                                line: [a.x, a.y, b.x, b.y],
                            })
                        }
                        _ => log::warn!(
                            "Counting line {} has {} vertices, skipping",
                            anno.id,
                            vertices.len()
                        ),
                    }
                }
                AnnoTag::DangerZone => match anno.geometry.bounds() {
                    Some(b) => settings.danger_zones.push(DangerZone {
                        id: anno.id,
                        rect: [b.x1, b.y1, b.x2, b.y2],
                    }),
                    None => log::warn!("Danger zone {} has no vertices, skipping", anno.id),
                },
            }
        }
        settings.use_aoi = !settings.aois.is_empty();
        settings
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &std::path::Path) -> Result<(), ExportError> {
        std::fs::write(path, self.to_json()?)?;
        log::info!(
            "Exported {} AOIs, {} counting lines and {} danger zones to {:?}",
            self.aois.len(),
            self.counting_lines.len(),
            self.danger_zones.len(),
            path
        );
        Ok(())
    }
}
