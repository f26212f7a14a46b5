//! Storage for the video annotations of one camera.
//!
//! The canvas never owns the shape collection. It reads and mutates it through
//! [`VideoAnnoStore`], which keeps the collection ordered and assigns ids.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::{AnnoPatch, AnnoTag, Geometry, ShapeId, VideoAnno};

/// The store operations the canvas relies on.
pub trait VideoAnnoStore {
    /// All shapes in draw order.
    fn video_annos(&self) -> &[VideoAnno];

    /// Apply a partial update to the shape with `id`.
    fn update_video_anno(&mut self, id: ShapeId, patch: AnnoPatch);

    /// Delete the shape with `id`.
    fn remove_video_anno(&mut self, id: ShapeId);

    /// Append a new shape and return its freshly assigned id.
    ///
    /// Returns `None`, storing nothing, once no unused id is left.
    fn insert_video_anno(&mut self, tag: AnnoTag, geometry: Geometry) -> Option<ShapeId>;

    /// Get a shape by id.
    fn video_anno(&self, id: ShapeId) -> Option<&VideoAnno> {
        self.video_annos().iter().find(|a| a.id == id)
    }
}

/// Errors that can occur when persisting annotations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// JSON parsing or serialization error
    #[error("Failed to (de)serialize annotations: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error when reading/writing annotations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored id leaves no room for new ones
    #[error("Annotation id {0} is the largest possible id, no new ids left")]
    IdsExhausted(ShapeId),
}

/// Ordered in-memory annotation list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnoList {
    annos: Vec<VideoAnno>,
    /// Counter for generating unique ids, kept across removals.
    next_id: ShapeId,
}

impl AnnoList {
    pub fn new() -> Self {
        Self {
            annos: Vec::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.annos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annos.is_empty()
    }

    /// Remove every annotation. Ids are still never reused.
    pub fn clear(&mut self) {
        self.annos.clear();
    }

    /// Export annotations to JSON string.
    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Import annotations from JSON string.
    ///
    /// The id counter is raised above every stored id, so a hand-edited file
    /// cannot cause an id to be handed out twice.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let mut list: Self = serde_json::from_str(json)?;
        let max_id = list.annos.iter().map(|a| a.id).max().unwrap_or(0);
        if list.next_id <= max_id {
            log::warn!(
                "Annotation id counter {} not above stored id {}, bumping",
                list.next_id,
                max_id
            );
            list.next_id = max_id
                .checked_add(1)
                .ok_or(StoreError::IdsExhausted(max_id))?;
        }
        Ok(list)
    }

    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path)?;
        let list = Self::from_json(&json)?;
        log::info!("Loaded {} annotations from {:?}", list.len(), path);
        Ok(list)
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Saved {} annotations to {:?}", self.len(), path);
        Ok(())
    }
}

impl Default for AnnoList {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoAnnoStore for AnnoList {
    fn video_annos(&self) -> &[VideoAnno] {
        &self.annos
    }

    fn update_video_anno(&mut self, id: ShapeId, patch: AnnoPatch) {
        let Some(anno) = self.annos.iter_mut().find(|a| a.id == id) else {
            log::warn!("Update for unknown annotation {}", id);
            return;
        };
        if !anno.geometry.apply(&patch) {
            log::warn!(
                "Ignoring {:?} for {} annotation {}",
                patch,
                anno.shape_type().name(),
                id
            );
        }
    }

    fn remove_video_anno(&mut self, id: ShapeId) {
        let before = self.annos.len();
        self.annos.retain(|a| a.id != id);
        if self.annos.len() == before {
            log::warn!("Remove for unknown annotation {}", id);
        } else {
            log::debug!("🗑️ Removed annotation {}", id);
        }
    }

    fn insert_video_anno(&mut self, tag: AnnoTag, geometry: Geometry) -> Option<ShapeId> {
        let id = self.next_id;
        let Some(next_id) = id.checked_add(1) else {
            log::warn!("Annotation ids exhausted, not adding {}", tag.name());
            return None;
        };
        self.next_id = next_id;
        log::debug!(
            "➕ Added {} {} as annotation {}",
            tag.name(),
            geometry.shape_type().name(),
            id
        );
        self.annos.push(VideoAnno::new(id, tag, geometry));
        Some(id)
    }
}
