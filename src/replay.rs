//! Recorded interaction scripts.
//!
//! A script fixes the frame and canvas sizes and lists the steps to play
//! back: raw input events plus the actions a surrounding UI would trigger
//! (arming a creation session, toggling layers).

use std::path::Path;

use liveview_scene::{Event, RenderError, Size};
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::coordinator::{CreationEvent, ImageInfo, LiveViewScene};
use crate::export::ExportError;
use crate::model::{AnnoTag, ShapeId, ShapeType};
use crate::store::{StoreError, VideoAnnoStore};

/// Errors that can occur while replaying a script.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid replay script: {0}")]
    Script(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// An action normally triggered from outside the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ReplayAction {
    StartCreating { shape: ShapeType, tag: AnnoTag },
    Disable,
    SetLayerVisible { tag: AnnoTag, visible: bool },
}

/// One scripted step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplayStep {
    Action(ReplayAction),
    Input(Event),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    /// Frame size in pixels
    pub image: Size,
    /// Canvas size in pixels
    pub canvas: Size,
    #[serde(default)]
    pub steps: Vec<ReplayStep>,
}

impl ReplayScript {
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let script = Self::from_json(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded {} replay steps from {:?}", script.steps.len(), path);
        Ok(script)
    }
}

/// Summary of a replay run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplaySummary {
    pub points: usize,
    pub committed: Vec<ShapeId>,
    pub removed: Vec<ShapeId>,
    pub discarded: usize,
    pub frames: u64,
}

/// Play `script` against `scene` and `store`.
///
/// The scene is sized and activated first. It is left active so the caller
/// can render the final state before tearing it down.
pub fn run<S: VideoAnnoStore + ?Sized>(
    scene: &mut LiveViewScene,
    store: &mut S,
    script: &ReplayScript,
) -> ReplaySummary {
    scene.resize(script.canvas);
    scene.set_image_info(ImageInfo::loaded(script.image));
    scene.activate();

    let mut summary = ReplaySummary::default();
    for step in &script.steps {
        match step {
            ReplayStep::Action(ReplayAction::StartCreating { shape, tag }) => {
                scene.start_creating(*shape, *tag)
            }
            ReplayStep::Action(ReplayAction::Disable) => {
                if scene.disable() {
                    summary.discarded += 1;
                }
            }
            ReplayStep::Action(ReplayAction::SetLayerVisible { tag, visible }) => {
                scene.set_layer_visible(&*store, *tag, *visible)
            }
            ReplayStep::Input(event) => {
                let response = scene.handle_event(store, event);
                match response.creation {
                    Some(CreationEvent::Point(_)) => summary.points += 1,
                    Some(CreationEvent::Committed(id)) => summary.committed.push(id),
                    Some(CreationEvent::Discarded) => summary.discarded += 1,
                    None => {}
                }
                summary.removed.extend(response.removed);
                if let Some(frame) = response.frame {
                    summary.frames = frame.count;
                }
            }
        }
    }

    log::debug!("▶️ Replay finished: {:?}", summary);
    summary
}
