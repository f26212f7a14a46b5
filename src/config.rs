//! Configuration file support for the live-view canvas.
//!
//! This module provides serialization and deserialization of application settings:
//! log verbosity plus the look and feel of the annotation scene.

use liveview_scene::Color;
use serde::{Deserialize, Serialize};

use crate::constants::{
    CROSS_SIZE, CROSS_STROKE_WIDTH, DEFAULT_FINISH_KEY, DELETE_OFFSET, HANDLE_RADIUS,
    HIT_STROKE_WIDTH, MASK_ALPHA, STROKE_WIDTH,
};
use crate::model::AnnoTag;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Get the display name for this log level.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration that can be exported and imported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Application name (for identification)
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// User preferences
    #[serde(default)]
    pub preferences: UserPreferences,

    /// Scene look and behavior
    #[serde(default)]
    pub scene: SceneConfig,
}

fn default_app_name() -> String {
    "liveview-annotate".to_string()
}

/// User preferences section of the config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Which tag layers are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerVisibility {
    #[serde(default = "default_true")]
    pub aoi: bool,
    #[serde(default = "default_true")]
    pub counting_line: bool,
    #[serde(default = "default_true")]
    pub danger_zone: bool,
}

fn default_true() -> bool {
    true
}

impl LayerVisibility {
    pub fn is_visible(&self, tag: AnnoTag) -> bool {
        match tag {
            AnnoTag::Aoi => self.aoi,
            AnnoTag::CountingLine => self.counting_line,
            AnnoTag::DangerZone => self.danger_zone,
        }
    }

    pub fn set(&mut self, tag: AnnoTag, visible: bool) {
        match tag {
            AnnoTag::Aoi => self.aoi = visible,
            AnnoTag::CountingLine => self.counting_line = visible,
            AnnoTag::DangerZone => self.danger_zone = visible,
        }
    }
}

impl Default for LayerVisibility {
    fn default() -> Self {
        Self {
            aoi: true,
            counting_line: true,
            danger_zone: true,
        }
    }
}

/// Look and behavior of the annotation scene.
///
/// Sizes are in screen pixels and get divided by the view scale when drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Key that completes the shape being drawn
    pub finish_key: char,
    pub handle_radius: f32,
    pub stroke_width: f32,
    pub hit_stroke_width: f32,
    pub delete_offset: f32,
    pub cross_size: f32,
    pub cross_stroke_width: f32,
    pub shape_color: Color,
    pub danger_zone_color: Color,
    pub cross_color: Color,
    pub mask_color: Color,
    /// Layer visibility when a scene is created
    pub layers: LayerVisibility,
}

impl SceneConfig {
    /// Outline and handle color for a tag.
    pub fn color_for(&self, tag: AnnoTag) -> Color {
        match tag {
            AnnoTag::DangerZone => self.danger_zone_color,
            AnnoTag::Aoi | AnnoTag::CountingLine => self.shape_color,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            finish_key: DEFAULT_FINISH_KEY,
            handle_radius: HANDLE_RADIUS,
            stroke_width: STROKE_WIDTH,
            hit_stroke_width: HIT_STROKE_WIDTH,
            delete_offset: DELETE_OFFSET,
            cross_size: CROSS_SIZE,
            cross_stroke_width: CROSS_STROKE_WIDTH,
            shape_color: Color::WHITE,
            danger_zone_color: Color::YELLOW,
            cross_color: Color::RED,
            mask_color: Color::BLACK.with_alpha(MASK_ALPHA),
            layers: LayerVisibility::default(),
        }
    }
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            app_name: default_app_name(),
            preferences: UserPreferences::default(),
            scene: SceneConfig::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Read configuration from an explicit path.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Get the default filename for config export.
    pub fn default_filename() -> &'static str {
        "liveview-annotate.json"
    }

    /// Get the default config file path for auto-load/save.
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("liveview-annotate").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("liveview-annotate")
                    .join(Self::default_filename())
            })
        }
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to the default path.
    pub fn save_to_default_path(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(&path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
