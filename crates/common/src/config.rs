//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{MarkexError, MarkexResult};

/// Global application configuration.
///
/// Every field falls back to its default when missing from the file, so a
/// config containing only `{"logging": {"level": "debug"}}` is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory exports are written to when no `--output` is given.
    pub output_dir: PathBuf,

    /// Export defaults.
    pub export: ExportDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default export parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportDefaults {
    /// File name of the done-file written next to the manifests.
    /// `None` disables the done-file.
    pub done_filename: Option<String>,

    /// Export folder naming: "short", "medium" or "long".
    pub folder_format: String,

    /// Marker ID mode: "timeline-name-and-timecode", "name" or "notes".
    pub id_naming_mode: String,

    /// Thumbnail image format: "png", "jpg" or "gif".
    pub image_format: String,

    /// Include subframes in timecode strings.
    pub enable_subframes: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "markex=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            export: ExportDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ExportDefaults {
    fn default() -> Self {
        Self {
            done_filename: Some("done.json".to_string()),
            folder_format: "medium".to_string(),
            id_naming_mode: "timeline-name-and-timecode".to_string(),
            image_format: "png".to_string(),
            enable_subframes: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    ///
    /// Runs before logging is set up, so a broken file is handed back for the
    /// caller to report instead of being logged here.
    pub fn load() -> (Self, Option<MarkexError>) {
        Self::load_or_default(&config_file_path())
    }

    /// Like [`AppConfig::load`] for an explicit path. A missing file is not an
    /// error.
    pub fn load_or_default(path: &Path) -> (Self, Option<MarkexError>) {
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::load_from(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Load config from an explicit path. Unlike [`AppConfig::load`] this
    /// reports failures instead of falling back.
    pub fn load_from(path: &Path) -> MarkexResult<Self> {
        if !path.exists() {
            return Err(MarkexError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| MarkexError::config(format!("{}: {e}", path.display())))
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("markex").join("config.json")
}
