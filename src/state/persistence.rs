use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::canvas::CanvasConfig;
use crate::error::CanvasError;
use crate::session::ToolSession;

/// Result type for settings operations
pub type SettingsResult<T> = Result<T, CanvasError>;

/// Persisted drawing configuration: the tool session and the canvas setup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old settings
pub struct Settings {
    pub session: ToolSession,
    pub canvas: CanvasConfig,
    /// Version of the application that wrote the settings
    pub version: String,
}

impl Settings {
    pub fn new(session: ToolSession, canvas: CanvasConfig) -> Self {
        Self {
            session,
            canvas,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Loads settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;

        if settings.version != env!("CARGO_PKG_VERSION") {
            log::warn!(
                "Settings version {} differs from current version {}",
                settings.version,
                env!("CARGO_PKG_VERSION")
            );
        }
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Loads settings, falling back to defaults when the file is missing or invalid.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(&path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!(
                    "Using default settings ({}): {}",
                    path.as_ref().display(),
                    err
                );
                Self::new(ToolSession::default(), CanvasConfig::default())
            }
        }
    }

    /// Writes settings as pretty JSON, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> SettingsResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Saved settings to {}", path.display());
        Ok(())
    }
}
