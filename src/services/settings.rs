//! Navigation settings loaded from JSON.
//!
//! ```json
//! {
//!   "panels": [{ "id": "LoginPanel", "layer": "popup", "escape": "hide" }],
//!   "escape_layers": ["main", "popup", "system"]
//! }
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{EscapePolicy, Layer, PanelId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavSettings {
    #[serde(default)]
    pub panels: Vec<PanelOverride>,
    /// Layers searched by escape handling, in any order.
    #[serde(default = "default_escape_layers")]
    pub escape_layers: Vec<Layer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelOverride {
    pub id: PanelId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<Layer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escape: Option<EscapePolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_screen: Option<bool>,
}

fn default_escape_layers() -> Vec<Layer> {
    Layer::ALL.to_vec()
}

impl Default for NavSettings {
    fn default() -> Self {
        Self {
            panels: Vec::new(),
            escape_layers: default_escape_layers(),
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "cannot read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "invalid settings: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

pub fn parse_settings(text: &str) -> Result<NavSettings, SettingsError> {
    Ok(serde_json::from_str(text)?)
}

pub fn load_settings(path: &Path) -> Result<NavSettings, SettingsError> {
    let data = std::fs::read_to_string(path)?;
    let settings = parse_settings(&data)?;
    tracing::info!(
        path = %path.display(),
        overrides = settings.panels.len(),
        "settings loaded"
    );
    Ok(settings)
}

/// Writes default settings to `path` unless a file already exists there.
pub fn ensure_settings_file(path: &Path) -> Result<(), SettingsError> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(&NavSettings::default())?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/services/settings.rs"]
mod tests;
