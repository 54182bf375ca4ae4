//! User settings and preferences
//!
//! Widget-level options stored in ~/.querypad/config.toml. Every field has
//! a serde default so a partial (or missing) file yields a working widget.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Widget options exposed to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// `light`, `dark`, or anything else to follow the host terminal
    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default = "default_true")]
    pub line_numbers: bool,

    #[serde(default)]
    pub word_wrap: bool,

    #[serde(default = "default_true")]
    pub show_border: bool,

    /// Trigger a completion request when the editor gains focus
    #[serde(default)]
    pub suggest_on_focus: bool,

    /// Show "No schema" / "Schema: N table(s)" in the status line
    #[serde(default = "default_true")]
    pub show_schema_status: bool,

    /// Fixed widget height in rows; unset means fill the available area
    #[serde(default)]
    pub height: Option<u16>,
}

fn default_theme() -> String {
    "host".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            line_numbers: default_true(),
            word_wrap: false,
            show_border: default_true(),
            suggest_on_focus: false,
            show_schema_status: default_true(),
            height: None,
        }
    }
}

/// Directory holding querypad configuration.
pub fn config_dir() -> ConfigResult<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".querypad"))
        .ok_or(ConfigError::NoHomeDir)
}

/// Load settings from the config file. A missing file yields defaults.
pub fn load_settings() -> ConfigResult<Settings> {
    let path = config_dir()?.join("config.toml");
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(&path)?;
    let settings: Settings = toml::from_str(&content)?;
    Ok(settings)
}
