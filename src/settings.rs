use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BudgetMapError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_canvas_size")]
    pub canvas_width: f64,
    #[serde(default = "default_canvas_size")]
    pub canvas_height: f64,
    #[serde(default = "default_axis_step")]
    pub axis_step: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_canvas_size() -> f64 {
    100.0
}

fn default_axis_step() -> f64 {
    25.0
}

fn default_currency() -> String {
    "£".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: default_canvas_size(),
            canvas_height: default_canvas_size(),
            axis_step: default_axis_step(),
            currency: default_currency(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("budgetmap")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

pub fn load_settings_from(path: &Path) -> Settings {
    if path.exists() {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
            Settings::default()
        })
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(settings, &settings_path())
}

pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| BudgetMapError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}
