//! Persisted view preferences for the candy history widget.
//!
//! The widget itself never touches the disk: the host loads a
//! `ViewPreferences` at startup, hands it to the widget, and saves it back
//! whenever the widget marks it dirty. `load`/`save` are plain functions over
//! the struct and a path so tests can round-trip through a temp directory.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "candyview_settings.json";

/// Date format used for the persisted from/to values. Fixed so settings files
/// stay readable across locales.
pub const PERSISTED_DATE_FORMAT: &str = "%Y-%m-%d";

fn default_date_string() -> String {
    Local::now()
        .date_naive()
        .format(PERSISTED_DATE_FORMAT)
        .to_string()
}

/// View preferences that persist between sessions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewPreferences {
    /// Positional index into `DateFilterPreset::ALL`.
    #[serde(rename = "transactionDate", default)]
    pub date_preset_index: usize,
    /// Lower bound of the custom range, `PERSISTED_DATE_FORMAT`.
    #[serde(rename = "transactionDateFrom", default = "default_date_string")]
    pub date_from: String,
    /// Upper bound of the custom range, `PERSISTED_DATE_FORMAT`.
    #[serde(rename = "transactionDateTo", default = "default_date_string")]
    pub date_to: String,
}

impl Default for ViewPreferences {
    fn default() -> Self {
        Self {
            date_preset_index: 0,
            date_from: default_date_string(),
            date_to: default_date_string(),
        }
    }
}

impl ViewPreferences {
    /// Get the settings file path
    fn settings_path() -> PathBuf {
        // Try to use the app data directory, fall back to current directory
        if let Some(config_dir) = dirs::config_dir() {
            let app_dir = config_dir.join("candyview");
            if !app_dir.exists() {
                let _ = fs::create_dir_all(&app_dir);
            }
            app_dir.join(SETTINGS_FILE)
        } else {
            PathBuf::from(SETTINGS_FILE)
        }
    }

    /// Load preferences from the default location, or defaults if not found.
    pub fn load() -> Self {
        Self::load_from(&Self::settings_path())
    }

    /// Load preferences from `path`. A missing or corrupt file loads
    /// defaults with a warning rather than failing.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(prefs) => {
                        tracing::info!("Loaded view preferences from {:?}", path);
                        return prefs;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse preferences file: {}", e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read preferences file: {}", e);
                }
            }
        }
        tracing::info!("Using default view preferences");
        Self::default()
    }

    /// Save preferences to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::settings_path())
    }

    /// Save preferences to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        tracing::info!("Saved view preferences to {:?}", path);
        Ok(())
    }

    /// The persisted lower range date, falling back to today when the stored
    /// string does not parse.
    pub fn range_from(&self) -> NaiveDate {
        parse_persisted_date(&self.date_from)
    }

    /// The persisted upper range date, same fallback as `range_from`.
    pub fn range_to(&self) -> NaiveDate {
        parse_persisted_date(&self.date_to)
    }

    /// Store both range dates in the persisted format.
    pub fn set_range(&mut self, from: NaiveDate, to: NaiveDate) {
        self.date_from = from.format(PERSISTED_DATE_FORMAT).to_string();
        self.date_to = to.format(PERSISTED_DATE_FORMAT).to_string();
    }

    /// Get the settings file path for display
    pub fn settings_path_display() -> String {
        Self::settings_path().display().to_string()
    }
}

fn parse_persisted_date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, PERSISTED_DATE_FORMAT)
        .unwrap_or_else(|_| Local::now().date_naive())
}
