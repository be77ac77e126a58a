// src/config.rs
//! Parser configuration stored as JSON under the user's config directory

use crate::error::{GpsError, Result};
use crate::gps::data::{Field, FixState};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Accept sentences whose checksum is missing or wrong
    pub ignore_checksum: bool,
    /// Treat a `V` validity indicator as valid
    pub ignore_invalid_gps_flag: bool,
    /// Fill a missing time of day from the clock when resolving fix times
    pub default_to_current_tod: bool,
    /// Event code to status code lookup
    pub event_status_map: HashMap<String, u16>,
}

impl ParserConfig {
    /// Load from the default location, or defaults if no file exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Load from `path`, or defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            GpsError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// `$HOME/.config/nmea-fix/config.json`
    pub fn get_config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| GpsError::Config("HOME environment variable not set".to_string()))?;

        Ok(PathBuf::from(home).join(".config").join("nmea-fix").join("config.json"))
    }

    /// Update checksum and validity-flag handling
    pub fn update_validation(&mut self, ignore_checksum: bool, ignore_invalid_gps_flag: bool) {
        self.ignore_checksum = ignore_checksum;
        self.ignore_invalid_gps_flag = ignore_invalid_gps_flag;
    }

    /// Add or replace one event code mapping
    pub fn map_event(&mut self, event_code: &str, status_code: u16) {
        self.event_status_map.insert(event_code.trim().to_string(), status_code);
    }

    /// Empty state honoring the validity-flag setting
    pub fn new_state(&self) -> FixState {
        let mut state = FixState::new();
        state.set_ignore_invalid_gps_flag(self.ignore_invalid_gps_flag);
        state
    }

    /// Translate the event code and pin the fix time once a batch is decoded.
    pub fn finish(&self, state: &mut FixState) {
        if !self.event_status_map.is_empty() {
            state.translate_event_code_to_status_code(&self.event_status_map);
        }
        if state.has_field(Field::Date) || state.has_field(Field::Time) {
            state.resolve_fixtime(self.default_to_current_tod);
        }
    }
}
