// User settings stored alongside the database

use crate::cluster::DEFAULT_CLUSTER_THRESHOLD;
use crate::duration::parse_clock;
use crate::error::Result;
use crate::timeline::{DEFAULT_GAP_MINUTES, DEFAULT_STAY_MINUTES, TimelineOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_DIR: &str = "~/.config/waypost/";
pub const CONFIG_FILE: &str = "config.json";
pub const DATABASE_FILE: &str = "waypost.db";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub day_start: String,
    pub default_gap_minutes: u32,
    pub default_stay_minutes: u32,
    pub cluster_threshold: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            day_start: "09:00".to_string(),
            default_gap_minutes: DEFAULT_GAP_MINUTES,
            default_stay_minutes: DEFAULT_STAY_MINUTES,
            cluster_threshold: DEFAULT_CLUSTER_THRESHOLD,
        }
    }
}

impl Settings {
    /// Read `config.json` from `config_dir`, falling back to defaults when
    /// the file does not exist.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let path = config_dir.join(CONFIG_FILE);
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, config_dir: &Path) -> Result<PathBuf> {
        let path = config_dir.join(CONFIG_FILE);
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(path)
    }

    pub fn timeline_options(&self) -> Result<TimelineOptions> {
        Ok(TimelineOptions {
            start_minutes: parse_clock(&self.day_start)?,
            default_gap: self.default_gap_minutes,
            default_stay: self.default_stay_minutes,
        })
    }
}

/// Expand `~` in a user supplied config directory.
pub fn expand_config_dir(dir: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(dir).as_ref())
}
