//! Settings for the Skyboard configurator.

use serde::{Deserialize, Serialize};
use skyboard_core::{KeyNameTable, PinList};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub firmware: FirmwareSettings,
    #[serde(default)]
    pub recent_files: Vec<PathBuf>,
}

impl Settings {
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring invalid settings");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(path) = Self::settings_path() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(self)?;
            std::fs::write(path, content)?;
        }
        Ok(())
    }

    pub fn add_recent(&mut self, path: PathBuf) {
        self.recent_files.retain(|p| p != &path);
        self.recent_files.insert(0, path);
        if self.recent_files.len() > 10 {
            self.recent_files.truncate(10);
        }
    }

    pub fn settings_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "skyboard-config")
            .map(|d| d.config_dir().join("config.toml"))
    }

    pub fn log_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "skyboard-config")
            .map(|d| d.data_dir().join("logs"))
    }
}

/// Firmware target: hardware pins and extra key names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirmwareSettings {
    #[serde(default = "default_pins")]
    pub pins: Vec<String>,
    #[serde(default)]
    pub key_names: BTreeMap<String, String>,
}

fn default_pins() -> Vec<String> {
    PinList::hackpad().iter().map(str::to_string).collect()
}

impl Default for FirmwareSettings {
    fn default() -> Self {
        Self {
            pins: default_pins(),
            key_names: BTreeMap::new(),
        }
    }
}

impl FirmwareSettings {
    pub fn pin_list(&self) -> PinList {
        PinList::new(self.pins.iter().cloned())
    }

    pub fn key_name_table(&self) -> KeyNameTable {
        KeyNameTable::circuitpython().with_overrides(&self.key_names)
    }
}
