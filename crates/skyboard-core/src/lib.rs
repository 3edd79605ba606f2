//! # skyboard-core
//!
//! Keybind configuration and firmware generation for the Skyboard macro keypad.
//!
//! ## Features
//!
//! - Per-key keybind model with `+` notation (`F3+C`)
//! - Built-in Minecraft debug-key presets
//! - JSON persistence of the key layout
//! - CircuitPython firmware generation for the 3x2 Hackpad

mod config;
mod error;
mod firmware;
mod keybind;
mod keycode;
mod preset;
mod storage;

pub use config::{ConfigDocument, Configuration, KeyConfig, KeyEntry};
pub use error::{SkyboardError, SkyboardResult};
pub use firmware::{generate, PinList};
pub use keybind::Keybind;
pub use keycode::KeyNameTable;
pub use preset::{find_preset, preset_labels, PresetKeybind, CUSTOM_PRESET, PRESETS};
pub use storage::{export_firmware, load_config, load_config_if_exists, save_config};

/// Number of key slots in a fresh configuration.
pub const DEFAULT_NUM_KEYS: usize = 6;

/// Smallest number of key slots a configuration may declare.
pub const MIN_KEYS: usize = 1;

/// Largest number of key slots a configuration may declare.
pub const MAX_KEYS: usize = 20;

/// Default location of the configuration document.
pub const DEFAULT_CONFIG_FILE: &str = "hackpad_config.json";

/// Suggested file name for exported firmware.
pub const DEFAULT_FIRMWARE_FILE: &str = "code.py";
