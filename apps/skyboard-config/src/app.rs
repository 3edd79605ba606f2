//! Application state and logic.

use crate::config::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use skyboard_core::{
    export_firmware, load_config, load_config_if_exists, preset_labels, save_config,
    Configuration, Keybind, DEFAULT_FIRMWARE_FILE, MAX_KEYS, MIN_KEYS,
};
use std::path::PathBuf;

pub struct App {
    pub settings: Settings,
    pub configuration: Configuration,
    pub config_path: PathBuf,
    /// Preset selector position per slot; 0 is `Custom`.
    pub preset_choice: Vec<usize>,
    pub preset_labels: Vec<&'static str>,
    pub selected: usize,
    pub modified: bool,
    pub mode: Mode,
    pub message: Option<String>,
    pub show_help: bool,
    pub show_quit_confirm: bool,
    pub input_buffer: String,
    pub input_mode: InputMode,
    persist_settings: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Editing the selected slot's keybind text.
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    None,
    OpenFile,
    SaveAs,
    ExportFirmware,
}

impl App {
    /// Start with user settings, loading `config_path` if it exists.
    pub fn new(config_path: PathBuf) -> Self {
        let mut app = Self::with_settings(config_path, Settings::load());
        app.persist_settings = true;
        app
    }

    /// Start with the given settings. Settings are never written back.
    pub fn with_settings(config_path: PathBuf, settings: Settings) -> Self {
        let mut app = Self {
            settings,
            configuration: Configuration::default(),
            config_path,
            preset_choice: Vec::new(),
            preset_labels: preset_labels().collect(),
            selected: 0,
            modified: false,
            mode: Mode::Normal,
            message: None,
            show_help: false,
            show_quit_confirm: false,
            input_buffer: String::new(),
            input_mode: InputMode::None,
            persist_settings: false,
        };

        match load_config_if_exists(&app.config_path) {
            Ok(Some(configuration)) => app.configuration = configuration,
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load startup configuration");
                app.message = Some(format!("Failed to load configuration: {}", e));
            }
        }
        app.reset_presets();
        app
    }

    pub fn can_quit(&self) -> bool {
        self.mode == Mode::Normal && self.input_mode == InputMode::None && !self.show_help
    }

    pub fn preset_label(&self, index: usize) -> &'static str {
        let choice = self.preset_choice.get(index).copied().unwrap_or(0);
        self.preset_labels[choice]
    }

    fn reset_presets(&mut self) {
        self.preset_choice = vec![0; self.configuration.num_keys()];
        self.selected = self.selected.min(self.configuration.num_keys() - 1);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.message = None;

        if self.show_help {
            self.show_help = false;
            return;
        }

        if self.input_mode != InputMode::None {
            self.handle_input_key(key);
            return;
        }

        if self.mode == Mode::Editing {
            self.handle_editor_key(key);
            return;
        }

        match key.code {
            // Slot navigation
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),

            // Key count
            KeyCode::Char('+') | KeyCode::Char('=') => self.change_key_count(1),
            KeyCode::Char('-') => self.change_key_count(-1),

            // Preset selector
            KeyCode::Char('l') | KeyCode::Right => self.cycle_preset(1),
            KeyCode::Char('h') | KeyCode::Left => self.cycle_preset(-1),

            // Keybind text
            KeyCode::Char('e') | KeyCode::Enter => {
                self.mode = Mode::Editing;
                self.input_buffer = self
                    .configuration
                    .keybind(self.selected)
                    .map(|kb| kb.to_string())
                    .unwrap_or_default();
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                self.configuration.clear_keybind(self.selected);
                if let Some(choice) = self.preset_choice.get_mut(self.selected) {
                    *choice = 0;
                }
                self.modified = true;
            }

            // Files
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.save_file(self.config_path.clone());
            }
            KeyCode::Char('S') => {
                self.input_mode = InputMode::SaveAs;
                self.input_buffer = self.config_path.to_string_lossy().to_string();
            }
            KeyCode::Char('o') => {
                self.input_mode = InputMode::OpenFile;
                self.input_buffer.clear();
            }
            KeyCode::Char('x') => {
                self.input_mode = InputMode::ExportFirmware;
                self.input_buffer = DEFAULT_FIRMWARE_FILE.to_string();
            }

            // Help
            KeyCode::Char('?') => self.show_help = true,

            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::None;
                self.input_buffer.clear();
            }
            KeyCode::Enter => self.finish_input(),
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Char(c) => {
                self.input_buffer.push(c);
            }
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                self.input_buffer.clear();
            }
            KeyCode::Enter => {
                let keybind = Keybind::parse(&self.input_buffer);
                if self.configuration.keybind(self.selected) != Some(&keybind) {
                    self.configuration.set_keybind(self.selected, keybind);
                    if let Some(choice) = self.preset_choice.get_mut(self.selected) {
                        *choice = 0;
                    }
                    self.modified = true;
                }
                self.mode = Mode::Normal;
                self.input_buffer.clear();
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Char(c) => {
                self.input_buffer.push(c);
            }
            _ => {}
        }
    }

    fn finish_input(&mut self) {
        let path = PathBuf::from(self.input_buffer.trim());
        match self.input_mode {
            InputMode::OpenFile => self.open_file(path),
            InputMode::SaveAs => {
                if path.as_os_str().is_empty() {
                    self.message = Some("No file name given".to_string());
                } else {
                    self.save_file(path);
                }
            }
            InputMode::ExportFirmware => self.export(path),
            InputMode::None => {}
        }

        self.input_mode = InputMode::None;
        self.input_buffer.clear();
    }

    fn move_selection(&mut self, delta: i32) {
        let len = self.configuration.num_keys();
        let new_idx = self.selected as i32 + delta;
        self.selected = new_idx.clamp(0, len as i32 - 1) as usize;
    }

    fn change_key_count(&mut self, delta: i32) {
        let current = self.configuration.num_keys() as i32;
        let new_count = (current + delta).clamp(MIN_KEYS as i32, MAX_KEYS as i32) as usize;
        if new_count == self.configuration.num_keys() {
            return;
        }
        self.configuration.resize(new_count);
        self.preset_choice.resize(new_count, 0);
        self.selected = self.selected.min(new_count - 1);
        self.modified = true;
    }

    fn cycle_preset(&mut self, delta: i32) {
        let Some(choice) = self.preset_choice.get_mut(self.selected) else {
            return;
        };
        let len = self.preset_labels.len() as i32;
        *choice = (*choice as i32 + delta).rem_euclid(len) as usize;

        let label = self.preset_labels[*choice];
        if self.configuration.apply_preset(self.selected, label) {
            self.modified = true;
        }
        self.message = Some(label.to_string());
    }

    fn open_file(&mut self, path: PathBuf) {
        match load_config(&path) {
            Ok(configuration) => {
                self.configuration = configuration;
                self.config_path = path.clone();
                self.modified = false;
                self.reset_presets();
                self.remember(path);
                self.message = Some("Configuration loaded successfully".to_string());
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Load failed");
                self.message = Some(format!("Failed to load configuration: {}", e));
            }
        }
    }

    /// Save to `path`. The current file only changes when the save succeeds.
    fn save_file(&mut self, path: PathBuf) {
        match save_config(&self.configuration, &path) {
            Ok(()) => {
                self.modified = false;
                self.message = Some(format!("Configuration saved to {}", path.display()));
                self.config_path = path.clone();
                self.remember(path);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Save failed");
                self.message = Some(format!("Failed to save configuration: {}", e));
            }
        }
    }

    fn export(&mut self, path: PathBuf) {
        let firmware = &self.settings.firmware;
        match export_firmware(
            &self.configuration,
            &firmware.pin_list(),
            &firmware.key_name_table(),
            &path,
        ) {
            Ok(_) => {
                self.message = Some(format!(
                    "Firmware exported to {}. Copy this file as 'code.py' to your CircuitPython device.",
                    path.display()
                ));
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Export failed");
                self.message = Some(format!("Failed to export firmware: {}", e));
            }
        }
    }

    fn remember(&mut self, path: PathBuf) {
        self.settings.add_recent(path);
        if self.persist_settings {
            if let Err(e) = self.settings.save() {
                tracing::warn!(error = %e, "Could not save settings");
            }
        }
    }

    pub fn file_name(&self) -> String {
        self.config_path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| "[New File]".to_string())
    }
}
