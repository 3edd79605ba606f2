//! Built-in keybind presets.

use crate::keybind::Keybind;

/// Selector entry that leaves the keybind as free text.
pub const CUSTOM_PRESET: &str = "Custom";

/// A named keybind used to prefill a key slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetKeybind {
    pub label: &'static str,
    pub tokens: &'static [&'static str],
}

impl PresetKeybind {
    const fn new(label: &'static str, tokens: &'static [&'static str]) -> Self {
        Self { label, tokens }
    }

    pub fn keybind(&self) -> Keybind {
        Keybind::from_tokens(self.tokens)
    }
}

/// Minecraft debug-screen combinations, in selector order.
pub const PRESETS: &[PresetKeybind] = &[
    PresetKeybind::new("F3+C - Copy Coordinates", &["F3", "C"]),
    PresetKeybind::new("F3+G - Show Chunk Boundaries", &["F3", "G"]),
    PresetKeybind::new("F3+A - Reload Chunks", &["F3", "A"]),
    PresetKeybind::new("F3+B - Show Hitboxes", &["F3", "B"]),
    PresetKeybind::new("F3+ESC - Pause Without Menu", &["F3", "ESCAPE"]),
    PresetKeybind::new("F3+Q - Show F3+Q Menu", &["F3", "Q"]),
    PresetKeybind::new("F3+F - Increase Render Distance", &["F3", "F"]),
    PresetKeybind::new("SHIFT+F3+F - Decrease Render Distance", &["SHIFT", "F3", "F"]),
    PresetKeybind::new("SHIFT+F3 - Show Debug Piechart", &["SHIFT", "F3"]),
];

/// Look up a preset by its exact label.
pub fn find_preset(label: &str) -> Option<&'static PresetKeybind> {
    PRESETS.iter().find(|p| p.label == label)
}

/// Selector labels: `Custom` followed by every preset.
pub fn preset_labels() -> impl Iterator<Item = &'static str> {
    std::iter::once(CUSTOM_PRESET).chain(PRESETS.iter().map(|p| p.label))
}
