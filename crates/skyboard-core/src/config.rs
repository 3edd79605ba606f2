//! Key layout configuration and its JSON document.

use crate::error::{SkyboardError, SkyboardResult};
use crate::keybind::Keybind;
use crate::preset::{find_preset, CUSTOM_PRESET};
use crate::{DEFAULT_NUM_KEYS, MAX_KEYS, MIN_KEYS};
use serde::{Deserialize, Serialize};

/// One physical key slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyConfig {
    /// 0-based slot position.
    pub index: usize,
    pub keybind: Keybind,
}

impl KeyConfig {
    fn empty(index: usize) -> Self {
        Self {
            index,
            keybind: Keybind::empty(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.keybind.is_empty()
    }

    /// 1-based number shown to users and stored on disk.
    pub fn key_number(&self) -> usize {
        self.index + 1
    }
}

/// The whole key layout.
///
/// `keys` always holds exactly `num_keys` slots, slot `i` at position `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    num_keys: usize,
    keys: Vec<KeyConfig>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::with_num_keys(DEFAULT_NUM_KEYS)
    }
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// A layout of `num_keys` empty slots.
    pub fn with_num_keys(num_keys: usize) -> Self {
        let mut config = Self {
            num_keys: 0,
            keys: Vec::new(),
        };
        config.resize(num_keys);
        config
    }

    pub fn num_keys(&self) -> usize {
        self.num_keys
    }

    pub fn keys(&self) -> &[KeyConfig] {
        &self.keys
    }

    pub fn key(&self, index: usize) -> Option<&KeyConfig> {
        self.keys.get(index)
    }

    pub fn keybind(&self, index: usize) -> Option<&Keybind> {
        self.keys.get(index).map(|k| &k.keybind)
    }

    /// Number of slots with a non-empty keybind.
    pub fn configured_count(&self) -> usize {
        self.keys.iter().filter(|k| k.is_configured()).count()
    }

    /// Change the number of slots.
    ///
    /// Slots past the new count are dropped; new slots start empty. The count
    /// is clamped to `MIN_KEYS..=MAX_KEYS`.
    pub fn resize(&mut self, new_count: usize) {
        let count = new_count.clamp(MIN_KEYS, MAX_KEYS);
        if count != new_count {
            tracing::debug!(requested = new_count, count, "Clamped key count");
        }
        self.keys.truncate(count);
        let start = self.keys.len();
        self.keys.extend((start..count).map(KeyConfig::empty));
        self.num_keys = count;
    }

    /// Replace one slot's keybind. Out-of-range indices are ignored.
    pub fn set_keybind(&mut self, index: usize, keybind: Keybind) {
        match self.keys.get_mut(index) {
            Some(slot) => slot.keybind = keybind.normalized(),
            None => tracing::debug!(index, "Ignoring keybind for missing slot"),
        }
    }

    pub fn clear_keybind(&mut self, index: usize) {
        self.set_keybind(index, Keybind::empty());
    }

    /// Prefill a slot from a preset.
    ///
    /// `Custom` and unknown labels leave the slot untouched. Returns whether
    /// the slot changed.
    pub fn apply_preset(&mut self, index: usize, preset_label: &str) -> bool {
        if preset_label == CUSTOM_PRESET {
            return false;
        }
        let Some(preset) = find_preset(preset_label) else {
            tracing::debug!(label = preset_label, "Unknown preset");
            return false;
        };
        let Some(slot) = self.keys.get_mut(index) else {
            return false;
        };
        let keybind = preset.keybind();
        if slot.keybind == keybind {
            return false;
        }
        slot.keybind = keybind;
        true
    }

    /// Build the persisted document. Unconfigured slots are omitted.
    pub fn to_json(&self) -> ConfigDocument {
        ConfigDocument {
            num_keys: Some(self.num_keys as i64),
            keys: self
                .keys
                .iter()
                .filter(|k| k.is_configured())
                .map(|k| KeyEntry {
                    key_number: k.key_number() as i64,
                    keybind: k.keybind.clone(),
                })
                .collect(),
        }
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json_string(&self) -> SkyboardResult<String> {
        serde_json::to_string_pretty(&self.to_json()).map_err(SkyboardError::Serialization)
    }

    /// Build a configuration from a persisted document.
    ///
    /// `num_keys` is clamped to `MIN_KEYS..=MAX_KEYS`. Entries whose
    /// `key_number` falls outside the declared slots are dropped.
    pub fn from_document(doc: ConfigDocument) -> Self {
        let num_keys = doc
            .num_keys
            .map(|n| n.clamp(MIN_KEYS as i64, MAX_KEYS as i64) as usize)
            .unwrap_or(DEFAULT_NUM_KEYS);
        let mut config = Self::with_num_keys(num_keys);
        for entry in doc.keys {
            let index = usize::try_from(entry.key_number)
                .ok()
                .and_then(|n| n.checked_sub(1));
            match index {
                Some(index) if index < config.keys.len() => {
                    config.keys[index].keybind = entry.keybind.normalized();
                }
                _ => {
                    tracing::debug!(
                        key_number = entry.key_number,
                        num_keys = config.num_keys,
                        "Dropping entry outside key range"
                    );
                }
            }
        }
        config
    }

    /// Parse a JSON document.
    pub fn from_json(doc: &str) -> SkyboardResult<Self> {
        let doc: ConfigDocument =
            serde_json::from_str(doc).map_err(SkyboardError::Deserialization)?;
        Ok(Self::from_document(doc))
    }

    /// Replace this configuration with a parsed document.
    ///
    /// On error `self` is left unchanged.
    pub fn load_json(&mut self, doc: &str) -> SkyboardResult<()> {
        *self = Self::from_json(doc)?;
        Ok(())
    }
}

/// On-disk form of a [`Configuration`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_keys: Option<i64>,
    #[serde(default)]
    pub keys: Vec<KeyEntry>,
}

/// One configured key in a [`ConfigDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEntry {
    /// 1-based slot number. Values below 1 are kept so the entry can be dropped.
    pub key_number: i64,
    pub keybind: Keybind,
}
