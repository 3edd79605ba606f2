//! Key name to firmware keycode mapping.

use std::collections::BTreeMap;

/// Maps canonical upper-case key names to `adafruit_hid` `Keycode` identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyNameTable {
    entries: BTreeMap<String, String>,
}

impl KeyNameTable {
    /// An empty table. Every token resolves to itself.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// The CircuitPython table for the Skyboard.
    pub fn circuitpython() -> Self {
        let mut table = Self::new();
        for n in 1..=12 {
            let name = format!("F{n}");
            table.insert(&name, &name);
        }
        for (name, code) in [
            ("ESCAPE", "ESCAPE"),
            ("ESC", "ESCAPE"),
            ("TAB", "TAB"),
            ("SHIFT", "SHIFT"),
            ("CTRL", "CONTROL"),
            ("CONTROL", "CONTROL"),
            ("ALT", "ALT"),
            ("SPACE", "SPACE"),
            ("ENTER", "ENTER"),
            ("RETURN", "ENTER"),
            ("BACKSPACE", "BACKSPACE"),
        ] {
            table.insert(name, code);
        }
        table
    }

    /// Add or replace a mapping. The name is upper-cased.
    pub fn insert(&mut self, name: &str, code: &str) {
        self.entries
            .insert(name.trim().to_uppercase(), code.trim().to_string());
    }

    /// Merge extra mappings over this table.
    pub fn with_overrides<'a, I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (name, code) in overrides {
            self.insert(name, code);
        }
        self
    }

    /// Resolve a token, passing unknown tokens through unchanged.
    pub fn resolve<'a>(&'a self, token: &'a str) -> &'a str {
        self.entries.get(token).map(String::as_str).unwrap_or(token)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Default for KeyNameTable {
    fn default() -> Self {
        Self::circuitpython()
    }
}
