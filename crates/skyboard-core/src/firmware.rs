//! CircuitPython firmware generation.
//!
//! The output is a complete `code.py` for an `adafruit_hid` keyboard. Only the
//! `KEY_PINS` and `KEYBINDS` lists depend on the configuration; the imports
//! and the polling loop are fixed text.

use crate::config::Configuration;
use crate::error::{SkyboardError, SkyboardResult};
use crate::keybind::Keybind;
use crate::keycode::KeyNameTable;

/// Ordered hardware input pins, one per physical key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinList(Vec<String>);

impl PinList {
    pub fn new<I, S>(pins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(pins.into_iter().map(Into::into).collect())
    }

    /// The 3x2 Hackpad grid wired to `board.D0`..`board.D5`.
    pub fn hackpad() -> Self {
        Self::new((0..6).map(|n| format!("board.D{n}")))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for PinList {
    fn default() -> Self {
        Self::hackpad()
    }
}

const HEADER: &str = "\
import time
import board
import digitalio
import usb_hid
from adafruit_hid.keyboard import Keyboard
from adafruit_hid.keycode import Keycode

# Initialize keyboard
kbd = Keyboard(usb_hid.devices)

# Physical pins, one per key
";

const RUNTIME: &str = "\
# Setup Pins
keys = []
for pin in KEY_PINS:
    k = digitalio.DigitalInOut(pin)
    k.direction = digitalio.Direction.INPUT
    k.pull = digitalio.Pull.UP
    keys.append(k)

key_states = [False] * len(keys)

print(\"Skyboard Ready!\")

while True:
    for i, key in enumerate(keys):
        # Button is pressed (False because of Pull.UP)
        if not key.value and not key_states[i]:
            key_states[i] = True
            if i < len(KEYBINDS) and KEYBINDS[i]:
                kbd.press(*KEYBINDS[i])

        # Button is released (True)
        elif key.value and key_states[i]:
            key_states[i] = False
            if i < len(KEYBINDS) and KEYBINDS[i]:
                kbd.release(*KEYBINDS[i])

    time.sleep(0.01)
";

/// Render the firmware for `config`.
///
/// Exactly `pins.len()` keys are emitted: slots past the pin count are left
/// out and pins without a configured slot are emitted as unconfigured.
/// Tokens missing from `table` are written as-is.
pub fn generate(
    config: &Configuration,
    pins: &PinList,
    table: &KeyNameTable,
) -> SkyboardResult<String> {
    if pins.is_empty() {
        return Err(SkyboardError::EmptyPinList);
    }
    if table.is_empty() {
        return Err(SkyboardError::EmptyKeyNameTable);
    }
    if config.num_keys() > pins.len() {
        tracing::debug!(
            num_keys = config.num_keys(),
            pins = pins.len(),
            "Keys beyond the pin count are not exported"
        );
    }

    let mut out = String::from(HEADER);

    out.push_str("KEY_PINS = [\n");
    for (i, pin) in pins.iter().enumerate() {
        out.push_str(&format!("    {},  # Key {}\n", pin, i + 1));
    }
    out.push_str("]\n\n");

    out.push_str("# Keybinds from Configurator\nKEYBINDS = [\n");
    for i in 0..pins.len() {
        match config.keybind(i).filter(|kb| !kb.is_empty()) {
            Some(keybind) => {
                out.push_str(&format!("    [{}],\n", keycodes(keybind, table).join(", ")));
            }
            None => out.push_str("    [], # Unconfigured\n"),
        }
    }
    out.push_str("]\n\n");

    out.push_str(RUNTIME);
    Ok(out)
}

fn keycodes(keybind: &Keybind, table: &KeyNameTable) -> Vec<String> {
    keybind
        .iter()
        .map(|token| format!("Keycode.{}", table.resolve(token)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arrays(firmware: &str) -> &str {
        let start = firmware.find("KEY_PINS = [").unwrap();
        let end = firmware.find("# Setup Pins").unwrap();
        firmware[start..end].trim_end()
    }

    fn keybind_lines(firmware: &str) -> Vec<&str> {
        let start = firmware.find("KEYBINDS = [").unwrap();
        firmware[start..]
            .lines()
            .skip(1)
            .take_while(|l| *l != "]")
            .collect()
    }

    fn two_key_config() -> Configuration {
        Configuration::from_json(
            r#"{"num_keys": 2, "keys": [{"key_number": 1, "keybind": ["F3", "C"]}]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_scenario_pads_to_pin_count() {
        let fw = generate(
            &two_key_config(),
            &PinList::hackpad(),
            &KeyNameTable::circuitpython(),
        )
        .unwrap();

        insta::assert_snapshot!(arrays(&fw), @r###"
KEY_PINS = [
    board.D0,  # Key 1
    board.D1,  # Key 2
    board.D2,  # Key 3
    board.D3,  # Key 4
    board.D4,  # Key 5
    board.D5,  # Key 6
]

# Keybinds from Configurator
KEYBINDS = [
    [Keycode.F3, Keycode.C],
    [], # Unconfigured
    [], # Unconfigured
    [], # Unconfigured
    [], # Unconfigured
    [], # Unconfigured
]
"###);
    }

    #[test]
    fn test_fixed_text_around_arrays() {
        let fw = generate(
            &Configuration::default(),
            &PinList::hackpad(),
            &KeyNameTable::circuitpython(),
        )
        .unwrap();
        assert!(fw.starts_with("import time\nimport board\n"));
        assert!(fw.contains("from adafruit_hid.keycode import Keycode\n"));
        assert!(fw.contains("k.pull = digitalio.Pull.UP\n"));
        assert!(fw.contains("kbd.press(*KEYBINDS[i])\n"));
        assert!(fw.contains("kbd.release(*KEYBINDS[i])\n"));
        assert!(fw.ends_with("    time.sleep(0.01)\n"));
    }

    #[test]
    fn test_aliases_and_unknown_tokens() {
        let mut config = Configuration::with_num_keys(3);
        config.set_keybind(0, Keybind::parse("ctrl+esc"));
        config.set_keybind(1, Keybind::parse("shift+pageup"));
        config.set_keybind(2, Keybind::parse("1"));

        let fw = generate(&config, &PinList::hackpad(), &KeyNameTable::circuitpython()).unwrap();
        let lines = keybind_lines(&fw);
        assert_eq!(lines[0], "    [Keycode.CONTROL, Keycode.ESCAPE],");
        assert_eq!(lines[1], "    [Keycode.SHIFT, Keycode.PAGEUP],");
        assert_eq!(lines[2], "    [Keycode.1],");
    }

    #[test]
    fn test_slots_beyond_pins_are_dropped() {
        let mut config = Configuration::with_num_keys(10);
        for i in 0..10 {
            config.set_keybind(i, Keybind::parse("F5"));
        }
        let pins = PinList::new(["board.GP0", "board.GP1"]);

        let fw = generate(&config, &pins, &KeyNameTable::circuitpython()).unwrap();
        assert_eq!(keybind_lines(&fw).len(), 2);
        assert!(!fw.contains("# Key 3"));
    }

    #[test]
    fn test_empty_inputs_are_rejected() {
        let config = two_key_config();
        let err = generate(&config, &PinList::new(Vec::<String>::new()), &KeyNameTable::circuitpython())
            .unwrap_err();
        assert!(matches!(err, SkyboardError::EmptyPinList));

        let err = generate(&config, &PinList::hackpad(), &KeyNameTable::new()).unwrap_err();
        assert!(matches!(err, SkyboardError::EmptyKeyNameTable));
    }

    fn configuration() -> impl Strategy<Value = Configuration> {
        (1usize..=20, prop::collection::vec("[A-Z]{1,2}(\\+F[1-9])?", 0..20)).prop_map(
            |(n, binds)| {
                let mut config = Configuration::with_num_keys(n);
                for (i, kb) in binds.iter().enumerate() {
                    config.set_keybind(i, Keybind::parse(kb));
                }
                config
            },
        )
    }

    proptest! {
        #[test]
        fn prop_generate_is_deterministic(config in configuration()) {
            let pins = PinList::hackpad();
            let table = KeyNameTable::circuitpython();
            let first = generate(&config, &pins, &table).unwrap();
            let second = generate(&config.clone(), &pins, &table).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_entries_bounded_by_pins(config in configuration(), pin_count in 1usize..12) {
            let pins = PinList::new((0..pin_count).map(|n| format!("board.GP{n}")));
            let fw = generate(&config, &pins, &KeyNameTable::circuitpython()).unwrap();

            prop_assert_eq!(fw.matches("  # Key ").count(), pin_count);
            prop_assert_eq!(keybind_lines(&fw).len(), pin_count);
        }
    }
}
