//! Reading and writing configuration and firmware files.

use crate::config::Configuration;
use crate::error::{SkyboardError, SkyboardResult};
use crate::firmware::{generate, PinList};
use crate::keycode::KeyNameTable;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Load a configuration document.
pub fn load_config(path: &Path) -> SkyboardResult<Configuration> {
    let content =
        std::fs::read_to_string(path).map_err(|e| SkyboardError::file_io(path, e))?;
    let config = Configuration::from_json(&content)?;
    tracing::info!(
        path = %path.display(),
        num_keys = config.num_keys(),
        configured = config.configured_count(),
        "Loaded configuration"
    );
    Ok(config)
}

/// Load a configuration document if the file exists.
pub fn load_config_if_exists(path: &Path) -> SkyboardResult<Option<Configuration>> {
    if !path.exists() {
        return Ok(None);
    }
    load_config(path).map(Some)
}

/// Save a configuration document, replacing any existing file.
pub fn save_config(config: &Configuration, path: &Path) -> SkyboardResult<()> {
    let content = config.to_json_string()?;
    write_atomic(path, content.as_bytes())?;
    tracing::info!(
        path = %path.display(),
        configured = config.configured_count(),
        "Saved configuration"
    );
    Ok(())
}

/// Generate firmware and write it to `path`. Returns the generated text.
///
/// Nothing is written when generation fails.
pub fn export_firmware(
    config: &Configuration,
    pins: &PinList,
    table: &KeyNameTable,
    path: &Path,
) -> SkyboardResult<String> {
    let firmware = generate(config, pins, table)?;
    write_atomic(path, firmware.as_bytes())?;
    tracing::info!(path = %path.display(), pins = pins.len(), "Exported firmware");
    Ok(firmware)
}

/// Write `content` to a temporary file next to `path`, then move it into place.
pub(crate) fn write_atomic(path: &Path, content: &[u8]) -> SkyboardResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(|e| SkyboardError::file_io(path, e))?;
    file.write_all(content)
        .and_then(|()| file.flush())
        .map_err(|e| SkyboardError::file_io(path, e))?;
    file.persist(path)
        .map_err(|e| SkyboardError::file_io(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybind::Keybind;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hackpad_config.json");

        let mut config = Configuration::with_num_keys(4);
        config.set_keybind(3, Keybind::parse("shift+f3+f"));
        save_config(&config, &path).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "stale content that is longer than the new one").unwrap();

        save_config(&Configuration::with_num_keys(1), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\n  \"num_keys\": 1,\n  \"keys\": []\n}");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");

        assert!(load_config_if_exists(&path).unwrap().is_none());
        let err = load_config(&path).unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"num_keys\": 3, \"keys\": [").unwrap();

        let err = load_config_if_exists(&path).unwrap_err();
        assert!(matches!(err, SkyboardError::Deserialization(_)));
    }

    #[test]
    fn test_export_firmware() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("code.py");
        let mut config = Configuration::default();
        config.apply_preset(0, "F3+C - Copy Coordinates");

        let text = export_firmware(
            &config,
            &PinList::hackpad(),
            &KeyNameTable::circuitpython(),
            &path,
        )
        .unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
        assert!(text.contains("    [Keycode.F3, Keycode.C],\n"));
    }

    #[test]
    fn test_failed_export_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("code.py");

        let result = export_firmware(
            &Configuration::default(),
            &PinList::new(Vec::<String>::new()),
            &KeyNameTable::circuitpython(),
            &path,
        );
        assert!(matches!(result, Err(SkyboardError::EmptyPinList)));
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_write_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("code.py");

        let err = write_atomic(&path, b"print()").unwrap_err();
        assert!(err.is_io());
        assert!(err.to_string().contains("code.py"));
    }
}
