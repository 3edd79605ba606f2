//! Skyboard error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, saving or exporting.
#[derive(Debug, Error)]
pub enum SkyboardError {
    /// File could not be read or written.
    #[error("Failed to access {}: {source}", .path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration document is not valid JSON or has the wrong shape.
    #[error("Invalid configuration document: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// Configuration could not be rendered as JSON.
    #[error("Failed to serialize configuration: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Firmware target declares no input pins.
    #[error("Firmware target has no input pins")]
    EmptyPinList,

    /// Key name table has no entries.
    #[error("Key name table is empty")]
    EmptyKeyNameTable,
}

impl SkyboardError {
    pub(crate) fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileIo {
            path: path.into(),
            source,
        }
    }

    /// Whether this error came from the filesystem rather than the content.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::FileIo { .. })
    }
}

/// Result type for Skyboard operations.
pub type SkyboardResult<T> = Result<T, SkyboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_io_message_names_path() {
        let err = SkyboardError::file_io(
            "missing.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.is_io());
        assert_eq!(err.to_string(), "Failed to access missing.json: not found");
    }

    #[test]
    fn test_deserialization_is_not_io() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SkyboardError::Deserialization(source);
        assert!(!err.is_io());
        assert!(err.to_string().starts_with("Invalid configuration document"));
    }
}
