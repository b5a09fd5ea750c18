use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the Space Missions crates.
#[derive(Error, Debug)]
pub enum MissionsError {
    /// The dataset file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the input.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The header or a data row does not have the fixed column layout.
    #[error("Schema mismatch at line {line}: expected {expected} columns, found {found}")]
    SchemaMismatch {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// A launch date matched none of the accepted formats.
    #[error("Invalid launch date at line {line}: {value:?}")]
    DateParse { line: u64, value: String },

    /// A section name is not one of the nine navigation entries.
    #[error("Unknown section: {0}")]
    UnknownSection(String),

    /// A report could not be serialized for export.
    #[error("Failed to serialize JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the missions crates.
pub type Result<T> = std::result::Result<T, MissionsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = MissionsError::FileRead {
            path: PathBuf::from("/data/Space_Corrected.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/data/Space_Corrected.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_schema_mismatch() {
        let err = MissionsError::SchemaMismatch {
            line: 1,
            expected: 9,
            found: 7,
        };
        assert_eq!(
            err.to_string(),
            "Schema mismatch at line 1: expected 9 columns, found 7"
        );
    }

    #[test]
    fn test_error_display_date_parse() {
        let err = MissionsError::DateParse {
            line: 42,
            value: "yesterday".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid launch date at line 42: \"yesterday\"");
    }

    #[test]
    fn test_error_display_unknown_section() {
        let err = MissionsError::UnknownSection("Moon Base".to_string());
        assert_eq!(err.to_string(), "Unknown section: Moon Base");
    }

    #[test]
    fn test_error_display_config() {
        let err = MissionsError::Config("reference year out of range".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: reference year out of range"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: MissionsError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: MissionsError = json_err.into();
        assert!(err.to_string().contains("Failed to serialize JSON"));
    }
}
