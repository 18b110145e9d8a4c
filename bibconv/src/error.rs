//! Error types for bibconv.
//!
//! - [`CsvError`] - reading the bibliographic CSV export
//! - [`FeedError`] - reading an Atom feed
//! - [`ConfigError`] - invalid environment configuration
//! - [`BibError`] - top-level errors returned to the CLI
//!
//! Lower-level errors convert into [`BibError`] through `From`, so `?`
//! works across module boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// CSV Errors
// =============================================================================

/// Errors while reading CSV rows.
#[derive(Debug, Error)]
pub enum CsvError {
    /// The input file does not exist.
    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// Any other I/O failure on the input file.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the content.
    #[error("Invalid CSV at line {line}: {message}")]
    Parse { line: u64, message: String },

    /// A row does not have enough columns to hold the key and author list.
    #[error("Malformed row at line {line}: found {found} column(s), need at least {required}")]
    MalformedRow {
        line: u64,
        found: usize,
        required: usize,
    },
}

// =============================================================================
// Feed Errors
// =============================================================================

/// Errors while reading an Atom feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The feed file does not exist.
    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// Any other I/O failure on the feed file.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed XML.
    #[error("Invalid XML at byte {position}: {message}")]
    Xml { position: u64, message: String },
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {var}: expected {expected}")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

// =============================================================================
// Top-level Errors
// =============================================================================

/// Errors surfaced by the command-line operations.
#[derive(Debug, Error)]
pub enum BibError {
    /// A required positional argument was not given.
    #[error("Missing required argument: <{0}>")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Csv(#[from] CsvError),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// `--output` names the file being read.
    #[error("Refusing to overwrite input file {}", .path.display())]
    OutputIsInput { path: PathBuf },

    /// Writing the output failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write CSV output: {0}")]
    CsvWrite(#[from] csv::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for feed operations.
pub type FeedResult<T> = Result<T, FeedError>;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for top-level operations.
pub type BibResult<T> = Result<T, BibError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let csv_err = CsvError::MalformedRow {
            line: 7,
            found: 2,
            required: 4,
        };
        let err: BibError = csv_err.into();
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("found 2"));
        assert!(msg.contains("at least 4"));

        let feed_err = FeedError::FileNotFound {
            path: PathBuf::from("share.xml"),
        };
        let err: BibError = feed_err.into();
        assert!(err.to_string().contains("share.xml"));
    }

    #[test]
    fn test_missing_argument_names_input() {
        let err = BibError::MissingArgument("input");
        assert_eq!(err.to_string(), "Missing required argument: <input>");
    }

    #[test]
    fn test_output_is_input_names_path() {
        let err = BibError::OutputIsInput { path: PathBuf::from("biblio.csv") };
        assert_eq!(err.to_string(), "Refusing to overwrite input file biblio.csv");
    }

    #[test]
    fn test_config_error_format() {
        let err = ConfigError::InvalidValue {
            var: "BIBCONV_KEY_COLUMN",
            value: "abc".into(),
            expected: "a column index",
        };
        let msg = err.to_string();
        assert!(msg.contains("BIBCONV_KEY_COLUMN"));
        assert!(msg.contains("abc"));
    }
}
