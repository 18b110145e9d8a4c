//! Runtime configuration.
//!
//! Defaults can be set through environment variables (or a `.env` file);
//! command-line flags take precedence over them.
//!
//! | Variable                 | Default | Meaning                          |
//! |--------------------------|---------|----------------------------------|
//! | `BIBCONV_TABLE`          | `data`  | Table name in SQL output         |
//! | `BIBCONV_KEY_COLUMN`     | `0`     | Column holding the record key    |
//! | `BIBCONV_AUTHORS_COLUMN` | `3`     | Column holding the author list   |
//! | `BIBCONV_DELIMITER`      | `"; "`  | Author separator (`;` or `"; "`) |
//! | `BIBCONV_HAS_HEADERS`    | `false` | Skip the first CSV row           |
//! | `BIBCONV_QUIET`          | `false` | Only log errors                  |

use std::env;

use crate::error::{ConfigError, ConfigResult};
use crate::parser::{CsvLayout, DEFAULT_AUTHORS_COLUMN, DEFAULT_KEY_COLUMN};
use crate::transform::split::AuthorDelimiter;
use crate::transform::sql::DEFAULT_TABLE;

pub const ENV_TABLE: &str = "BIBCONV_TABLE";
pub const ENV_KEY_COLUMN: &str = "BIBCONV_KEY_COLUMN";
pub const ENV_AUTHORS_COLUMN: &str = "BIBCONV_AUTHORS_COLUMN";
pub const ENV_DELIMITER: &str = "BIBCONV_DELIMITER";
pub const ENV_HAS_HEADERS: &str = "BIBCONV_HAS_HEADERS";
pub const ENV_QUIET: &str = "BIBCONV_QUIET";

/// Settings shared by all subcommands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub table: String,
    pub key_column: usize,
    pub authors_column: usize,
    pub delimiter: AuthorDelimiter,
    pub has_headers: bool,
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
            key_column: DEFAULT_KEY_COLUMN,
            authors_column: DEFAULT_AUTHORS_COLUMN,
            delimiter: AuthorDelimiter::default(),
            has_headers: false,
            quiet: false,
        }
    }
}

impl Config {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(table) = lookup(ENV_TABLE).filter(|t| !t.is_empty()) {
            config.table = table;
        }
        if let Some(value) = lookup(ENV_KEY_COLUMN) {
            config.key_column = parse_column(ENV_KEY_COLUMN, value)?;
        }
        if let Some(value) = lookup(ENV_AUTHORS_COLUMN) {
            config.authors_column = parse_column(ENV_AUTHORS_COLUMN, value)?;
        }
        if let Some(value) = lookup(ENV_DELIMITER) {
            config.delimiter = value.parse().map_err(|_| ConfigError::InvalidValue {
                var: ENV_DELIMITER,
                value,
                expected: "';', '; ', 'semicolon' or 'semicolon-space'",
            })?;
        }
        if let Some(value) = lookup(ENV_HAS_HEADERS) {
            config.has_headers = parse_flag(ENV_HAS_HEADERS, value)?;
        }
        if let Some(value) = lookup(ENV_QUIET) {
            config.quiet = parse_flag(ENV_QUIET, value)?;
        }

        Ok(config)
    }

    pub fn layout(&self) -> CsvLayout {
        CsvLayout {
            key_column: self.key_column,
            authors_column: self.authors_column,
            has_headers: self.has_headers,
        }
    }
}

fn parse_column(var: &'static str, value: String) -> ConfigResult<usize> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var,
        value,
        expected: "a zero-based column index",
    })
}

fn parse_flag(var: &'static str, value: String) -> ConfigResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value,
            expected: "true or false",
        }),
    }
}
