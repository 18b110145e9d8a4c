//! # bibconv - bibliographic CSV and Atom feed conversion
//!
//! Turns a spreadsheet export of bibliographic records (a key column and a
//! semicolon-delimited author column) into SQL statements or plain
//! `KEY AUTHOR` lines, counts physical lines, and extracts
//! title/link/author records from Atom feeds.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│    Split    │────▶│ SQL / pairs │
//! │ (auto-enc)  │     │ (key, auth) │     │  ; or "; "  │     │  (stdout)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Atom Feed  │────▶│    Feed     │────▶│ summary /   │
//! │   (XML)     │     │  (entries)  │     │ json / csv  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bibconv::{convert_file, CsvLayout, SqlOptions};
//!
//! let mut out = std::io::stdout().lock();
//! convert_file("biblio.csv".as_ref(), &CsvLayout::default(), &SqlOptions::default(), &mut out)?;
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`logs`] - Progress logging on stderr
//! - [`config`] - Environment configuration
//! - [`models`] - Records and feed entries
//! - [`parser`] - CSV reading with encoding detection
//! - [`transform`] - Author splitting, SQL and pair output
//! - [`count`] - Physical line counting
//! - [`feed`] - Atom feed extraction
//! - [`output`] - Output destinations

// Core modules
pub mod error;
pub mod logs;
pub mod config;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Other operations
pub mod count;
pub mod feed;

// Output
pub mod output;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{BibError, BibResult, ConfigError, CsvError, FeedError};

// =============================================================================
// Re-exports - Configuration & Models
// =============================================================================

pub use config::Config;
pub use models::{FeedEntry, FeedRecord, Record};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_content,
    detect_encoding,
    parse_bytes,
    parse_records,
    read_csv_file,
    CsvLayout,
    ParseResult,
};

// =============================================================================
// Re-exports - Transformation
// =============================================================================

pub use transform::{
    convert_file,
    convert_records,
    display_file,
    display_records,
    load_csv,
    split_authors,
    write_author_pairs,
    write_sql,
    AuthorDelimiter,
    ConvertStats,
    QuoteStyle,
    SqlOptions,
    SqlStyle,
};

// =============================================================================
// Re-exports - Line Counting & Feeds
// =============================================================================

pub use count::{count_lines, count_lines_in_file};
pub use feed::{parse_feed, parse_feed_file, summarize, write_entries, FeedFormat, FeedSummary};
pub use output::{ensure_not_input, open_output};
