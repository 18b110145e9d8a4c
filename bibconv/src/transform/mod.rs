//! Transformation module.
//!
//! - Split: author field splitting
//! - SQL: `insert` / `create table` rendering
//! - Display: `KEY AUTHOR` lines
//! - Pipeline: file-level conversion

pub mod display;
pub mod pipeline;
pub mod split;
pub mod sql;

pub use display::{author_line, write_author_pairs};
pub use pipeline::{
    convert_file, convert_records, display_file, display_records, load_csv, ConvertStats,
};
pub use split::{split_authors, AuthorDelimiter};
pub use sql::{
    create_table_statement, insert_statement, write_sql, QuoteStyle, SqlOptions, SqlStyle,
    DEFAULT_TABLE,
};
