//! SQL statement rendering.
//!
//! One `insert` statement is produced per (key, author) pair:
//!
//! ```text
//! insert into data values('B001', 'Smith, J.');
//! ```
//!
//! The `schema` style quotes with `"` and starts with a `create table`.

use std::io::Write;

use super::split::AuthorDelimiter;
use crate::models::Record;

/// Default table receiving the (key, author) pairs.
pub const DEFAULT_TABLE: &str = "data";

/// Quote character around SQL values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum QuoteStyle {
    #[default]
    Single,
    Double,
}

impl QuoteStyle {
    pub fn as_char(self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        }
    }
}

/// Named output variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SqlStyle {
    /// Single-quoted inserts only
    #[default]
    Plain,
    /// `create table` preamble followed by double-quoted inserts
    Schema,
}

/// Options for SQL output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlOptions {
    pub table: String,
    pub quote: QuoteStyle,
    /// Emit `create table` before the inserts
    pub create_table: bool,
    pub delimiter: AuthorDelimiter,
}

impl Default for SqlOptions {
    fn default() -> Self {
        Self::for_style(SqlStyle::Plain)
    }
}

impl SqlOptions {
    pub fn for_style(style: SqlStyle) -> Self {
        let (quote, create_table) = match style {
            SqlStyle::Plain => (QuoteStyle::Single, false),
            SqlStyle::Schema => (QuoteStyle::Double, true),
        };
        Self {
            table: DEFAULT_TABLE.to_string(),
            quote,
            create_table,
            delimiter: AuthorDelimiter::default(),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn with_quote(mut self, quote: QuoteStyle) -> Self {
        self.quote = quote;
        self
    }

    pub fn with_delimiter(mut self, delimiter: AuthorDelimiter) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// `create table` statement for the pair table.
pub fn create_table_statement(table: &str) -> String {
    format!("create table {}(key text not null, author text not null);", table)
}

/// `insert` statement for one (key, author) pair.
pub fn insert_statement(table: &str, key: &str, author: &str, quote: QuoteStyle) -> String {
    format!(
        "insert into {} values({}, {});",
        table,
        quote_value(key, quote),
        quote_value(author, quote)
    )
}

/// Wrap `value` in quotes, doubling any embedded quote of the same kind.
fn quote_value(value: &str, quote: QuoteStyle) -> String {
    let q = quote.as_char();
    let mut out = String::with_capacity(value.len() + 2);
    out.push(q);
    for c in value.chars() {
        if c == q {
            out.push(q);
        }
        out.push(c);
    }
    out.push(q);
    out
}

/// Write the statements for `records`, returning the number of inserts.
pub fn write_sql<W: Write>(
    records: &[Record],
    options: &SqlOptions,
    out: &mut W,
) -> std::io::Result<usize> {
    if options.create_table {
        writeln!(out, "{}", create_table_statement(&options.table))?;
    }

    let mut inserts = 0;
    for record in records {
        for author in record.author_list(options.delimiter) {
            writeln!(
                out,
                "{}",
                insert_statement(&options.table, &record.key, author, options.quote)
            )?;
            inserts += 1;
        }
    }

    Ok(inserts)
}
