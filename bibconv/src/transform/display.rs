//! Plain `KEY AUTHOR` listing.

use std::io::Write;

use super::split::AuthorDelimiter;
use crate::models::Record;

/// Format one (key, author) pair.
pub fn author_line(key: &str, author: &str) -> String {
    format!("{} {}", key, author)
}

/// Write one line per author occurrence, returning the number of lines.
pub fn write_author_pairs<W: Write>(
    records: &[Record],
    delimiter: AuthorDelimiter,
    out: &mut W,
) -> std::io::Result<usize> {
    let mut lines = 0;
    for record in records {
        for author in record.author_list(delimiter) {
            writeln!(out, "{}", author_line(&record.key, author))?;
            lines += 1;
        }
    }
    Ok(lines)
}
