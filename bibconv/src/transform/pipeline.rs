//! File-level entry points: read a CSV export, write SQL or author lines.
//!
//! # Example
//!
//! ```rust,ignore
//! use bibconv::{convert_file, CsvLayout, SqlOptions};
//! use std::path::Path;
//!
//! let mut out = std::io::stdout().lock();
//! let stats = convert_file(Path::new("biblio.csv"), &CsvLayout::default(), &SqlOptions::default(), &mut out)?;
//! eprintln!("{} statements", stats.lines);
//! ```

use std::io::Write;
use std::path::Path;

use super::display::write_author_pairs;
use super::split::AuthorDelimiter;
use super::sql::{write_sql, SqlOptions};
use crate::error::BibResult;
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::Record;
use crate::parser::{read_csv_file, CsvLayout, ParseResult};

/// Counts reported after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertStats {
    /// CSV rows read
    pub rows: usize,
    /// Author lines written (inserts or `KEY AUTHOR` pairs)
    pub lines: usize,
}

/// Rows without any author listed individually before summarizing.
const MAX_REPORTED_EMPTY: usize = 5;

/// Read and parse the CSV input.
///
/// Callers writing to a file should call this before opening the output,
/// so a missing or malformed input leaves an existing output untouched.
pub fn load_csv(path: &Path, layout: &CsvLayout) -> BibResult<ParseResult> {
    log_info(format!("📄 Reading {}", path.display()));
    let parsed = read_csv_file(path, layout)?;
    log_success(format!("Detected encoding: {}", parsed.encoding));
    log_success(format!("Read {} rows", parsed.records.len()));
    Ok(parsed)
}

fn report(records: &[Record], stats: &ConvertStats, what: &str) {
    if stats.rows > 0 && stats.lines == 0 {
        log_warning(format!("No authors found in {} rows", stats.rows));
        return;
    }
    log_success(format!("Wrote {} {} for {} rows", stats.lines, what, stats.rows));

    let empty: Vec<&Record> = records.iter().filter(|r| r.authors.is_empty()).collect();
    if !empty.is_empty() {
        log_warning(format!("{} rows have an empty author field", empty.len()));
        for record in empty.iter().take(MAX_REPORTED_EMPTY) {
            log_info_indent(format!("line {}: {}", record.line, record.key), 1);
        }
    }
}

/// Write SQL statements for already parsed rows.
pub fn convert_records<W: Write>(
    parsed: &ParseResult,
    options: &SqlOptions,
    out: &mut W,
) -> BibResult<ConvertStats> {
    log_info(format!(
        "Splitting authors on {} into table '{}'",
        options.delimiter, options.table
    ));

    let lines = write_sql(&parsed.records, options, out)?;
    out.flush()?;

    let stats = ConvertStats { rows: parsed.records.len(), lines };
    report(&parsed.records, &stats, "insert statements");
    Ok(stats)
}

/// Write `KEY AUTHOR` lines for already parsed rows.
pub fn display_records<W: Write>(
    parsed: &ParseResult,
    delimiter: AuthorDelimiter,
    out: &mut W,
) -> BibResult<ConvertStats> {
    log_info(format!("Splitting authors on {}", delimiter));

    let lines = write_author_pairs(&parsed.records, delimiter, out)?;
    out.flush()?;

    let stats = ConvertStats { rows: parsed.records.len(), lines };
    report(&parsed.records, &stats, "author lines");
    Ok(stats)
}

/// Convert a CSV export into SQL statements.
pub fn convert_file<W: Write>(
    path: &Path,
    layout: &CsvLayout,
    options: &SqlOptions,
    out: &mut W,
) -> BibResult<ConvertStats> {
    let parsed = load_csv(path, layout)?;
    convert_records(&parsed, options, out)
}

/// Print one `KEY AUTHOR` line per author of a CSV export.
pub fn display_file<W: Write>(
    path: &Path,
    layout: &CsvLayout,
    delimiter: AuthorDelimiter,
    out: &mut W,
) -> BibResult<ConvertStats> {
    let parsed = load_csv(path, layout)?;
    display_records(&parsed, delimiter, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BibError, CsvError};
    use crate::transform::sql::SqlStyle;
    use tempfile::NamedTempFile;

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const SAMPLE: &str = "B001,Title,2020,\"Smith, J.; Doe, A.\"\n\
                          B002,Other,2019,Roe\n\
                          B003,Orphan,2018,\n";

    #[test]
    fn test_convert_file() {
        let file = csv_file(SAMPLE);
        let mut out = Vec::new();
        let stats = convert_file(file.path(), &CsvLayout::default(), &SqlOptions::default(), &mut out).unwrap();

        assert_eq!(stats, ConvertStats { rows: 3, lines: 3 });
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "insert into data values('B001', 'Smith, J.');\n\
             insert into data values('B001', 'Doe, A.');\n\
             insert into data values('B002', 'Roe');\n"
        );
    }

    #[test]
    fn test_convert_schema_style() {
        let file = csv_file(SAMPLE);
        let mut out = Vec::new();
        let options = SqlOptions::for_style(SqlStyle::Schema);
        let stats = convert_file(file.path(), &CsvLayout::default(), &options, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(stats.lines, 3);
        assert_eq!(text.lines().count(), 4);
        assert!(text.starts_with("create table data("));
        assert!(text.contains("insert into data values(\"B002\", \"Roe\");"));
    }

    #[test]
    fn test_conversion_is_repeatable() {
        let file = csv_file(SAMPLE);
        let mut first = Vec::new();
        let mut second = Vec::new();
        convert_file(file.path(), &CsvLayout::default(), &SqlOptions::default(), &mut first).unwrap();
        convert_file(file.path(), &CsvLayout::default(), &SqlOptions::default(), &mut second).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_display_file() {
        let file = csv_file(SAMPLE);
        let mut out = Vec::new();
        let stats = display_file(
            file.path(),
            &CsvLayout::default(),
            AuthorDelimiter::SemicolonSpace,
            &mut out,
        )
        .unwrap();

        assert_eq!(stats.lines, 3);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "B001 Smith, J.\nB001 Doe, A.\nB002 Roe\n"
        );
    }

    #[test]
    fn test_malformed_row_stops_conversion() {
        let file = csv_file("B001,T,2020,Ada\nB002,T,2020\n");
        let mut out = Vec::new();
        let err = convert_file(file.path(), &CsvLayout::default(), &SqlOptions::default(), &mut out)
            .unwrap_err();

        assert!(matches!(
            err,
            BibError::Csv(CsvError::MalformedRow { line: 2, found: 3, required: 4 })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_records_parsed_before_output() {
        let file = csv_file(SAMPLE);
        let parsed = load_csv(file.path(), &CsvLayout::default()).unwrap();
        assert_eq!(parsed.records[2].line, 3);

        let mut out = Vec::new();
        let stats = display_records(&parsed, AuthorDelimiter::SemicolonSpace, &mut out).unwrap();
        assert_eq!(stats, ConvertStats { rows: 3, lines: 3 });
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let err = display_file(
            &dir.path().join("absent.csv"),
            &CsvLayout::default(),
            AuthorDelimiter::Semicolon,
            &mut out,
        )
        .unwrap_err();

        assert!(matches!(err, BibError::Csv(CsvError::FileNotFound { .. })));
    }
}
