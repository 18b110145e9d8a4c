//! CSV reading for bibliographic exports.
//!
//! Raw bytes are decoded first (encoding auto-detected), then rows are read
//! with the `csv` crate so quoted fields such as `"Smith, J.; Doe, A."`
//! survive intact. Only the key and author columns of each row are kept.

use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::models::Record;

/// Column holding the record key.
pub const DEFAULT_KEY_COLUMN: usize = 0;

/// Column holding the semicolon-delimited author list.
pub const DEFAULT_AUTHORS_COLUMN: usize = 3;

/// Which columns to read and whether the first row is a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvLayout {
    pub key_column: usize,
    pub authors_column: usize,
    /// Skip the first row instead of treating it as data
    pub has_headers: bool,
}

impl Default for CsvLayout {
    fn default() -> Self {
        Self {
            key_column: DEFAULT_KEY_COLUMN,
            authors_column: DEFAULT_AUTHORS_COLUMN,
            has_headers: false,
        }
    }
}

impl CsvLayout {
    /// Minimum number of columns a row needs.
    pub fn required_columns(&self) -> usize {
        self.key_column.max(self.authors_column) + 1
    }
}

/// Rows read from a CSV input, with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub records: Vec<Record>,
    /// Detected encoding
    pub encoding: String,
}

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 is always reported as `utf-8`; chardet only guesses for
/// anything else.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string using the specified encoding.
///
/// Unknown encodings and invalid sequences fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).into_owned(),
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        label => match encoding_rs::Encoding::for_label(label.as_bytes()) {
            Some(enc) => enc.decode(bytes).0.into_owned(),
            None => String::from_utf8_lossy(bytes).into_owned(),
        },
    }
}

/// Read records from decoded CSV content.
///
/// Rows shorter than [`CsvLayout::required_columns`] fail with
/// [`CsvError::MalformedRow`]. Blank lines are skipped rather than
/// treated as short rows.
pub fn parse_records(content: &str, layout: &CsvLayout) -> CsvResult<Vec<Record>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let required = layout.required_columns();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(layout.has_headers)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| CsvError::Parse {
            line: e.position().map(|p| p.line()).unwrap_or(0),
            message: e.to_string(),
        })?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        match (row.get(layout.key_column), row.get(layout.authors_column)) {
            (Some(key), Some(authors)) if row.len() >= required => {
                records.push(Record::new(key, authors, line));
            }
            _ => {
                return Err(CsvError::MalformedRow {
                    line,
                    found: row.len(),
                    required,
                });
            }
        }
    }

    Ok(records)
}

/// Decode raw bytes with auto-detected encoding and read records.
pub fn parse_bytes(bytes: &[u8], layout: &CsvLayout) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let records = parse_records(&content, layout)?;

    Ok(ParseResult { records, encoding })
}

/// Read a CSV file with auto-detected encoding.
///
/// The file is read in one go and closed before any row is processed.
pub fn read_csv_file(path: &Path, layout: &CsvLayout) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => CsvError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => CsvError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    parse_bytes(&bytes, layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_reads_key_and_author_columns() {
        let csv = "B001,Title,2020,\"Smith, J.; Doe, A.\"\nB002,Other,2021,Roe, R.\n";
        let records = parse_records(csv, &CsvLayout::default()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key, "B001");
        assert_eq!(records[0].authors, "Smith, J.; Doe, A.");
        assert_eq!(records[0].line, 1);
        assert_eq!(records[1].authors, "Roe");
        assert_eq!(records[1].line, 2);
    }

    #[test]
    fn test_header_row_is_data_by_default() {
        let csv = "key,title,year,authors\nB001,T,2020,Ada\n";

        let records = parse_records(csv, &CsvLayout::default()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key, "key");

        let layout = CsvLayout { has_headers: true, ..CsvLayout::default() };
        let records = parse_records(csv, &layout).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, "B001");
    }

    #[test]
    fn test_short_row_is_malformed() {
        let csv = "B001,T,2020,Ada\nB002,T\n";
        let err = parse_records(csv, &CsvLayout::default()).unwrap_err();

        match err {
            CsvError::MalformedRow { line, found, required } => {
                assert_eq!(line, 2);
                assert_eq!(found, 2);
                assert_eq!(required, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_custom_columns() {
        let layout = CsvLayout { key_column: 1, authors_column: 0, has_headers: false };
        assert_eq!(layout.required_columns(), 2);

        let records = parse_records("Ada; Grace,K9\n", &layout).unwrap();
        assert_eq!(records[0].key, "K9");
        assert_eq!(records[0].authors, "Ada; Grace");
    }

    #[test]
    fn test_empty_author_field_is_kept() {
        let records = parse_records("B003,T,2020,\n", &CsvLayout::default()).unwrap();
        assert_eq!(records[0].authors, "");
    }

    #[test]
    fn test_bom_is_stripped() {
        let records = parse_records("\u{feff}B001,T,2020,Ada\n", &CsvLayout::default()).unwrap();
        assert_eq!(records[0].key, "B001");
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1");
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_utf8_authors_pass_through() {
        let result = parse_bytes(
            "B001,T,2020,\"Müller, K.; Doe, A.\"\nB004,T,2020,Émile Zola\n".as_bytes(),
            &CsvLayout::default(),
        )
        .unwrap();

        assert_eq!(result.encoding, "utf-8");
        assert_eq!(result.records[0].authors, "Müller, K.; Doe, A.");
        assert_eq!(result.records[1].authors, "Émile Zola");
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let csv = "B001,T,2020,Ada\n\n\nB002,T,2020,Grace\n";
        let records = parse_records(csv, &CsvLayout::default()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].key, "B002");
    }

    #[test]
    fn test_ascii_detected_as_utf8() {
        assert_eq!(detect_encoding(b"B001,T,2020,Ada\n"), "utf-8");
    }

    #[test]
    fn test_read_csv_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "B001,Title,2020,\"Smith, J.; Doe, A.\"").unwrap();

        let result = read_csv_file(file.path(), &CsvLayout::default()).unwrap();
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.encoding, "utf-8");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");

        let err = read_csv_file(&path, &CsvLayout::default()).unwrap_err();
        assert!(matches!(err, CsvError::FileNotFound { .. }));
    }
}
