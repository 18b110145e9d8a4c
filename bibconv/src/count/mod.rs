//! Physical line counting.
//!
//! Lines are newline-separated byte segments; a final segment without a
//! trailing newline still counts. A quoted CSV field spanning two lines
//! counts as two.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::{CsvError, CsvResult};

/// Count the lines readable from `reader`.
pub fn count_lines<R: Read>(reader: R) -> std::io::Result<u64> {
    let mut count = 0;
    for segment in BufReader::new(reader).split(b'\n') {
        segment?;
        count += 1;
    }
    Ok(count)
}

/// Count the lines of the file at `path`.
pub fn count_lines_in_file(path: &Path) -> CsvResult<u64> {
    let io_error = |source: std::io::Error| match source.kind() {
        std::io::ErrorKind::NotFound => CsvError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => CsvError::Io {
            path: path.to_path_buf(),
            source,
        },
    };

    let file = File::open(path).map_err(io_error)?;
    count_lines(file).map_err(io_error)
}
