//! Output destinations: stdout or a file given with `--output`.
//!
//! Inputs are always read completely before the output is opened, and an
//! output path resolving to the input is rejected, so a failed or
//! self-referencing run never truncates the source.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{BibError, BibResult};

/// Fail if `output` refers to the same file as `input`.
///
/// An output that does not exist yet cannot be the input.
pub fn ensure_not_input(input: &Path, output: Option<&Path>) -> BibResult<()> {
    let Some(output) = output else {
        return Ok(());
    };

    match (input.canonicalize(), output.canonicalize()) {
        (Ok(a), Ok(b)) if a == b => Err(BibError::OutputIsInput {
            path: output.to_path_buf(),
        }),
        _ => Ok(()),
    }
}

/// Buffered writer on the output file, or stdout.
pub fn open_output(path: Option<&Path>) -> BibResult<Box<dyn Write>> {
    Ok(match path {
        Some(p) => Box::new(BufWriter::new(File::create(p)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}
