//! Line-oriented UTF-8 writer
//!
//! Truncates or creates the target, one line per entry, `\n` terminated.
//! Parent directories are never created.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use wnl_core::{Result, WnlError};

/// Write `lines` to `path`, overwriting any existing file
pub fn write_lines<I, S>(lines: I, path: impl AsRef<Path>) -> Result<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| WnlError::file_access(path, e))?;
    let mut out = BufWriter::new(file);

    let mut written = 0;
    for line in lines {
        writeln!(out, "{}", line.as_ref()).map_err(|e| WnlError::file_access(path, e))?;
        written += 1;
    }
    out.flush().map_err(|e| WnlError::file_access(path, e))?;

    tracing::info!(path = %path.display(), lines = written, "Wrote list");
    Ok(written)
}
