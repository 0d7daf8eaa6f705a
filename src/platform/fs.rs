// SkillSleuth - platform/fs.rs
//
// Filesystem access for the input log and the report file.
// The core layer only sees BufRead / Write objects produced here.

use crate::util::error::{ExportError, ReadError};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Open the log file for buffered line reading.
///
/// The handle is closed when the returned reader is dropped.
pub fn open_log(path: &Path) -> Result<BufReader<File>, ReadError> {
    let file = File::open(path).map_err(|source| ReadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "Log file opened");
    Ok(BufReader::new(file))
}

/// Create (or truncate) the output file for buffered writing.
pub fn create_output(path: &Path) -> Result<BufWriter<File>, ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}
