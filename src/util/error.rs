// SkillSleuth - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all SkillSleuth operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum SkillSleuthError {
    /// Reading the input log failed.
    Read(ReadError),

    /// Writing the report failed.
    Export(ExportError),
}

impl fmt::Display for SkillSleuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(e) => write!(f, "Read error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
        }
    }
}

impl std::error::Error for SkillSleuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read(e) => Some(e),
            Self::Export(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Read errors
// ---------------------------------------------------------------------------

/// Errors raised while opening or reading the input log.
///
/// Malformed lines are never errors; they are skipped by the decoder.
#[derive(Debug)]
pub enum ReadError {
    /// The log file could not be opened (missing, permissions, ...).
    Open { path: PathBuf, source: io::Error },

    /// An I/O error occurred part-way through the file.
    Io {
        path: PathBuf,
        line_number: u64,
        source: io::Error,
    },
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "Cannot open log file '{}': {source}", path.display())
            }
            Self::Io {
                path,
                line_number,
                source,
            } => write!(
                f,
                "'{}': I/O error after line {line_number}: {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ReadError> for SkillSleuthError {
    fn from(e: ReadError) -> Self {
        Self::Read(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to writing the report.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error creating or writing the output.
    Io { path: PathBuf, source: io::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for SkillSleuthError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
///
/// Config problems never abort a run, so these never become a
/// `SkillSleuthError`; they are logged as warnings and the affected values
/// fall back to defaults.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Config file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Config '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for SkillSleuth results.
pub type Result<T> = std::result::Result<T, SkillSleuthError>;

/// Render an error and its full source chain on one line per cause.
///
/// Used by `main` for the fatal diagnostic printed before exiting.
pub fn format_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str("\n  caused by: ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_error_display_includes_path() {
        let err = ReadError::Open {
            path: PathBuf::from("missing.log"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("missing.log"));
    }

    #[test]
    fn test_format_chain_walks_sources() {
        let err: SkillSleuthError = ReadError::Open {
            path: PathBuf::from("missing.log"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        }
        .into();
        let rendered = format_chain(&err);
        assert!(rendered.starts_with("Read error: Cannot open log file"));
        assert!(rendered.contains("caused by: Cannot open log file 'missing.log'"));
        assert!(rendered.ends_with("caused by: no such file"));
    }

    #[test]
    fn test_export_error_wraps_into_top_level() {
        use std::error::Error;
        let err: SkillSleuthError = ExportError::Io {
            path: PathBuf::from("out.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();
        assert!(matches!(err, SkillSleuthError::Export(ExportError::Io { .. })));
        assert!(err.to_string().starts_with("Export error: Export I/O error 'out.json'"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_config_out_of_range_has_no_source() {
        use std::error::Error;
        let err = ConfigError::ValueOutOfRange {
            field: "logging.level".to_string(),
            value: "loud".to_string(),
            expected: "error, warn, info, debug, trace".to_string(),
        };
        assert!(err.source().is_none());
        assert!(err.to_string().contains("logging.level"));
    }
}
