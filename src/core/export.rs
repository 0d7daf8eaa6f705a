// SkillSleuth - core/export.rs
//
// JSON serialisation of the report.
// Core layer: writes to any Write trait object.

use crate::core::model::Report;
use crate::util::constants;
use crate::util::error::ExportError;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Output layout of the report document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// Single line, no insignificant whitespace.
    #[default]
    Compact,
    /// Two-space indentation.
    Pretty,
}

impl JsonStyle {
    pub fn from_pretty(pretty: bool) -> Self {
        if pretty {
            Self::Pretty
        } else {
            Self::Compact
        }
    }
}

/// Serialise `report` into `writer`.
///
/// `export_path` is used for error context only. Non-ASCII text is written
/// verbatim, not escaped.
pub fn export_json<W: Write>(
    report: &Report,
    mut writer: W,
    style: JsonStyle,
    export_path: &Path,
) -> Result<(), ExportError> {
    let result = match style {
        JsonStyle::Compact => serde_json::to_writer(&mut writer, report),
        JsonStyle::Pretty => {
            let formatter = serde_json::ser::PrettyFormatter::with_indent(constants::PRETTY_INDENT);
            let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
            report.serialize(&mut ser)
        }
    };
    result.map_err(|source| ExportError::Json {
        path: export_path.to_path_buf(),
        source,
    })?;

    writer.flush().map_err(|source| ExportError::Io {
        path: export_path.to_path_buf(),
        source,
    })
}

/// Render `report` as a string.
pub fn to_json_string(report: &Report, style: JsonStyle) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    export_json(report, &mut buf, style, Path::new("<memory>"))?;
    // serde_json only ever emits UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
