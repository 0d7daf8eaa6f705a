// SkillSleuth - app/analyze.rs
//
// One analysis run: open the log, build the report, write it out.
//
// The input file is opened once and released as soon as the report is
// built; the whole report is held in memory before serialisation.

use crate::core::export::{self, JsonStyle};
use crate::core::model::{ExtractSummary, Report};
use crate::core::report;
use crate::platform;
use crate::util::error::{ExportError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Where the serialised report goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    /// Created or overwritten.
    File(PathBuf),
}

/// Inputs for a single run, resolved from CLI flags and config.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Log file path exactly as the user gave it.
    pub log_file: String,
    pub output: OutputTarget,
    pub style: JsonStyle,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Copy)]
pub struct RunOutcome {
    pub summary: ExtractSummary,
    pub duration: std::time::Duration,
}

/// Pick the output layout. CLI flags win over the config default.
pub fn resolve_style(pretty_flag: bool, compact_flag: bool, config_pretty: bool) -> JsonStyle {
    if compact_flag {
        JsonStyle::Compact
    } else {
        JsonStyle::from_pretty(pretty_flag || config_pretty)
    }
}

/// Read and analyse the log file named in `log_file`.
pub fn analyze_log_file(log_file: &str) -> Result<(Report, ExtractSummary)> {
    let reader = platform::fs::open_log(Path::new(log_file))?;
    let analysis = report::analyze_reader(reader, log_file)?;
    Ok(analysis)
}

/// Write the report to the chosen target.
pub fn write_report(report: &Report, target: &OutputTarget, style: JsonStyle) -> Result<()> {
    match target {
        OutputTarget::File(path) => {
            let writer = platform::fs::create_output(path)?;
            export::export_json(report, writer, style, path)?;
        }
        OutputTarget::Stdout => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            let path = Path::new("<stdout>");
            export::export_json(report, &mut lock, style, path)?;
            writeln!(lock).map_err(|source| ExportError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}

/// Full pipeline for one invocation.
pub fn run(options: &RunOptions) -> Result<RunOutcome> {
    let started = Instant::now();

    let (report, summary) = analyze_log_file(&options.log_file)?;
    tracing::info!(
        log_file = %options.log_file,
        lines = summary.lines_read,
        malformed = summary.malformed_lines,
        skipped = summary.skipped_entries,
        requests = summary.requests,
        skill_invocations = summary.skill_invocations,
        "Log analysed"
    );

    write_report(&report, &options.output, options.style)?;

    let duration = started.elapsed();
    tracing::debug!(elapsed_ms = duration.as_millis() as u64, "Report written");
    Ok(RunOutcome { summary, duration })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::error::{ReadError, SkillSleuthError};

    #[test]
    fn test_missing_log_is_read_error() {
        let result = analyze_log_file("/definitely/not/here/proxy.log");
        assert!(matches!(
            result,
            Err(SkillSleuthError::Read(ReadError::Open { .. }))
        ));
    }

    #[test]
    fn test_cli_flags_override_config_style() {
        assert_eq!(resolve_style(false, true, true), JsonStyle::Compact);
        assert_eq!(resolve_style(false, false, true), JsonStyle::Pretty);
        assert_eq!(resolve_style(true, false, false), JsonStyle::Pretty);
        assert_eq!(resolve_style(false, false, false), JsonStyle::Compact);
    }

    #[test]
    fn test_run_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("proxy.log");
        std::fs::write(
            &log,
            "{\"type\":\"request body\",\"reqId\":\"x\",\"data\":{\"model\":\"m\"}}\nbroken\n",
        )
        .unwrap();
        let out = dir.path().join("report.json");

        let options = RunOptions {
            log_file: log.display().to_string(),
            output: OutputTarget::File(out.clone()),
            style: JsonStyle::Pretty,
        };
        let outcome = run(&options).unwrap();
        assert_eq!(outcome.summary.requests, 1);
        assert_eq!(outcome.summary.malformed_lines, 1);

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written["total_requests"], 1);
        assert_eq!(written["requests"][0]["request_id"], "x");
    }
}
