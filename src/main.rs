// SkillSleuth - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading (platform config dir or --config)
// 3. Logging initialisation (debug mode support)
// 4. Running the analysis and reporting fatal errors

use skillsleuth::app::analyze::{self, OutputTarget, RunOptions};
use skillsleuth::platform;
use skillsleuth::util;

use clap::Parser;
use std::path::PathBuf;

/// SkillSleuth - skill-focused analysis of API proxy request logs.
///
/// Reads a line-delimited JSON log, keeps the "request body" entries, and
/// emits a JSON report of their system prompts, messages, and Skill tool
/// definition with skill-related content flagged.
#[derive(Parser, Debug)]
#[command(name = "skillsleuth", version, about)]
struct Cli {
    /// Path to the log file.
    log_file: String,

    /// Output JSON file path (stdout if omitted).
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Pretty print JSON.
    #[arg(short = 'p', long = "pretty")]
    pretty: bool,

    /// Compact JSON even when config.toml sets `[output] pretty = true`.
    #[arg(long = "compact", conflicts_with = "pretty")]
    compact: bool,

    /// Enable debug logging on stderr (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Config file to use instead of the platform default.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    // Config is read before logging exists; its problems are logged below.
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| platform::config::PlatformPaths::resolve().config_file());
    let explicit_missing = cli.config.is_some() && !config_path.exists();
    let (config, config_problems) = platform::config::load_config(&config_path);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config = %config_path.display(),
        "SkillSleuth starting"
    );

    if explicit_missing {
        tracing::warn!(path = %config_path.display(), "Config file not found; using defaults");
    }
    for problem in &config_problems {
        tracing::warn!(error = %problem, "Config problem; using defaults for affected values");
    }

    let options = RunOptions {
        log_file: cli.log_file,
        output: match cli.output {
            Some(ref path) => OutputTarget::File(path.clone()),
            None => OutputTarget::Stdout,
        },
        style: analyze::resolve_style(cli.pretty, cli.compact, config.pretty),
    };

    match analyze::run(&options) {
        Ok(outcome) => {
            tracing::info!(
                requests = outcome.summary.requests,
                elapsed_ms = outcome.duration.as_millis() as u64,
                "Done"
            );
            if let OutputTarget::File(path) = &options.output {
                println!("Output written to {}", path.display());
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Analysis failed");
            eprintln!("Error: {}", util::error::format_chain(&e));
            std::process::exit(1);
        }
    }
}
