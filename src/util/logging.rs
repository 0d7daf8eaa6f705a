// SkillSleuth - util/logging.rs
//
// Structured logging with runtime-selectable debug mode.
//
// Activation:
//   - Environment variable: RUST_LOG=debug (or trace)
//   - CLI flag: --debug (sets level to debug)
//   - Config file: [logging] level = "debug"
//
// Output: always stderr. stdout is reserved for the report.

use tracing_subscriber::EnvFilter;

/// Initialise the logging subsystem.
///
/// `debug_flag` is true when the user passed --debug on the CLI.
/// `config_level` is the level from config.toml (if present).
///
/// Priority: RUST_LOG env var > CLI --debug flag > config level > default.
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    let filter = select_filter(std::env::var("RUST_LOG").is_ok(), debug_flag, config_level);

    // try_init so repeated initialisation (e.g. from tests) is a no-op.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .try_init();

    tracing::debug!(
        app = super::constants::APP_NAME,
        version = super::constants::APP_VERSION,
        "Logging initialised"
    );
}

fn select_filter(env_set: bool, debug_flag: bool, config_level: Option<&str>) -> EnvFilter {
    if env_set {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(effective_level(debug_flag, config_level))
    }
}

/// Level string used when RUST_LOG is not set.
pub fn effective_level(debug_flag: bool, config_level: Option<&str>) -> &str {
    if debug_flag {
        "debug"
    } else if let Some(level) = config_level {
        level
    } else {
        super::constants::DEFAULT_LOG_LEVEL
    }
}
