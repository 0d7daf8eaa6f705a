// SkillSleuth - platform/config.rs
//
// Platform-specific config directory resolution and config.toml loading
// with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for SkillSleuth configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/skillsleuth/ or %APPDATA%\SkillSleuth\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            Self { config_dir }
        } else {
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[output]` section.
    pub output: OutputSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[output]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Pretty-print the report when --pretty is not given.
    pub pretty: Option<bool>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Default for pretty output.
    pub pretty: bool,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

/// Load and validate the config file at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal
/// problems. A missing file yields defaults with no problems. Anything
/// unreadable, unparseable, or out of range falls back to defaults for the
/// affected values and is reported. Runs before logging is initialised, so
/// the caller is responsible for logging the returned problems.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<ConfigError>) {
    let mut problems = Vec::new();

    let metadata = match std::fs::metadata(config_path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return (AppConfig::default(), problems);
        }
        Err(source) => {
            problems.push(ConfigError::Io {
                path: config_path.to_path_buf(),
                source,
            });
            return (AppConfig::default(), problems);
        }
    };

    if metadata.len() > constants::MAX_CONFIG_FILE_SIZE {
        problems.push(ConfigError::FileTooLarge {
            path: config_path.to_path_buf(),
            size: metadata.len(),
            max_size: constants::MAX_CONFIG_FILE_SIZE,
        });
        return (AppConfig::default(), problems);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(source) => {
            problems.push(ConfigError::Io {
                path: config_path.to_path_buf(),
                source,
            });
            return (AppConfig::default(), problems);
        }
    };

    match parse_config(&content, config_path) {
        Ok((config, mut value_problems)) => {
            problems.append(&mut value_problems);
            (config, problems)
        }
        Err(e) => {
            problems.push(e);
            (AppConfig::default(), problems)
        }
    }
}

/// Parse and validate config text. Invalid values are reported and skipped;
/// only a TOML syntax/type error fails the whole file.
pub fn parse_config(
    content: &str,
    config_path: &Path,
) -> Result<(AppConfig, Vec<ConfigError>), ConfigError> {
    let raw: RawConfig = toml::from_str(content).map_err(|source| ConfigError::TomlParse {
        path: config_path.to_path_buf(),
        source,
    })?;

    let mut config = AppConfig::default();
    let mut problems = Vec::new();

    if let Some(pretty) = raw.output.pretty {
        config.pretty = pretty;
    }

    if let Some(level) = raw.logging.level {
        let lower = level.to_lowercase();
        if constants::VALID_LOG_LEVELS.contains(&lower.as_str()) {
            config.log_level = Some(lower);
        } else {
            problems.push(ConfigError::ValueOutOfRange {
                field: "logging.level".to_string(),
                value: level,
                expected: constants::VALID_LOG_LEVELS.join(", "),
            });
        }
    }

    Ok((config, problems))
}
