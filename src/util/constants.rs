// SkillSleuth - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "SkillSleuth";

/// Application identifier used for config directories.
pub const APP_ID: &str = "SkillSleuth";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default log level when neither RUST_LOG, --debug, nor config set one.
///
/// Kept at "warn" because stdout carries the report and stderr should stay
/// quiet for normal runs.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Name of the optional configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Maximum accepted config file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024; // 64 KB

// =============================================================================
// Log entry recognition
// =============================================================================

/// `type` tag of log entries that carry an outbound request payload.
pub const REQUEST_BODY_TAG: &str = "request body";

/// Prefix for synthesised request IDs when the entry has no `reqId`.
pub const UNKNOWN_REQUEST_ID_PREFIX: &str = "unknown-";

// =============================================================================
// Report shaping
// =============================================================================

/// Characters kept in a system prompt block preview.
pub const SYSTEM_PROMPT_PREVIEW_CHARS: usize = 200;

/// Characters kept in a message text / tool result preview.
pub const MESSAGE_PREVIEW_CHARS: usize = 300;

/// Indentation used by pretty output.
pub const PRETTY_INDENT: &[u8] = b"  ";

// =============================================================================
// Skill detection
// =============================================================================

/// Exact name of the tool that exposes skills to the model.
pub const SKILL_TOOL_NAME: &str = "Skill";

/// Marker that starts the list of skills inside the Skill tool description.
pub const AVAILABLE_SKILLS_MARKER: &str = "Available skills:";

/// Lowercase keyword used by every case-insensitive skill check.
pub const SKILL_KEYWORD: &str = "skill";

/// Line injected at the top of a loaded skill body.
pub const SKILL_BASE_DIR_MARKER: &str = "Base directory for this skill:";

/// Wrapper tag for harness-injected reminders.
pub const SYSTEM_REMINDER_TAG: &str = "<system-reminder>";

/// Filename of a skill definition.
pub const SKILL_FILE_NAME: &str = "SKILL.md";
