// SkillSleuth - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// These types are the shared vocabulary between extraction, classification,
// and export. Field order matches the emitted report.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

// =============================================================================
// Report (final document)
// =============================================================================

/// The complete analysis document for one log file.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Source path exactly as given on the command line.
    pub log_file: String,

    /// Number of request records (equals `requests.len()`).
    pub total_requests: usize,

    /// Request records in input order.
    pub requests: Vec<RequestRecord>,
}

impl Report {
    pub fn new(log_file: impl Into<String>, requests: Vec<RequestRecord>) -> Self {
        Self {
            log_file: log_file.into(),
            total_requests: requests.len(),
            requests,
        }
    }
}

// =============================================================================
// Request record
// =============================================================================

/// One outbound API request, normalised and classified.
#[derive(Debug, Clone, Serialize)]
pub struct RequestRecord {
    /// `reqId` from the log entry, or `unknown-<line_number>`.
    pub request_id: String,

    /// Raw `time` value in milliseconds since the epoch (0 when absent).
    /// Written back exactly as logged, fractional values included.
    pub timestamp: Number,

    /// ISO-8601 rendering of `timestamp`. `None` when the timestamp is 0.
    pub timestamp_readable: Option<DateTime<Utc>>,

    /// Model name from the payload, empty when absent.
    pub model: String,

    /// 1-based line of the log entry this record came from.
    pub line_number: u64,

    pub system_prompts: Vec<SystemPromptBlock>,

    pub messages: Vec<MessageRecord>,

    /// Present only when the request declared a tool named `Skill`.
    pub skill_tool: Option<SkillToolDescriptor>,

    /// Number of tool definitions sent with the request.
    pub tool_count: usize,

    pub stats: RequestStats,
}

/// Per-request aggregate figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RequestStats {
    /// Sum of character counts across all system prompt texts.
    pub system_prompt_total_chars: usize,

    pub message_count: usize,

    /// True when any message contains a `tool_use` block naming `Skill`.
    pub has_skill_invocation: bool,

    /// True when any text or tool result block has its skill-content flag set.
    pub has_skill_content_in_messages: bool,
}

// =============================================================================
// System prompt blocks
// =============================================================================

/// Category assigned to a system prompt block by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SystemPromptKind {
    Billing,
    Identity,
    Instructions,
    SkillRelated,
    #[default]
    Unknown,
}

impl SystemPromptKind {
    /// Label as it appears in the report.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Billing => "billing",
            Self::Identity => "identity",
            Self::Instructions => "instructions",
            Self::SkillRelated => "skill-related",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SystemPromptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One classified segment of the system prompt.
#[derive(Debug, Clone, Serialize)]
pub struct SystemPromptBlock {
    pub index: usize,

    #[serde(rename = "type")]
    pub kind: SystemPromptKind,

    /// Character count of `content`.
    pub length: usize,

    /// Opaque passthrough of the block's `cache_control` (`{}` when absent).
    pub cache_control: Value,

    pub content: String,

    /// First characters of `content` with newlines flattened to spaces.
    pub preview: String,
}

// =============================================================================
// Messages and content blocks
// =============================================================================

/// One chat message with its classified content blocks.
#[derive(Debug, Clone, Serialize)]
pub struct MessageRecord {
    pub index: usize,
    pub role: String,
    pub blocks: Vec<MessageBlock>,
}

/// A content block together with its position in the message.
///
/// Serialised flat: `{"index": .., "type": .., <variant fields>}`.
#[derive(Debug, Clone, Serialize)]
pub struct MessageBlock {
    pub index: usize,

    #[serde(flatten)]
    pub content: ContentBlock,
}

/// The content block union.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Text(TextBlock),
    ToolUse(ToolUseBlock),
    /// `None` when the result content was not a plain string; such results
    /// are left unclassified and emit only their index and type.
    ToolResult(Option<ToolResultBlock>),
    /// Any other block type. Carries the raw tag only.
    Unknown { block_type: String },
}

impl ContentBlock {
    /// The `type` tag written to the report.
    pub fn type_tag(&self) -> &str {
        match self {
            Self::Text(_) => "text",
            Self::ToolUse(_) => "tool_use",
            Self::ToolResult(_) => "tool_result",
            Self::Unknown { block_type } => block_type,
        }
    }

    /// Skill-content flag for text and classified tool result blocks.
    pub fn has_skill_content(&self) -> bool {
        match self {
            Self::Text(t) => t.has_skill_content,
            Self::ToolResult(Some(r)) => r.has_skill_content,
            _ => false,
        }
    }

    /// True for a `tool_use` block invoking the given tool.
    pub fn is_tool_use_of(&self, tool_name: &str) -> bool {
        matches!(self, Self::ToolUse(u) if u.tool_name == tool_name)
    }
}

impl Serialize for ContentBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.type_tag())?;
        match self {
            Self::Text(t) => {
                map.serialize_entry("length", &t.length)?;
                map.serialize_entry("has_skill_content", &t.has_skill_content)?;
                map.serialize_entry("has_skill_reference", &t.has_skill_reference)?;
                map.serialize_entry("content", &t.content)?;
                map.serialize_entry("preview", &t.preview)?;
            }
            Self::ToolUse(u) => {
                map.serialize_entry("tool_name", &u.tool_name)?;
                map.serialize_entry("tool_id", &u.tool_id)?;
                map.serialize_entry("input", &u.input)?;
            }
            Self::ToolResult(Some(r)) => {
                map.serialize_entry("tool_use_id", &r.tool_use_id)?;
                map.serialize_entry("length", &r.length)?;
                map.serialize_entry("has_skill_content", &r.has_skill_content)?;
                map.serialize_entry("preview", &r.preview)?;
            }
            Self::ToolResult(None) | Self::Unknown { .. } => {}
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub length: usize,
    pub has_skill_content: bool,
    /// Weaker signal: mentions "skill" without any skill-content marker.
    /// Never true together with `has_skill_content`.
    pub has_skill_reference: bool,
    pub content: String,
    pub preview: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolUseBlock {
    pub tool_name: String,
    pub tool_id: String,
    /// Tool arguments, passed through unmodified (`{}` when absent).
    pub input: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResultBlock {
    pub tool_use_id: String,
    pub length: usize,
    pub has_skill_content: bool,
    pub preview: String,
}

// =============================================================================
// Skill tool
// =============================================================================

/// The `Skill` tool definition found among a request's tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillToolDescriptor {
    pub name: String,

    /// Character count of `full_description`.
    pub description_length: usize,

    /// Suffix of the description starting at "Available skills:", or empty.
    pub available_skills_section: String,

    pub full_description: String,
}

// =============================================================================
// Extraction summary (diagnostics only)
// =============================================================================

/// Counters collected during a run. Logged, never written to the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Physical lines read, including blank and malformed ones.
    pub lines_read: u64,

    /// Lines that did not decode as JSON.
    pub malformed_lines: u64,

    /// Decoded entries that were not request bodies (or had no payload).
    pub skipped_entries: u64,

    /// Request records produced.
    pub requests: u64,

    /// Records whose messages invoke the Skill tool.
    pub skill_invocations: u64,
}
