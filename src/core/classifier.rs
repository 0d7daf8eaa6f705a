// SkillSleuth - core/classifier.rs
//
// Heuristic content classification for system prompts, message blocks,
// and tool definitions. Pure string matching over already-decoded JSON;
// no I/O, no state.

use crate::core::model::{
    ContentBlock, MessageBlock, MessageRecord, SkillToolDescriptor, SystemPromptBlock,
    SystemPromptKind, TextBlock, ToolResultBlock, ToolUseBlock,
};
use crate::util::constants;
use serde_json::{Map, Value};

// =============================================================================
// Text predicates
// =============================================================================

/// A single substring test applied to block text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMatch {
    /// Case-sensitive substring.
    Contains(&'static str),
    /// Substring of the lowercased text. The needle must be lowercase.
    ContainsIgnoreCase(&'static str),
}

impl TextMatch {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Self::Contains(needle) => text.contains(needle),
            Self::ContainsIgnoreCase(needle) => text.to_lowercase().contains(needle),
        }
    }
}

/// Ordered system prompt rules. First match wins; earlier rules shadow later
/// ones when several substrings are present.
pub const SYSTEM_PROMPT_RULES: &[(TextMatch, SystemPromptKind)] = &[
    (TextMatch::Contains("billing-header"), SystemPromptKind::Billing),
    (TextMatch::Contains("You are Claude Code"), SystemPromptKind::Identity),
    (
        TextMatch::Contains("You are an interactive CLI"),
        SystemPromptKind::Instructions,
    ),
    (
        TextMatch::ContainsIgnoreCase(constants::SKILL_KEYWORD),
        SystemPromptKind::SkillRelated,
    ),
];

/// Assign exactly one category to a system prompt text.
pub fn classify_system_text(text: &str) -> SystemPromptKind {
    SYSTEM_PROMPT_RULES
        .iter()
        .find(|(rule, _)| rule.matches(text))
        .map(|(_, kind)| *kind)
        .unwrap_or_default()
}

/// Skill flags for a message text block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkillSignals {
    pub has_skill_content: bool,
    pub has_skill_reference: bool,
}

/// Detect skill content and skill references in message text.
///
/// Content means a loaded skill body or a reminder about skills; reference
/// means "skill" is mentioned without any content marker. At most one of the
/// two flags is set.
pub fn skill_signals(text: &str) -> SkillSignals {
    let mentions_skill = mentions_skill(text);
    let has_skill_content = text.contains(constants::SKILL_BASE_DIR_MARKER)
        || (text.contains(constants::SYSTEM_REMINDER_TAG) && mentions_skill)
        || text.contains(constants::SKILL_FILE_NAME);

    SkillSignals {
        has_skill_content,
        has_skill_reference: mentions_skill && !has_skill_content,
    }
}

/// Case-insensitive check for the word "skill" anywhere in the text.
pub fn mentions_skill(text: &str) -> bool {
    text.to_lowercase().contains(constants::SKILL_KEYWORD)
}

/// First `max_chars` characters with every newline replaced by a space.
pub fn preview(text: &str, max_chars: usize) -> String {
    text.chars()
        .take(max_chars)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect()
}

/// Length in characters, not bytes.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

// =============================================================================
// Field access helpers
// =============================================================================

/// String field of an object, or "" when missing or not a string.
fn str_field<'a>(obj: &'a Value, key: &str) -> &'a str {
    obj.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

// =============================================================================
// System prompts
// =============================================================================

/// Classify every system prompt block, preserving source order.
pub fn classify_system_prompts(system: &[Value]) -> Vec<SystemPromptBlock> {
    system
        .iter()
        .enumerate()
        .map(|(index, block)| {
            let text = str_field(block, "text");
            let kind = classify_system_text(text);
            tracing::trace!(index, kind = %kind, "System prompt block classified");
            SystemPromptBlock {
                index,
                kind,
                length: char_len(text),
                cache_control: block
                    .get("cache_control")
                    .cloned()
                    .unwrap_or_else(empty_object),
                content: text.to_string(),
                preview: preview(text, constants::SYSTEM_PROMPT_PREVIEW_CHARS),
            }
        })
        .collect()
}

/// Total characters across all system prompt texts.
pub fn system_prompt_total_chars(system: &[Value]) -> usize {
    system.iter().map(|b| char_len(str_field(b, "text"))).sum()
}

// =============================================================================
// Messages
// =============================================================================

/// Classify every message and its content blocks.
///
/// A message whose `content` is not an array (e.g. a bare string) yields no
/// blocks.
pub fn classify_messages(messages: &[Value]) -> Vec<MessageRecord> {
    messages
        .iter()
        .enumerate()
        .map(|(index, msg)| {
            let blocks = match msg.get("content") {
                Some(Value::Array(content)) => content
                    .iter()
                    .enumerate()
                    .map(|(index, block)| MessageBlock {
                        index,
                        content: classify_content_block(block),
                    })
                    .collect(),
                _ => Vec::new(),
            };
            MessageRecord {
                index,
                role: str_field(msg, "role").to_string(),
                blocks,
            }
        })
        .collect()
}

/// Classify a single content block by its `type` tag.
pub fn classify_content_block(block: &Value) -> ContentBlock {
    let block_type = block
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("unknown");

    match block_type {
        "text" => {
            let text = str_field(block, "text");
            let signals = skill_signals(text);
            ContentBlock::Text(TextBlock {
                length: char_len(text),
                has_skill_content: signals.has_skill_content,
                has_skill_reference: signals.has_skill_reference,
                content: text.to_string(),
                preview: preview(text, constants::MESSAGE_PREVIEW_CHARS),
            })
        }
        "tool_use" => ContentBlock::ToolUse(ToolUseBlock {
            tool_name: str_field(block, "name").to_string(),
            tool_id: str_field(block, "id").to_string(),
            input: block.get("input").cloned().unwrap_or_else(empty_object),
        }),
        "tool_result" => {
            // Missing content is an empty string; structured content is left alone.
            let content = match block.get("content") {
                None => Some(""),
                Some(Value::String(s)) => Some(s.as_str()),
                Some(other) => {
                    tracing::trace!(kind = json_kind(other), "Tool result content left unclassified");
                    None
                }
            };
            ContentBlock::ToolResult(content.map(|text| ToolResultBlock {
                tool_use_id: str_field(block, "tool_use_id").to_string(),
                length: char_len(text),
                has_skill_content: mentions_skill(text),
                preview: preview(text, constants::MESSAGE_PREVIEW_CHARS),
            }))
        }
        other => ContentBlock::Unknown {
            block_type: other.to_string(),
        },
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Tools
// =============================================================================

/// Find the first tool named exactly `Skill` and describe it.
pub fn extract_skill_tool(tools: &[Value]) -> Option<SkillToolDescriptor> {
    let tool = tools
        .iter()
        .find(|t| t.get("name").and_then(Value::as_str) == Some(constants::SKILL_TOOL_NAME))?;

    let description = str_field(tool, "description");
    let available_skills_section = description
        .find(constants::AVAILABLE_SKILLS_MARKER)
        .map(|start| description[start..].to_string())
        .unwrap_or_default();

    Some(SkillToolDescriptor {
        name: constants::SKILL_TOOL_NAME.to_string(),
        description_length: char_len(description),
        available_skills_section,
        full_description: description.to_string(),
    })
}
