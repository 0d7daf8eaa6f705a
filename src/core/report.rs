// SkillSleuth - core/report.rs
//
// Report assembly: runs decoded lines through extraction and
// classification and collects the ordered request records.
// Core layer: accepts BufRead trait objects, never touches the filesystem.

use crate::core::classifier;
use crate::core::extractor::{extract_request, RequestPayload};
use crate::core::model::{ExtractSummary, Report, RequestRecord, RequestStats};
use crate::core::reader::decode_lines;
use crate::util::constants;
use crate::util::error::ReadError;
use std::io::BufRead;
use std::path::PathBuf;

/// Build the classified record for one request payload.
pub fn build_record(payload: RequestPayload, line_number: u64) -> RequestRecord {
    let system_prompts = classifier::classify_system_prompts(&payload.system);
    let messages = classifier::classify_messages(&payload.messages);

    let blocks = || messages.iter().flat_map(|m| m.blocks.iter());
    let stats = RequestStats {
        system_prompt_total_chars: classifier::system_prompt_total_chars(&payload.system),
        message_count: payload.messages.len(),
        has_skill_invocation: blocks().any(|b| b.content.is_tool_use_of(constants::SKILL_TOOL_NAME)),
        has_skill_content_in_messages: blocks().any(|b| b.content.has_skill_content()),
    };

    RequestRecord {
        timestamp_readable: payload.timestamp_readable(),
        request_id: payload.request_id,
        timestamp: payload.timestamp,
        model: payload.model,
        line_number,
        system_prompts,
        messages,
        skill_tool: classifier::extract_skill_tool(&payload.tools),
        tool_count: payload.tools.len(),
        stats,
    }
}

/// Analyse a whole log stream.
///
/// `log_file` is echoed into the report verbatim and used for error context.
/// Malformed lines and non-request entries are skipped; only an I/O failure
/// of `reader` aborts the run.
pub fn analyze_reader<R: BufRead>(
    reader: R,
    log_file: &str,
) -> Result<(Report, ExtractSummary), ReadError> {
    let mut lines = decode_lines(reader);
    let mut requests = Vec::new();
    let mut summary = ExtractSummary::default();

    while let Some(line) = lines.next() {
        let line = line.map_err(|source| ReadError::Io {
            path: PathBuf::from(log_file),
            line_number: lines.lines_read(),
            source,
        })?;

        match extract_request(&line.value, line.line_number) {
            Some(payload) => {
                let record = build_record(payload, line.line_number);
                if record.stats.has_skill_invocation {
                    summary.skill_invocations += 1;
                }
                tracing::debug!(
                    line = line.line_number,
                    request_id = %record.request_id,
                    model = %record.model,
                    messages = record.stats.message_count,
                    tools = record.tool_count,
                    "Request extracted"
                );
                requests.push(record);
            }
            None => summary.skipped_entries += 1,
        }
    }

    summary.lines_read = lines.lines_read();
    summary.malformed_lines = lines.malformed();
    summary.requests = requests.len() as u64;

    Ok((Report::new(log_file, requests), summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::SystemPromptKind;
    use serde_json::json;
    use std::io::Cursor;

    fn analyze(input: &str) -> (Report, ExtractSummary) {
        analyze_reader(Cursor::new(input.as_bytes().to_vec()), "test.log").unwrap()
    }

    #[test]
    fn test_only_request_bodies_become_records() {
        let input = [
            json!({"type": "request body", "reqId": "a", "data": {"model": "m"}}).to_string(),
            "garbage {".to_string(),
            json!({"type": "response body", "reqId": "b", "data": {"model": "m"}}).to_string(),
            json!({"type": "request body", "reqId": "c", "data": {"model": "m"}}).to_string(),
        ]
        .join("\n");

        let (report, summary) = analyze(&input);
        assert_eq!(report.total_requests, 2);
        assert_eq!(report.requests[0].request_id, "a");
        assert_eq!(report.requests[0].line_number, 1);
        assert_eq!(report.requests[1].request_id, "c");
        assert_eq!(report.requests[1].line_number, 4);

        assert_eq!(
            summary,
            ExtractSummary {
                lines_read: 4,
                malformed_lines: 1,
                skipped_entries: 1,
                requests: 2,
                skill_invocations: 0,
            }
        );
    }

    #[test]
    fn test_stats_computed_from_classified_blocks() {
        let payload = RequestPayload {
            request_id: "r".to_string(),
            timestamp: serde_json::Number::from(0),
            model: "m".to_string(),
            system: vec![json!({"text": "abc"}), json!({"text": "skill é"})],
            messages: vec![
                json!({"role": "user", "content": [{"type": "text", "text": "hello"}]}),
                json!({"role": "assistant", "content": [
                    {"type": "tool_use", "name": "Skill", "id": "t1", "input": {"skill": "pdf"}}
                ]}),
                json!({"role": "user", "content": [
                    {"type": "tool_result", "tool_use_id": "t1", "content": "Loaded skill pdf"}
                ]}),
            ],
            tools: vec![json!({"name": "Read"})],
        };
        let record = build_record(payload, 9);

        assert_eq!(record.line_number, 9);
        assert_eq!(record.tool_count, 1);
        assert!(record.skill_tool.is_none());
        assert!(record.timestamp_readable.is_none());
        assert_eq!(record.system_prompts[1].kind, SystemPromptKind::SkillRelated);
        assert_eq!(
            record.stats,
            RequestStats {
                system_prompt_total_chars: 3 + 7,
                message_count: 3,
                has_skill_invocation: true,
                has_skill_content_in_messages: true,
            }
        );
    }

    #[test]
    fn test_reference_alone_is_not_skill_content() {
        let payload = RequestPayload {
            request_id: "r".to_string(),
            timestamp: serde_json::Number::from(0),
            model: String::new(),
            system: Vec::new(),
            messages: vec![json!({"role": "user", "content": [
                {"type": "text", "text": "which skill should I use?"},
                {"type": "tool_use", "name": "skill", "id": "t", "input": {}}
            ]})],
            tools: Vec::new(),
        };
        let stats = build_record(payload, 1).stats;
        assert!(!stats.has_skill_invocation);
        assert!(!stats.has_skill_content_in_messages);
    }

    #[test]
    fn test_empty_input_gives_empty_report() {
        let (report, summary) = analyze("");
        assert_eq!(report.log_file, "test.log");
        assert_eq!(report.total_requests, 0);
        assert!(report.requests.is_empty());
        assert_eq!(summary, ExtractSummary::default());
    }
}
