// SkillSleuth - core/extractor.rs
//
// Picks request-body entries out of decoded log lines and normalises
// their payload. Missing fields take documented defaults; unexpected shapes
// are read as empty rather than aborting the run.

use crate::util::constants;
use chrono::{DateTime, Utc};
use serde_json::{Map, Number, Value};

/// Normalised payload of one request-body entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestPayload {
    pub request_id: String,
    /// Raw `time` value (milliseconds since the epoch), 0 when absent.
    pub timestamp: Number,
    pub model: String,
    pub system: Vec<Value>,
    pub messages: Vec<Value>,
    pub tools: Vec<Value>,
}

impl RequestPayload {
    /// UTC rendering of `timestamp`, or `None` for 0 / out-of-range values.
    pub fn timestamp_readable(&self) -> Option<DateTime<Utc>> {
        readable_timestamp(timestamp_millis(&self.timestamp))
    }
}

/// Whole milliseconds of a raw `time` value; fractional parts are dropped.
pub fn timestamp_millis(raw: &Number) -> i64 {
    raw.as_i64()
        .or_else(|| raw.as_f64().map(|f| f as i64))
        .unwrap_or(0)
}

/// Convert epoch milliseconds to a UTC timestamp. 0 means "no timestamp".
pub fn readable_timestamp(millis: i64) -> Option<DateTime<Utc>> {
    if millis == 0 {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis)
}

/// Return the payload of `entry` if it is a request body.
///
/// Every request body yields a payload. A missing, null, or non-object
/// `data` is read as an empty payload with all fields defaulted.
pub fn extract_request(entry: &Value, line_number: u64) -> Option<RequestPayload> {
    let obj = entry.as_object()?;
    if obj.get("type").and_then(Value::as_str) != Some(constants::REQUEST_BODY_TAG) {
        return None;
    }

    let data = match obj.get("data") {
        Some(Value::Object(map)) => Some(map),
        None | Some(Value::Null) => None,
        Some(_) => {
            tracing::debug!(
                line = line_number,
                "Request body 'data' is not an object; fields defaulted"
            );
            None
        }
    };

    Some(RequestPayload {
        request_id: request_id(obj, line_number),
        timestamp: raw_timestamp(obj),
        model: data
            .and_then(|d| d.get("model"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        system: array_field(data, "system", line_number),
        messages: array_field(data, "messages", line_number),
        tools: array_field(data, "tools", line_number),
    })
}

fn request_id(entry: &Map<String, Value>, line_number: u64) -> String {
    match entry.get("reqId") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Null) | None => format!("{}{line_number}", constants::UNKNOWN_REQUEST_ID_PREFIX),
        // Numeric or structured IDs are kept in their JSON form.
        Some(other) => other.to_string(),
    }
}

fn raw_timestamp(entry: &Map<String, Value>) -> Number {
    match entry.get("time") {
        Some(Value::Number(n)) => n.clone(),
        _ => Number::from(0),
    }
}

fn array_field(data: Option<&Map<String, Value>>, key: &str, line_number: u64) -> Vec<Value> {
    match data.and_then(|d| d.get(key)) {
        Some(Value::Array(items)) => items.clone(),
        None | Some(Value::Null) => Vec::new(),
        Some(_) => {
            tracing::debug!(
                line = line_number,
                field = key,
                "Expected an array; treating as empty"
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_request_entries_ignored() {
        assert!(extract_request(&json!({"type": "response body", "data": {"model": "m"}}), 1).is_none());
        assert!(extract_request(&json!({"data": {"model": "m"}}), 1).is_none());
        assert!(extract_request(&json!({"type": "Request Body", "data": {"model": "m"}}), 1).is_none());
        assert!(extract_request(&json!([1, 2]), 1).is_none());
        assert!(extract_request(&json!(null), 1).is_none());
    }

    #[test]
    fn test_empty_or_missing_data_still_a_request() {
        for (line, entry) in [
            json!({"type": "request body", "time": 1_700_000_000_000_i64}),
            json!({"type": "request body", "data": {}}),
            json!({"type": "request body", "data": null}),
        ]
        .iter()
        .enumerate()
        {
            let line = line as u64 + 1;
            let p = extract_request(entry, line).expect("request body yields a payload");
            assert_eq!(p.request_id, format!("unknown-{line}"));
            assert_eq!(p.model, "");
            assert!(p.system.is_empty());
            assert!(p.messages.is_empty());
            assert!(p.tools.is_empty());
        }
    }

    #[test]
    fn test_defaults_applied() {
        let p = extract_request(&json!({"type": "request body", "data": {"stream": true}}), 7).unwrap();
        assert_eq!(p.request_id, "unknown-7");
        assert_eq!(p.timestamp, Number::from(0));
        assert!(p.timestamp_readable().is_none());
        assert_eq!(p.model, "");
        assert!(p.system.is_empty());
        assert!(p.messages.is_empty());
        assert!(p.tools.is_empty());
    }

    #[test]
    fn test_fields_extracted() {
        let entry = json!({
            "type": "request body",
            "reqId": "req-1",
            "time": 1_700_000_000_000_i64,
            "data": {
                "model": "claude-sonnet",
                "system": [{"text": "a"}],
                "messages": [{"role": "user", "content": []}],
                "tools": [{"name": "Skill"}, {"name": "Read"}]
            }
        });
        let p = extract_request(&entry, 3).unwrap();
        assert_eq!(p.request_id, "req-1");
        assert_eq!(p.timestamp, Number::from(1_700_000_000_000_i64));
        assert_eq!(p.model, "claude-sonnet");
        assert_eq!(p.system.len(), 1);
        assert_eq!(p.messages.len(), 1);
        assert_eq!(p.tools.len(), 2);
        assert_eq!(
            p.timestamp_readable().unwrap().to_rfc3339(),
            "2023-11-14T22:13:20+00:00"
        );
    }

    #[test]
    fn test_non_array_fields_treated_as_empty() {
        let entry = json!({
            "type": "request body",
            "data": {"system": "You are Claude Code", "messages": {"role": "user"}, "tools": 3}
        });
        let p = extract_request(&entry, 1).unwrap();
        assert!(p.system.is_empty());
        assert!(p.messages.is_empty());
        assert!(p.tools.is_empty());
    }

    #[test]
    fn test_float_timestamp_kept_raw() {
        let entry = json!({"type": "request body", "time": 1500.9, "data": {"model": "m"}});
        let p = extract_request(&entry, 1).unwrap();
        assert_eq!(Value::Number(p.timestamp.clone()), json!(1500.9));
        assert_eq!(timestamp_millis(&p.timestamp), 1500);
        assert_eq!(p.timestamp_readable().unwrap().timestamp_millis(), 1500);
    }

    #[test]
    fn test_non_numeric_time_defaults_to_zero() {
        let entry = json!({"type": "request body", "time": "soon", "data": {"model": "m"}});
        let p = extract_request(&entry, 1).unwrap();
        assert_eq!(p.timestamp, Number::from(0));
        assert!(p.timestamp_readable().is_none());
    }

    #[test]
    fn test_numeric_request_id_kept_as_text() {
        let entry = json!({"type": "request body", "reqId": 42, "data": {"model": "m"}});
        assert_eq!(extract_request(&entry, 1).unwrap().request_id, "42");
    }

    #[test]
    fn test_non_object_data() {
        let truthy = json!({"type": "request body", "reqId": "r", "data": "payload"});
        let p = extract_request(&truthy, 2).unwrap();
        assert_eq!(p.request_id, "r");
        assert!(p.system.is_empty());

        let empty = json!({"type": "request body", "data": ""});
        assert_eq!(extract_request(&empty, 3).unwrap().request_id, "unknown-3");
    }

    #[test]
    fn test_readable_timestamp_zero_is_none() {
        assert!(readable_timestamp(0).is_none());
        assert!(readable_timestamp(i64::MAX).is_none());
        assert!(readable_timestamp(-1000).is_some());
    }
}
