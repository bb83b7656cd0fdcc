use serde_json::{Map, Value};

use crate::contracts::{Dataset, Record};

/// Array-valued properties checked, in order, when the reply is a JSON object.
pub const ARRAY_PROPERTY_PREFERENCE: [&str; 3] = ["questions", "data", "results"];

/// Bound on how many closing braces the repair walks back over.
const MAX_REPAIR_ATTEMPTS: usize = 64;

const FENCE: &str = "```";

pub(super) fn extract(text: &str) -> Option<Dataset> {
    candidates(text)
        .into_iter()
        .filter_map(|candidate| serde_json::from_str::<Value>(candidate).ok())
        .filter_map(rows_from_value)
        .find(|rows| !rows.is_empty())
}

/// Salvages the complete elements of a JSON array cut off mid-element.
pub(super) fn repair_truncated(text: &str) -> Option<Dataset> {
    let candidate = truncated_array_candidate(text)?;
    if serde_json::from_str::<Value>(candidate).is_ok() {
        return None;
    }

    let mut end = candidate.len();
    for _ in 0..MAX_REPAIR_ATTEMPTS {
        let cut = candidate[..end].rfind('}')?;
        let repaired = format!("{}]", &candidate[..=cut]);
        if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(&repaired) {
            let rows = rows_from_array(items);
            if !rows.is_empty() {
                return Some(rows);
            }
        }
        end = cut;
    }
    None
}

/// Serializes rows as a JSON array of objects, keeping column order.
pub fn dataset_to_json(rows: &Dataset) -> Result<String, serde_json::Error> {
    serde_json::to_string(rows)
}

/// JSON candidates in preference order: fenced block, bare JSON reply,
/// outermost array, outermost object.
///
/// The object candidate is only offered when an object opens before any
/// array, so a truncated array never degrades to its first element.
fn candidates(text: &str) -> Vec<&str> {
    let trimmed = text.trim();
    let mut found = Vec::with_capacity(4);

    if let Some(block) = fenced_block(text) {
        found.push(block);
    }
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        found.push(trimmed);
    }
    if let Some(array) = delimited(text, '[', ']') {
        found.push(array);
    }
    let object_first = match (text.find('{'), text.find('[')) {
        (Some(brace), Some(bracket)) => brace < bracket,
        (Some(_), None) => true,
        _ => false,
    };
    if object_first && let Some(object) = delimited(text, '{', '}') {
        found.push(object);
    }
    if found.is_empty() {
        found.push(trimmed);
    }

    found.dedup();
    found
}

fn truncated_array_candidate(text: &str) -> Option<&str> {
    if let Some(block) = fenced_block(text)
        && block.starts_with('[')
    {
        return Some(block);
    }
    let start = text.find('[')?;
    Some(text[start..].trim_end())
}

/// Body of the first ``` fence; an unterminated fence runs to the end of the text.
fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find(FENCE)? + FENCE.len();
    let after = &text[start..];
    let tag_len = after
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(after.len());
    let body = &after[tag_len..];
    let body = match body.find(FENCE) {
        Some(end) => &body[..end],
        None => body,
    };
    let body = body.trim();
    (!body.is_empty()).then_some(body)
}

fn delimited(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

fn rows_from_value(value: Value) -> Option<Dataset> {
    match value {
        Value::Array(items) => Some(rows_from_array(items)),
        Value::Object(mut object) => {
            for key in ARRAY_PROPERTY_PREFERENCE {
                if matches!(object.get(key), Some(Value::Array(_)))
                    && let Some(Value::Array(items)) = object.remove(key)
                {
                    return Some(rows_from_array(items));
                }
            }
            (!object.is_empty()).then(|| vec![record_from_object(object)])
        }
        _ => None,
    }
}

/// Object elements become rows; scalars and empty objects carry no columns and are dropped.
fn rows_from_array(items: Vec<Value>) -> Dataset {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(object) if !object.is_empty() => Some(record_from_object(object)),
            _ => None,
        })
        .collect()
}

fn record_from_object(object: Map<String, Value>) -> Record {
    object
        .into_iter()
        .map(|(key, value)| (key, cell(value)))
        .collect()
}

fn cell(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
