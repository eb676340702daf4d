//! Tag merging with stack-wide → stage-specific precedence.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEntry {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl TagEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Union of both tag sources as an ordered sequence.
///
/// Keys from `stack_tags` come first in declaration order, with the
/// value from `tags` winning when a key appears in both; keys only in
/// `tags` follow in their declaration order. Absent inputs behave as
/// empty mappings.
pub fn merge_tags(
    stack_tags: Option<&Map<String, Value>>,
    tags: Option<&Map<String, Value>>,
) -> Vec<TagEntry> {
    let mut merged = Vec::new();

    if let Some(stack_tags) = stack_tags {
        for (key, value) in stack_tags {
            let value = tags.and_then(|t| t.get(key)).unwrap_or(value);
            merged.push(TagEntry::new(key, tag_value(value)));
        }
    }

    if let Some(tags) = tags {
        for (key, value) in tags {
            if stack_tags.map_or(true, |s| !s.contains_key(key)) {
                merged.push(TagEntry::new(key, tag_value(value)));
            }
        }
    }

    merged
}

fn tag_value(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}
