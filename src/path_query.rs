//! Minimal dot/bracket path expressions over JSON values
//!
//! Supports expressions of the form `$.data.items[2].name`: a leading `$`
//! is optional, segments are dot-separated, and each segment may carry one
//! `[index]` suffix. No wildcards, slices, or recursive descent.

use crate::errors::{MonitorError, Result};
use serde_json::Value;

/// One parsed step of a path expression: a key lookup, optionally followed
/// by an array index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathStep {
    pub key: String,
    pub index: Option<usize>,
}

/// Parse a path expression into an ordered list of steps.
///
/// Empty segments (consecutive dots) are skipped silently.
pub fn parse_path(path: &str) -> Result<Vec<PathStep>> {
    let trimmed = path.trim();
    let body = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let body = body.strip_prefix('.').unwrap_or(body);

    let mut steps = Vec::new();

    for segment in body.split('.') {
        if segment.is_empty() {
            continue;
        }

        let (key, index) = match segment.find('[') {
            Some(open) => {
                let close = segment.find(']').ok_or_else(|| {
                    MonitorError::PathResolution(format!(
                        "unterminated index in segment '{}' of path '{}'",
                        segment, path
                    ))
                })?;
                if close < open || close != segment.len() - 1 {
                    return Err(MonitorError::PathResolution(format!(
                        "malformed index in segment '{}' of path '{}'",
                        segment, path
                    )));
                }

                let index = segment[open + 1..close].parse::<usize>().map_err(|_| {
                    MonitorError::PathResolution(format!(
                        "non-numeric index in segment '{}' of path '{}'",
                        segment, path
                    ))
                })?;

                (&segment[..open], Some(index))
            }
            None => (segment, None),
        };

        steps.push(PathStep {
            key: key.to_string(),
            index,
        });
    }

    Ok(steps)
}

/// Resolve a path expression against a JSON value, returning the value it
/// points at. Missing keys, non-object access, and out-of-range indices all
/// fail with a `PathResolution` error naming the offending step.
pub fn resolve_path(value: &Value, path: &str) -> Result<Value> {
    let steps = parse_path(path)?;
    let mut current = value;

    for step in &steps {
        if !step.key.is_empty() {
            current = match current {
                Value::Object(map) => map.get(&step.key).ok_or_else(|| {
                    MonitorError::PathResolution(format!(
                        "key '{}' not found while resolving '{}'",
                        step.key, path
                    ))
                })?,
                other => {
                    return Err(MonitorError::PathResolution(format!(
                        "cannot read key '{}' of {} while resolving '{}'",
                        step.key,
                        value_kind(other),
                        path
                    )));
                }
            };
        }

        if let Some(index) = step.index {
            current = match current {
                Value::Array(items) => items.get(index).ok_or_else(|| {
                    MonitorError::PathResolution(format!(
                        "index {} out of range (length {}) while resolving '{}'",
                        index,
                        items.len(),
                        path
                    ))
                })?,
                other => {
                    return Err(MonitorError::PathResolution(format!(
                        "cannot index into {} while resolving '{}'",
                        value_kind(other),
                        path
                    )));
                }
            };
        }
    }

    Ok(current.clone())
}

/// Human-readable name for a JSON value's runtime type.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_simple_path() {
        let steps = parse_path("$.data.items[2].name").unwrap();

        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0], PathStep { key: "data".to_string(), index: None });
        assert_eq!(steps[1], PathStep { key: "items".to_string(), index: Some(2) });
        assert_eq!(steps[2], PathStep { key: "name".to_string(), index: None });
    }

    #[test]
    fn test_leading_dollar_optional() {
        assert_eq!(parse_path("$.a.b").unwrap(), parse_path("a.b").unwrap());
    }

    #[test]
    fn test_empty_segments_skipped() {
        let steps = parse_path("$.a..b").unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].key, "a");
        assert_eq!(steps[1].key, "b");
    }

    #[test]
    fn test_malformed_index_rejected() {
        assert!(parse_path("$.items[2").is_err());
        assert!(parse_path("$.items[two]").is_err());
    }

    #[test]
    fn test_resolve_nested_value() {
        let doc = json!({"data": {"items": [{"ozone": 310}]}});

        let value = resolve_path(&doc, "$.data.items[0].ozone").unwrap();
        assert_eq!(value, json!(310));
    }

    #[test]
    fn test_resolve_missing_key_fails() {
        let doc = json!({"data": {"present": 1}});

        let err = resolve_path(&doc, "$.data.missing").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("missing"), "unexpected message: {}", message);
    }

    #[test]
    fn test_resolve_index_out_of_range() {
        let doc = json!({"items": [1, 2]});

        let err = resolve_path(&doc, "$.items[5]").unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_resolve_key_on_scalar_fails() {
        let doc = json!({"value": 42});

        let err = resolve_path(&doc, "$.value.deeper").unwrap_err();
        assert!(err.to_string().contains("number"));
    }

    #[test]
    fn test_resolve_root_returns_whole_document() {
        let doc = json!({"a": 1});
        assert_eq!(resolve_path(&doc, "$").unwrap(), doc);
    }
}
