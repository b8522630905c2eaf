//! Check evaluation: one CheckSpec against one probe response
//!
//! Every evaluation failure (malformed JSON, unresolvable path, missing
//! assertion) is contained here and reported as a failed check; nothing in
//! this module aborts the run.

use crate::config::CheckSpec;
use crate::path_query::resolve_path;
use crate::probe::ProbeResult;
use crate::report::CheckResult;
use crate::schema::validate_schema;
use serde_json::{json, Value};

/// Evaluate a single check against the captured probe response, producing
/// exactly one result.
pub fn evaluate_check(spec: &CheckSpec, response: &ProbeResult) -> CheckResult {
    match spec {
        CheckSpec::Status {
            acceptable,
            expected,
        } => evaluate_status(response.status, acceptable.as_deref(), *expected),
        CheckSpec::ResponseTime { max_ms } => evaluate_response_time(response.elapsed_ms, *max_ms),
        CheckSpec::JsonPath {
            path,
            expected,
            min,
            max,
        } => match parse_body(response) {
            Ok(body) => evaluate_json_path(&body, path, expected.as_ref(), *min, *max),
            Err(e) => CheckResult::failed("json_path", e),
        },
        CheckSpec::JsonSchema { schema } => match parse_body(response) {
            Ok(body) => CheckResult::new("json_schema", validate_schema(&body, schema)),
            Err(e) => CheckResult::failed("json_schema", e),
        },
    }
}

fn parse_body(response: &ProbeResult) -> std::result::Result<Value, String> {
    serde_json::from_str(&response.body)
        .map_err(|e| format!("response body is not valid JSON: {}", e))
}

fn evaluate_status(actual: u16, acceptable: Option<&[u16]>, expected: Option<u16>) -> CheckResult {
    match (acceptable, expected) {
        (Some(acceptable), _) => CheckResult::new("status", acceptable.contains(&actual))
            .with_actual(json!(actual))
            .with_acceptable(acceptable.to_vec()),
        (None, Some(expected)) => CheckResult::new("status", actual == expected)
            .with_actual(json!(actual))
            .with_expected(json!(expected)),
        (None, None) => CheckResult::failed(
            "status",
            "status check declares neither 'expected' nor 'acceptable'".to_string(),
        )
        .with_actual(json!(actual)),
    }
}

fn evaluate_response_time(elapsed_ms: u64, max_ms: u64) -> CheckResult {
    CheckResult::new("response_time", elapsed_ms <= max_ms)
        .with_actual(json!(elapsed_ms))
        .with_max(max_ms as f64)
}

fn evaluate_json_path(
    body: &Value,
    path: &str,
    expected: Option<&Value>,
    min: Option<f64>,
    max: Option<f64>,
) -> CheckResult {
    let resolved = match resolve_path(body, path) {
        Ok(value) => value,
        Err(e) => return CheckResult::failed("json_path", e.to_string()),
    };

    if let Some(expected) = expected {
        return CheckResult::new("json_path", &resolved == expected)
            .with_actual(resolved)
            .with_expected(expected.clone());
    }

    if min.is_none() && max.is_none() {
        // A check that asserts nothing is a configuration mistake; surface
        // it rather than defaulting to a silent pass or fail.
        return CheckResult::failed(
            "json_path",
            format!(
                "json_path check for '{}' declares neither 'expected' nor 'min'/'max'",
                path
            ),
        )
        .with_actual(resolved);
    }

    let Some(number) = resolved.as_f64() else {
        let result = CheckResult::failed(
            "json_path",
            format!("value at '{}' is not numeric", path),
        )
        .with_actual(resolved);
        return with_bounds(result, min, max);
    };

    let passed = min.is_none_or(|m| number >= m) && max.is_none_or(|m| number <= m);

    with_bounds(
        CheckResult::new("json_path", passed).with_actual(json!(number)),
        min,
        max,
    )
}

fn with_bounds(mut result: CheckResult, min: Option<f64>, max: Option<f64>) -> CheckResult {
    if let Some(min) = min {
        result = result.with_min(min);
    }
    if let Some(max) = max {
        result = result.with_max(max);
    }
    result
}

/// Run every configured check in declaration order against the one probe
/// response; checks never trigger additional requests.
pub fn evaluate_all(specs: &[CheckSpec], response: &ProbeResult) -> Vec<CheckResult> {
    specs
        .iter()
        .map(|spec| evaluate_check(spec, response))
        .collect()
}
