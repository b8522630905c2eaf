//! Result data structures produced by a monitoring run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Outcome of a single check evaluated against one probe response.
///
/// Only the detail fields relevant to the check kind are populated; absent
/// fields are omitted from the serialized document.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CheckResult {
    /// Check kind tag: "status", "response_time", "json_path", "json_schema",
    /// or the synthetic "request" entry for a failed probe
    pub check: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acceptable: Option<Vec<u16>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    pub fn new(check: &str, passed: bool) -> Self {
        Self {
            check: check.to_string(),
            passed,
            actual: None,
            expected: None,
            acceptable: None,
            min: None,
            max: None,
            error: None,
        }
    }

    /// A failed result carrying only an error message, used for probe
    /// failures and caught evaluation errors.
    pub fn failed(check: &str, error: String) -> Self {
        Self::new(check, false).with_error(error)
    }

    pub fn with_actual(mut self, actual: Value) -> Self {
        self.actual = Some(actual);
        self
    }

    pub fn with_expected(mut self, expected: Value) -> Self {
        self.expected = Some(expected);
        self
    }

    pub fn with_acceptable(mut self, acceptable: Vec<u16>) -> Self {
        self.acceptable = Some(acceptable);
        self
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }
}

/// Per-service outcome: either a skip marker or the evaluated check list.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ServiceResult {
    pub id: String,
    pub name: String,
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub checks: Vec<CheckResult>,
    /// AND over all check `passed` flags; absent when the service was skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,
}

impl ServiceResult {
    pub fn new(id: &str, name: &str, url: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            url: url.to_string(),
            timestamp: Utc::now(),
            checks: Vec::new(),
            success: None,
            error: None,
            elapsed_ms: None,
            skipped: None,
            skip_reason: None,
        }
    }

    pub fn skipped(id: &str, name: &str, url: &str, reason: Option<String>) -> Self {
        let mut result = Self::new(id, name, url);
        result.skipped = Some(true);
        result.skip_reason = reason;
        result
    }

    pub fn is_skipped(&self) -> bool {
        self.skipped == Some(true)
    }
}

/// The persisted artifact of one full monitoring run.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RunResult {
    pub name: String,
    pub run_id: String,
    pub timestamp: DateTime<Utc>,
    pub services: Vec<ServiceResult>,
}

impl RunResult {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            run_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            services: Vec::new(),
        }
    }

    /// True when every non-skipped service succeeded. Skips never count as
    /// failures.
    pub fn all_passed(&self) -> bool {
        self.services
            .iter()
            .filter(|s| !s.is_skipped())
            .all(|s| s.success == Some(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_result_builders() {
        let result = CheckResult::new("status", true)
            .with_actual(json!(200))
            .with_expected(json!(200));

        assert!(result.passed);
        assert_eq!(result.actual, Some(json!(200)));
        assert_eq!(result.expected, Some(json!(200)));
        assert!(result.error.is_none());
    }

    #[test]
    fn test_failed_check_carries_error() {
        let result = CheckResult::failed("request", "connection refused".to_string());

        assert!(!result.passed);
        assert_eq!(result.error, Some("connection refused".to_string()));
    }

    #[test]
    fn test_skipped_service_has_no_success_flag() {
        let result = ServiceResult::skipped(
            "api",
            "Backend API",
            "https://api.example.com",
            Some("maintenance window".to_string()),
        );

        assert!(result.is_skipped());
        assert!(result.success.is_none());
        assert!(result.checks.is_empty());
    }

    #[test]
    fn test_all_passed_ignores_skips() {
        let mut run = RunResult::new("mobile-app-services");

        let mut ok = ServiceResult::new("a", "A", "https://a.example.com");
        ok.success = Some(true);
        run.services.push(ok);

        run.services.push(ServiceResult::skipped(
            "b",
            "B",
            "https://b.example.com",
            None,
        ));

        assert!(run.all_passed());

        let mut failed = ServiceResult::new("c", "C", "https://c.example.com");
        failed.success = Some(false);
        run.services.push(failed);

        assert!(!run.all_passed());
    }

    #[test]
    fn test_run_result_round_trip() {
        let mut run = RunResult::new("round-trip");
        let mut service = ServiceResult::new("api", "API", "https://api.example.com");
        service.success = Some(false);
        service.elapsed_ms = Some(42);
        service.checks.push(
            CheckResult::new("status", false)
                .with_actual(json!(404))
                .with_acceptable(vec![200, 201]),
        );
        service
            .checks
            .push(CheckResult::failed("json_path", "missing key 'data'".to_string()));
        run.services.push(service);

        let serialized = serde_json::to_string(&run).unwrap();
        let restored: RunResult = serde_json::from_str(&serialized).unwrap();

        assert_eq!(run, restored);
    }

    #[test]
    fn test_optional_fields_omitted_from_output() {
        let result = CheckResult::new("response_time", true).with_actual(json!(120));
        let serialized = serde_json::to_string(&result).unwrap();

        assert!(!serialized.contains("expected"));
        assert!(!serialized.contains("acceptable"));
        assert!(!serialized.contains("error"));
    }
}
