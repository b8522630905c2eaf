//! Monitoring configuration: the service list and its checks

use crate::errors::{MonitorError, Result};
use crate::schema::SchemaDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Top-level configuration document: a named set of services to probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    pub name: String,
    pub services: Vec<ServiceConfig>,
}

/// One monitored endpoint and its declarative checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Unique within a run
    pub id: String,
    pub name: String,
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Presence implies skip regardless of `enabled`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,

    #[serde(default)]
    pub checks: Vec<CheckSpec>,
}

fn default_enabled() -> bool {
    true
}

impl ServiceConfig {
    pub fn should_skip(&self) -> bool {
        !self.enabled || self.skip_reason.is_some()
    }
}

/// Closed set of check kinds. An unrecognized `type` tag is rejected at
/// config load instead of silently evaluating to a failed check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckSpec {
    /// Status code equals `expected`, or is a member of `acceptable`
    Status {
        #[serde(skip_serializing_if = "Option::is_none")]
        acceptable: Option<Vec<u16>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        expected: Option<u16>,
    },

    /// Measured elapsed time is at most `max_ms`, inclusive
    ResponseTime { max_ms: u64 },

    /// Resolve `path` in the JSON body, then compare for exact equality or
    /// against inclusive numeric bounds
    JsonPath {
        path: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        expected: Option<Value>,
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },

    /// Validate the JSON body against a shallow schema
    JsonSchema { schema: SchemaDescriptor },
}

impl MonitorConfig {
    /// Load a configuration file, choosing the format by extension:
    /// `.yaml`/`.yml` parse as YAML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            MonitorError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;

        let config: MonitorConfig = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&raw).map_err(|e| {
                MonitorError::Config(format!("invalid YAML in {}: {}", path.display(), e))
            })?,
            _ => serde_json::from_str(&raw).map_err(|e| {
                MonitorError::Config(format!("invalid JSON in {}: {}", path.display(), e))
            })?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(MonitorError::Config("name cannot be empty".to_string()));
        }

        let mut seen = HashSet::new();
        for service in &self.services {
            if service.id.is_empty() {
                return Err(MonitorError::Config(format!(
                    "service '{}' has an empty id",
                    service.name
                )));
            }

            if !seen.insert(service.id.as_str()) {
                return Err(MonitorError::Config(format!(
                    "duplicate service id '{}'",
                    service.id
                )));
            }

            if service.url.is_empty() {
                return Err(MonitorError::Config(format!(
                    "service '{}' has an empty url",
                    service.id
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn service(id: &str) -> ServiceConfig {
        ServiceConfig {
            id: id.to_string(),
            name: id.to_string(),
            url: format!("https://{}.example.com", id),
            headers: None,
            enabled: true,
            skip_reason: None,
            checks: Vec::new(),
        }
    }

    #[test]
    fn test_parse_json_config() {
        let raw = r#"{
            "name": "mobile-app-services",
            "services": [{
                "id": "weather",
                "name": "Weather API",
                "url": "https://weather.example.com/v1/current",
                "headers": {"x-api-key": "abc"},
                "checks": [
                    {"type": "status", "acceptable": [200, 201]},
                    {"type": "response_time", "max_ms": 500},
                    {"type": "json_path", "path": "$.data.aqi", "min": 0, "max": 500}
                ]
            }]
        }"#;

        let config: MonitorConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.name, "mobile-app-services");
        assert_eq!(config.services.len(), 1);

        let service = &config.services[0];
        assert!(service.enabled);
        assert_eq!(service.checks.len(), 3);
        assert_eq!(
            service.checks[0],
            CheckSpec::Status {
                acceptable: Some(vec![200, 201]),
                expected: None
            }
        );
    }

    #[test]
    fn test_parse_yaml_config() {
        let raw = "
name: mobile-app-services
services:
  - id: auth
    name: Auth Service
    url: https://auth.example.com/health
    enabled: false
    checks:
      - type: status
        expected: 200
";

        let config: MonitorConfig = serde_yaml::from_str(raw).unwrap();
        assert_eq!(config.services[0].id, "auth");
        assert!(config.services[0].should_skip());
    }

    #[test]
    fn test_unknown_check_type_rejected() {
        let raw = r#"{
            "name": "n",
            "services": [{
                "id": "a", "name": "A", "url": "https://a.example.com",
                "checks": [{"type": "dns_lookup"}]
            }]
        }"#;

        assert!(serde_json::from_str::<MonitorConfig>(raw).is_err());
    }

    #[test]
    fn test_skip_reason_implies_skip() {
        let mut config = service("billing");
        config.skip_reason = Some("vendor maintenance".to_string());

        assert!(config.enabled);
        assert!(config.should_skip());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let config = MonitorConfig {
            name: "dup".to_string(),
            services: vec![service("api"), service("api")],
        };

        assert!(matches!(
            config.validate(),
            Err(MonitorError::Config(msg)) if msg.contains("duplicate")
        ));
    }

    #[test]
    fn test_load_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(
            file,
            "name: smoke\nservices:\n  - id: a\n    name: A\n    url: https://a.example.com\n"
        )
        .unwrap();

        let config = MonitorConfig::load(file.path()).unwrap();
        assert_eq!(config.name, "smoke");
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = MonitorConfig::load(Path::new("/nonexistent/services.yaml")).unwrap_err();
        assert!(matches!(err, MonitorError::Config(_)));
    }
}
