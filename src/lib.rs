//! Endpoint Monitor Library
//!
//! This library probes configured HTTP(S) endpoints, evaluates declarative
//! per-service checks against each response, and assembles a structured
//! result document for downstream dashboards and alerting.

pub mod checker;
pub mod checks;
pub mod config;
pub mod errors;
pub mod path_query;
pub mod probe;
pub mod report;
pub mod runner;
pub mod schema;

pub use checker::ServiceChecker;
pub use config::{CheckSpec, MonitorConfig, ServiceConfig};
pub use errors::{MonitorError, Result};
pub use probe::{HttpProbe, ProbeConfig, ProbeResult, Prober};
pub use report::{CheckResult, RunResult, ServiceResult};
pub use runner::{write_report, Runner};
pub use schema::{PropertySchema, SchemaDescriptor};
