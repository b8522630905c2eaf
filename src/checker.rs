//! Per-service orchestration: skip handling, one probe, check evaluation

use crate::checks::evaluate_all;
use crate::config::ServiceConfig;
use crate::errors::Result;
use crate::probe::{HttpProbe, ProbeConfig, Prober};
use crate::report::{CheckResult, ServiceResult};
use tracing::{debug, info, warn};

/// Runs the probe-and-evaluate pipeline for one service at a time.
pub struct ServiceChecker {
    prober: Box<dyn Prober>,
}

impl ServiceChecker {
    pub fn new(probe_config: ProbeConfig) -> Result<Self> {
        Ok(Self {
            prober: Box::new(HttpProbe::new(probe_config)?),
        })
    }

    /// Substitute a probe double, used by tests to avoid the network.
    pub fn with_prober(prober: Box<dyn Prober>) -> Self {
        Self { prober }
    }

    /// Check one service and produce its result. Never fails: probe and
    /// evaluation errors are recorded in the result instead.
    pub async fn check_service(&self, service: &ServiceConfig) -> ServiceResult {
        if service.should_skip() {
            let reason = service
                .skip_reason
                .clone()
                .unwrap_or_else(|| "disabled".to_string());
            info!("Skipping service {}: {}", service.id, reason);
            return ServiceResult::skipped(
                &service.id,
                &service.name,
                &service.url,
                Some(reason),
            );
        }

        debug!("Checking service {} at {}", service.id, service.url);
        let mut result = ServiceResult::new(&service.id, &service.name, &service.url);

        match self
            .prober
            .probe(&service.url, service.headers.as_ref())
            .await
        {
            Ok(response) => {
                result.elapsed_ms = Some(response.elapsed_ms);
                result.checks = evaluate_all(&service.checks, &response);
                result.success = Some(result.checks.iter().all(|c| c.passed));
            }
            Err(e) => {
                let message = e.to_string();
                warn!("Probe of service {} failed: {}", service.id, message);
                // The synthetic entry keeps at least one check in every
                // non-skipped result.
                result.checks.push(CheckResult::failed("request", message.clone()));
                result.error = Some(message);
                result.success = Some(false);
            }
        }

        result
    }
}
