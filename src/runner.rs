//! Run orchestration: sequential service checks and the result artifact

use crate::checker::ServiceChecker;
use crate::config::MonitorConfig;
use crate::errors::{MonitorError, Result};
use crate::report::RunResult;
use std::path::Path;
use tracing::{info, warn};

/// Drives one full pass over the configured services.
pub struct Runner {
    checker: ServiceChecker,
}

impl Runner {
    pub fn new(checker: ServiceChecker) -> Self {
        Self { checker }
    }

    /// Check every service strictly sequentially in declaration order and
    /// assemble the run document. Per-service failures are contained in
    /// their results; this never fails partway through.
    pub async fn run(&self, config: &MonitorConfig) -> RunResult {
        let mut run = RunResult::new(&config.name);

        info!(
            "Starting run {} for '{}' with {} services",
            run.run_id,
            config.name,
            config.services.len()
        );

        for service in &config.services {
            let result = self.checker.check_service(service).await;

            if result.is_skipped() {
                info!(
                    "Service {} skipped ({})",
                    service.id,
                    result.skip_reason.as_deref().unwrap_or("no reason")
                );
            } else if result.success == Some(true) {
                info!(
                    "Service {} passed {} checks in {}ms",
                    service.id,
                    result.checks.len(),
                    result.elapsed_ms.unwrap_or(0)
                );
            } else {
                let failed = result.checks.iter().filter(|c| !c.passed).count();
                warn!(
                    "Service {} failed {} of {} checks",
                    service.id,
                    failed,
                    result.checks.len()
                );
            }

            run.services.push(result);
        }

        info!(
            "Run {} complete: {}",
            run.run_id,
            if run.all_passed() { "all services healthy" } else { "failures detected" }
        );

        run
    }
}

/// Persist the run document as pretty-printed JSON, creating parent
/// directories as needed.
pub fn write_report(run: &RunResult, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                MonitorError::Report(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }
    }

    let serialized = serde_json::to_string_pretty(run)?;
    std::fs::write(path, serialized)
        .map_err(|e| MonitorError::Report(format!("cannot write {}: {}", path.display(), e)))?;

    info!("Wrote run report to {}", path.display());
    Ok(())
}
