//! HTTP probe layer: one GET per service, timed and captured

use crate::errors::{MonitorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Probe settings threaded through explicitly so tests can shorten the
/// timeout and override the identifying user-agent.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Hard deadline for the whole request, body included
    pub timeout: Duration,

    /// Default user-agent; per-service headers may override it
    pub user_agent: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(10_000),
            user_agent: format!("endpoint_monitor/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Captured response of a single probe. Produced fresh per request and
/// never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub elapsed_ms: u64,
}

/// Seam for issuing probes, so the service checker can run against a test
/// double without touching the network.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(
        &self,
        url: &str,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<ProbeResult>;
}

/// Real probe backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(config: ProbeConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(MonitorError::Http)?;

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }
}

#[async_trait]
impl Prober for HttpProbe {
    async fn probe(
        &self,
        url: &str,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<ProbeResult> {
        debug!("Probing {}", url);

        let mut request = self.client.get(url);
        if let Some(headers) = headers {
            for (name, value) in headers {
                request = request.header(name.as_str(), value.as_str());
            }
        }

        let start = Instant::now();

        // The client timeout covers send + body read and aborts the
        // in-flight request when it fires.
        let response = request.send().await.map_err(|e| self.request_error(url, e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();

        let body = response
            .text()
            .await
            .map_err(|e| self.request_error(url, e))?;

        let elapsed_ms = start.elapsed().as_millis() as u64;
        debug!("Probe of {} returned {} in {}ms", url, status, elapsed_ms);

        Ok(ProbeResult {
            status,
            headers,
            body,
            elapsed_ms,
        })
    }
}

impl HttpProbe {
    fn request_error(&self, url: &str, err: reqwest::Error) -> MonitorError {
        if err.is_timeout() {
            MonitorError::Request(format!(
                "request to {} timed out after {}ms",
                url,
                self.timeout.as_millis()
            ))
        } else {
            MonitorError::Request(format!("request to {} failed: {}", url, err))
        }
    }
}
