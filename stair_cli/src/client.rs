//! HTTP client for the calculation service.
//!
//! Sends the form as JSON to `POST {base}/api/calculate` and hands the raw
//! status and body to [`interpret_response`]. Connection failures and
//! timeouts are reported as offline; anything else the transport throws is
//! a generic network error.

use std::time::Duration;

use stair_core::config::ServiceConfig;
use stair_core::errors::{StairError, StairResult};
use stair_core::service::{interpret_response, CalculateRequest, CalculateResponse, CALCULATE_PATH};
use tracing::{debug, instrument, warn};

/// Current application version (from Cargo.toml)
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Calculation service endpoint
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ServiceClient {
    /// Build a client for `base_url` with the configured timeout
    pub fn new(base_url: &str, config: &ServiceConfig) -> StairResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(format!("Stairkit/{}", CURRENT_VERSION))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StairError::Network {
                reason: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(ServiceClient {
            http,
            endpoint: endpoint_url(base_url),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit the form and wait for the bill of materials
    #[instrument(skip(self, request), fields(endpoint = %self.endpoint, material = %request.material.code()))]
    pub async fn calculate(&self, request: &CalculateRequest) -> StairResult<CalculateResponse> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        debug!(status, bytes = body.len(), "service answered");

        interpret_response(status, &body)
    }
}

/// Join the base URL and the calculation path without doubling the slash
fn endpoint_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), CALCULATE_PATH)
}

fn transport_error(e: reqwest::Error) -> StairError {
    if e.is_connect() || e.is_timeout() {
        warn!(error = %e, "calculation service unreachable");
        StairError::Offline
    } else {
        StairError::Network { reason: e.to_string() }
    }
}
