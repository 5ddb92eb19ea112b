//! HTTP access to the contribution portal
//!
//! One form-encoded POST per report. Failures are returned to the driver,
//! which skips the category; nothing is retried.

use anyhow::{Context, Result};
use insurance_core::driver::{Pacer, ReportSource};
use insurance_core::{FetchError, ReportRequest};
use std::time::Duration;
use tokio::time::sleep;

/// Portal client
pub struct PortalClient {
    client: reqwest::Client,
}

impl PortalClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }
}

impl ReportSource for PortalClient {
    async fn fetch(&self, request: &ReportRequest) -> Result<Vec<u8>, FetchError> {
        tracing::debug!(url = %request.url, period = %request.period, category = %request.category, "requesting report");

        let response = self
            .client
            .post(&request.url)
            .form(&request.form)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(body.to_vec())
    }
}

/// Pacer backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

impl Pacer for TokioPacer {
    async fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            sleep(delay).await;
        }
    }
}
