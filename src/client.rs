//! HTTP client for the journal API.
//!
//! Configuration is via environment variables:
//! - `VIBE_JOURNAL_URL` - Base URL (default: `http://localhost:17020/api/v1`)
//! - `VIBE_JOURNAL_CLIENT_TIMEOUT_SECS` - Request timeout (default: 15)

use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::api::ErrorResponse;
use crate::insight::{fallback_insight, parse_insight, ParseError};
use crate::models::*;

/// Default URL for local development.
pub const DEFAULT_URL: &str = "http://localhost:17020/api/v1";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    Server(String),

    /// The service reached the generator but got nothing usable back.
    #[error("insight generation failed: {0}")]
    Generation(String),

    #[error("insight generation failed: {0}")]
    Parse(#[from] ParseError),
}

#[derive(Debug, Clone)]
pub struct JournalClient {
    base_url: String,
    client: Client,
}

impl JournalClient {
    /// Create client from environment variables.
    pub fn from_env() -> Result<Self, ClientError> {
        let base_url =
            std::env::var("VIBE_JOURNAL_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        let timeout = std::env::var("VIBE_JOURNAL_CLIENT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        Self::new(base_url, timeout)
    }

    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            base_url: base_url.into(),
            client: Client::builder().timeout(timeout).build()?,
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        self.client.request(method, &url)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            match status {
                StatusCode::BAD_REQUEST => Err(ClientError::BadRequest(message)),
                _ => Err(ClientError::Server(format!("{}: {}", status, message))),
            }
        }
    }

    // ============================================================
    // Insights
    // ============================================================

    /// Request an insight for a check-in.
    ///
    /// Transport failures, error statuses and empty bodies fall back to the
    /// local table without retrying. A `502` (the service got malformed text
    /// from its generator) or an unparseable body is returned as an error.
    pub async fn generate_insight(&self, request: &InsightRequest) -> Result<Insight, ClientError> {
        let fallback = || -> Result<Insight, ClientError> {
            tracing::info!("Using local fallback insight");
            Ok(fallback_insight(&request.check_in))
        };

        let response = match self.request(Method::POST, "/insights").json(request).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Insight service unreachable");
                return fallback();
            }
        };

        let status = response.status();
        if status == StatusCode::BAD_GATEWAY {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| e.details.or(Some(e.error)))
                .unwrap_or(body);
            return Err(ClientError::Generation(detail));
        }
        if !status.is_success() {
            tracing::warn!(%status, "Insight service returned an error");
            return fallback();
        }

        let text = match response.text().await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                tracing::warn!("Insight service returned an empty body");
                return fallback();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read insight response");
                return fallback();
            }
        };

        Ok(parse_insight(&text)?)
    }

    // ============================================================
    // History
    // ============================================================

    /// Persist a completed check-in. One attempt; failures are logged and dropped.
    pub async fn save_scan(&self, user: &UserIdentity, check_in: &CheckIn, insight: &Insight) {
        let input = SaveScanInput::from_parts(user.as_str(), check_in, insight);

        let result = match self.request(Method::POST, "/history").json(&input).send().await {
            Ok(response) => self.handle_response::<SaveScanResponse>(response).await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(saved) => tracing::debug!(id = %saved.scan.id, "Saved scan"),
            Err(e) => tracing::error!(error = %e, "Failed to save scan"),
        }
    }

    /// All records for `user`, newest first.
    ///
    /// An empty list means no history; an error means the history could not
    /// be read.
    pub async fn list_scans(&self, user: &UserIdentity) -> Result<Vec<HistoryRecord>, ClientError> {
        let response = self
            .request(Method::GET, "/history")
            .query(&[("userId", user.as_str())])
            .send()
            .await?;
        let list: ScanListResponse = self.handle_response(response).await?;
        Ok(list.scans)
    }

    /// Delete all records for `user`. Returns how many were removed.
    pub async fn clear_scans(&self, user: &UserIdentity) -> Result<usize, ClientError> {
        let response = self
            .request(Method::DELETE, "/history")
            .query(&[("userId", user.as_str())])
            .send()
            .await?;
        let cleared: ClearScansResponse = self.handle_response(response).await?;
        Ok(cleared.deleted)
    }
}
