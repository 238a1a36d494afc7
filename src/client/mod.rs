//! HTTP client for the analysis backend
//!
//! One outbound request per analysis attempt: `POST <backend_url>` with a
//! JSON body `{"text": ...}`. There is no retry here and none in the caller;
//! a failed attempt settles the session as `Error` and a user-initiated
//! resubmission is the only recovery path.

use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::error::AnalysisError;
use crate::models::Verdict;

/// Request body sent to the analysis backend
#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

/// Client for the external analysis backend
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    client: Client,
}

impl AnalysisClient {
    /// Create a client with the default 30 second timeout
    pub fn new() -> Result<Self, AnalysisError> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a client with a custom request timeout
    ///
    /// The timeout is the only bound on an unresponsive backend; the
    /// coordinator enforces none of its own.
    pub fn with_timeout(timeout: Duration) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AnalysisError::Unreachable)?;

        Ok(Self { client })
    }

    /// Run one analysis attempt against the backend
    ///
    /// # Errors
    ///
    /// * [`AnalysisError::Unreachable`] on transport failure (DNS,
    ///   connection refused, timeout)
    /// * [`AnalysisError::BackendRejected`] on any non-success HTTP status
    /// * [`AnalysisError::MalformedResponse`] when a success body does not
    ///   parse as a [`Verdict`]
    pub async fn analyze(&self, backend_url: &str, text: &str) -> Result<Verdict, AnalysisError> {
        tracing::debug!(
            backend_url = %backend_url,
            text_len = text.chars().count(),
            "Sending analysis request"
        );

        let response = self
            .client
            .post(backend_url)
            .json(&AnalyzeRequest { text })
            .send()
            .await
            .map_err(AnalysisError::Unreachable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::BackendRejected(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(AnalysisError::Unreachable)?;

        serde_json::from_str::<Verdict>(&body)
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))
    }
}
