use anyhow::Context;
use reqwest::{header, Client, Response, StatusCode};
use std::time::Duration;

use crate::error::{DashboardError, Result};
use crate::models::{Application, NewApplication, RecordId};

/// HTTP client for the applications backend.
///
/// Requests are sent once; there is no retry or backoff. Failures are returned
/// as a `DashboardError` and only traced at debug level here; the caller logs them.
pub struct ApplicationsClient {
    /// Shared HTTP client with connection pooling
    client: Client,

    /// Backend base URL without a trailing slash
    base_url: String,
}

impl ApplicationsClient {
    /// Create a new client
    pub fn new(base_url: &str, connect_timeout: u64, request_timeout: u64) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout))
            .timeout(Duration::from_secs(request_timeout))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn applications_url(&self) -> String {
        format!("{}/applications", self.base_url)
    }

    /// `GET /applications`
    pub async fn list_applications(&self) -> Result<Vec<Application>> {
        let url = self.applications_url();
        let response = self.send(self.client.get(&url), &url).await?;
        let response = expect_success(response, &url).await?;
        decode_json(response, &url).await
    }

    /// `PATCH /applications/{id}`; any 2xx counts as rejected
    pub async fn reject_application(&self, id: &RecordId) -> Result<()> {
        let url = format!("{}/{}", self.applications_url(), id);
        let request = self.client.patch(&url).header(header::ACCEPT, "*/*");
        let response = self.send(request, &url).await?;
        expect_success(response, &url).await?;
        Ok(())
    }

    /// `POST /applications`; only `201 Created` is accepted
    pub async fn create_application(&self, payload: &NewApplication) -> Result<Application> {
        let url = self.applications_url();
        let request = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(payload);
        let response = self.send(request, &url).await?;

        let status = response.status();
        if status != StatusCode::CREATED {
            return Err(status_error(response, &url).await);
        }
        decode_json(response, &url).await
    }

    async fn send(&self, request: reqwest::RequestBuilder, url: &str) -> Result<Response> {
        let request = request
            .build()
            .map_err(|e| DashboardError::Internal(anyhow::Error::new(e)))?;
        let method = request.method().clone();

        tracing::debug!(method = %method, url = %url, "Sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                tracing::debug!(status = %response.status(), "Received HTTP response");
                Ok(response)
            }
            Err(e) => {
                let error_kind = classify(&e);
                tracing::debug!(
                    error_kind = error_kind,
                    error = %e,
                    method = %method,
                    url = %url,
                    "HTTP request failed"
                );
                Err(DashboardError::Transport(format!("{} (kind: {})", e, error_kind)))
            }
        }
    }
}

async fn expect_success(response: Response, url: &str) -> Result<Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(status_error(response, url).await)
    }
}

async fn status_error(response: Response, url: &str) -> DashboardError {
    let status = response.status();
    let message = response.text().await.unwrap_or_default();

    tracing::debug!(
        status = status.as_u16(),
        url = %url,
        response_body = %message,
        "Backend rejected the request"
    );

    DashboardError::Status {
        status: status.as_u16(),
        message,
    }
}

async fn decode_json<T: serde::de::DeserializeOwned>(response: Response, url: &str) -> Result<T> {
    let body = response.text().await.map_err(|e| {
        tracing::debug!(error = %e, url = %url, "Failed to read response body");
        DashboardError::Transport(e.to_string())
    })?;

    serde_json::from_str(&body).map_err(|e| {
        tracing::debug!(error = %e, url = %url, "Failed to decode response body");
        DashboardError::Decode(e.to_string())
    })
}

/// Categorize a transport error for debugging
fn classify(e: &reqwest::Error) -> &'static str {
    if e.is_timeout() {
        "timeout"
    } else if e.is_connect() {
        "connection_failed"
    } else if e.is_request() {
        "request_error"
    } else if e.is_body() {
        "body_error"
    } else if e.is_decode() {
        "decode_error"
    } else {
        "unknown"
    }
}
