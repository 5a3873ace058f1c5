use std::time::Duration;

use anyhow::{Context, bail};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::envelope::{Fetched, parse_envelope, parse_payload};
use super::models::ContactSubmission;
use super::request::ResourceRequest;
use crate::error::{PortfolioError, Result};

/// Client for the portfolio REST backend.
#[derive(Clone)]
pub struct PortfolioClient {
    client: Client,
    base_url: String,
}

impl PortfolioClient {
    pub fn new(api_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let parsed = Url::parse(api_url).with_context(|| format!("Invalid API URL: {api_url}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("API URL must use http or https: {}", api_url);
        }

        let client = Client::builder()
            .user_agent("folio")
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, request: &ResourceRequest) -> Result<Fetched<T>> {
        let url = self.endpoint(&request.path());
        debug!(url = %url, query = ?request.query(), "API request");

        let resp = self
            .client
            .get(&url)
            .query(&request.query())
            .send()
            .await
            .map_err(|e| PortfolioError::RequestFailed(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| PortfolioError::RequestFailed(e.to_string()))?;

        let fetched = parse_payload::<T>(status, &body, "API request failed")
            .map_err(PortfolioError::RequestFailed)?;
        debug!(url = %url, status = %status, "API response");
        Ok(fetched)
    }

    /// Returns the server's confirmation message, if any.
    pub async fn submit_contact(&self, submission: &ContactSubmission) -> Result<Option<String>> {
        let url = self.endpoint("/contact");
        debug!(url = %url, subject = %submission.subject, "Submitting contact form");

        let resp = self
            .client
            .post(&url)
            .json(submission)
            .send()
            .await
            .map_err(|e| PortfolioError::SubmissionFailed(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| PortfolioError::SubmissionFailed(e.to_string()))?;

        let envelope = parse_envelope::<serde_json::Value>(status, &body, "Failed to send message")
            .map_err(PortfolioError::SubmissionFailed)?;
        Ok(envelope.message)
    }
}
