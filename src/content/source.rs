use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::info;

use super::client::PortfolioClient;
use super::document::ContentDocument;
use super::envelope::Fetched;
use super::models::ContactSubmission;
use super::request::ResourceRequest;
use crate::error::{PortfolioError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Api,
    Static,
}

/// Where content comes from and where contact submissions go.
#[derive(Clone)]
pub enum ContentSource {
    Api(PortfolioClient),
    Static {
        location: String,
        http: Client,
        submit_delay: Duration,
    },
}

impl ContentSource {
    pub fn api(api_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self::Api(PortfolioClient::new(api_url, timeout)?))
    }

    pub fn static_document(location: &str, submit_delay: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent("folio")
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self::Static {
            location: location.to_string(),
            http,
            submit_delay,
        })
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Api(_) => SourceKind::Api,
            Self::Static { .. } => SourceKind::Static,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Api(client) => client.base_url().to_string(),
            Self::Static { location, .. } => location.clone(),
        }
    }

    pub async fn load_document(&self) -> Result<ContentDocument> {
        match self {
            Self::Static { location, http, .. } => ContentDocument::load(location, http).await,
            Self::Api(_) => Err(PortfolioError::RequestFailed(
                "The API source has no content document".to_string(),
            )),
        }
    }

    pub async fn fetch<T: DeserializeOwned>(&self, request: &ResourceRequest) -> Result<Fetched<T>> {
        match self {
            Self::Api(client) => client.get(request).await,
            Self::Static { .. } => Err(PortfolioError::RequestFailed(format!(
                "{} is not served by a static document",
                request.path()
            ))),
        }
    }

    /// The static variant has no backend: wait, then accept.
    pub async fn submit_contact(&self, submission: &ContactSubmission) -> Result<Option<String>> {
        match self {
            Self::Api(client) => client.submit_contact(submission).await,
            Self::Static { submit_delay, .. } => {
                tokio::time::sleep(*submit_delay).await;
                info!(subject = %submission.subject, "Contact form accepted (demo mode)");
                Ok(None)
            }
        }
    }
}
