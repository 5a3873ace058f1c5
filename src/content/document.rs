use indexmap::IndexMap;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::models::{Category, Photo, Photographer, Service, Testimonial};
use crate::error::{PortfolioError, Result};

/// Photos keyed by category id, in document order.
pub type PhotoIndex = IndexMap<String, Vec<Photo>>;

/// The single JSON document behind the static variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentDocument {
    #[serde(default)]
    pub photographer: Option<Photographer>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub photos: PhotoIndex,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    #[serde(default)]
    pub services: Vec<Service>,
}

impl ContentDocument {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| PortfolioError::RequestFailed(format!("Invalid content document: {e}")))
    }

    /// Load from a local path or an `http(s)://` URL.
    pub async fn load(location: &str, http: &Client) -> Result<Self> {
        debug!(location = location, "Loading content document");

        let text = if location.starts_with("http://") || location.starts_with("https://") {
            let resp = http
                .get(location)
                .send()
                .await
                .map_err(|e| PortfolioError::RequestFailed(e.to_string()))?;
            let status = resp.status();
            if !status.is_success() {
                return Err(PortfolioError::RequestFailed(format!(
                    "Failed to load portfolio data: {status}"
                )));
            }
            resp.text()
                .await
                .map_err(|e| PortfolioError::RequestFailed(e.to_string()))?
        } else {
            tokio::fs::read_to_string(location).await.map_err(|e| {
                PortfolioError::RequestFailed(format!("Failed to read {location}: {e}"))
            })?
        };

        let doc = Self::from_json(&text)?;
        debug!(
            categories = doc.categories.len(),
            photo_groups = doc.photos.len(),
            testimonials = doc.testimonials.len(),
            "Content document loaded"
        );
        Ok(doc)
    }
}
