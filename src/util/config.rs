use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app::gallery::ViewMode;
use crate::app::state::StateSettings;
use crate::content::request::{DEFAULT_PER_PAGE, MAX_PER_PAGE};
use crate::content::{ContentSource, SourceKind};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub gallery: GalleryConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKindConfig {
    #[default]
    Api,
    Static,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKindConfig,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Path or URL of the content document, for `kind = "static"`.
    #[serde(default)]
    pub document: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default)]
    pub view_mode: ViewMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    #[serde(default = "default_simulated_delay_ms")]
    pub simulated_delay_ms: u64,
    #[serde(default = "default_error_dismiss")]
    pub error_dismiss_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_nav_width")]
    pub nav_width_percent: u16,
    /// Open this category's page instead of Home.
    #[serde(default)]
    pub start_category: Option<String>,
}

fn default_api_url() -> String {
    "http://localhost:8001/api".to_string()
}
fn default_timeout() -> u64 {
    10
}
fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}
fn default_interval_ms() -> u64 {
    5000
}
fn default_simulated_delay_ms() -> u64 {
    1500
}
fn default_error_dismiss() -> u64 {
    5
}
fn default_cache_ttl() -> u64 {
    300
}
fn default_nav_width() -> u16 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKindConfig::default(),
            api_url: default_api_url(),
            timeout_secs: default_timeout(),
            document: None,
        }
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            view_mode: ViewMode::default(),
        }
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            simulated_delay_ms: default_simulated_delay_ms(),
            error_dismiss_secs: default_error_dismiss(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
            dir: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            nav_width_percent: default_nav_width(),
            start_category: None,
        }
    }
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::read(path);
        }

        // Search candidate paths in order
        let mut candidates = Vec::new();

        // 1. ~/.config/folio/config.toml
        if let Some(home) = std::env::var_os("HOME") {
            candidates.push(PathBuf::from(home).join(".config/folio/config.toml"));
        }

        // 2. Platform-specific path from `directories` crate
        if let Some(proj_dirs) = ProjectDirs::from("", "", "folio") {
            candidates.push(proj_dirs.config_dir().join("config.toml"));
        }

        for config_path in &candidates {
            if config_path.exists() {
                return Self::read(config_path);
            }
        }

        // Fallback to default
        Ok(AppConfig::default())
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content).with_context(|| "Failed to parse config file")
    }

    /// Apply command-line overrides. A static document wins over an API URL.
    pub fn apply_overrides(&mut self, document: Option<String>, api_url: Option<String>) {
        if let Some(url) = api_url {
            self.source.kind = SourceKindConfig::Api;
            self.source.api_url = url;
        }
        if let Some(doc) = document {
            self.source.kind = SourceKindConfig::Static;
            self.source.document = Some(doc);
        }
    }

    pub fn source_kind(&self) -> SourceKind {
        match self.source.kind {
            SourceKindConfig::Api => SourceKind::Api,
            SourceKindConfig::Static => SourceKind::Static,
        }
    }

    pub fn build_source(&self) -> Result<ContentSource> {
        match self.source.kind {
            SourceKindConfig::Api => ContentSource::api(
                &self.source.api_url,
                Duration::from_secs(self.source.timeout_secs),
            ),
            SourceKindConfig::Static => {
                let document = self
                    .source
                    .document
                    .as_deref()
                    .context("A static source needs `document` set to a path or URL")?;
                ContentSource::static_document(
                    document,
                    Duration::from_millis(self.contact.simulated_delay_ms),
                )
            }
        }
    }

    pub fn state_settings(&self) -> StateSettings {
        StateSettings {
            per_page: self.gallery.per_page.clamp(1, MAX_PER_PAGE),
            view_mode: self.gallery.view_mode,
            carousel_interval: Duration::from_millis(self.carousel.interval_ms),
            error_dismiss: Duration::from_secs(self.contact.error_dismiss_secs),
            nav_width_percent: self.ui.nav_width_percent.clamp(10, 90),
            start_category: self
                .ui
                .start_category
                .clone()
                .filter(|id| !id.trim().is_empty()),
        }
    }

    pub fn cache_dir(&self) -> PathBuf {
        if let Some(ref dir) = self.cache.dir {
            return dir.clone();
        }
        if let Some(proj_dirs) = ProjectDirs::from("", "", "folio") {
            return proj_dirs.cache_dir().to_path_buf();
        }
        PathBuf::from(".cache/folio")
    }

    pub fn log_dir(&self) -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from("", "", "folio") {
            return proj_dirs.data_dir().join("logs");
        }
        PathBuf::from(".local/share/folio/logs")
    }
}
