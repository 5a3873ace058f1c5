use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

use folio::app::gallery::ViewMode;
use folio::content::SourceKind;
use folio::util::config::{AppConfig, SourceKindConfig};

fn load(toml: &str) -> AppConfig {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(toml.as_bytes()).unwrap();
    AppConfig::load(Some(f.path())).unwrap()
}

#[test]
fn test_load_full_config() {
    let config = load(
        r#"
[source]
kind = "static"
api_url = "https://photos.example.com/api"
timeout_secs = 3
document = "portfolio.json"

[gallery]
per_page = 24
view_mode = "list"

[carousel]
interval_ms = 8000

[contact]
simulated_delay_ms = 200
error_dismiss_secs = 9

[cache]
ttl_secs = 60

[ui]
nav_width_percent = 40
"#,
    );

    assert_eq!(config.source.kind, SourceKindConfig::Static);
    assert_eq!(config.source.api_url, "https://photos.example.com/api");
    assert_eq!(config.source.timeout_secs, 3);
    assert_eq!(config.source.document.as_deref(), Some("portfolio.json"));
    assert_eq!(config.gallery.per_page, 24);
    assert_eq!(config.gallery.view_mode, ViewMode::List);
    assert_eq!(config.carousel.interval_ms, 8000);
    assert_eq!(config.contact.simulated_delay_ms, 200);
    assert_eq!(config.contact.error_dismiss_secs, 9);
    assert_eq!(config.cache.ttl_secs, 60);
    assert_eq!(config.ui.nav_width_percent, 40);
    assert_eq!(config.source_kind(), SourceKind::Static);
}

#[test]
fn test_load_partial_config_uses_defaults() {
    let config = load(
        r#"
[gallery]
view_mode = "list"
"#,
    );

    assert_eq!(config.source.kind, SourceKindConfig::Api);
    assert_eq!(config.source.api_url, "http://localhost:8001/api");
    assert_eq!(config.source.timeout_secs, 10);
    assert!(config.source.document.is_none());
    assert_eq!(config.gallery.per_page, 50);
    assert_eq!(config.carousel.interval_ms, 5000);
    assert_eq!(config.contact.simulated_delay_ms, 1500);
    assert_eq!(config.contact.error_dismiss_secs, 5);
    assert_eq!(config.cache.ttl_secs, 300);
    assert_eq!(config.ui.nav_width_percent, 30);
}

#[test]
fn test_empty_config() {
    let config = load("");
    assert_eq!(config.source_kind(), SourceKind::Api);
    assert_eq!(config.gallery.view_mode, ViewMode::Grid);
}

#[test]
fn test_missing_config_file_is_an_error() {
    let result = AppConfig::load(Some(std::path::Path::new("/nonexistent/folio.toml")));
    assert!(result.is_err());
}

#[test]
fn test_invalid_toml_is_an_error() {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(b"[source\nkind = ").unwrap();
    assert!(AppConfig::load(Some(f.path())).is_err());
}

#[test]
fn test_start_category_setting() {
    let config = load(
        r#"
[ui]
start_category = "weddings"
"#,
    );
    assert_eq!(config.ui.start_category.as_deref(), Some("weddings"));
    assert_eq!(
        config.state_settings().start_category.as_deref(),
        Some("weddings")
    );

    let blank = load(
        r#"
[ui]
start_category = "  "
"#,
    );
    assert_eq!(blank.state_settings().start_category, None);
    assert_eq!(AppConfig::default().state_settings().start_category, None);
}

#[test]
fn test_static_override_wins_over_api_url() {
    let mut config = AppConfig::default();
    config.apply_overrides(
        Some("site/data.json".to_string()),
        Some("http://other:9000/api".to_string()),
    );
    assert_eq!(config.source_kind(), SourceKind::Static);
    assert_eq!(config.source.document.as_deref(), Some("site/data.json"));
    assert_eq!(config.source.api_url, "http://other:9000/api");
}

#[test]
fn test_api_url_override_switches_to_api() {
    let mut config = load(
        r#"
[source]
kind = "static"
document = "data.json"
"#,
    );
    config.apply_overrides(None, Some("http://other:9000/api".to_string()));
    assert_eq!(config.source_kind(), SourceKind::Api);
    assert_eq!(config.source.api_url, "http://other:9000/api");
}

#[test]
fn test_static_source_requires_document() {
    let mut config = AppConfig::default();
    config.source.kind = SourceKindConfig::Static;
    assert!(config.build_source().is_err());
}

#[test]
fn test_build_api_source_rejects_bad_scheme() {
    let mut config = AppConfig::default();
    config.source.api_url = "ftp://example.com/api".to_string();
    assert!(config.build_source().is_err());
}

#[test]
fn test_build_sources() {
    let config = AppConfig::default();
    let source = config.build_source().unwrap();
    assert_eq!(source.kind(), SourceKind::Api);

    let mut config = AppConfig::default();
    config.apply_overrides(Some("data.json".to_string()), None);
    let source = config.build_source().unwrap();
    assert_eq!(source.kind(), SourceKind::Static);
    assert_eq!(source.label(), "data.json");
}

#[test]
fn test_state_settings_are_clamped() {
    let config = load(
        r#"
[gallery]
per_page = 500

[ui]
nav_width_percent = 100
"#,
    );
    let settings = config.state_settings();
    assert_eq!(settings.per_page, 100);
    assert_eq!(settings.nav_width_percent, 90);
    assert_eq!(settings.carousel_interval, Duration::from_millis(5000));
    assert_eq!(settings.error_dismiss, Duration::from_secs(5));
}

#[test]
fn test_cache_dir_override() {
    let config = load(
        r#"
[cache]
dir = "/tmp/folio-cache"
"#,
    );
    assert_eq!(
        config.cache_dir(),
        std::path::PathBuf::from("/tmp/folio-cache")
    );
}
