use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use folio::app;
use folio::cache::SnapshotStore;
use folio::content::SourceKind;
use folio::util::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Photography portfolio in the terminal")]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read all content from a JSON document (path or URL) instead of the API
    #[arg(long = "static", value_name = "PATH|URL")]
    static_document: Option<String>,

    /// Base URL of the portfolio API
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Open on a category page, by id
    #[arg(long, value_name = "ID")]
    category: Option<String>,

    /// Disable disk cache
    #[arg(long)]
    no_cache: bool,

    /// Discard cached responses on startup
    #[arg(short, long)]
    refresh: bool,

    /// Enable debug logging to file
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_overrides(cli.static_document, cli.api_url);
    if let Some(id) = cli.category {
        config.ui.start_category = Some(id);
    }

    // Setup logging
    let _guard = setup_logging(&config, cli.debug)?;

    info!("folio starting");

    let source = match config.build_source() {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Configuration error: {e:#}");
            std::process::exit(1);
        }
    };

    info!(source = %source.label(), "Content source ready");

    // Snapshots only make sense for API responses
    let snapshots = if cli.no_cache || config.source_kind() == SourceKind::Static {
        None
    } else {
        let store = SnapshotStore::new(config.cache_dir(), config.cache.ttl_secs);
        if cli.refresh {
            store.clear()?;
        }
        Some(store)
    };

    // Run the TUI event loop
    app::event_loop::run(source, config.state_settings(), snapshots).await
}

fn setup_logging(
    config: &AppConfig,
    debug: bool,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    if !debug {
        return Ok(None);
    }

    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "folio.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter("folio=debug")
        .with_ansi(false)
        .init();

    Ok(Some(guard))
}
