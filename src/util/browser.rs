use anyhow::{Context, Result};
use tracing::debug;

/// Show a photo's full-size image with the system's default handler.
pub fn open_url(url: &str) -> Result<()> {
    debug!(url = url, "Opening image");
    open::that(url).with_context(|| format!("Failed to open {url}"))?;
    Ok(())
}
