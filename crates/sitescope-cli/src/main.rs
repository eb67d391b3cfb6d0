//! Sitescope command-line entry point.
//!
//! Loads `sitescope.toml` (with `SITESCOPE_*` environment overrides) and
//! runs the audit pipeline once against the configured target.

use sitescope_audit::AuditPipeline;
use sitescope_core::AuditConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AuditConfig::load_with_env()?;
    info!("Auditing {}", config.target.url);

    let session = AuditPipeline::new(config).run().await?;

    info!(
        "Done: {} header links, {} screenshots, {} headings, {} links, {} images",
        session.navigation.header.len(),
        session.screenshots.len(),
        session.content.headings.len(),
        session.content.links.len(),
        session.content.images.len()
    );

    Ok(())
}
