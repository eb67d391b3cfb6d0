//! Discovery phase: document title, navigation structure, sitemap probe.

use crate::error::Result;
use sitescope_browser::PageDriver;
use sitescope_core::NavigationModel;
use tracing::{debug, info, warn};
use url::Url;

/// Reads the document title. Runs inside this phase, after the
/// challenge wait, so an interstitial title is never recorded.
pub const TITLE_SCRIPT: &str = "document.title";

/// Collects header and footer navigation links in one pass. Text is
/// trimmed; `a.href` yields resolved absolute URLs.
pub const NAV_SCRIPT: &str = r#"(() => {
  const links = (root) => Array.from(root.querySelectorAll('a')).map((a) => ({
    text: a.textContent.trim(),
    href: a.href,
  }));
  const header = document.querySelector('nav, header nav, .navigation, .nav');
  const footer = document.querySelector('footer nav, footer .nav');
  return {
    header: header ? links(header) : [],
    footer: footer ? links(footer) : [],
  };
})()"#;

/// Well-known sitemap path, resolved against the target origin.
pub const SITEMAP_PATH: &str = "/sitemap.xml";

/// Result of the discovery phase.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryResult {
    pub title: String,
    pub navigation: NavigationModel,
    pub sitemap_url: Option<String>,
}

/// Probe script: fetches the sitemap from inside the page so the request
/// rides the session's cookies and user agent, and the primary document
/// is never replaced. Resolves to the HTTP status, or 0 on network error.
#[must_use]
pub fn sitemap_probe_script(sitemap_url: &str) -> String {
    let quoted = serde_json::Value::String(sitemap_url.to_string()).to_string();
    format!("fetch({quoted}).then((r) => r.status).catch(() => 0)")
}

/// Read the document title, extract navigation links, and probe for a
/// sitemap.
///
/// A missing nav container, unreadable title, or failed sitemap probe
/// is a normal empty result, not an error.
pub async fn run(page: &dyn PageDriver, target_url: &str) -> Result<DiscoveryResult> {
    let title = match page.evaluate(TITLE_SCRIPT).await {
        Ok(value) => value.as_str().unwrap_or_default().to_string(),
        Err(e) => {
            warn!("Could not read document title: {}", e);
            String::new()
        }
    };

    let value = page.evaluate(NAV_SCRIPT).await?;
    let navigation: NavigationModel = serde_json::from_value(value)
        .map_err(|e| crate::error::AuditError::Decode(format!("navigation: {e}")))?;

    info!(
        "Discovered {} header and {} footer links",
        navigation.header.len(),
        navigation.footer.len()
    );

    let sitemap_url = probe_sitemap(page, target_url).await;

    Ok(DiscoveryResult {
        title,
        navigation,
        sitemap_url,
    })
}

async fn probe_sitemap(page: &dyn PageDriver, target_url: &str) -> Option<String> {
    let sitemap_url = match Url::parse(target_url).and_then(|u| u.join(SITEMAP_PATH)) {
        Ok(url) => url.to_string(),
        Err(e) => {
            debug!("Cannot resolve sitemap URL against {}: {}", target_url, e);
            return None;
        }
    };

    match page.evaluate(&sitemap_probe_script(&sitemap_url)).await {
        Ok(value) if value.as_i64() == Some(200) => {
            info!("Sitemap found at {}", sitemap_url);
            Some(sitemap_url)
        }
        Ok(value) => {
            debug!(
                "No sitemap at {} (status {})",
                sitemap_url,
                value.as_i64().unwrap_or(0)
            );
            None
        }
        Err(e) => {
            debug!("Sitemap probe failed: {}", e);
            None
        }
    }
}
