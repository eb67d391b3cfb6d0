use crate::error::{BrowserError, Result};
use crate::page::AuditPage;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures_util::stream::StreamExt;
use sitescope_core::BrowserSettings;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Owns the Chromium process and its CDP event handler task.
///
/// One engine per audit run. [`BrowserEngine::close`] must be called on
/// every exit path so the browser process is torn down even when a phase
/// fails.
pub struct BrowserEngine {
    browser: Browser,
    handler_task: JoinHandle<()>,
    navigation_timeout: Duration,
}

impl BrowserEngine {
    /// Launch a Chromium instance with the given settings.
    ///
    /// # Errors
    /// Returns error if no browser executable can be found or the process
    /// fails to start.
    pub async fn launch(settings: &BrowserSettings) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-blink-features=AutomationControlled");
        if !settings.headless {
            builder = builder.with_head();
        }
        let config = builder
            .build()
            .map_err(BrowserError::Chromium)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;

        // Drive the CDP event stream for the lifetime of the engine.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("CDP handler error: {}", e);
                }
            }
        });

        Ok(Self {
            browser,
            handler_task,
            navigation_timeout: Duration::from_secs(settings.navigation_timeout_secs),
        })
    }

    /// Open a new blank page bound to this engine's navigation timeout.
    pub async fn new_page(&self) -> Result<AuditPage> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;

        Ok(AuditPage::new(page, self.navigation_timeout))
    }

    /// Shut down the browser process and the handler task.
    ///
    /// A close error is logged rather than propagated; the process is
    /// going away either way.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("browser close error (non-fatal): {}", e);
        }
        self.handler_task.abort();
    }
}
