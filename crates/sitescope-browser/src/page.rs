use crate::driver::PageDriver;
use crate::error::{BrowserError, Result};
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::page::{Page, ScreenshotParams};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Delay after the load event so late requests land before extraction.
const POST_LOAD_SETTLE: Duration = Duration::from_millis(1000);

/// A chromiumoxide page wrapped with the audit driver contract.
pub struct AuditPage {
    page: Page,
    navigation_timeout: Duration,
}

impl AuditPage {
    pub(crate) fn new(page: Page, navigation_timeout: Duration) -> Self {
        Self {
            page,
            navigation_timeout,
        }
    }
}

#[async_trait::async_trait]
impl PageDriver for AuditPage {
    async fn navigate(&self, url: &str) -> Result<()> {
        debug!("Navigating to {}", url);

        let load = async {
            self.page
                .goto(url)
                .await
                .map_err(|e| BrowserError::Navigation(e.to_string()))?;
            self.page
                .wait_for_navigation()
                .await
                .map_err(|e| BrowserError::Navigation(e.to_string()))?;
            tokio::time::sleep(POST_LOAD_SETTLE).await;
            Ok(())
        };

        tokio::time::timeout(self.navigation_timeout, load)
            .await
            .map_err(|_| BrowserError::NavigationTimeout(self.navigation_timeout))?
    }

    async fn set_user_agent(&self, user_agent: &str) -> Result<()> {
        let params = SetUserAgentOverrideParams::builder()
            .user_agent(user_agent)
            .build()
            .map_err(BrowserError::Chromium)?;

        self.page
            .execute(params)
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;
        Ok(())
    }

    async fn set_viewport(&self, width: u32, height: u32) -> Result<()> {
        let params = SetDeviceMetricsOverrideParams::builder()
            .width(i64::from(width))
            .height(i64::from(height))
            .device_scale_factor(1.0)
            .mobile(false)
            .build()
            .map_err(BrowserError::Chromium)?;

        self.page
            .execute(params)
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> Result<serde_json::Value> {
        let params = EvaluateParams::builder()
            .expression(script)
            .return_by_value(true)
            .await_promise(true)
            .build()
            .map_err(BrowserError::Evaluate)?;

        let result = self
            .page
            .evaluate(params)
            .await
            .map_err(|e| BrowserError::Evaluate(e.to_string()))?;

        Ok(result.value().cloned().unwrap_or(serde_json::Value::Null))
    }

    async fn screenshot_to(&self, path: &Path) -> Result<()> {
        let bytes = self
            .page
            .screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .full_page(true)
                    .build(),
            )
            .await
            .map_err(|e| BrowserError::Screenshot(e.to_string()))?;

        tokio::fs::write(path, &bytes).await?;
        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}
