use crate::error::Result;
use std::path::Path;

/// Page operations the audit pipeline needs from a browser.
///
/// The production implementation is [`crate::page::AuditPage`] over a
/// chromiumoxide page; tests drive the pipeline with a scripted fake.
/// Evaluation results are JSON-marshalled values, so scripts must return
/// structurally-cloneable data.
#[async_trait::async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate to a URL and wait for the document to load.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Override the session user agent. Applied before first navigation.
    async fn set_user_agent(&self, user_agent: &str) -> Result<()>;

    /// Override the viewport dimensions.
    async fn set_viewport(&self, width: u32, height: u32) -> Result<()>;

    /// Evaluate a JavaScript expression in the page context and marshal
    /// the result back as a JSON value.
    async fn evaluate(&self, script: &str) -> Result<serde_json::Value>;

    /// Capture a full-page PNG screenshot and persist it at `path`.
    async fn screenshot_to(&self, path: &Path) -> Result<()>;
}
