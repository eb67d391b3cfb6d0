//! Content extraction phase: full inventory of the loaded document.

use crate::error::{AuditError, Result};
use sitescope_browser::PageDriver;
use sitescope_core::ContentModel;
use tracing::info;

/// Extracts headings h1-h6, anchors, images, and head metadata in
/// document order. Nothing is truncated here; display-side truncation
/// belongs to the report writer.
pub const CONTENT_SCRIPT: &str = r#"(() => {
  return {
    headings: Array.from(document.querySelectorAll('h1, h2, h3, h4, h5, h6')).map((h) => ({
      level: h.tagName,
      text: h.textContent.trim(),
    })),
    links: Array.from(document.querySelectorAll('a')).map((a) => ({
      text: a.textContent.trim(),
      href: a.href,
    })),
    images: Array.from(document.querySelectorAll('img')).map((img) => ({
      src: img.src,
      alt: img.alt,
      width: img.naturalWidth,
      height: img.naturalHeight,
    })),
    meta: {
      title: document.title,
      description: document.querySelector('meta[name="description"]')?.content ?? null,
      viewport: document.querySelector('meta[name="viewport"]')?.content ?? null,
    },
  };
})()"#;

/// Run the content inventory script and deserialize the result.
pub async fn run(page: &dyn PageDriver) -> Result<ContentModel> {
    let value = page.evaluate(CONTENT_SCRIPT).await?;
    let content: ContentModel =
        serde_json::from_value(value).map_err(|e| AuditError::Decode(format!("content: {e}")))?;

    info!(
        "Extracted {} headings, {} links, {} images",
        content.headings.len(),
        content.links.len(),
        content.images.len()
    );

    Ok(content)
}
