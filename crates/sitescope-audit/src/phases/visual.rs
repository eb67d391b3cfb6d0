//! Visual capture phase: one full-page screenshot per breakpoint.

use sitescope_browser::PageDriver;
use sitescope_core::{Breakpoint, ScreenshotArtifact};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Capture one screenshot per catalog entry, in catalog order.
///
/// Strictly sequential: the viewport is a shared mutable resource, so a
/// resize mid-capture would corrupt the frame. A failure for one
/// breakpoint is logged and that breakpoint skipped; the loop continues
/// with the rest.
pub async fn run(
    page: &dyn PageDriver,
    catalog: &[Breakpoint],
    screenshots_dir: &Path,
    stabilize: Duration,
) -> Vec<ScreenshotArtifact> {
    let mut artifacts = Vec::with_capacity(catalog.len());

    for breakpoint in catalog {
        info!(
            "Capturing {} ({}x{})",
            breakpoint.name(),
            breakpoint.width,
            breakpoint.height
        );

        if let Err(e) = page.set_viewport(breakpoint.width, breakpoint.height).await {
            warn!("Viewport resize failed for {}: {}", breakpoint.name(), e);
            continue;
        }

        // Let responsive layout and animations settle at the new size.
        tokio::time::sleep(stabilize).await;

        let file_path = screenshots_dir.join(breakpoint.file_name());
        match page.screenshot_to(&file_path).await {
            Ok(()) => artifacts.push(ScreenshotArtifact {
                breakpoint_name: breakpoint.name().to_string(),
                width: breakpoint.width,
                height: breakpoint.height,
                file_path,
            }),
            Err(e) => {
                warn!("Screenshot failed for {}: {}", breakpoint.name(), e);
            }
        }
    }

    artifacts
}
