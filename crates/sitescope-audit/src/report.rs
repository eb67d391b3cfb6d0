//! Report writer: pure transforms from an [`AnalysisSession`] to
//! markdown text, plus the persistence step.
//!
//! Rendering is deterministic: structurally identical sessions produce
//! byte-identical reports. Truncation of long lists happens here, never
//! at extraction time.

use crate::sink::ReportSink;
use sitescope_core::{AnalysisSession, Heading, HeadingLevel, NavLink};
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::{error, info};

/// Discovery report file name. The two-digit prefix encodes phase order
/// and is a stable external contract.
pub const DISCOVERY_REPORT: &str = "01-discovery.md";

/// Content-analysis report file name.
pub const CONTENT_REPORT: &str = "07-content-analysis.md";

/// Maximum image bullets before the list is truncated with a suffix.
const IMAGE_LIST_LIMIT: usize = 10;

/// Render the discovery report: navigation lists, sitemap status,
/// timestamp.
#[must_use]
pub fn render_discovery(session: &AnalysisSession) -> String {
    let mut out = String::new();

    out.push_str("# Discovery Results\n\n");
    let _ = writeln!(out, "**Date**: {}", session.started_at.to_rfc3339());
    let _ = writeln!(out, "**URL**: {}", session.target_url);
    let _ = writeln!(out, "**Title**: {}", session.title);
    out.push('\n');

    out.push_str("## Navigation Structure\n\n");
    out.push_str("### Header Navigation\n");
    out.push_str(&nav_list(&session.navigation.header));
    out.push('\n');
    out.push_str("### Footer Navigation\n");
    out.push_str(&nav_list(&session.navigation.footer));
    out.push('\n');

    out.push_str("## Sitemap\n");
    match &session.sitemap_url {
        Some(url) => {
            let _ = writeln!(out, "Found at: {url}");
        }
        None => out.push_str("Not found\n"),
    }

    out
}

/// Render the content-analysis report: meta block, headings grouped by
/// level, link/image counts, and the first-N image list.
#[must_use]
pub fn render_content(session: &AnalysisSession) -> String {
    let content = &session.content;
    let mut out = String::new();

    out.push_str("# Content Analysis\n\n");

    out.push_str("## Meta Information\n");
    let _ = writeln!(out, "- **Title**: {}", content.meta.title);
    let _ = writeln!(
        out,
        "- **Description**: {}",
        content.meta.description.as_deref().unwrap_or("Not set")
    );
    let _ = writeln!(
        out,
        "- **Viewport**: {}",
        content.meta.viewport.as_deref().unwrap_or("Not set")
    );
    out.push('\n');

    out.push_str("## Heading Structure\n\n");
    for level in [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3] {
        let _ = writeln!(out, "### {level} Headings");
        out.push_str(&heading_list(&content.headings, level));
        out.push('\n');
    }

    out.push_str("## Links\n");
    let _ = writeln!(out, "Total links found: {}", content.links.len());
    out.push('\n');

    out.push_str("## Images\n");
    let _ = writeln!(out, "Total images found: {}", content.images.len());
    for image in content.images.iter().take(IMAGE_LIST_LIMIT) {
        let alt = if image.alt.is_empty() {
            "No alt text"
        } else {
            &image.alt
        };
        let _ = writeln!(out, "- {} ({})", alt, image.src);
    }
    if content.images.len() > IMAGE_LIST_LIMIT {
        let _ = writeln!(
            out,
            "... and {} more",
            content.images.len() - IMAGE_LIST_LIMIT
        );
    }

    out
}

/// Persist both reports, degrading per artifact: a write failure aborts
/// only that artifact, never the others.
pub fn write_reports(session: &AnalysisSession, sink: &ReportSink) -> Vec<PathBuf> {
    let reports = [
        (DISCOVERY_REPORT, render_discovery(session)),
        (CONTENT_REPORT, render_content(session)),
    ];

    let mut written = Vec::new();
    for (name, contents) in reports {
        match sink.write_report(name, &contents) {
            Ok(path) => {
                info!("Wrote {}", path.display());
                written.push(path);
            }
            Err(e) => error!("Failed to write {}: {}", name, e),
        }
    }
    written
}

fn nav_list(links: &[NavLink]) -> String {
    if links.is_empty() {
        return "Not found\n".to_string();
    }
    let mut out = String::new();
    for link in links {
        let _ = writeln!(out, "- [{}]({})", link.text, link.href);
    }
    out
}

fn heading_list(headings: &[Heading], level: HeadingLevel) -> String {
    let mut out = String::new();
    for heading in headings.iter().filter(|h| h.level == level) {
        let _ = writeln!(out, "- {}", heading.text);
    }
    if out.is_empty() {
        out.push_str("None found\n");
    }
    out
}
