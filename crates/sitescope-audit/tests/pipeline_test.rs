//! Pipeline tests against a scripted page driver.
//!
//! The fake dispatches on the exact scripts the phases emit, so these
//! tests exercise the real orchestration and report rendering without a
//! browser process.

use async_trait::async_trait;
use sitescope_audit::orchestrator::AuditPipeline;
use sitescope_audit::phases::content::CONTENT_SCRIPT;
use sitescope_audit::phases::discovery::{NAV_SCRIPT, TITLE_SCRIPT};
use sitescope_audit::phases::tech::TECH_SIGNALS;
use sitescope_audit::report;
use sitescope_browser::error::{BrowserError, Result as BrowserResult};
use sitescope_browser::PageDriver;
use sitescope_core::{AnalysisSession, AuditConfig, Breakpoint};
use std::path::Path;
use tempfile::TempDir;

/// Scripted driver: fixed answers keyed by the script being evaluated.
#[derive(Default)]
struct FakePage {
    title: &'static str,
    nav: serde_json::Value,
    sitemap_status: i64,
    content: serde_json::Value,
    detected: Vec<&'static str>,
    fail_content: bool,
    fail_viewport_width: Option<u32>,
}

impl FakePage {
    fn with_defaults() -> Self {
        Self {
            title: "Example Domain",
            nav: serde_json::json!({"header": [], "footer": []}),
            sitemap_status: 404,
            content: serde_json::json!({
                "headings": [], "links": [], "images": [],
                "meta": {"title": "", "description": null, "viewport": null},
            }),
            ..Self::default()
        }
    }
}

#[async_trait]
impl PageDriver for FakePage {
    async fn navigate(&self, _url: &str) -> BrowserResult<()> {
        Ok(())
    }

    async fn set_user_agent(&self, _user_agent: &str) -> BrowserResult<()> {
        Ok(())
    }

    async fn set_viewport(&self, width: u32, _height: u32) -> BrowserResult<()> {
        if self.fail_viewport_width == Some(width) {
            return Err(BrowserError::Chromium("viewport override rejected".into()));
        }
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> BrowserResult<serde_json::Value> {
        if script == TITLE_SCRIPT {
            return Ok(serde_json::json!(self.title));
        }
        if script == NAV_SCRIPT {
            return Ok(self.nav.clone());
        }
        if script.starts_with("fetch(") {
            return Ok(serde_json::json!(self.sitemap_status));
        }
        if script == CONTENT_SCRIPT {
            if self.fail_content {
                return Err(BrowserError::Evaluate("execution context destroyed".into()));
            }
            return Ok(self.content.clone());
        }
        if let Some(signal) = TECH_SIGNALS.iter().find(|s| s.probe == script) {
            return Ok(serde_json::json!(self.detected.contains(&signal.name)));
        }
        panic!("unexpected script: {script}");
    }

    async fn screenshot_to(&self, path: &Path) -> BrowserResult<()> {
        std::fs::write(path, b"png").map_err(BrowserError::Io)?;
        Ok(())
    }
}

fn small_catalog() -> Vec<Breakpoint> {
    vec![
        Breakpoint::new("mobile", 320, 568).unwrap(),
        Breakpoint::new("tablet", 768, 1024).unwrap(),
        Breakpoint::new("desktop", 1280, 720).unwrap(),
    ]
}

fn run_session() -> AnalysisSession {
    AnalysisSession::new("https://example.com/")
}

#[tokio::test]
async fn test_full_phase_sequence_fills_session() {
    let mut page = FakePage::with_defaults();
    page.nav = serde_json::json!({
        "header": [
            {"text": "Home", "href": "https://example.com/"},
            {"text": "Pricing", "href": "https://example.com/pricing"},
        ],
        "footer": [],
    });
    page.content = serde_json::json!({
        "headings": [
            {"level": "H1", "text": "Welcome"},
            {"level": "H1", "text": "Also welcome"},
            {"level": "H2", "text": "Features"},
        ],
        "links": [{"text": "Docs", "href": "https://example.com/docs"}],
        "images": (0..15).map(|i| serde_json::json!({
            "src": format!("https://example.com/img/{i}.png"),
            "alt": "", "width": 10, "height": 10,
        })).collect::<Vec<_>>(),
        "meta": {"title": "Example", "description": null, "viewport": null},
    });
    page.detected = vec!["React"];

    let tmp = TempDir::new().unwrap();
    let pipeline = AuditPipeline::new(fast_config()).with_catalog(small_catalog());
    let mut session = run_session();

    pipeline.run_phases(&page, &mut session, tmp.path()).await;

    assert_eq!(session.title, "Example Domain");
    assert_eq!(session.navigation.header.len(), 2);
    assert!(session.navigation.footer.is_empty());
    assert!(session.sitemap_url.is_none());
    assert_eq!(session.tech_stack.frameworks, vec!["React"]);
    assert_eq!(session.content.headings.len(), 3);
    assert_eq!(session.content.images.len(), 15);
    assert_eq!(session.screenshots.len(), 3);

    // Reports over the same session.
    let discovery = report::render_discovery(&session);
    assert!(discovery.contains("- [Home](https://example.com/)"));
    assert!(discovery.contains("- [Pricing](https://example.com/pricing)"));
    assert!(discovery.contains("### Footer Navigation\nNot found\n"));
    assert!(discovery.contains("## Sitemap\nNot found\n"));

    let content = report::render_content(&session);
    assert!(content.contains("### H1 Headings\n- Welcome\n- Also welcome\n"));
    assert!(content.contains("### H2 Headings\n- Features\n"));
    assert!(content.contains("Total images found: 15"));
    assert!(content.contains("... and 5 more"));
}

#[tokio::test]
async fn test_sitemap_found_records_url() {
    let mut page = FakePage::with_defaults();
    page.sitemap_status = 200;

    let tmp = TempDir::new().unwrap();
    let pipeline = AuditPipeline::new(fast_config()).with_catalog(vec![]);
    let mut session = run_session();

    pipeline.run_phases(&page, &mut session, tmp.path()).await;

    assert_eq!(
        session.sitemap_url.as_deref(),
        Some("https://example.com/sitemap.xml")
    );
}

#[tokio::test]
async fn test_session_title_read_during_discovery() {
    // The title is read as part of discovery, after the challenge wait,
    // so the session never records an interstitial's title.
    let mut page = FakePage::with_defaults();
    page.title = "Acme Corp";

    let tmp = TempDir::new().unwrap();
    let pipeline = AuditPipeline::new(fast_config()).with_catalog(vec![]);
    let mut session = run_session();

    pipeline.run_phases(&page, &mut session, tmp.path()).await;

    assert_eq!(session.title, "Acme Corp");

    let discovery = report::render_discovery(&session);
    assert!(discovery.contains("**Title**: Acme Corp"));
}

#[tokio::test]
async fn test_content_failure_leaves_other_phases_intact() {
    let mut page = FakePage::with_defaults();
    page.fail_content = true;
    page.detected = vec!["React", "Google Analytics"];

    let tmp = TempDir::new().unwrap();
    let pipeline = AuditPipeline::new(fast_config()).with_catalog(vec![]);
    let mut session = run_session();

    pipeline.run_phases(&page, &mut session, tmp.path()).await;

    // Content stays default-empty while the tech result survives.
    assert!(session.content.headings.is_empty());
    assert!(session.content.links.is_empty());
    assert_eq!(session.tech_stack.frameworks, vec!["React"]);
    assert_eq!(session.tech_stack.analytics, vec!["Google Analytics"]);
}

#[tokio::test]
async fn test_failed_breakpoint_is_skipped_not_fatal() {
    let mut page = FakePage::with_defaults();
    page.fail_viewport_width = Some(768);

    let tmp = TempDir::new().unwrap();
    let pipeline = AuditPipeline::new(fast_config()).with_catalog(small_catalog());
    let mut session = run_session();

    pipeline.run_phases(&page, &mut session, tmp.path()).await;

    assert_eq!(session.screenshots.len(), 2);
    assert_eq!(session.screenshots[0].breakpoint_name, "mobile");
    assert_eq!(session.screenshots[1].breakpoint_name, "desktop");
    assert!(tmp.path().join("mobile-320x568.png").is_file());
    assert!(!tmp.path().join("tablet-768x1024.png").exists());
    assert!(tmp.path().join("desktop-1280x720.png").is_file());
}

#[tokio::test]
async fn test_reports_are_deterministic_for_same_session() {
    let mut page = FakePage::with_defaults();
    page.detected = vec!["jQuery"];

    let tmp = TempDir::new().unwrap();
    let pipeline = AuditPipeline::new(fast_config()).with_catalog(vec![]);
    let mut session = run_session();
    pipeline.run_phases(&page, &mut session, tmp.path()).await;

    assert_eq!(
        report::render_discovery(&session),
        report::render_discovery(&session)
    );
    assert_eq!(
        report::render_content(&session),
        report::render_content(&session)
    );
}

fn fast_config() -> AuditConfig {
    let mut config = AuditConfig::default();
    config.browser.settle_ms = 0;
    config.browser.stabilize_ms = 0;
    config.browser.challenge_wait_secs = 0;
    config
}
