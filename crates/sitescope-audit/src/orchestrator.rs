//! Pipeline orchestrator: owns the run lifecycle and phase sequencing.
//!
//! Failure handling is two-tier. Setup steps (browser launch, primary
//! navigation) are fatal and abort the run. Phase failures are scoped:
//! the failing phase leaves its session field empty and the next phase
//! runs against the same loaded page.

use crate::challenge::ChallengeResolver;
use crate::error::Result;
use crate::phases::{self, Phase};
use crate::report;
use crate::sink::ReportSink;
use sitescope_browser::{BrowserEngine, PageDriver};
use sitescope_core::{AnalysisSession, AuditConfig, Breakpoint};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// A configured, runnable audit pipeline.
pub struct AuditPipeline {
    config: AuditConfig,
    catalog: Vec<Breakpoint>,
}

impl AuditPipeline {
    /// Build a pipeline with the default breakpoint catalog.
    #[must_use]
    pub fn new(config: AuditConfig) -> Self {
        Self {
            config,
            catalog: Breakpoint::default_catalog(),
        }
    }

    /// Replace the breakpoint catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: Vec<Breakpoint>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Run the full audit: launch, navigate, resolve any challenge, run
    /// the four phases, write reports.
    ///
    /// The browser is torn down on every exit path, including phase
    /// setup failures.
    ///
    /// # Errors
    /// Returns error if the artifact layout cannot be created, the
    /// browser fails to launch, or the primary navigation fails.
    pub async fn run(&self) -> Result<AnalysisSession> {
        let sink = ReportSink::new(self.config.output.root_dir.clone());
        sink.ensure_layout()?;

        info!("Launching browser (headless: {})", self.config.browser.headless);
        let engine = BrowserEngine::launch(&self.config.browser).await?;

        let outcome = self.run_with_engine(&engine, &sink).await;

        // Teardown happens before the error (if any) propagates.
        engine.close().await;
        let session = outcome?;

        report::write_reports(&session, &sink);
        info!("Audit of {} complete", session.target_url);
        Ok(session)
    }

    async fn run_with_engine(
        &self,
        engine: &BrowserEngine,
        sink: &ReportSink,
    ) -> Result<AnalysisSession> {
        let page = engine.new_page().await?;

        page.set_user_agent(&self.config.target.user_agent).await?;

        info!("Navigating to {}", self.config.target.url);
        page.navigate(&self.config.target.url).await?;

        let mut session = AnalysisSession::new(self.config.target.url.clone());

        let settle = Duration::from_millis(self.config.browser.settle_ms);
        debug!("Settling for {:?} before challenge probe", settle);
        tokio::time::sleep(settle).await;

        ChallengeResolver::from_settings(&self.config.browser)
            .resolve(&page)
            .await;

        self.run_phases(&page, &mut session, &sink.screenshots_dir())
            .await;

        Ok(session)
    }

    /// Run the four phases in order against an already-loaded page.
    ///
    /// Each phase fills exactly one session field; a failing phase is
    /// logged and its field left default-empty.
    pub async fn run_phases(
        &self,
        page: &dyn PageDriver,
        session: &mut AnalysisSession,
        screenshots_dir: &Path,
    ) {
        match phases::discovery::run(page, &session.target_url).await {
            Ok(result) => {
                session.title = result.title;
                session.navigation = result.navigation;
                session.sitemap_url = result.sitemap_url;
            }
            Err(e) => error!("{} phase failed: {}", Phase::Discovery, e),
        }

        let stabilize = Duration::from_millis(self.config.browser.stabilize_ms);
        session.screenshots =
            phases::visual::run(page, &self.catalog, screenshots_dir, stabilize).await;
        if session.screenshots.len() < self.catalog.len() {
            warn!(
                "{} phase captured {} of {} breakpoints",
                Phase::VisualCapture,
                session.screenshots.len(),
                self.catalog.len()
            );
        }

        match phases::tech::run(page).await {
            Ok(tech) => session.tech_stack = tech,
            Err(e) => error!("{} phase failed: {}", Phase::TechnologyDetection, e),
        }

        match phases::content::run(page).await {
            Ok(content) => session.content = content,
            Err(e) => error!("{} phase failed: {}", Phase::ContentExtraction, e),
        }
    }
}
