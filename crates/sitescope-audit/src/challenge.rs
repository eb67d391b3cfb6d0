//! Anti-bot challenge resolver.
//!
//! Some targets serve an interstitial challenge page before real content.
//! The resolver probes for the challenge DOM marker and, when present,
//! polls until the marker clears or a bounded budget runs out. A timeout
//! is degraded-but-continuing: downstream phases may still extract
//! partial or cached content, so the pipeline proceeds either way.

use sitescope_browser::PageDriver;
use sitescope_core::BrowserSettings;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Probe for the interstitial marker. Evaluates to `true` while the
/// challenge page is being shown.
pub const CHALLENGE_PROBE: &str = "!!document.querySelector('#challenge-error-text')";

/// Terminal state of one challenge wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeOutcome {
    /// No indicator, or the indicator cleared within the budget.
    Resolved,
    /// Indicator still present when the budget ran out. Not fatal.
    TimedOut,
}

/// Bounded-time polling state machine for challenge interstitials.
#[derive(Debug, Clone)]
pub struct ChallengeResolver {
    budget: Duration,
    poll_interval: Duration,
}

impl ChallengeResolver {
    #[must_use]
    pub fn new(budget: Duration, poll_interval: Duration) -> Self {
        Self {
            budget,
            poll_interval,
        }
    }

    #[must_use]
    pub fn from_settings(settings: &BrowserSettings) -> Self {
        Self::new(
            Duration::from_secs(settings.challenge_wait_secs),
            Duration::from_millis(settings.challenge_poll_ms),
        )
    }

    /// Wait out a challenge interstitial if one is showing.
    ///
    /// A page with no indicator resolves immediately without polling.
    /// A probe evaluation error is treated as indicator-absent: the page
    /// is reachable enough to evaluate against, or later phases will
    /// surface the real failure themselves.
    pub async fn resolve(&self, page: &dyn PageDriver) -> ChallengeOutcome {
        if !self.indicator_present(page).await {
            debug!("No challenge indicator found");
            return ChallengeOutcome::Resolved;
        }

        info!(
            "Challenge indicator detected, waiting up to {:?} for resolution",
            self.budget
        );
        let deadline = Instant::now() + self.budget;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                warn!(
                    "Challenge still present after {:?}, proceeding anyway",
                    self.budget
                );
                return ChallengeOutcome::TimedOut;
            }

            tokio::time::sleep(self.poll_interval.min(remaining)).await;

            if !self.indicator_present(page).await {
                info!("Challenge resolved");
                return ChallengeOutcome::Resolved;
            }
        }
    }

    async fn indicator_present(&self, page: &dyn PageDriver) -> bool {
        match page.evaluate(CHALLENGE_PROBE).await {
            Ok(value) => value.as_bool().unwrap_or(false),
            Err(e) => {
                warn!("Challenge probe failed ({}), treating as absent", e);
                false
            }
        }
    }
}
