//! Audit pipeline: discovery, visual capture, technology detection, and
//! content extraction against a single target site, with markdown
//! reports as the output.
//!
//! The pipeline drives a page through the [`sitescope_browser::PageDriver`]
//! seam, so every phase is testable against a scripted driver without a
//! browser process.

pub mod challenge;
pub mod error;
pub mod orchestrator;
pub mod phases;
pub mod report;
pub mod sink;

pub use challenge::{ChallengeOutcome, ChallengeResolver};
pub use error::{AuditError, Result};
pub use orchestrator::AuditPipeline;
pub use sink::ReportSink;
