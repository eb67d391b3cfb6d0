//! Phase executors.
//!
//! Each phase is an async function over a [`sitescope_browser::PageDriver`]
//! returning its own partial model. Phases never abort each other: the
//! orchestrator maps a phase error to the default-empty model for that
//! session field and moves on.

pub mod content;
pub mod discovery;
pub mod tech;
pub mod visual;

use std::fmt;

/// Identity of a pipeline phase, used in failure logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Discovery,
    VisualCapture,
    TechnologyDetection,
    ContentExtraction,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Discovery => "discovery",
            Self::VisualCapture => "visual-capture",
            Self::TechnologyDetection => "technology-detection",
            Self::ContentExtraction => "content-extraction",
        };
        write!(f, "{s}")
    }
}
