//! Filesystem sink for audit artifacts.
//!
//! Fixed layout under the configured output root:
//! `screenshots/` for PNG captures, `analysis/` for markdown reports.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Screenshot directory name under the output root.
pub const SCREENSHOTS_DIR: &str = "screenshots";

/// Report directory name under the output root.
pub const ANALYSIS_DIR: &str = "analysis";

/// Durable storage for screenshots and reports.
#[derive(Debug, Clone)]
pub struct ReportSink {
    root: PathBuf,
}

impl ReportSink {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The screenshots directory path.
    #[must_use]
    pub fn screenshots_dir(&self) -> PathBuf {
        self.root.join(SCREENSHOTS_DIR)
    }

    /// The analysis reports directory path.
    #[must_use]
    pub fn analysis_dir(&self) -> PathBuf {
        self.root.join(ANALYSIS_DIR)
    }

    /// Create both artifact directories, recursively and idempotently.
    pub fn ensure_layout(&self) -> std::io::Result<()> {
        fs::create_dir_all(self.screenshots_dir())?;
        fs::create_dir_all(self.analysis_dir())?;
        debug!("Artifact layout ready under {}", self.root.display());
        Ok(())
    }

    /// Write one report under `analysis/`, returning its full path.
    pub fn write_report(&self, file_name: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.analysis_dir().join(file_name);
        fs::write(&path, contents)?;
        Ok(path)
    }
}

impl AsRef<Path> for ReportSink {
    fn as_ref(&self) -> &Path {
        &self.root
    }
}
