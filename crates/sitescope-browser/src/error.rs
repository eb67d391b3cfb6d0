use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BrowserError>;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("chromium error: {0}")]
    Chromium(String),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("navigation timed out after {0:?}")]
    NavigationTimeout(Duration),

    #[error("evaluation failed: {0}")]
    Evaluate(String),

    #[error("screenshot failed: {0}")]
    Screenshot(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
