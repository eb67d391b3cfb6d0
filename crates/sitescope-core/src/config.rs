//! Configuration management for Sitescope.
//!
//! Provides TOML-based configuration loaded from the working directory
//! with environment variable overrides.

use crate::error::ConfigResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "sitescope.toml";

/// Main audit configuration.
///
/// Loaded from `sitescope.toml` if present; defaults are used otherwise.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Target site settings
    pub target: TargetConfig,
    /// Browser automation settings
    pub browser: BrowserSettings,
    /// Artifact output settings
    pub output: OutputConfig,
}

impl AuditConfig {
    /// Load configuration from `sitescope.toml` in the working directory,
    /// falling back to defaults if the file does not exist.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `SITESCOPE_TARGET_URL`: Override the target URL
    /// - `SITESCOPE_HEADLESS`: Override browser headless mode (true/false)
    /// - `SITESCOPE_OUTPUT_DIR`: Override the artifact output root
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;

        if let Ok(val) = std::env::var("SITESCOPE_TARGET_URL") {
            if !val.is_empty() {
                tracing::debug!("Override target.url from env: {}", val);
                config.target.url = val;
            }
        }

        if let Ok(val) = std::env::var("SITESCOPE_HEADLESS") {
            if let Ok(headless) = val.parse() {
                tracing::debug!("Override browser.headless from env: {}", headless);
                config.browser.headless = headless;
            }
        }

        if let Ok(val) = std::env::var("SITESCOPE_OUTPUT_DIR") {
            if !val.is_empty() {
                tracing::debug!("Override output.root_dir from env: {}", val);
                config.output.root_dir = PathBuf::from(val);
            }
        }

        Ok(config)
    }
}

/// Target site settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// URL the pipeline audits
    pub url: String,
    /// User agent string set once, session-wide, before first navigation
    pub user_agent: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            url: "https://example.com/".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
        }
    }
}

/// Browser automation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Run browser in headless mode
    pub headless: bool,
    /// Primary navigation timeout in seconds
    pub navigation_timeout_secs: u64,
    /// Post-navigation settle delay in milliseconds, before the first
    /// challenge probe
    pub settle_ms: u64,
    /// Challenge-wait budget in seconds
    pub challenge_wait_secs: u64,
    /// Challenge poll interval in milliseconds
    pub challenge_poll_ms: u64,
    /// Per-breakpoint layout stabilization delay in milliseconds
    pub stabilize_ms: u64,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            navigation_timeout_secs: 60,
            settle_ms: 5000,
            challenge_wait_secs: 30,
            challenge_poll_ms: 1000,
            stabilize_ms: 1000,
        }
    }
}

/// Artifact output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root directory for `analysis/` and `screenshots/`
    pub root_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("."),
        }
    }
}
