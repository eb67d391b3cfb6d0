//! Sitescope Core - Foundation crate for the Sitescope site auditor.
//!
//! This crate provides the shared data model, configuration management,
//! and error types that the browser and audit crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with env overrides
//! - [`types`] - The audit data model (`AnalysisSession`, `Breakpoint`,
//!   navigation/tech/content models)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AuditConfig, BrowserSettings, OutputConfig, TargetConfig};
pub use error::{ConfigError, ConfigResult, CoreError, Result};
pub use types::{
    AnalysisSession, Breakpoint, ContentModel, Heading, HeadingLevel, ImageEntry, LinkEntry,
    NavLink, NavigationModel, PageMeta, ScreenshotArtifact, TechCategory, TechStackModel,
};
