//! Browser automation engine for JavaScript-heavy sites.
//!
//! Wraps chromiumoxide with the small page-driver contract the audit
//! pipeline consumes: navigate, user-agent override, viewport override,
//! in-page evaluation with JSON marshalling, and full-page screenshots.

pub mod driver;
pub mod engine;
pub mod error;
pub mod page;

pub use driver::PageDriver;
pub use engine::BrowserEngine;
pub use error::{BrowserError, Result};
pub use page::AuditPage;
