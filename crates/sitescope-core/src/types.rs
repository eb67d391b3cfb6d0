//! Shared data model for a single audit run.
//!
//! An [`AnalysisSession`] is created once per run; each pipeline phase
//! fills in exactly one of its fields. Fields are independently optional:
//! a failed phase leaves its field at the default-empty value and must not
//! disturb any other field.

use crate::error::CoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

/// A single navigation link, with trimmed text and an absolute href.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    /// Trimmed visible text of the link
    pub text: String,
    /// Absolute resolved URL
    pub href: String,
}

/// Header and footer navigation link lists.
///
/// Either list may be empty; a missing nav container is a valid,
/// non-error state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationModel {
    /// Links under the primary navigation container
    pub header: Vec<NavLink>,
    /// Links under the footer navigation container
    pub footer: Vec<NavLink>,
}

/// A named viewport size used for responsive screenshot capture.
///
/// Breakpoint names are validated: lowercase alphanumeric with hyphens,
/// unique within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    name: String,
    /// Viewport width in CSS pixels
    pub width: u32,
    /// Viewport height in CSS pixels
    pub height: u32,
}

impl Breakpoint {
    /// Create a breakpoint with a validated name.
    ///
    /// # Errors
    /// Returns error if the name is not lowercase alphanumeric with hyphens
    /// or the dimensions are zero.
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Result<Self, CoreError> {
        let name = name.into();
        Self::validate_name(&name)?;
        if width == 0 || height == 0 {
            return Err(CoreError::Validation(format!(
                "breakpoint '{name}' has zero dimension: {width}x{height}"
            )));
        }
        Ok(Self {
            name,
            width,
            height,
        })
    }

    /// The breakpoint's unique name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Deterministic screenshot file name: `{name}-{width}x{height}.png`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}-{}x{}.png", self.name, self.width, self.height)
    }

    fn validate_name(name: &str) -> Result<(), CoreError> {
        static NAME_REGEX: OnceLock<regex::Regex> = OnceLock::new();
        let regex = NAME_REGEX.get_or_init(|| {
            regex::Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid regex")
        });

        if regex.is_match(name) {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "invalid breakpoint name: must be lowercase alphanumeric with hyphens, got '{name}'"
            )))
        }
    }

    /// The fixed catalog used by the visual capture phase, ordered from
    /// smallest viewport to largest.
    #[must_use]
    pub fn default_catalog() -> Vec<Breakpoint> {
        [
            ("mobile-small", 320, 568),
            ("mobile-medium", 375, 667),
            ("mobile-large", 414, 896),
            ("tablet", 768, 1024),
            ("tablet-large", 1024, 1366),
            ("desktop", 1280, 720),
            ("desktop-large", 1440, 900),
            ("desktop-xl", 1920, 1080),
        ]
        .into_iter()
        .map(|(name, w, h)| Breakpoint::new(name, w, h).expect("catalog entries are valid"))
        .collect()
    }
}

/// One persisted screenshot, produced by the visual capture phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenshotArtifact {
    /// Name of the breakpoint this capture was taken at
    pub breakpoint_name: String,
    /// Viewport width at capture time
    pub width: u32,
    /// Viewport height at capture time
    pub height: u32,
    /// Path of the persisted PNG
    pub file_path: PathBuf,
}

/// Category buckets for detected client-side technologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechCategory {
    /// Application frameworks (React, Vue, ...)
    Framework,
    /// Standalone libraries (jQuery, ...)
    Library,
    /// CSS frameworks and toolkits
    Css,
    /// Analytics and tracking scripts
    Analytics,
}

/// Deduplicated technology tags, grouped by category.
///
/// Absence of a signal means the tag is simply never added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechStackModel {
    /// Detected application frameworks
    pub frameworks: Vec<String>,
    /// Detected standalone libraries
    pub libraries: Vec<String>,
    /// Detected CSS frameworks
    pub css: Vec<String>,
    /// Detected analytics scripts
    pub analytics: Vec<String>,
}

impl TechStackModel {
    /// Add a tag to its category bucket, skipping duplicates.
    pub fn push_unique(&mut self, category: TechCategory, tag: &str) {
        let bucket = match category {
            TechCategory::Framework => &mut self.frameworks,
            TechCategory::Library => &mut self.libraries,
            TechCategory::Css => &mut self.css,
            TechCategory::Analytics => &mut self.analytics,
        };
        if !bucket.iter().any(|t| t == tag) {
            bucket.push(tag.to_string());
        }
    }

    /// True when no signal matched in any category.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frameworks.is_empty()
            && self.libraries.is_empty()
            && self.css.is_empty()
            && self.analytics.is_empty()
    }
}

/// Heading levels H1 through H6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::H1 => "H1",
            Self::H2 => "H2",
            Self::H3 => "H3",
            Self::H4 => "H4",
            Self::H5 => "H5",
            Self::H6 => "H6",
        };
        write!(f, "{s}")
    }
}

/// One heading element, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level, H1 through H6
    pub level: HeadingLevel,
    /// Trimmed text content
    pub text: String,
}

/// One anchor element, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    /// Trimmed visible text of the anchor
    pub text: String,
    /// Absolute resolved URL
    pub href: String,
}

/// One image element with its intrinsic dimensions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageEntry {
    /// Resolved source URL
    pub src: String,
    /// Alt text, possibly empty
    pub alt: String,
    /// Intrinsic width in pixels, 0 if not loaded
    pub width: u32,
    /// Intrinsic height in pixels, 0 if not loaded
    pub height: u32,
}

/// Document-head metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMeta {
    /// Document title
    pub title: String,
    /// `meta[name="description"]` content, if present
    pub description: Option<String>,
    /// `meta[name="viewport"]` content, if present
    pub viewport: Option<String>,
}

/// Full content inventory of the loaded document.
///
/// Nothing is truncated at extraction time; display-side truncation
/// belongs to the report writer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentModel {
    /// All headings in document order
    pub headings: Vec<Heading>,
    /// All anchors in document order
    pub links: Vec<LinkEntry>,
    /// All images in document order
    pub images: Vec<ImageEntry>,
    /// Document-head metadata
    pub meta: PageMeta,
}

/// The aggregate result of one audit run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSession {
    /// URL the run was pointed at
    pub target_url: String,
    /// Run start timestamp, UTC
    pub started_at: DateTime<Utc>,
    /// Document title read after navigation
    pub title: String,
    /// Discovery phase result
    pub navigation: NavigationModel,
    /// Sitemap URL when the probe got a 200
    pub sitemap_url: Option<String>,
    /// Technology detection result
    pub tech_stack: TechStackModel,
    /// Content extraction result
    pub content: ContentModel,
    /// Visual capture artifacts, in catalog order
    pub screenshots: Vec<ScreenshotArtifact>,
}

impl AnalysisSession {
    /// Create an empty session for a target, stamped with the current time.
    #[must_use]
    pub fn new(target_url: impl Into<String>) -> Self {
        Self::with_started_at(target_url, Utc::now())
    }

    /// Create an empty session with an explicit start timestamp.
    #[must_use]
    pub fn with_started_at(target_url: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            target_url: target_url.into(),
            started_at,
            title: String::new(),
            navigation: NavigationModel::default(),
            sitemap_url: None,
            tech_stack: TechStackModel::default(),
            content: ContentModel::default(),
            screenshots: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_valid_names() {
        for name in ["mobile-small", "desktop", "tablet-large", "4k"] {
            assert!(Breakpoint::new(name, 100, 100).is_ok(), "failed for {name}");
        }
    }

    #[test]
    fn test_breakpoint_invalid_names() {
        for name in ["Mobile", "mobile_small", "mobile small", "-mobile", "mobile-", ""] {
            assert!(Breakpoint::new(name, 100, 100).is_err(), "should fail for '{name}'");
        }
    }

    #[test]
    fn test_breakpoint_zero_dimension() {
        assert!(Breakpoint::new("mobile", 0, 568).is_err());
        assert!(Breakpoint::new("mobile", 320, 0).is_err());
    }

    #[test]
    fn test_breakpoint_file_name() {
        let bp = Breakpoint::new("mobile-small", 320, 568).expect("valid breakpoint");
        assert_eq!(bp.file_name(), "mobile-small-320x568.png");
    }

    #[test]
    fn test_default_catalog_unique_names() {
        let catalog = Breakpoint::default_catalog();
        assert_eq!(catalog.len(), 8);
        for (i, a) in catalog.iter().enumerate() {
            for b in &catalog[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }

    #[test]
    fn test_tech_stack_push_unique() {
        let mut tech = TechStackModel::default();
        tech.push_unique(TechCategory::Framework, "React");
        tech.push_unique(TechCategory::Framework, "React");
        tech.push_unique(TechCategory::Css, "Tailwind CSS");
        assert_eq!(tech.frameworks, vec!["React"]);
        assert_eq!(tech.css, vec!["Tailwind CSS"]);
        assert!(tech.libraries.is_empty());
    }

    #[test]
    fn test_tech_stack_is_empty() {
        let mut tech = TechStackModel::default();
        assert!(tech.is_empty());
        tech.push_unique(TechCategory::Analytics, "Google Analytics");
        assert!(!tech.is_empty());
    }

    #[test]
    fn test_heading_level_serde() {
        let json = serde_json::to_string(&HeadingLevel::H2).expect("serialize level");
        assert_eq!(json, "\"H2\"");
        let parsed: HeadingLevel = serde_json::from_str("\"H6\"").expect("deserialize level");
        assert_eq!(parsed, HeadingLevel::H6);
    }

    #[test]
    fn test_content_model_from_partial_json() {
        // Sparse page: no images key, meta without optional fields.
        let json = r#"{"headings":[{"level":"H1","text":"Welcome"}],"links":[],"meta":{"title":"Home"}}"#;
        let content: ContentModel = serde_json::from_str(json).expect("parse partial content");
        assert_eq!(content.headings.len(), 1);
        assert!(content.images.is_empty());
        assert_eq!(content.meta.title, "Home");
        assert!(content.meta.description.is_none());
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = AnalysisSession::new("https://example.com/");
        assert!(session.navigation.header.is_empty());
        assert!(session.sitemap_url.is_none());
        assert!(session.tech_stack.is_empty());
        assert!(session.content.headings.is_empty());
        assert!(session.screenshots.is_empty());
    }
}
