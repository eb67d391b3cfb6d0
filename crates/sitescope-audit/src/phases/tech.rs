//! Technology detection phase.
//!
//! A fixed table of (signal, category, predicate) entries is evaluated
//! against the page's runtime globals and DOM markers. Growing the
//! catalog means adding a row, not touching control flow. Detection is a
//! pure read of runtime state; an absent marker simply omits the tag.

use crate::error::Result;
use sitescope_browser::PageDriver;
use sitescope_core::{TechCategory, TechStackModel};
use tracing::{debug, warn};

/// One detection signal: a JS predicate evaluated in page context.
#[derive(Debug, Clone, Copy)]
pub struct TechSignal {
    pub name: &'static str,
    pub category: TechCategory,
    pub probe: &'static str,
}

/// The detection battery. Stylesheet probes guard each sheet with a
/// try/catch: cross-origin stylesheets throw on access, and such errors
/// are swallowed per-stylesheet rather than propagated.
pub const TECH_SIGNALS: &[TechSignal] = &[
    TechSignal {
        name: "React",
        category: TechCategory::Framework,
        probe: "!!(window.React || document.querySelector('[data-reactroot]'))",
    },
    TechSignal {
        name: "Vue",
        category: TechCategory::Framework,
        probe: "!!(window.Vue || document.querySelector('[data-v-app]'))",
    },
    TechSignal {
        name: "Angular",
        category: TechCategory::Framework,
        probe: "!!(window.ng || document.querySelector('[ng-app]'))",
    },
    TechSignal {
        name: "Next.js",
        category: TechCategory::Framework,
        probe: "!!window.__NEXT_DATA__",
    },
    TechSignal {
        name: "jQuery",
        category: TechCategory::Library,
        probe: "!!(window.jQuery && window.jQuery.fn && window.jQuery.fn.jquery)",
    },
    TechSignal {
        name: "Bootstrap",
        category: TechCategory::Css,
        probe: "Array.from(document.styleSheets).some((s) => { try { return (s.href || '').includes('bootstrap'); } catch (e) { return false; } })",
    },
    TechSignal {
        name: "Tailwind CSS",
        category: TechCategory::Css,
        probe: "Array.from(document.styleSheets).some((s) => { try { return (s.href || '').includes('tailwind'); } catch (e) { return false; } })",
    },
    TechSignal {
        name: "Material UI",
        category: TechCategory::Css,
        probe: "Array.from(document.styleSheets).some((s) => { try { return (s.href || '').includes('material'); } catch (e) { return false; } })",
    },
    TechSignal {
        name: "Google Analytics",
        category: TechCategory::Analytics,
        probe: "!!(window.gtag || window.ga)",
    },
    TechSignal {
        name: "Google Analytics (Legacy)",
        category: TechCategory::Analytics,
        probe: "!!window._gaq",
    },
];

/// Evaluate every signal in the table. An evaluation error for one
/// signal skips that signal only.
pub async fn run(page: &dyn PageDriver) -> Result<TechStackModel> {
    let mut tech = TechStackModel::default();

    for signal in TECH_SIGNALS {
        match page.evaluate(signal.probe).await {
            Ok(value) => {
                if value.as_bool().unwrap_or(false) {
                    debug!("Detected {}", signal.name);
                    tech.push_unique(signal.category, signal.name);
                }
            }
            Err(e) => {
                warn!("Probe for {} failed: {}", signal.name, e);
            }
        }
    }

    Ok(tech)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_names_unique() {
        for (i, a) in TECH_SIGNALS.iter().enumerate() {
            for b in &TECH_SIGNALS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_stylesheet_probes_are_guarded() {
        for signal in TECH_SIGNALS {
            if signal.probe.contains("styleSheets") {
                assert!(
                    signal.probe.contains("try") && signal.probe.contains("catch"),
                    "stylesheet probe for {} must guard cross-origin access",
                    signal.name
                );
            }
        }
    }

    #[test]
    fn test_every_category_represented() {
        let has = |c: TechCategory| TECH_SIGNALS.iter().any(|s| s.category == c);
        assert!(has(TechCategory::Framework));
        assert!(has(TechCategory::Library));
        assert!(has(TechCategory::Css));
        assert!(has(TechCategory::Analytics));
    }
}
