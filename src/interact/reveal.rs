//! One-shot scroll reveal.
//!
//! Every target is keyed by its `data-reveal` attribute value. The first
//! intersection yields the effect; afterwards the target is no longer observed.

use rustc_hash::FxHashSet;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "width", rename_all = "kebab-case")]
pub enum Effect {
    FadeIn,
    /// Grow a bar to the given percentage.
    GrowTo(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevealTarget {
    #[serde(skip)]
    pub section: &'static str,
    pub key: String,
    pub effect: Effect,
}

impl RevealTarget {
    pub fn fade(section: &'static str, key: impl Into<String>) -> Self {
        Self {
            section,
            key: key.into(),
            effect: Effect::FadeIn,
        }
    }

    pub fn bar(section: &'static str, key: impl Into<String>, width: f64) -> Self {
        Self {
            section,
            key: key.into(),
            effect: Effect::GrowTo(width),
        }
    }

    fn is_observable(&self) -> bool {
        !matches!(self.effect, Effect::GrowTo(width) if width <= 0.0)
    }
}

/// Line-by-line typing of a code block once the page has loaded.
///
/// Each line appears after a random delay in `min_line_ms..=max_line_ms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Typing {
    pub selector: &'static str,
    pub start_ms: u32,
    pub min_line_ms: u32,
    pub max_line_ms: u32,
}

impl Typing {
    pub const fn lines(selector: &'static str) -> Self {
        Self {
            selector,
            start_ms: 1000,
            min_line_ms: 5,
            max_line_ms: 55,
        }
    }
}

#[derive(Debug, Default)]
pub struct RevealTracker {
    targets: Vec<RevealTarget>,
    revealed: FxHashSet<String>,
}

impl RevealTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every target of `section` with `targets`. Zero-width bars are skipped.
    pub fn set_section(&mut self, section: &'static str, targets: Vec<RevealTarget>) {
        self.clear_section(section);
        self.targets
            .extend(targets.into_iter().filter(RevealTarget::is_observable));
    }

    pub fn clear_section(&mut self, section: &'static str) {
        let revealed = &mut self.revealed;
        self.targets.retain(|t| {
            let keep = t.section != section;
            if !keep {
                revealed.remove(&t.key);
            }
            keep
        });
    }

    /// Effect for the first intersection of `key`; `None` for unknown or already revealed.
    pub fn intersect(&mut self, key: &str) -> Option<Effect> {
        let target = self.targets.iter().find(|t| t.key == key)?;
        self.revealed
            .insert(key.to_owned())
            .then_some(target.effect)
    }

    pub fn is_observed(&self, key: &str) -> bool {
        self.targets.iter().any(|t| t.key == key) && !self.revealed.contains(key)
    }

    pub fn targets(&self) -> &[RevealTarget] {
        &self.targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersect_is_one_shot() {
        let mut tracker = RevealTracker::new();
        tracker.set_section("timeline", vec![RevealTarget::fade("timeline", "timeline-0")]);

        assert!(tracker.is_observed("timeline-0"));
        assert_eq!(tracker.intersect("timeline-0"), Some(Effect::FadeIn));
        assert_eq!(tracker.intersect("timeline-0"), None);
        assert!(!tracker.is_observed("timeline-0"));
    }

    #[test]
    fn test_bar_grows_to_width() {
        let mut tracker = RevealTracker::new();
        tracker.set_section("skills", vec![RevealTarget::bar("skills", "skills-0-1", 85.0)]);
        assert_eq!(tracker.intersect("skills-0-1"), Some(Effect::GrowTo(85.0)));
    }

    #[test]
    fn test_zero_width_bar_never_observed() {
        let mut tracker = RevealTracker::new();
        tracker.set_section("metrics", vec![RevealTarget::bar("metrics", "metrics-0", 0.0)]);

        assert!(tracker.targets().is_empty());
        assert_eq!(tracker.intersect("metrics-0"), None);
    }

    #[test]
    fn test_unknown_key() {
        let mut tracker = RevealTracker::new();
        assert_eq!(tracker.intersect("nope"), None);
    }

    #[test]
    fn test_set_section_replaces_only_that_section() {
        let mut tracker = RevealTracker::new();
        tracker.set_section("projects", vec![RevealTarget::fade("projects", "projects-0")]);
        tracker.set_section("contact", vec![RevealTarget::fade("contact", "contact-0")]);
        tracker.intersect("projects-0");

        tracker.set_section("projects", vec![RevealTarget::fade("projects", "projects-0")]);

        assert_eq!(tracker.targets().len(), 2);
        assert!(tracker.is_observed("projects-0"));
    }

    #[test]
    fn test_typing_delays() {
        let typing = Typing::lines(".code-content code");
        assert!(typing.min_line_ms < typing.max_line_ms);
        assert_eq!(
            serde_json::to_string(&typing).unwrap(),
            r#"{"selector":".code-content code","start_ms":1000,"min_line_ms":5,"max_line_ms":55}"#
        );
    }

    #[test]
    fn test_effect_serialization() {
        assert_eq!(
            serde_json::to_string(&Effect::GrowTo(42.0)).unwrap(),
            r#"{"kind":"grow-to","width":42.0}"#
        );
        assert_eq!(
            serde_json::to_string(&Effect::FadeIn).unwrap(),
            r#"{"kind":"fade-in"}"#
        );
    }
}
