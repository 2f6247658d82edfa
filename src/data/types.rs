//! Validated portfolio record.
//!
//! These types are produced once by [`super::validate`] and only ever read
//! afterwards. Fields that need no repair are deserialized directly into these
//! types; the rest go through the raw shapes in [`super::schema`].

use serde::Deserialize;
use std::fmt;

// ============================================================================
// Aggregate
// ============================================================================

/// The complete content record of a portfolio page.
#[derive(Debug, Clone)]
pub struct Portfolio {
    pub personal: PersonalInfo,
    pub social: Vec<SocialLink>,
    pub navigation: Vec<NavItem>,
    pub expertise: Vec<String>,
    pub stats: Vec<Stat>,
    pub companies: Vec<Company>,
    pub metrics: Vec<Metric>,
    /// Most recent first; source order is kept as-is.
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<Project>,
    pub skills: Vec<SkillCategory>,
    pub testimonials: Vec<Testimonial>,
    pub features: Vec<Feature>,
    pub chat: ChatScript,
    pub code: CodeSnippet,
    pub footer: Footer,
}

// ============================================================================
// Bounded Values
// ============================================================================

/// Skill proficiency in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Level(u8);

impl Level {
    pub const MAX: u8 = 100;

    /// Clamp a raw level into range. The flag is `true` when the value changed.
    pub fn clamped(raw: i64) -> (Self, bool) {
        let value = raw.clamp(0, i64::from(Self::MAX));
        // value is within 0..=100 after clamping
        (Self(value as u8), value != raw)
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Percentage in `0.0..=100.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percent(f64);

impl Percent {
    pub const MAX: f64 = 100.0;

    /// Clamp a raw percentage into range; non-finite input becomes 0.
    /// The flag is `true` when the value changed.
    pub fn clamped(raw: f64) -> (Self, bool) {
        if !raw.is_finite() {
            return (Self(0.0), true);
        }
        let value = raw.clamp(0.0, Self::MAX);
        (Self(value), value != raw)
    }

    pub const fn get(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Percent {
    /// Integers print without a fraction (`15`), others as given (`99.99`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{}", self.0 as u32)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

// ============================================================================
// Sections and Anchors
// ============================================================================

/// Page sections that navigation links may point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Top,
    About,
    Experience,
    Projects,
    Skills,
    Testimonials,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 7] = [
        Self::Top,
        Self::About,
        Self::Experience,
        Self::Projects,
        Self::Skills,
        Self::Testimonials,
        Self::Contact,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::About => "about",
            Self::Experience => "experience",
            Self::Projects => "projects",
            Self::Skills => "skills",
            Self::Testimonials => "testimonials",
            Self::Contact => "contact",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == id)
    }
}

/// A validated in-page link target (`#experience`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor(pub SectionId);

impl Anchor {
    pub fn href(self) -> String {
        format!("#{}", self.0.as_str())
    }
}

// ============================================================================
// Entities
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Free text such as `"3+"`.
    #[serde(default)]
    pub years_experience: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub availability_note: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    pub platform: String,
    pub handle: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NavItem {
    pub label: String,
    pub target: Anchor,
    pub cta: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stat {
    pub number: String,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Company {
    pub name: String,
    /// Emoji or asset path.
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    Good,
    Normal,
    Warning,
    Critical,
}

impl MetricStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Metric {
    pub label: String,
    pub value: String,
    pub percentage: Percent,
    pub status: MetricStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExperienceEntry {
    pub company: String,
    pub role: String,
    /// Free-text range, e.g. `"Oct 2022 - Aug 2025"`.
    pub duration: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

/// Popularity counter: a number or a placeholder label such as `"-"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Counter {
    Count(u64),
    Label(String),
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) if *n >= 1000 => {
                write!(f, "{:.1}k", *n as f64 / 1000.0)
            }
            Self::Count(n) => write!(f, "{n}"),
            Self::Label(label) => f.write_str(label),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub stars: Option<Counter>,
    #[serde(default)]
    pub forks: Option<Counter>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SkillCategory {
    pub category: String,
    pub icon: Option<String>,
    pub items: Vec<Skill>,
}

#[derive(Debug, Clone)]
pub struct Skill {
    pub name: String,
    pub level: Level,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Feature {
    pub title: String,
    pub description: String,
    pub link: Option<Anchor>,
    pub link_text: Option<String>,
}

// ============================================================================
// Chat, Code Snippet, Footer
// ============================================================================

/// Canned responses for the chat demo.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChatScript {
    #[serde(default = "default_fallback")]
    pub fallback: String,
    #[serde(default)]
    pub responses: Vec<ChatGroup>,
    /// Scripted opening conversation shown before any input.
    #[serde(default)]
    pub transcript: Vec<ChatLine>,
}

impl Default for ChatScript {
    fn default() -> Self {
        Self {
            fallback: default_fallback(),
            responses: Vec::new(),
            transcript: Vec::new(),
        }
    }
}

fn default_fallback() -> String {
    "I can tell you about experience, skills, projects, or contact information. What would you like to know?".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChatGroup {
    pub keywords: Vec<String>,
    pub response: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChatLine {
    pub from: Speaker,
    pub message: String,
}

/// Overrides for the labels of the code-editor listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodeSnippet {
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub package: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Footer {
    #[serde(default)]
    pub copyright: Option<String>,
    #[serde(default)]
    pub badges: Vec<Badge>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Badge {
    pub text: String,
    #[serde(default)]
    pub icon: Option<String>,
}

// ============================================================================
// Tests
// ============================================================================
