//! Raw deserialization shapes.
//!
//! Only the entities whose values are checked or repaired during validation
//! have a raw form here; everything else deserializes straight into
//! [`super::types`].

use super::types::{
    ChatScript, CodeSnippet, Company, ExperienceEntry, Footer, MetricStatus, PersonalInfo,
    Project, SocialLink, Stat, Testimonial,
};
use serde::Deserialize;

/// The data file as written by the user.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawPortfolio {
    pub personal: PersonalInfo,
    #[serde(default)]
    pub social: Vec<SocialLink>,
    #[serde(default)]
    pub navigation: Vec<RawNavItem>,
    #[serde(default)]
    pub expertise: Vec<String>,
    #[serde(default)]
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub companies: Vec<Company>,
    #[serde(default)]
    pub metrics: Vec<RawMetric>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<RawSkillCategory>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    #[serde(default)]
    pub features: Vec<RawFeature>,
    #[serde(default)]
    pub chat: ChatScript,
    #[serde(default)]
    pub code: CodeSnippet,
    #[serde(default)]
    pub footer: Footer,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawNavItem {
    pub label: String,
    pub href: String,
    #[serde(default)]
    pub cta: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawMetric {
    pub label: String,
    pub value: String,
    pub percentage: f64,
    pub status: MetricStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSkillCategory {
    pub category: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub items: Vec<RawSkill>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSkill {
    pub name: String,
    pub level: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawFeature {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub link_text: Option<String>,
}
