//! One-shot validation of the raw record.
//!
//! Produces either a fully repaired [`Portfolio`] plus warnings, or every hard
//! error found. Consumers never re-implement fallback logic.
//!
//! | Problem                                    | Outcome                 |
//! |--------------------------------------------|-------------------------|
//! | empty `personal.name` / `email` / `role`   | error                   |
//! | malformed email                            | error                   |
//! | link to unknown section id                 | error                   |
//! | external link not `http(s):` or `mailto:`  | error                   |
//! | duplicate social platform                  | error                   |
//! | chat group without keywords or response    | error                   |
//! | empty skill / category name                | error                   |
//! | level or percentage out of `[0, 100]`      | clamped, warning        |
//! | empty list entry (achievement, tag, ...)   | dropped, warning        |
//! | link to `#testimonials` with none defined  | warning                 |

use super::schema::{RawFeature, RawMetric, RawNavItem, RawPortfolio, RawSkillCategory};
use super::types::{
    Anchor, ChatScript, ExperienceEntry, Feature, Level, Metric, NavItem, Percent, Portfolio,
    PersonalInfo, Project, SectionId, Skill, SkillCategory, SocialLink,
};
use regex::Regex;
use rustc_hash::FxHashSet;
use std::{fmt, sync::LazyLock};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@ \t\r\n]+@[^@ \t\r\n]+$").expect("email pattern is valid"));

static ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([a-z][a-z0-9-]*)$").expect("anchor pattern is valid"));

static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+.-]*):").expect("scheme pattern is valid"));

/// Schemes an external link may use.
const LINK_SCHEMES: &[&str] = &["http", "https", "mailto"];

// ============================================================================
// Report Types
// ============================================================================

/// A single problem, addressed by dotted field path (`experience[2].company`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub path: String,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// All hard errors of a rejected record.
#[derive(Debug, Clone)]
pub struct ValidationErrors(pub Vec<Issue>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.0.len();
        write!(
            f,
            "{count} problem{} in portfolio data",
            if count == 1 { "" } else { "s" }
        )?;
        for issue in &self.0 {
            write!(f, "\n  - {issue}")?;
        }
        Ok(())
    }
}

/// An accepted record and the repairs applied to it.
#[derive(Debug, Clone)]
pub struct Validated {
    pub portfolio: Portfolio,
    pub warnings: Vec<Issue>,
}

// ============================================================================
// Checker
// ============================================================================

#[derive(Default)]
struct Checker {
    errors: Vec<Issue>,
    warnings: Vec<Issue>,
}

impl Checker {
    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(Issue {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(Issue {
            path: path.into(),
            message: message.into(),
        });
    }

    fn require(&mut self, path: &str, value: &str) {
        if value.trim().is_empty() {
            self.error(path, "must not be empty");
        }
    }

    /// Drop blank entries from a string list, warning once per entry.
    fn prune(&mut self, path: &str, list: Vec<String>) -> Vec<String> {
        let mut kept = Vec::with_capacity(list.len());
        for (i, item) in list.into_iter().enumerate() {
            if item.trim().is_empty() {
                self.warn(format!("{path}[{i}]"), "empty entry dropped");
            } else {
                kept.push(item);
            }
        }
        kept
    }

    /// External `href`: must carry one of [`LINK_SCHEMES`].
    ///
    /// Browsers ignore surrounding whitespace and control characters, so
    /// those are stripped before the scheme is read.
    fn external_link(&mut self, path: &str, href: &str) {
        let trimmed = href.trim_matches(|c: char| c.is_whitespace() || c.is_control());
        match SCHEME.captures(trimmed).and_then(|c| c.get(1)) {
            Some(scheme) if LINK_SCHEMES.contains(&scheme.as_str().to_ascii_lowercase().as_str()) => {}
            Some(scheme) => self.error(
                path,
                format!("`{}:` links are not allowed; use http, https or mailto", scheme.as_str()),
            ),
            None => self.error(
                path,
                format!("`{href}` must start with http://, https:// or mailto:"),
            ),
        }
    }

    /// Parse `#section-id` into an anchor.
    fn anchor(&mut self, path: &str, href: &str) -> Option<Anchor> {
        let Some(id) = ANCHOR.captures(href).and_then(|c| c.get(1)) else {
            self.error(path, format!("`{href}` is not an in-page link like `#about`"));
            return None;
        };
        match SectionId::from_id(id.as_str()) {
            Some(section) => Some(Anchor(section)),
            None => {
                let known: Vec<_> = SectionId::ALL.iter().map(|s| s.as_str()).collect();
                self.error(
                    path,
                    format!("unknown section `{}` (known: {})", id.as_str(), known.join(", ")),
                );
                None
            }
        }
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Validate and repair a raw record.
pub fn validate(raw: RawPortfolio) -> Result<Validated, ValidationErrors> {
    let mut c = Checker::default();

    check_personal(&mut c, &raw.personal);
    check_social(&mut c, &raw.social);

    let has_testimonials = !raw.testimonials.is_empty();
    let navigation = navigation(&mut c, raw.navigation, has_testimonials);
    let features = features(&mut c, raw.features);
    let expertise = c.prune("expertise", raw.expertise);
    let metrics = metrics(&mut c, raw.metrics);
    let experience = experience(&mut c, raw.experience);
    let projects = projects(&mut c, raw.projects);
    let skills = skills(&mut c, raw.skills);
    let chat = chat(&mut c, raw.chat);

    if !c.errors.is_empty() {
        return Err(ValidationErrors(c.errors));
    }

    Ok(Validated {
        portfolio: Portfolio {
            personal: raw.personal,
            social: raw.social,
            navigation,
            expertise,
            stats: raw.stats,
            companies: raw.companies,
            metrics,
            experience,
            projects,
            skills,
            testimonials: raw.testimonials,
            features,
            chat,
            code: raw.code,
            footer: raw.footer,
        },
        warnings: c.warnings,
    })
}

fn check_personal(c: &mut Checker, personal: &PersonalInfo) {
    c.require("personal.name", &personal.name);
    c.require("personal.role", &personal.role);

    // A bare domain is rendered as `https://<domain>`.
    if let Some(website) = personal.website.as_deref().filter(|w| w.contains("://")) {
        c.external_link("personal.website", website);
    }

    if personal.email.trim().is_empty() {
        c.error("personal.email", "must not be empty");
    } else if !EMAIL.is_match(personal.email.trim()) {
        c.error(
            "personal.email",
            format!("`{}` is not an email address", personal.email),
        );
    }
}

fn check_social(c: &mut Checker, social: &[SocialLink]) {
    let mut seen = FxHashSet::default();
    for (i, link) in social.iter().enumerate() {
        c.require(&format!("social[{i}].platform"), &link.platform);
        c.require(&format!("social[{i}].handle"), &link.handle);
        if !seen.insert(link.platform.to_lowercase()) {
            c.error(
                format!("social[{i}].platform"),
                format!("platform `{}` is listed more than once", link.platform),
            );
        }
        if let Some(url) = &link.url {
            c.external_link(&format!("social[{i}].url"), url);
        }
    }
}

fn navigation(c: &mut Checker, items: Vec<RawNavItem>, has_testimonials: bool) -> Vec<NavItem> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let path = format!("navigation[{i}]");
            c.require(&format!("{path}.label"), &item.label);
            let target = c.anchor(&format!("{path}.href"), &item.href)?;
            if target.0 == SectionId::Testimonials && !has_testimonials {
                c.warn(
                    format!("{path}.href"),
                    "links to #testimonials but no testimonials are defined",
                );
            }
            Some(NavItem {
                label: item.label,
                target,
                cta: item.cta,
            })
        })
        .collect()
}

fn features(c: &mut Checker, items: Vec<RawFeature>) -> Vec<Feature> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let path = format!("features[{i}]");
            c.require(&format!("{path}.title"), &item.title);
            let link = item
                .link
                .as_deref()
                .and_then(|href| c.anchor(&format!("{path}.link"), href));
            Feature {
                title: item.title,
                description: item.description,
                link,
                link_text: item.link_text,
            }
        })
        .collect()
}

fn metrics(c: &mut Checker, items: Vec<RawMetric>) -> Vec<Metric> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let (percentage, changed) = Percent::clamped(item.percentage);
            if changed {
                c.warn(
                    format!("metrics[{i}].percentage"),
                    format!("{} clamped to {percentage}", item.percentage),
                );
            }
            Metric {
                label: item.label,
                value: item.value,
                percentage,
                status: item.status,
            }
        })
        .collect()
}

fn experience(c: &mut Checker, entries: Vec<ExperienceEntry>) -> Vec<ExperienceEntry> {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, mut entry)| {
            let path = format!("experience[{i}]");
            c.require(&format!("{path}.company"), &entry.company);
            c.require(&format!("{path}.role"), &entry.role);
            entry.achievements = c.prune(&format!("{path}.achievements"), entry.achievements);
            entry.technologies = c.prune(&format!("{path}.technologies"), entry.technologies);
            entry
        })
        .collect()
}

fn projects(c: &mut Checker, projects: Vec<Project>) -> Vec<Project> {
    projects
        .into_iter()
        .enumerate()
        .map(|(i, mut project)| {
            let path = format!("projects[{i}]");
            c.require(&format!("{path}.title"), &project.title);
            if let Some(link) = &project.link {
                c.external_link(&format!("{path}.link"), link);
            }
            project.technologies = c.prune(&format!("{path}.technologies"), project.technologies);
            project
        })
        .collect()
}

fn skills(c: &mut Checker, categories: Vec<RawSkillCategory>) -> Vec<SkillCategory> {
    categories
        .into_iter()
        .enumerate()
        .map(|(i, category)| {
            let path = format!("skills[{i}]");
            c.require(&format!("{path}.category"), &category.category);
            let items = category
                .items
                .into_iter()
                .enumerate()
                .map(|(j, skill)| {
                    let path = format!("{path}.items[{j}]");
                    c.require(&format!("{path}.name"), &skill.name);
                    let (level, changed) = Level::clamped(skill.level);
                    if changed {
                        c.warn(
                            format!("{path}.level"),
                            format!("{} clamped to {level}", skill.level),
                        );
                    }
                    Skill {
                        name: skill.name,
                        level,
                    }
                })
                .collect();
            SkillCategory {
                category: category.category,
                icon: category.icon,
                items,
            }
        })
        .collect()
}

fn chat(c: &mut Checker, mut script: ChatScript) -> ChatScript {
    for (i, group) in script.responses.iter_mut().enumerate() {
        let path = format!("chat.responses[{i}]");
        group.keywords = c.prune(
            &format!("{path}.keywords"),
            std::mem::take(&mut group.keywords),
        );
        if group.keywords.is_empty() {
            c.error(format!("{path}.keywords"), "needs at least one keyword");
        }
        c.require(&format!("{path}.response"), &group.response);
    }
    c.require("chat.fallback", &script.fallback);
    script
}

// ============================================================================
// Tests
// ============================================================================
