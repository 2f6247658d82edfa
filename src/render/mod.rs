//! Page renderer.
//!
//! Turns a validated [`Portfolio`] into the final page by filling the mount
//! points of an HTML template, one section at a time.
//!
//! # Render pass
//!
//! ```text
//! for each section (fixed order):
//!   mount point missing ──► debug!, skip
//!   dispose previous bindings of the section
//!   Built::Fragment ──► replace content, un-hide, attach bindings, register reveals
//!   Built::Absent   ──► clear content, set `hidden`
//! then: <title>, description, <html lang>, asset links, manifest
//! ```
//!
//! A failing or empty section never affects its neighbours, and rendering the
//! same input twice produces byte-identical output.

pub mod html;
mod identity;
mod manifest;
mod mount;
mod sections;

pub use identity::Identity;
pub use mount::{Document, MANIFEST_ID};
pub use sections::EditorState;

use crate::{
    config::SiteConfig,
    data::Portfolio,
    debug,
    interact::{
        Binding, BindingRegistry, ChatResponder, Disposer, RevealTarget, RevealTracker, Typing,
    },
};
use rustc_hash::{FxHashMap, FxHashSet};

/// Embedded default template.
pub const TEMPLATE: &str = include_str!("../embed/index.html");

// ============================================================================
// Section builders
// ============================================================================

/// A builder for one mount point.
pub trait Section {
    /// Name of the mount point this section fills.
    fn mount(&self) -> &'static str;

    fn build(&self, ctx: &Context<'_>) -> Built;
}

/// Result of building a section.
#[derive(Debug, Clone, PartialEq)]
pub enum Built {
    Fragment(Fragment),
    /// Nothing to show; the mount point is cleared and hidden.
    Absent(&'static str),
}

/// Rendered markup of a section with the behaviour it needs at runtime.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    pub html: String,
    pub bindings: Vec<Binding>,
    pub reveals: Vec<RevealTarget>,
    pub typing: Option<Typing>,
}

impl Fragment {
    pub fn new(html: String) -> Self {
        Self {
            html,
            ..Self::default()
        }
    }

    pub fn bind(mut self, binding: Binding) -> Self {
        self.bindings.push(binding);
        self
    }

    pub fn reveal(mut self, targets: impl IntoIterator<Item = RevealTarget>) -> Self {
        self.reveals.extend(targets);
        self
    }

    pub fn typing(mut self, typing: Typing) -> Self {
        self.typing = Some(typing);
        self
    }

    pub fn built(self) -> Built {
        Built::Fragment(self)
    }
}

/// Everything a builder may read.
pub struct Context<'a> {
    pub portfolio: &'a Portfolio,
    pub identity: Identity,
    pub editor: EditorState,
    pub chat: ChatResponder,
}

impl<'a> Context<'a> {
    pub fn new(portfolio: &'a Portfolio, options: &RenderOptions) -> Self {
        let personal = &portfolio.personal;
        let identity = Identity::derive(personal.first_name.as_deref(), personal.last_name.as_deref())
            .with_class_name(portfolio.code.class_name.as_deref());
        let editor = EditorState::new(portfolio, &identity, &options.extension, &options.files);

        Self {
            portfolio,
            identity,
            editor,
            chat: ChatResponder::new(&portfolio.chat),
        }
    }
}

/// Page-level settings taken from `folio.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// `<title>`; defaults to `"{name} | {role}"`.
    pub title: Option<String>,
    pub language: String,
    pub extension: String,
    pub files: Vec<String>,
    /// `(stylesheet, script)` hrefs to link into the page.
    pub assets: Option<(String, String)>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&SiteConfig::default())
    }
}

impl RenderOptions {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.site.title.clone(),
            language: config.site.language.clone(),
            extension: config.editor.extension.clone(),
            files: config.editor.files.clone(),
            assets: None,
        }
    }

    pub fn with_assets(mut self, stylesheet: impl Into<String>, script: impl Into<String>) -> Self {
        self.assets = Some((stylesheet.into(), script.into()));
        self
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// What happened to one section during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Mounted,
    Hidden(&'static str),
    Missing,
}

/// Per-section outcomes of a render pass, in render order.
#[derive(Debug, Default)]
pub struct RenderReport {
    pub sections: Vec<(&'static str, Outcome)>,
}

impl RenderReport {
    pub fn count(&self, want: fn(&Outcome) -> bool) -> usize {
        self.sections.iter().filter(|(_, o)| want(o)).count()
    }

    pub fn outcome(&self, mount: &str) -> Option<Outcome> {
        self.sections
            .iter()
            .find(|(name, _)| *name == mount)
            .map(|(_, o)| *o)
    }
}

pub struct Renderer {
    document: Document,
    registry: BindingRegistry,
    disposers: FxHashMap<&'static str, Disposer>,
    reveals: RevealTracker,
    typing: FxHashMap<&'static str, Typing>,
    mounted: FxHashSet<&'static str>,
}

impl Renderer {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            document: Document::new(template),
            registry: BindingRegistry::new(),
            disposers: FxHashMap::default(),
            reveals: RevealTracker::new(),
            typing: FxHashMap::default(),
            mounted: FxHashSet::default(),
        }
    }

    /// Renderer over the embedded template.
    pub fn embedded() -> Self {
        Self::new(TEMPLATE)
    }

    /// Run a full render pass.
    pub fn render(&mut self, portfolio: &Portfolio, options: &RenderOptions) -> RenderReport {
        let ctx = Context::new(portfolio, options);
        let mut report = RenderReport::default();

        for section in sections::all() {
            let outcome = self.render_section(section, &ctx);
            report.sections.push((section.mount(), outcome));
        }

        self.render_head(portfolio, options);
        self.write_manifest(&ctx);
        report
    }

    /// Render one section into its mount point.
    pub fn render_section(&mut self, section: &dyn Section, ctx: &Context<'_>) -> Outcome {
        let mount = section.mount();
        if !self.document.has_mount(mount) {
            debug!("render"; "mount point `{}` not found, skipped", mount);
            return Outcome::Missing;
        }

        if let Some(disposer) = self.disposers.remove(mount) {
            self.registry.dispose(disposer);
        }
        self.reveals.clear_section(mount);
        self.typing.remove(mount);

        match section.build(ctx) {
            Built::Fragment(fragment) => {
                self.document.mount(mount, &fragment.html);
                self.document.set_hidden(mount, false);
                if !fragment.bindings.is_empty() {
                    let disposer = self.registry.attach(mount, fragment.bindings);
                    self.disposers.insert(mount, disposer);
                }
                self.reveals.set_section(mount, fragment.reveals);
                if let Some(typing) = fragment.typing {
                    self.typing.insert(mount, typing);
                }
                self.mounted.insert(mount);
                Outcome::Mounted
            }
            Built::Absent(reason) => {
                self.document.mount(mount, "");
                self.document.set_hidden(mount, true);
                self.mounted.remove(mount);
                debug!("render"; "section `{}` hidden: {}", mount, reason);
                Outcome::Hidden(reason)
            }
        }
    }

    fn render_head(&mut self, portfolio: &Portfolio, options: &RenderOptions) {
        let personal = &portfolio.personal;
        let title = options
            .title
            .clone()
            .unwrap_or_else(|| format!("{} | {}", personal.name, personal.role));
        let description = personal
            .description
            .as_deref()
            .or(personal.tagline.as_deref())
            .unwrap_or(&personal.role);

        self.document.set_title(&title);
        self.document.set_meta_description(description);
        self.document.set_lang(&options.language);
        if let Some((stylesheet, script)) = &options.assets {
            self.document.link_assets(stylesheet, script);
        }
    }

    fn write_manifest(&mut self, ctx: &Context<'_>) {
        let mut typing: Vec<&Typing> = self.typing.values().collect();
        typing.sort_by_key(|t| t.selector);

        let manifest = manifest::Manifest {
            bindings: self.registry.listeners(),
            reveal: self.reveals.targets(),
            typing,
            editor: self.mounted.contains("editor").then_some(&ctx.editor),
            chat: self.mounted.contains("chat").then_some(&ctx.chat),
        };
        let json = manifest.to_json();
        self.document.set_manifest(&json);
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn bindings(&self) -> &BindingRegistry {
        &self.registry
    }

    pub fn reveals(&self) -> &RevealTracker {
        &self.reveals
    }

    pub fn into_html(self) -> String {
        self.document.into_string()
    }
}

/// Render `portfolio` into `template` in one pass.
pub fn render_page(template: &str, portfolio: &Portfolio, options: &RenderOptions) -> (String, RenderReport) {
    let mut renderer = Renderer::new(template);
    let report = renderer.render(portfolio, options);
    (renderer.into_html(), report)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{self, SAMPLE};

    fn sample() -> Portfolio {
        data::from_str(SAMPLE).unwrap().portfolio
    }

    fn options() -> RenderOptions {
        RenderOptions::default()
    }

    // ------------------------------------------------------------------------
    // Determinism
    // ------------------------------------------------------------------------

    #[test]
    fn test_render_is_deterministic() {
        let portfolio = sample();
        let (first, _) = render_page(TEMPLATE, &portfolio, &options());
        let (second, _) = render_page(TEMPLATE, &portfolio, &options());
        assert_eq!(first, second);
    }

    #[test]
    fn test_rerender_is_idempotent() {
        let portfolio = sample();
        let mut renderer = Renderer::embedded();
        renderer.render(&portfolio, &options());
        let html = renderer.document().as_str().to_owned();
        let bindings = renderer.bindings().len();

        renderer.render(&portfolio, &options());

        assert_eq!(renderer.document().as_str(), html);
        assert_eq!(renderer.bindings().len(), bindings);
    }

    #[test]
    fn test_all_sections_mount_in_embedded_template() {
        let (_, report) = render_page(TEMPLATE, &sample(), &options());
        assert_eq!(report.count(|o| *o == Outcome::Missing), 0);
        assert_eq!(report.count(|o| *o == Outcome::Mounted), report.sections.len());
    }

    // ------------------------------------------------------------------------
    // Isolation
    // ------------------------------------------------------------------------

    #[test]
    fn test_empty_testimonials_hidden_and_isolated() {
        let mut portfolio = sample();
        portfolio.testimonials.clear();

        let mut renderer = Renderer::embedded();
        let report = renderer.render(&portfolio, &options());
        let doc = renderer.document();

        assert!(matches!(report.outcome("testimonials"), Some(Outcome::Hidden(_))));
        assert_eq!(doc.is_hidden("testimonials"), Some(true));
        assert_eq!(doc.inner("testimonials"), Some(""));
        assert_eq!(doc.is_hidden("projects"), Some(false));
        assert!(doc.inner("projects").unwrap().contains("project-card"));
    }

    #[test]
    fn test_missing_mount_point_skips_only_that_section() {
        let template = TEMPLATE.replace(r#"data-mount="skills""#, "");
        let (html, report) = render_page(&template, &sample(), &options());

        assert_eq!(report.outcome("skills"), Some(Outcome::Missing));
        assert_eq!(report.outcome("timeline"), Some(Outcome::Mounted));
        assert!(html.contains("timeline-item"));
    }

    #[test]
    fn test_hidden_section_comes_back() {
        let mut portfolio = sample();
        let full = portfolio.projects.clone();
        portfolio.projects.clear();

        let mut renderer = Renderer::embedded();
        renderer.render(&portfolio, &options());
        assert_eq!(renderer.document().is_hidden("projects"), Some(true));

        portfolio.projects = full;
        renderer.render(&portfolio, &options());
        assert_eq!(renderer.document().is_hidden("projects"), Some(false));
    }

    // ------------------------------------------------------------------------
    // Head and manifest
    // ------------------------------------------------------------------------

    #[test]
    fn test_head_values() {
        let portfolio = sample();
        let mut options = options();
        options.language = "de".into();
        options = options.with_assets("folio.css", "folio.0123abcd.js");

        let (html, _) = render_page(TEMPLATE, &portfolio, &options);
        let expected_title = format!(
            "<title>{}</title>",
            html::escape(&format!("{} | {}", portfolio.personal.name, portfolio.personal.role))
        );
        assert!(html.contains(&expected_title));
        assert!(html.contains(r#"<html lang="de">"#));
        assert!(html.contains(r#"src="folio.0123abcd.js""#));
    }

    #[test]
    fn test_manifest_contents() {
        let portfolio = sample();
        let mut renderer = Renderer::embedded();
        renderer.render(&portfolio, &options());

        let json = renderer.document().manifest().unwrap();
        let manifest: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            manifest["bindings"].as_array().unwrap().len(),
            renderer.bindings().len()
        );
        assert_eq!(manifest["editor"]["tabs"]["tabs"][0], "JaneDoe.java");
        assert_eq!(manifest["editor"]["tabs"]["active"], 0);
        assert_eq!(
            manifest["chat"]["groups"].as_array().unwrap().len(),
            portfolio.chat.responses.len()
        );
        assert!(!manifest["reveal"].as_array().unwrap().is_empty());
        assert_eq!(manifest["typing"][0]["selector"], ".code-content code");
        assert_eq!(manifest["editor"]["new_file"], "NewFile.java");
        assert!(
            manifest["editor"]["templates"]
                .as_array()
                .unwrap()
                .iter()
                .any(|t| t["extension"] == "java")
        );
    }

    #[test]
    fn test_manifest_omits_typing_without_editor() {
        let template = TEMPLATE.replace(r#"data-mount="editor""#, "");
        let mut renderer = Renderer::new(template);
        renderer.render(&sample(), &options());

        let json = renderer.document().manifest().unwrap();
        let manifest: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(manifest.get("typing").is_none());
        assert!(manifest.get("editor").is_none());
    }

    #[test]
    fn test_manifest_omits_hidden_chat() {
        let template = TEMPLATE.replace(r#"data-mount="chat""#, "");
        let mut renderer = Renderer::new(template);
        renderer.render(&sample(), &options());

        let json = renderer.document().manifest().unwrap();
        let manifest: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(manifest.get("chat").is_none());
    }
}
