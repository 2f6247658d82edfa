//! Section builders, one per mount point.

mod chat;
mod contact;
mod editor;
mod hero;
mod nav;
mod projects;
mod showcase;
mod skills;
mod testimonials;
mod timeline;

pub use editor::EditorState;

use super::{Section, html::escape};

/// Every builder in render order.
pub fn all() -> [&'static dyn Section; 15] {
    [
        &nav::Logo,
        &nav::Nav,
        &hero::Hero,
        &hero::Stats,
        &editor::Editor,
        &showcase::Companies,
        &showcase::Features,
        &showcase::Metrics,
        &timeline::Timeline,
        &projects::Projects,
        &skills::Skills,
        &testimonials::Testimonials,
        &chat::Chat,
        &contact::Contact,
        &contact::Footer,
    ]
}

/// Heading block shared by the content sections.
fn section_header(tag: &str, title: &str) -> String {
    format!(
        r#"<div class="section-header"><span class="section-tag">{}</span><h2 class="section-title">{}</h2></div>"#,
        escape(tag),
        escape(title)
    )
}

/// `data-reveal` key of the `index`-th item of `mount`.
fn reveal_key(mount: &str, index: usize) -> String {
    format!("{mount}-{index}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_mount_names_unique() {
        let names: FxHashSet<_> = all().iter().map(|s| s.mount()).collect();
        assert_eq!(names.len(), all().len());
    }

    #[test]
    fn test_embedded_template_has_every_mount() {
        for section in all() {
            let needle = format!(r#"data-mount="{}""#, section.mount());
            assert!(super::super::TEMPLATE.contains(&needle), "missing {needle}");
        }
    }

    #[test]
    fn test_embedded_template_has_section_ids() {
        for id in crate::data::SectionId::ALL {
            let needle = format!(r#"id="{}""#, id.as_str());
            assert!(super::super::TEMPLATE.contains(&needle), "missing {needle}");
        }
    }
}
