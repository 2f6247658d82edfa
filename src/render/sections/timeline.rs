//! Experience timeline.

use super::{reveal_key, section_header};
use crate::interact::RevealTarget;
use crate::render::{Built, Context, Fragment, Section, html::{escape, list, tags}};

pub struct Timeline;

impl Section for Timeline {
    fn mount(&self) -> &'static str {
        "timeline"
    }

    fn build(&self, ctx: &Context<'_>) -> Built {
        let entries = &ctx.portfolio.experience;
        if entries.is_empty() {
            return Built::Absent("no experience entries");
        }
        let mount = self.mount();

        let mut html = section_header("// experience", "Where I've worked");
        html.push_str(r#"<div class="timeline">"#);
        for (i, entry) in entries.iter().enumerate() {
            html.push_str(&format!(
                r#"<div class="timeline-item" data-reveal="{}"><div class="timeline-marker">{}</div><div class="timeline-content"><div class="timeline-header"><h3>{}</h3><span class="company">{}</span><span class="duration">{}</span></div>{}<div class="tech-tags">{}</div></div></div>"#,
                reveal_key(mount, i),
                escape(entry.icon.as_deref().unwrap_or("")),
                escape(&entry.role),
                escape(&entry.company),
                escape(&entry.duration),
                list("achievements", &entry.achievements),
                tags("tech-tag", &entry.technologies),
            ));
        }
        html.push_str("</div>");

        Fragment::new(html)
            .reveal((0..entries.len()).map(|i| RevealTarget::fade(mount, reveal_key(mount, i))))
            .built()
    }
}
