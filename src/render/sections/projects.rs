//! Open-source project cards.

use super::{reveal_key, section_header};
use crate::data::Counter;
use crate::interact::RevealTarget;
use crate::render::{Built, Context, Fragment, Section, html::{escape, escape_attr, icon, tags}};

/// Shown for a missing star/fork counter.
const NO_COUNT: &str = "—";

pub struct Projects;

impl Section for Projects {
    fn mount(&self) -> &'static str {
        "projects"
    }

    fn build(&self, ctx: &Context<'_>) -> Built {
        let projects = &ctx.portfolio.projects;
        if projects.is_empty() {
            return Built::Absent("no projects");
        }
        let mount = self.mount();

        let mut html = section_header("// projects", "Things I've built");
        html.push_str(r#"<div class="projects-grid">"#);
        for (i, project) in projects.iter().enumerate() {
            let title = match &project.link {
                Some(link) => format!(
                    r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
                    escape_attr(link),
                    escape(&project.title)
                ),
                None => escape(&project.title).into_owned(),
            };
            html.push_str(&format!(
                r#"<div class="project-card" data-reveal="{}"><div class="project-header">{}</div><h3 class="project-title">{title}</h3><p>{}</p><div class="project-tech">{}</div><div class="project-stats"><span class="stars">⭐ {}</span><span class="forks">🍴 {}</span></div></div>"#,
                reveal_key(mount, i),
                icon(project.icon.as_deref()),
                escape(&project.description),
                tags("tech-tag", &project.technologies),
                counter(project.stars.as_ref()),
                counter(project.forks.as_ref()),
            ));
        }
        html.push_str("</div>");

        Fragment::new(html)
            .reveal((0..projects.len()).map(|i| RevealTarget::fade(mount, reveal_key(mount, i))))
            .built()
    }
}

fn counter(value: Option<&Counter>) -> String {
    value.map_or_else(|| NO_COUNT.to_owned(), |c| escape(&c.to_string()).into_owned())
}
