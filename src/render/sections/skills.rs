//! Skill categories with proficiency bars.

use super::{reveal_key, section_header};
use crate::interact::RevealTarget;
use crate::render::{Built, Context, Fragment, Section, html::{escape, icon}};

pub struct Skills;

impl Section for Skills {
    fn mount(&self) -> &'static str {
        "skills"
    }

    fn build(&self, ctx: &Context<'_>) -> Built {
        let categories = &ctx.portfolio.skills;
        if categories.is_empty() {
            return Built::Absent("no skill categories");
        }
        let mount = self.mount();

        let mut html = section_header("// skills", "Tech I work with");
        let mut reveals = Vec::new();
        html.push_str(r#"<div class="skills-grid">"#);
        for (i, category) in categories.iter().enumerate() {
            let category_key = reveal_key(mount, i);
            html.push_str(&format!(
                r#"<div class="skill-category" data-reveal="{category_key}"><h3>{}{}</h3><div class="skill-list">"#,
                icon(category.icon.as_deref()),
                escape(&category.category)
            ));
            reveals.push(RevealTarget::fade(mount, category_key.clone()));

            for (j, skill) in category.items.iter().enumerate() {
                let key = format!("{category_key}-{j}");
                let level = skill.level.get();
                html.push_str(&format!(
                    r#"<div class="skill-item"><span class="skill-name">{}</span><div class="skill-bar"><div class="skill-fill" data-reveal="{key}" data-width="{level}%" style="width: 0%"></div></div></div>"#,
                    escape(&skill.name)
                ));
                reveals.push(RevealTarget::bar(mount, key, f64::from(level)));
            }
            html.push_str("</div></div>");
        }
        html.push_str("</div>");

        Fragment::new(html).reveal(reveals).built()
    }
}
