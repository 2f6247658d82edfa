//! Hero banner and headline stats.

use crate::interact::{Action, Binding};
use crate::render::{Built, Context, Fragment, Section, html::{escape, tags}};

pub struct Hero;

impl Section for Hero {
    fn mount(&self) -> &'static str {
        "hero"
    }

    fn build(&self, ctx: &Context<'_>) -> Built {
        let portfolio = ctx.portfolio;
        let personal = &portfolio.personal;
        let mut html = String::new();

        if personal.available {
            html.push_str(
                r#"<div class="hero-badge"><span class="pulse"></span>Available for opportunities</div>"#,
            );
        }

        let headline = personal.tagline.as_deref().unwrap_or(&personal.name);
        html.push_str(&format!(r#"<h1 class="hero-title">{}"#, escape(headline)));
        if let Some(description) = &personal.description {
            html.push_str(&format!(
                r#"<br><span class="gradient-text">{}</span>"#,
                escape(description)
            ));
        }
        html.push_str("</h1>");

        let mut role = escape(&personal.role).into_owned();
        if let Some(years) = &personal.years_experience {
            role.push_str(&format!(" · {} years", escape(years)));
        }
        html.push_str(&format!(
            r#"<p class="hero-role"><span class="hero-name">{}</span> · {role}</p>"#,
            escape(&personal.name)
        ));

        if let Some(subtitle) = &personal.subtitle {
            html.push_str(&format!(r#"<p class="hero-subtitle">{}</p>"#, escape(subtitle)));
        }

        if !portfolio.expertise.is_empty() {
            html.push_str(&format!(
                r#"<div class="expertise">{}</div>"#,
                tags("expertise-chip", &portfolio.expertise)
            ));
        }

        html.push_str(r##"<div class="hero-actions"><a href="#contact" class="btn btn-primary">Get in touch</a>"##);
        if !portfolio.projects.is_empty() {
            html.push_str(r##"<a href="#projects" class="btn btn-secondary">View projects</a>"##);
        }
        html.push_str("</div>");

        Fragment::new(html)
            .bind(Binding::click(".hero-actions a", Action::ScrollTo))
            .built()
    }
}

pub struct Stats;

impl Section for Stats {
    fn mount(&self) -> &'static str {
        "stats"
    }

    fn build(&self, ctx: &Context<'_>) -> Built {
        let stats = &ctx.portfolio.stats;
        if stats.is_empty() {
            return Built::Absent("no stats");
        }

        let html = stats
            .iter()
            .map(|stat| {
                format!(
                    r#"<div class="stat"><span class="stat-number">{}</span><span class="stat-label">{}</span></div>"#,
                    escape(&stat.number),
                    escape(&stat.label)
                )
            })
            .collect();
        Fragment::new(html).built()
    }
}
