//! Header: logo and navigation.

use crate::interact::{Action, Binding};
use crate::render::{Built, Context, Fragment, Section, html::escape};

pub struct Logo;

impl Section for Logo {
    fn mount(&self) -> &'static str {
        "logo"
    }

    fn build(&self, ctx: &Context<'_>) -> Built {
        let html = format!(
            r#"<span class="logo-icon">&lt;/&gt;</span><span class="logo-text">{}</span>"#,
            escape(&ctx.identity.logo)
        );
        Fragment::new(html)
            .bind(Binding::click(".logo", Action::ScrollTo))
            .built()
    }
}

pub struct Nav;

impl Section for Nav {
    fn mount(&self) -> &'static str {
        "nav"
    }

    fn build(&self, ctx: &Context<'_>) -> Built {
        let items = &ctx.portfolio.navigation;
        if items.is_empty() {
            return Built::Absent("no navigation entries");
        }

        let mut html = String::from(r#"<ul class="nav-links">"#);
        for item in items {
            let class = if item.cta { r#" class="nav-cta""# } else { "" };
            html.push_str(&format!(
                r#"<li><a href="{}"{class}>{}</a></li>"#,
                item.target.href(),
                escape(&item.label)
            ));
        }
        html.push_str("</ul>");
        html.push_str(
            r#"<button class="mobile-menu-btn" aria-label="Menu"><span></span><span></span><span></span></button>"#,
        );

        Fragment::new(html)
            .bind(Binding::click(".nav-links a", Action::ScrollTo))
            .bind(Binding::click(".mobile-menu-btn", Action::ToggleMenu))
            .bind(Binding::scroll(Action::StickyHeader))
            .built()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{self, SAMPLE};
    use crate::render::RenderOptions;

    #[test]
    fn test_logo_text() {
        let portfolio = data::from_str(SAMPLE).unwrap().portfolio;
        let ctx = Context::new(&portfolio, &RenderOptions::default());
        let Built::Fragment(fragment) = Logo.build(&ctx) else {
            panic!("logo is always present");
        };
        assert!(fragment.html.contains(r#"<span class="logo-text">jane.doe</span>"#));
    }

    #[test]
    fn test_nav_cta_and_order() {
        let portfolio = data::from_str(SAMPLE).unwrap().portfolio;
        let ctx = Context::new(&portfolio, &RenderOptions::default());
        let Built::Fragment(fragment) = Nav.build(&ctx) else {
            panic!("sample has navigation");
        };

        let about = fragment.html.find("#about").unwrap();
        let contact = fragment.html.find("#contact").unwrap();
        assert!(about < contact);
        assert!(fragment.html.contains(r##"<a href="#contact" class="nav-cta">Contact</a>"##));
        assert_eq!(fragment.bindings.len(), 3);
    }

    #[test]
    fn test_nav_absent_without_entries() {
        let mut portfolio = data::from_str(SAMPLE).unwrap().portfolio;
        portfolio.navigation.clear();
        let ctx = Context::new(&portfolio, &RenderOptions::default());
        assert!(matches!(Nav.build(&ctx), Built::Absent(_)));
    }
}
