//! Contact card and footer.

use super::reveal_key;
use crate::interact::RevealTarget;
use crate::render::{Built, Context, Fragment, Section, html::{escape, escape_attr}};

pub struct Contact;

impl Section for Contact {
    fn mount(&self) -> &'static str {
        "contact"
    }

    fn build(&self, ctx: &Context<'_>) -> Built {
        let personal = &ctx.portfolio.personal;
        let mount = self.mount();
        let key = reveal_key(mount, 0);

        let mut html = format!(
            r#"<div class="contact-card" data-reveal="{key}"><h2>Let's build something together</h2>"#
        );
        if let Some(note) = &personal.availability_note {
            html.push_str(&format!(r#"<p class="availability">{}</p>"#, escape(note)));
        }
        html.push_str(&format!(
            r#"<a class="contact-email" href="mailto:{}">{}</a>"#,
            escape_attr(&personal.email),
            escape(&personal.email)
        ));
        if let Some(location) = &personal.location {
            html.push_str(&format!(r#"<p class="location">📍 {}</p>"#, escape(location)));
        }
        if let Some(website) = &personal.website {
            let href = if website.contains("://") {
                website.clone()
            } else {
                format!("https://{website}")
            };
            html.push_str(&format!(
                r#"<a class="website" href="{}" target="_blank" rel="noopener">{}</a>"#,
                escape_attr(&href),
                escape(website)
            ));
        }

        let social = &ctx.portfolio.social;
        if !social.is_empty() {
            html.push_str(r#"<div class="social-links">"#);
            for link in social {
                let inner = format!(
                    r#"<span class="platform">{}</span><span class="handle">{}</span>"#,
                    escape(&link.platform),
                    escape(&link.handle)
                );
                match &link.url {
                    Some(url) => html.push_str(&format!(
                        r#"<a class="social-link" href="{}" target="_blank" rel="noopener">{inner}</a>"#,
                        escape_attr(url)
                    )),
                    None => html.push_str(&format!(r#"<span class="social-link">{inner}</span>"#)),
                }
            }
            html.push_str("</div>");
        }
        html.push_str("</div>");

        Fragment::new(html)
            .reveal([RevealTarget::fade(mount, key)])
            .built()
    }
}

pub struct Footer;

impl Section for Footer {
    fn mount(&self) -> &'static str {
        "footer"
    }

    fn build(&self, ctx: &Context<'_>) -> Built {
        let footer = &ctx.portfolio.footer;
        let copyright = footer
            .copyright
            .clone()
            .unwrap_or_else(|| format!("© {}", ctx.portfolio.personal.name));

        let mut html = format!(r#"<p class="copyright">{}</p>"#, escape(&copyright));
        if !footer.badges.is_empty() {
            html.push_str(r#"<div class="badges">"#);
            for badge in &footer.badges {
                let icon = badge
                    .icon
                    .as_deref()
                    .map(|i| format!("{} ", escape(i)))
                    .unwrap_or_default();
                html.push_str(&format!(
                    r#"<span class="badge">{icon}{}</span>"#,
                    escape(&badge.text)
                ));
            }
            html.push_str("</div>");
        }
        Fragment::new(html).built()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{self, Portfolio, SAMPLE};
    use crate::render::RenderOptions;

    fn html(section: &dyn Section, portfolio: &Portfolio) -> String {
        let ctx = Context::new(portfolio, &RenderOptions::default());
        match section.build(&ctx) {
            Built::Fragment(fragment) => fragment.html,
            Built::Absent(reason) => panic!("absent: {reason}"),
        }
    }

    #[test]
    fn test_contact_links() {
        let html = html(&Contact, &data::from_str(SAMPLE).unwrap().portfolio);

        assert!(html.contains(r#"href="mailto:jane@example.com""#));
        assert!(html.contains(r#"href="https://janedoe.dev""#));
        assert!(html.contains(r#"<a class="social-link" href="https://github.com/janedoe""#));
        // Mastodon has no url: no link wrapper.
        assert!(html.contains(r#"<span class="social-link"><span class="platform">Mastodon</span>"#));
    }

    #[test]
    fn test_footer_default_copyright() {
        let mut portfolio = data::from_str(SAMPLE).unwrap().portfolio;
        portfolio.footer.copyright = None;
        portfolio.footer.badges.clear();

        assert_eq!(html(&Footer, &portfolio), r#"<p class="copyright">© Jane Doe</p>"#);
    }

    #[test]
    fn test_footer_badges() {
        let html = html(&Footer, &data::from_str(SAMPLE).unwrap().portfolio);
        assert!(html.contains(r#"<span class="badge">🦀 Rust</span>"#));
    }
}
