use super::{reveal_key, section_header};
use crate::interact::RevealTarget;
use crate::render::{Built, Context, Fragment, Section, html::escape};

pub struct Testimonials;

impl Section for Testimonials {
    fn mount(&self) -> &'static str {
        "testimonials"
    }

    fn build(&self, ctx: &Context<'_>) -> Built {
        let testimonials = &ctx.portfolio.testimonials;
        if testimonials.is_empty() {
            return Built::Absent("no testimonials");
        }
        let mount = self.mount();

        let mut html = section_header("// testimonials", "What people say");
        html.push_str(r#"<div class="testimonials-grid">"#);
        for (i, t) in testimonials.iter().enumerate() {
            let role = t
                .role
                .as_deref()
                .map(|r| format!(r#"<span class="author-role">{}</span>"#, escape(r)))
                .unwrap_or_default();
            html.push_str(&format!(
                r#"<div class="testimonial-card" data-reveal="{}"><p class="quote">“{}”</p><div class="author"><span class="author-name">{}</span>{role}</div></div>"#,
                reveal_key(mount, i),
                escape(&t.quote),
                escape(&t.author)
            ));
        }
        html.push_str("</div>");

        Fragment::new(html)
            .reveal((0..testimonials.len()).map(|i| RevealTarget::fade(mount, reveal_key(mount, i))))
            .built()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{self, SAMPLE};
    use crate::render::RenderOptions;

    #[test]
    fn test_testimonial_card() {
        let portfolio = data::from_str(SAMPLE).unwrap().portfolio;
        let ctx = Context::new(&portfolio, &RenderOptions::default());
        let Built::Fragment(fragment) = Testimonials.build(&ctx) else {
            panic!("sample has a testimonial");
        };
        assert!(fragment.html.contains(r#"<span class="author-name">Sam Rivera</span>"#));
        assert!(fragment.html.contains("author-role"));
    }

    #[test]
    fn test_empty_is_absent() {
        let mut portfolio = data::from_str(SAMPLE).unwrap().portfolio;
        portfolio.testimonials.clear();
        let ctx = Context::new(&portfolio, &RenderOptions::default());
        assert_eq!(Testimonials.build(&ctx), Built::Absent("no testimonials"));
    }
}
