//! Companies strip, feature cards and the metrics terminal.

use super::{reveal_key, section_header};
use crate::interact::{Action, Binding, RevealTarget};
use crate::render::{Built, Context, Fragment, Section, html::{escape, icon}};

pub struct Companies;

impl Section for Companies {
    fn mount(&self) -> &'static str {
        "companies"
    }

    fn build(&self, ctx: &Context<'_>) -> Built {
        let companies = &ctx.portfolio.companies;
        if companies.is_empty() {
            return Built::Absent("no companies");
        }

        let mut html = String::from(r#"<p class="companies-label">Trusted by teams at</p><div class="companies-list">"#);
        for company in companies {
            html.push_str(&format!(
                r#"<div class="company">{}<span class="company-name">{}</span></div>"#,
                icon(company.icon.as_deref()),
                escape(&company.name)
            ));
        }
        html.push_str("</div>");
        Fragment::new(html).built()
    }
}

pub struct Features;

impl Section for Features {
    fn mount(&self) -> &'static str {
        "features"
    }

    fn build(&self, ctx: &Context<'_>) -> Built {
        let features = &ctx.portfolio.features;
        if features.is_empty() {
            return Built::Absent("no features");
        }
        let mount = self.mount();

        let mut html = section_header("// about", "What I bring");
        html.push_str(r#"<div class="features-grid">"#);
        for (i, feature) in features.iter().enumerate() {
            html.push_str(&format!(
                r#"<div class="feature-card" data-reveal="{}"><h3>{}</h3><p>{}</p>"#,
                reveal_key(mount, i),
                escape(&feature.title),
                escape(&feature.description)
            ));
            if let Some(link) = feature.link {
                let text = feature.link_text.as_deref().unwrap_or("Learn more →");
                html.push_str(&format!(
                    r#"<a href="{}" class="feature-link">{}</a>"#,
                    link.href(),
                    escape(text)
                ));
            }
            html.push_str("</div>");
        }
        html.push_str("</div>");

        Fragment::new(html)
            .bind(Binding::click(".feature-link", Action::ScrollTo))
            .reveal((0..features.len()).map(|i| RevealTarget::fade(mount, reveal_key(mount, i))))
            .built()
    }
}

pub struct Metrics;

impl Section for Metrics {
    fn mount(&self) -> &'static str {
        "metrics"
    }

    fn build(&self, ctx: &Context<'_>) -> Built {
        let metrics = &ctx.portfolio.metrics;
        if metrics.is_empty() {
            return Built::Absent("no metrics");
        }
        let mount = self.mount();

        let mut html = format!(
            r#"<div class="terminal"><div class="terminal-header"><span class="dot red"></span><span class="dot yellow"></span><span class="dot green"></span><span class="terminal-title">metrics@{}</span></div><div class="terminal-body"><div class="terminal-line"><span class="prompt">$</span> <span class="command">./metrics --live</span></div>"#,
            escape(&ctx.identity.handle)
        );
        let mut reveals = Vec::with_capacity(metrics.len());
        for (i, metric) in metrics.iter().enumerate() {
            let key = reveal_key(mount, i);
            let status = metric.status.as_str();
            html.push_str(&format!(
                r#"<div class="metric"><span class="metric-label">{}</span><div class="metric-bar"><div class="metric-fill {status}" data-reveal="{key}" data-width="{}%" style="width: 0%"></div></div><span class="metric-value {status}">{}</span></div>"#,
                escape(&metric.label),
                metric.percentage,
                escape(&metric.value)
            ));
            reveals.push(RevealTarget::bar(mount, key, metric.percentage.get()));
        }
        html.push_str("</div></div>");

        Fragment::new(html).reveal(reveals).built()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{self, Percent, Portfolio, SAMPLE};
    use crate::interact::Effect;
    use crate::render::RenderOptions;

    fn sample() -> Portfolio {
        data::from_str(SAMPLE).unwrap().portfolio
    }

    fn fragment(section: &dyn Section, portfolio: &Portfolio) -> Fragment {
        let ctx = Context::new(portfolio, &RenderOptions::default());
        match section.build(&ctx) {
            Built::Fragment(fragment) => fragment,
            Built::Absent(reason) => panic!("absent: {reason}"),
        }
    }

    #[test]
    fn test_companies_in_order() {
        let html = fragment(&Companies, &sample()).html;
        let first = html.find("Northwind Payments").unwrap();
        let second = html.find("Contoso Analytics").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_features_links() {
        let mut portfolio = sample();
        portfolio.features[1].link = None;
        let fragment = fragment(&Features, &portfolio);

        assert_eq!(fragment.html.matches("feature-link").count(), 1);
        assert!(fragment.html.contains(r##"href="#experience""##));
        assert_eq!(fragment.reveals.len(), 2);
    }

    #[test]
    fn test_metric_bar_width_and_status() {
        let fragment = fragment(&Metrics, &sample());
        assert!(fragment.html.contains(r#"class="metric-fill good" data-reveal="metrics-0" data-width="15%""#));
        assert!(fragment.html.contains(r#"data-width="99.99%""#));
        assert_eq!(fragment.reveals[1].effect, Effect::GrowTo(95.0));
    }

    #[test]
    fn test_metric_clamped_to_hundred() {
        let mut portfolio = sample();
        portfolio.metrics[0].percentage = Percent::clamped(150.0).0;
        let fragment = fragment(&Metrics, &portfolio);
        assert!(fragment.html.contains(r#"data-width="100%""#));
    }

    #[test]
    fn test_absent_when_empty() {
        let mut portfolio = sample();
        portfolio.companies.clear();
        portfolio.features.clear();
        portfolio.metrics.clear();
        let ctx = Context::new(&portfolio, &RenderOptions::default());

        for section in [&Companies as &dyn Section, &Features, &Metrics] {
            assert!(matches!(section.build(&ctx), Built::Absent(_)));
        }
    }
}
