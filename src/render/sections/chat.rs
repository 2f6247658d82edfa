//! Chat panel: seeded transcript plus the input wired to the canned responder.

use crate::data::Speaker;
use crate::interact::{Action, Binding};
use crate::render::{Built, Context, Fragment, Section, html::{escape, paragraphs}};

pub struct Chat;

impl Section for Chat {
    fn mount(&self) -> &'static str {
        "chat"
    }

    fn build(&self, ctx: &Context<'_>) -> Built {
        let personal = &ctx.portfolio.personal;
        let who = personal.first_name.as_deref().unwrap_or(&personal.name);
        let mut html = format!(
            r#"<div class="chat-header" id="chatHeader"><span class="chat-title">🤖 Ask about {}</span><button class="chat-minimize" id="chatMinimizeBtn" aria-label="Minimize">−</button></div><div class="chat-messages">"#,
            escape(who)
        );

        for line in &ctx.portfolio.chat.transcript {
            let (class, avatar) = match line.from {
                Speaker::User => ("user", "👤"),
                Speaker::Assistant => ("assistant", "🤖"),
            };
            html.push_str(&format!(
                r#"<div class="chat-message {class}"><span class="avatar">{avatar}</span><div class="message-content">{}</div></div>"#,
                paragraphs(&line.message)
            ));
        }
        html.push_str(
            r#"</div><div class="chat-input"><input type="text" placeholder="Ask about experience, skills, projects..." aria-label="Message"><button class="send-btn" aria-label="Send">➤</button></div>"#,
        );

        Fragment::new(html)
            .bind(Binding::click(".send-btn", Action::SendChat))
            .bind(Binding::keydown(".chat-input input", Action::SendChat))
            .bind(Binding::click(".chat-minimize", Action::ToggleChat))
            .bind(Binding::click(".chat-header", Action::ToggleChat))
            .built()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{self, ChatLine, SAMPLE};
    use crate::render::RenderOptions;

    #[test]
    fn test_transcript_rendered_in_order() {
        let mut portfolio = data::from_str(SAMPLE).unwrap().portfolio;
        portfolio.chat.transcript = vec![
            ChatLine {
                from: Speaker::User,
                message: "<hi>".into(),
            },
            ChatLine {
                from: Speaker::Assistant,
                message: "One.\n\nTwo.".into(),
            },
        ];
        let ctx = Context::new(&portfolio, &RenderOptions::default());
        let Built::Fragment(fragment) = Chat.build(&ctx) else {
            panic!("chat always renders");
        };

        let html = &fragment.html;
        assert!(html.contains(r#"<div class="message-content"><p>&lt;hi&gt;</p></div>"#));
        assert!(html.contains("<p>One.</p><p>Two.</p>"));
        assert!(html.find("chat-message user").unwrap() < html.find("chat-message assistant").unwrap());
        assert!(html.contains("Ask about Jane"));
        assert_eq!(fragment.bindings.len(), 4);
    }
}
