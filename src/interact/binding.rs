//! Listener bindings with explicit disposal.
//!
//! Section builders declare which elements react to which events. The
//! renderer attaches a section's bindings and keeps the returned [`Disposer`];
//! before the section is rendered again the disposer is handed back, so a
//! re-render never leaves duplicate listeners behind.

use serde::Serialize;

/// DOM event a binding listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Click,
    Keydown,
    Scroll,
}

/// Presentation-only reaction performed by the page runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Smooth-scroll to the `href` of the clicked link.
    ScrollTo,
    /// Open/close the mobile navigation.
    ToggleMenu,
    /// Shade the header once scrolled and slide it away while scrolling down.
    StickyHeader,
    /// Activate the tab/file named by `data-file`.
    SwitchTab,
    /// Close the tab named by `data-file`.
    CloseTab,
    /// Ask for a file name, then create and open a placeholder file.
    NewFile,
    /// Expand/collapse an explorer folder.
    ToggleFolder,
    /// Send the chat input to the canned responder.
    SendChat,
    /// Minimize/restore the chat panel.
    ToggleChat,
}

/// One `selector` + `event` → `action` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub selector: String,
    pub event: EventKind,
    pub action: Action,
}

impl Binding {
    pub fn click(selector: impl Into<String>, action: Action) -> Self {
        Self {
            selector: selector.into(),
            event: EventKind::Click,
            action,
        }
    }

    pub fn keydown(selector: impl Into<String>, action: Action) -> Self {
        Self {
            selector: selector.into(),
            event: EventKind::Keydown,
            action,
        }
    }

    /// Listen on window scroll.
    pub fn scroll(action: Action) -> Self {
        Self {
            selector: "window".into(),
            event: EventKind::Scroll,
            action,
        }
    }
}

/// Handle returned by [`BindingRegistry::attach`]; detaches exactly that set.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping a disposer leaks its bindings until the registry is cleared"]
pub struct Disposer {
    token: u64,
}

struct Attached {
    token: u64,
    section: &'static str,
    bindings: Vec<Binding>,
}

/// Bindings currently attached, in attach order.
#[derive(Default)]
pub struct BindingRegistry {
    next_token: u64,
    attached: Vec<Attached>,
}

/// A binding as published in the page manifest.
#[derive(Debug, Clone, Serialize)]
pub struct BoundListener<'a> {
    pub section: &'static str,
    #[serde(flatten)]
    pub binding: &'a Binding,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a section's bindings.
    pub fn attach(&mut self, section: &'static str, bindings: Vec<Binding>) -> Disposer {
        let token = self.next_token;
        self.next_token += 1;
        self.attached.push(Attached {
            token,
            section,
            bindings,
        });
        Disposer { token }
    }

    /// Detach the bindings registered under `disposer`. Returns how many were removed.
    pub fn dispose(&mut self, disposer: Disposer) -> usize {
        match self.attached.iter().position(|a| a.token == disposer.token) {
            Some(index) => self.attached.remove(index).bindings.len(),
            None => 0,
        }
    }

    /// Total number of attached bindings.
    pub fn len(&self) -> usize {
        self.attached.iter().map(|a| a.bindings.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attached bindings flattened in attach order.
    pub fn listeners(&self) -> Vec<BoundListener<'_>> {
        self.attached
            .iter()
            .flat_map(|a| {
                a.bindings.iter().map(|binding| BoundListener {
                    section: a.section,
                    binding,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav_bindings() -> Vec<Binding> {
        vec![
            Binding::click(".nav-links a", Action::ScrollTo),
            Binding::click(".mobile-menu-btn", Action::ToggleMenu),
        ]
    }

    #[test]
    fn test_attach_and_dispose() {
        let mut registry = BindingRegistry::new();
        let nav = registry.attach("nav", nav_bindings());
        let chat = registry.attach("chat", vec![Binding::click(".send-btn", Action::SendChat)]);
        assert_eq!(registry.len(), 3);

        assert_eq!(registry.dispose(nav), 2);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.listeners()[0].section, "chat");

        assert_eq!(registry.dispose(chat), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_dispose_before_reattach_prevents_duplicates() {
        let mut registry = BindingRegistry::new();
        let mut disposer = registry.attach("nav", nav_bindings());

        for _ in 0..5 {
            registry.dispose(disposer);
            disposer = registry.attach("nav", nav_bindings());
        }

        assert_eq!(registry.len(), 2);
        let _ = registry.dispose(disposer);
    }

    #[test]
    fn test_disposer_only_removes_its_own_set() {
        let mut registry = BindingRegistry::new();
        let first = registry.attach("nav", nav_bindings());
        let _second = registry.attach("nav", nav_bindings());

        registry.dispose(first);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_listener_serialization() {
        let mut registry = BindingRegistry::new();
        let _d = registry.attach("editor", vec![Binding::keydown(".chat-input input", Action::SendChat)]);

        let json = serde_json::to_string(&registry.listeners()).unwrap();
        assert_eq!(
            json,
            r#"[{"section":"editor","selector":".chat-input input","event":"keydown","action":"send-chat"}]"#
        );
    }
}
