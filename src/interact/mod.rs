//! Interaction state for the generated page.
//!
//! The behaviours of the page (listener bindings, editor tabs, the chat
//! responder, scroll reveal, code typing) are modelled here as plain state
//! machines. The renderer serializes their state into the page manifest, and the
//! embedded runtime script only replays what the manifest says.

mod binding;
mod chat;
mod reveal;
mod tabs;

pub use binding::{Action, Binding, BindingRegistry, BoundListener, Disposer, EventKind};
pub use chat::{ChatResponder, KeywordGroup};
pub use reveal::{Effect, RevealTarget, RevealTracker, Typing};
pub use tabs::{Closed, Opened, TabError, TabSet};
