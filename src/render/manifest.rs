//! JSON manifest read by the embedded page runtime.

use super::sections::EditorState;
use crate::interact::{BoundListener, ChatResponder, RevealTarget, Typing};
use serde::Serialize;

#[derive(Serialize)]
pub struct Manifest<'a> {
    pub bindings: Vec<BoundListener<'a>>,
    pub reveal: &'a [RevealTarget],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub typing: Vec<&'a Typing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<&'a EditorState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat: Option<&'a ChatResponder>,
}

impl Manifest<'_> {
    pub fn to_json(&self) -> String {
        // Only plain structs with string keys are serialized here.
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}
