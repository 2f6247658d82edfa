//! `[editor]` section configuration.
//!
//! Controls the virtual files shown in the code-editor panel.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[editor]` section in folio.toml.
///
/// The main file is always derived from the portfolio owner's name
/// (`JaneDoe.java`); `files` are opened as additional tabs after it.
///
/// # Example
/// ```toml
/// [editor]
/// extension = "ts"
/// files = ["package.json", "README.md"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct EditorConfig {
    /// Extension of the derived main file.
    #[serde(default = "defaults::editor::extension")]
    #[educe(Default = defaults::editor::extension())]
    pub extension: String,

    /// Additional virtual files, in tab order.
    #[serde(default = "defaults::editor::files")]
    #[educe(Default = defaults::editor::files())]
    pub files: Vec<String>,
}
