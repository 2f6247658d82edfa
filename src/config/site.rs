//! `[site]` section configuration.
//!
//! Points at the portfolio data file and carries page-level metadata.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[site]` section in folio.toml.
///
/// # Example
/// ```toml
/// [site]
/// data = "portfolio.toml"
/// title = "Jane Doe | Backend Engineer"
/// language = "en-US"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteSection {
    /// Portfolio data file (the single content record).
    #[serde(default = "defaults::site::data")]
    #[educe(Default = defaults::site::data())]
    pub data: PathBuf,

    /// Page title. Derived from `personal.name` and `personal.role` when unset.
    #[serde(default = "defaults::site::title")]
    #[educe(Default = defaults::site::title())]
    pub title: Option<String>,

    /// BCP 47 language code for `<html lang>`.
    #[serde(default = "defaults::site::language")]
    #[educe(Default = defaults::site::language())]
    pub language: String,
}
