//! Portfolio data store.
//!
//! The whole page is driven by one TOML record. It is read, parsed and
//! validated exactly once per build; the resulting [`Portfolio`] is immutable
//! and handed to the renderer by reference.
//!
//! # Pipeline
//!
//! ```text
//! portfolio.toml ──► RawPortfolio ──► validate() ──┬──► Validated { portfolio, warnings }
//!   (read)            (serde/toml)                 └──► DataError::Invalid(every error)
//! ```
//!
//! # Example
//!
//! ```toml
//! [personal]
//! name = "Jane Doe"
//! first_name = "Jane"
//! last_name = "Doe"
//! email = "jane@example.com"
//! role = "Backend Engineer"
//!
//! [[experience]]
//! company = "Acme"
//! role = "Engineer"
//! duration = "2021 - now"
//! achievements = ["Shipped the billing service"]
//! ```

mod error;
mod schema;
mod types;
mod validate;

pub use error::DataError;
pub use types::*;
pub use validate::{Issue, Validated, ValidationErrors};

use schema::RawPortfolio;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Sample record written by `folio init`.
pub const SAMPLE: &str = include_str!("../embed/portfolio.toml");

/// Read, parse and validate the data file at `path`.
pub fn load(path: &Path) -> Result<Validated, DataError> {
    if !path.is_file() {
        return Err(DataError::NotFound(path.to_path_buf()));
    }
    let content =
        fs::read_to_string(path).map_err(|err| DataError::Io(path.to_path_buf(), err))?;
    parse(&content, path)
}

/// Parse and validate a record held in memory.
pub fn from_str(content: &str) -> Result<Validated, DataError> {
    parse(content, &PathBuf::from("<inline>"))
}

fn parse(content: &str, origin: &Path) -> Result<Validated, DataError> {
    let raw: RawPortfolio =
        toml::from_str(content).map_err(|err| DataError::Toml(origin.to_path_buf(), err))?;
    validate::validate(raw).map_err(DataError::Invalid)
}

// ============================================================================
// Tests
// ============================================================================
