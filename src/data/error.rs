//! Data file error types.

use super::validate::ValidationErrors;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the portfolio data file.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("data file not found: `{0}`")]
    NotFound(PathBuf),

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("data file parsing error in `{0}`")]
    Toml(PathBuf, #[source] toml::de::Error),

    #[error("{0}")]
    Invalid(ValidationErrors),
}

impl DataError {
    /// Validation issues carried by this error, if any.
    pub fn issues(&self) -> &[super::validate::Issue] {
        match self {
            Self::Invalid(errors) => &errors.0,
            _ => &[],
        }
    }
}
