//! Shared helpers.

pub mod hash;
pub mod minify;
