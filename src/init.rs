//! Site initialization module.
//!
//! Creates a new project with default configuration and a sample portfolio.

use crate::{config::SiteConfig, data::SAMPLE, log};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Default config filename
const CONFIG_FILE: &str = "folio.toml";

/// Create a new site under `config.root`.
///
/// The target must be missing or empty.
pub fn new_site(config: &SiteConfig) -> Result<()> {
    let root = config.get_root();

    if !is_dir_empty(root)? {
        bail!(
            "`{}` is not empty. Use `folio init <SITE_NAME>` to create in a subdirectory.",
            root.display()
        );
    }
    fs::create_dir_all(root).with_context(|| format!("Failed to create {}", root.display()))?;

    init_default_config(root)?;
    fs::write(root.join(&SiteConfig::default().site.data), SAMPLE)?;
    fs::create_dir_all(root.join(&SiteConfig::default().build.assets))?;
    init_ignored_files(root, &[&SiteConfig::default().build.output])?;

    log!("init"; "created {}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file
fn init_default_config(root: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&SiteConfig::default())?;
    fs::write(root.join(CONFIG_FILE), content)?;
    Ok(())
}

/// Initialize .gitignore and .ignore files with specified paths
fn init_ignored_files(root: &Path, paths: &[&Path]) -> Result<()> {
    let content = paths
        .iter()
        .filter_map(|p| p.to_str())
        .map(|p| format!("/{p}/\n"))
        .collect::<String>();

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, &content)?;
        }
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
