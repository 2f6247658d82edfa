//! Site configuration management for `folio.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[site]`    | Data file location, page title, language         |
//! | `[build]`   | Output/assets paths, template override, minify   |
//! | `[editor]`  | Virtual files of the code-editor panel           |
//! | `[serve]`   | Development server (interface, port, watch)      |
//!
//! # Example
//!
//! ```toml
//! [site]
//! data = "portfolio.toml"
//! language = "en-US"
//!
//! [build]
//! output = "public"
//! minify = true
//!
//! [editor]
//! extension = "java"
//! files = ["README.md"]
//!
//! [serve]
//! port = 5277
//! ```

mod build;
pub mod defaults;
mod editor;
mod error;
mod handle;
mod serve;
mod site;

pub use handle::{cfg, init_config, reload_config};

use build::BuildConfig;
use editor::EditorConfig;
use error::ConfigError;
use serve::ServeConfig;
use site::SiteSection;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Absolute project root (set after loading)
    #[serde(skip)]
    pub root: PathBuf,

    /// Data file and page metadata
    #[serde(default)]
    pub site: SiteSection,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Code-editor panel settings
    #[serde(default)]
    pub editor: EditorConfig,

    /// Development server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load the config selected by the CLI and merge CLI overrides.
    ///
    /// A missing config file yields the defaults; callers decide whether that is fatal.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let base = cli.root.clone().unwrap_or_else(|| PathBuf::from("./"));
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => base.join(name),
            _ => base,
        };

        let config_path = root.join(&cli.config);
        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli, &root);
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of the portfolio data file.
    pub fn data_path(&self) -> &Path {
        &self.site.data
    }

    /// Get CLI arguments reference
    pub fn get_cli(&self) -> Option<&'static Cli> {
        self.cli
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli, root: &Path) {
        self.cli = Some(cli);

        if let Some(args) = cli.build_args() {
            Self::update_option(&mut self.build.output, args.output.as_ref());
            Self::update_option(&mut self.build.minify, args.minify.as_ref());
            self.build.clean |= args.clean;
        }

        if let Commands::Serve {
            interface,
            port,
            watch,
            ..
        } = &cli.command
        {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
            Self::update_option(&mut self.serve.watch, watch.as_ref());
        }

        self.update_path_with_root(root, &cli.config);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve all paths against the root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, config_file: &Path) {
        let root = Self::normalize_path(root);

        self.config_path = Self::normalize_path(&root.join(config_file));
        self.site.data = Self::normalize_path(&root.join(&self.site.data));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        self.build.assets = Self::normalize_path(&root.join(&self.build.assets));
        if let Some(template) = self.build.template.as_ref() {
            self.build.template = Some(Self::normalize_path(&root.join(template)));
        }

        self.root = root;
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration values that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let ext = &self.editor.extension;
        if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            bail!(ConfigError::Validation(format!(
                "[editor.extension] must be non-empty ASCII alphanumeric, got `{ext}`"
            )));
        }

        let mut seen = FxHashSet::default();
        for file in &self.editor.files {
            if file.trim().is_empty() {
                bail!(ConfigError::Validation(
                    "[editor.files] entries must not be empty".into()
                ));
            }
            if !seen.insert(file.as_str()) {
                bail!(ConfigError::Validation(format!(
                    "[editor.files] lists `{file}` more than once"
                )));
            }
        }

        match &self.build.template {
            Some(path) if !path.is_file() => bail!(ConfigError::Validation(format!(
                "[build.template] not found: {}",
                path.display()
            ))),
            _ => {}
        }

        if self.build.output == self.root {
            bail!(ConfigError::Validation(
                "[build.output] must not be the project root".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn leak_cli(args: &[&str]) -> &'static Cli {
        Box::leak(Box::new(Cli::parse_from(args)))
    }

    #[test]
    fn test_from_str() {
        let config = SiteConfig::from_str("[site]\ntitle = \"Me\"").unwrap();
        assert_eq!(config.site.title.as_deref(), Some("Me"));
    }

    #[test]
    fn test_from_str_invalid_toml() {
        assert!(SiteConfig::from_str("[site\ntitle = 1").is_err());
    }

    #[test]
    fn test_unknown_top_level_field_rejection() {
        assert!(SiteConfig::from_str("[deploy]\nforce = true").is_err());
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();

        assert!(config.cli.is_none());
        assert_eq!(config.config_path, PathBuf::new());
        assert!(config.build.minify);
        assert_eq!(config.serve.port, 5277);
        assert_eq!(config.editor.extension, "java");
    }

    #[test]
    fn test_load_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = leak_cli(&["folio", "-r", root, "build"]);

        let config = SiteConfig::load(cli).unwrap();
        let root = dir.path().canonicalize().unwrap();

        assert_eq!(config.get_root(), root);
        assert_eq!(config.data_path(), root.join("portfolio.toml"));
        assert_eq!(config.build.output, root.join("public"));
        assert!(!config.config_path.exists());
    }

    #[test]
    fn test_load_applies_cli_overrides() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("folio.toml"),
            "[build]\nminify = true\n[serve]\nport = 4000",
        )
        .unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = leak_cli(&["folio", "-r", root, "serve", "-m", "false", "-p", "9000", "--clean"]);

        let config = SiteConfig::load(cli).unwrap();

        assert!(!config.build.minify);
        assert!(config.build.clean);
        assert_eq!(config.serve.port, 9000);
        assert!(config.config_path.exists());
    }

    #[test]
    fn test_load_init_with_name_nests_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = leak_cli(&["folio", "-r", root, "init", "site"]);

        let config = SiteConfig::load(cli).unwrap();
        assert!(config.get_root().ends_with("site"));
    }

    #[test]
    fn test_validate_rejects_bad_extension() {
        let mut config = SiteConfig::default();
        config.editor.extension = "j.s".into();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("[editor.extension]"));
    }

    #[test]
    fn test_validate_rejects_duplicate_files() {
        let mut config = SiteConfig::default();
        config.editor.files = vec!["README.md".into(), "README.md".into()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_template() {
        let mut config = SiteConfig::default();
        config.build.template = Some(PathBuf::from("/definitely/not/here.html"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_default_ok() {
        let mut config = SiteConfig::default();
        config.root = PathBuf::from("/site");
        config.build.output = PathBuf::from("/site/public");
        assert!(config.validate().is_ok());
    }
}
