//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── data::load()          parse + validate, abort with every error
//!     ├── read_template()
//!     ├── prepare_output()      clean + create output dir
//!     │
//!     ├── rayon::join ─┬── render_page()    template + portfolio → index.html
//!     │                └── copy_assets()    assets/** → output/assets/**
//!     │
//!     └── write_page()          minify, index.html, folio.<hash>.js, folio.css
//! ```

use crate::{
    config::SiteConfig,
    data, debug, log,
    render::{self, Outcome, RenderOptions, RenderReport},
    utils::{hash, minify::minify},
};
use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Browser runtime that reads the page manifest.
pub const RUNTIME_JS: &str = include_str!("embed/runtime.js");

/// Default stylesheet.
pub const STYLESHEET: &str = include_str!("embed/style.css");

pub const STYLESHEET_NAME: &str = "folio.css";

/// Directory under the output that receives copied assets.
pub const ASSETS_DIR: &str = "assets";

/// Files never copied from the assets directory.
const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Build the whole site into `config.build.output`.
///
/// Returns the per-section outcomes of the render pass.
pub fn build_site(config: &SiteConfig) -> Result<RenderReport> {
    let output = &config.build.output;

    // Every input is read before the output directory is touched.
    let validated = data::load(config.data_path())?;
    for warning in &validated.warnings {
        log!("warn"; "{}", warning);
    }
    let portfolio = validated.portfolio;
    let template = read_template(config)?;

    prepare_output(output, config.build.clean)?;
    let script = script_name(RUNTIME_JS);
    let options = RenderOptions::from_config(config).with_assets(STYLESHEET_NAME, &script);

    let ((html, report), copied) = rayon::join(
        || render::render_page(&template, &portfolio, &options),
        || copy_assets(&config.build.assets, &output.join(ASSETS_DIR), config.build.clean),
    );
    let copied = copied?;

    write_page(output, html.as_bytes(), &script, config)?;

    log!(
        "build";
        "{} sections rendered, {} hidden, {} assets copied",
        report.count(|o| *o == Outcome::Mounted),
        report.count(|o| matches!(o, Outcome::Hidden(_))),
        copied
    );
    Ok(report)
}

/// Remove the output directory when `clean`, then make sure it exists.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

fn read_template(config: &SiteConfig) -> Result<String> {
    match &config.build.template {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read template {}", path.display())),
        None => Ok(render::TEMPLATE.to_string()),
    }
}

/// Content-hashed file name of the runtime script.
pub fn script_name(runtime: &str) -> String {
    format!("folio.{}.js", hash::fingerprint(runtime.as_bytes()))
}

/// Write the page, the runtime script and the stylesheet.
fn write_page(output: &Path, html: &[u8], script: &str, config: &SiteConfig) -> Result<()> {
    let page = minify(html, config);
    let index = output.join("index.html");
    fs::write(&index, &*page).with_context(|| format!("Failed to write {}", index.display()))?;

    remove_stale_scripts(output, script)?;
    fs::write(output.join(script), RUNTIME_JS)?;
    fs::write(output.join(STYLESHEET_NAME), STYLESHEET)?;
    Ok(())
}

/// Delete runtime scripts left over from builds with a different hash.
fn remove_stale_scripts(output: &Path, keep: &str) -> Result<()> {
    for entry in fs::read_dir(output)?.filter_map(Result::ok) {
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name != keep && name.starts_with("folio.") && name.ends_with(".js") {
            debug!("build"; "removing stale {}", name);
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}

// ============================================================================
// Assets
// ============================================================================

/// Recursively collect all files in a directory.
pub fn collect_all_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(|e| e.into_path())
        .collect()
}

/// Check if destination is up-to-date compared to source.
pub fn is_up_to_date(src: &Path, dst: &Path) -> bool {
    let modified = |p: &Path| p.metadata().and_then(|m| m.modified()).ok();
    match (modified(src), modified(dst)) {
        (Some(src_time), Some(dst_time)) => src_time <= dst_time,
        _ => false,
    }
}

/// Mirror `assets` into `dest`, skipping files that are already current.
///
/// Returns how many files were copied. A missing assets directory is not an error.
fn copy_assets(assets: &Path, dest: &Path, force: bool) -> Result<usize> {
    if !assets.is_dir() {
        debug!("assets"; "{} does not exist, nothing to copy", assets.display());
        return Ok(0);
    }

    let files = collect_all_files(assets);
    files
        .par_iter()
        .map(|path| -> Result<usize> {
            let relative = path
                .strip_prefix(assets)
                .map_err(|_| anyhow!("{} is outside the assets directory", path.display()))?;
            let target = dest.join(relative);
            if !force && is_up_to_date(path, &target) {
                return Ok(0);
            }
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &target)
                .with_context(|| format!("Failed to copy asset {}", relative.display()))?;
            debug!("assets"; "{}", relative.display());
            Ok(1)
        })
        .sum()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{data::SAMPLE, render::MANIFEST_ID};
    use tempfile::TempDir;

    fn project() -> (TempDir, SiteConfig) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_path_buf();
        fs::write(root.join("portfolio.toml"), SAMPLE).unwrap();

        let mut config = SiteConfig::default();
        config.site.data = root.join("portfolio.toml");
        config.build.output = root.join("public");
        config.build.assets = root.join("assets");
        config.build.minify = false;
        config.root = root;
        (dir, config)
    }

    // ------------------------------------------------------------------------
    // build_site
    // ------------------------------------------------------------------------

    #[test]
    fn test_build_writes_page_and_runtime() {
        let (_dir, config) = project();
        let report = build_site(&config).unwrap();

        let output = &config.build.output;
        let html = fs::read_to_string(output.join("index.html")).unwrap();
        let script = script_name(RUNTIME_JS);

        assert!(html.contains(MANIFEST_ID));
        assert!(html.contains(&script));
        assert!(html.contains(STYLESHEET_NAME));
        assert!(output.join(&script).is_file());
        assert!(output.join(STYLESHEET_NAME).is_file());
        assert_eq!(report.outcome("hero"), Some(Outcome::Mounted));
    }

    #[test]
    fn test_build_rejects_invalid_data() {
        let (_dir, config) = project();
        fs::write(
            config.data_path(),
            "[personal]\nname = \"\"\nemail = \"\"\nrole = \"x\"",
        )
        .unwrap();

        let err = build_site(&config).unwrap_err();
        assert!(format!("{err:#}").contains("personal.name"));
        assert!(!config.build.output.join("index.html").exists());
    }

    #[test]
    fn test_build_invalid_data_keeps_previous_output() {
        let (_dir, mut config) = project();
        config.build.clean = true;
        build_site(&config).unwrap();
        let index = config.build.output.join("index.html");
        let before = fs::read_to_string(&index).unwrap();

        fs::write(config.data_path(), "[personal]\nname = \"\"").unwrap();
        assert!(build_site(&config).is_err());
        assert_eq!(fs::read_to_string(&index).unwrap(), before);

        let (_other, mut missing) = project();
        missing.build.clean = true;
        missing.build.output = config.build.output.clone();
        missing.build.template = Some(missing.root.join("absent.html"));
        assert!(build_site(&missing).is_err());
        assert!(index.exists());
    }

    #[test]
    fn test_build_missing_data_file() {
        let (_dir, config) = project();
        fs::remove_file(config.data_path()).unwrap();
        assert!(build_site(&config).is_err());
    }

    #[test]
    fn test_build_removes_stale_scripts() {
        let (_dir, config) = project();
        let output = &config.build.output;
        fs::create_dir_all(output).unwrap();
        fs::write(output.join("folio.deadbeef.js"), "old").unwrap();
        fs::write(output.join("other.js"), "keep").unwrap();

        build_site(&config).unwrap();

        assert!(!output.join("folio.deadbeef.js").exists());
        assert!(output.join("other.js").exists());
    }

    #[test]
    fn test_build_clean_clears_output() {
        let (_dir, mut config) = project();
        let output = config.build.output.clone();
        fs::create_dir_all(&output).unwrap();
        fs::write(output.join("leftover.txt"), "x").unwrap();

        config.build.clean = true;
        build_site(&config).unwrap();

        assert!(!output.join("leftover.txt").exists());
        assert!(output.join("index.html").exists());
    }

    #[test]
    fn test_build_uses_custom_template() {
        let (dir, mut config) = project();
        let template = dir.path().join("layout.html");
        fs::write(
            &template,
            "<html><head><title>x</title></head><body><div data-mount=\"hero\"></div></body></html>",
        )
        .unwrap();
        config.build.template = Some(template);

        let report = build_site(&config).unwrap();

        assert_eq!(report.outcome("hero"), Some(Outcome::Mounted));
        assert_eq!(report.outcome("skills"), Some(Outcome::Missing));
    }

    #[test]
    fn test_build_minifies_when_enabled() {
        let (_dir, mut config) = project();
        let index = config.build.output.join("index.html");
        build_site(&config).unwrap();
        let plain = fs::read(&index).unwrap().len();

        config.build.minify = true;
        build_site(&config).unwrap();
        assert!(fs::read(&index).unwrap().len() < plain);
    }

    // ------------------------------------------------------------------------
    // Assets
    // ------------------------------------------------------------------------

    #[test]
    fn test_copy_assets_mirrors_tree() {
        let (_dir, config) = project();
        let assets = &config.build.assets;
        fs::create_dir_all(assets.join("img")).unwrap();
        fs::write(assets.join("img/avatar.png"), [0u8, 1, 2]).unwrap();
        fs::write(assets.join("cv.pdf"), "pdf").unwrap();
        fs::write(assets.join(".DS_Store"), "").unwrap();

        build_site(&config).unwrap();

        let dest = config.build.output.join(ASSETS_DIR);
        assert_eq!(fs::read(dest.join("img/avatar.png")).unwrap(), vec![0u8, 1, 2]);
        assert!(dest.join("cv.pdf").is_file());
        assert!(!dest.join(".DS_Store").exists());
    }

    #[test]
    fn test_copy_assets_skips_current_files() {
        let dir = tempfile::tempdir().unwrap();
        let assets = dir.path().join("assets");
        let dest = dir.path().join("out");
        fs::create_dir_all(&assets).unwrap();
        fs::write(assets.join("a.txt"), "a").unwrap();

        assert_eq!(copy_assets(&assets, &dest, false).unwrap(), 1);
        assert_eq!(copy_assets(&assets, &dest, false).unwrap(), 0);
        assert_eq!(copy_assets(&assets, &dest, true).unwrap(), 1);
    }

    #[test]
    fn test_copy_assets_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let copied = copy_assets(&dir.path().join("nope"), &dir.path().join("out"), false);
        assert_eq!(copied.unwrap(), 0);
    }

    #[test]
    fn test_runtime_knows_manifest_vocabulary() {
        use crate::interact::Action;

        let actions = [
            Action::ScrollTo,
            Action::ToggleMenu,
            Action::StickyHeader,
            Action::SwitchTab,
            Action::CloseTab,
            Action::NewFile,
            Action::ToggleFolder,
            Action::SendChat,
            Action::ToggleChat,
        ];
        for action in actions {
            let name = serde_json::to_value(action).unwrap();
            let handler = format!("'{}'(", name.as_str().unwrap());
            assert!(RUNTIME_JS.contains(&handler), "no handler for {handler}");
        }

        assert!(RUNTIME_JS.contains("manifest.typing"));
        assert!(RUNTIME_JS.contains("editor.templates"));
        assert!(RUNTIME_JS.contains("node.dataset.width"));
    }

    #[test]
    fn test_script_name_is_content_hashed() {
        let a = script_name("a");
        assert!(a.starts_with("folio.") && a.ends_with(".js"));
        assert_eq!(a.len(), "folio.".len() + 8 + ".js".len());
        assert_ne!(a, script_name("b"));
    }
}
