//! File system watcher for live reload.
//!
//! Watches the project root and rebuilds the page when one of its inputs
//! changes.
//!
//! ```text
//! notify ──► Debouncer (300ms) ──► handle_changes()
//!                                     │
//!                                     ├── folio.toml      reload config, rebuild
//!                                     ├── data file       rebuild unless content hash is unchanged
//!                                     ├── template        rebuild
//!                                     ├── assets/**       rebuild
//!                                     └── output, other   ignored
//! ```

use crate::{
    build::build_site,
    config::{SiteConfig, cfg, reload_config},
    log,
    logger::WatchStatus,
    utils::hash,
};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

// =============================================================================
// Constants
// =============================================================================

const DEBOUNCE_MS: u64 = 300;
const REBUILD_COOLDOWN_MS: u64 = 800;

// =============================================================================
// Path Utilities
// =============================================================================

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// Format path relative to the project root for display.
fn rel_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

/// Role of a changed path in the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Change {
    Config,
    Data,
    Template,
    Asset,
    Ignored,
}

fn categorize(path: &Path, config: &SiteConfig) -> Change {
    if path.starts_with(&config.build.output) {
        return Change::Ignored;
    }
    if path == config.config_path {
        Change::Config
    } else if path == config.data_path() {
        Change::Data
    } else if config.build.template.as_deref() == Some(path) {
        Change::Template
    } else if path.starts_with(&config.build.assets) {
        Change::Asset
    } else {
        Change::Ignored
    }
}

fn data_hash(path: &Path) -> Option<u64> {
    fs::read(path).ok().map(|content| hash::compute(&content))
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events with debouncing and rebuild cooldown.
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    last_rebuild: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
            last_rebuild: None,
        }
    }

    fn in_cooldown(&self) -> bool {
        self.last_rebuild
            .is_some_and(|t| t.elapsed() < Duration::from_millis(REBUILD_COOLDOWN_MS))
    }

    fn add(&mut self, event: Event) {
        for path in event.paths {
            if !is_temp_file(&path) {
                self.pending.insert(path);
            }
        }
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn mark_rebuild(&mut self) {
        self.last_rebuild = Some(Instant::now());
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

// =============================================================================
// Event Handler
// =============================================================================

/// State carried between batches of changes.
struct Session {
    status: WatchStatus,
    /// Content hash of the data file behind the last successful build.
    data_hash: Option<u64>,
}

impl Session {
    fn new(config: &SiteConfig) -> Self {
        Self {
            status: WatchStatus::new(),
            data_hash: data_hash(config.data_path()),
        }
    }

    /// Process one batch of changed paths. Returns true if a rebuild succeeded.
    fn handle_changes(&mut self, paths: &[PathBuf]) -> bool {
        let before = cfg();
        let changes: FxHashSet<Change> = paths
            .iter()
            .map(|p| categorize(p, &before))
            .filter(|c| *c != Change::Ignored)
            .collect();
        if changes.is_empty() {
            return false;
        }

        let mut reasons = Vec::new();
        if changes.contains(&Change::Config) {
            match reload_config() {
                Ok(true) => reasons.push("config"),
                Ok(false) => {}
                Err(err) => {
                    self.status.error("config reload failed", &format!("{err:#}"));
                    return false;
                }
            }
        }

        let config = cfg();
        let data_path = config.data_path();
        if changes.contains(&Change::Data) {
            if data_hash(data_path) == self.data_hash {
                if reasons.is_empty() && changes.len() == 1 {
                    self.status.unchanged(&rel_path(data_path, config.get_root()));
                    return false;
                }
            } else {
                reasons.push("data");
            }
        }
        if changes.contains(&Change::Template) {
            reasons.push("template");
        }
        if changes.contains(&Change::Asset) {
            reasons.push("assets");
        }
        if reasons.is_empty() {
            return false;
        }

        self.rebuild(&config, &reasons.join(", "))
    }

    fn rebuild(&mut self, config: &SiteConfig, reason: &str) -> bool {
        match build_site(config) {
            Ok(_) => {
                self.data_hash = data_hash(config.data_path());
                self.status.success(&format!("rebuilt: {reason} changed"));
                true
            }
            Err(err) => {
                self.status
                    .error(&format!("build failed ({reason})"), &format!("{err:#}"));
                false
            }
        }
    }
}

// =============================================================================
// Watcher Setup
// =============================================================================

fn setup_watcher(watcher: &mut impl Watcher, config: &SiteConfig) -> Result<()> {
    let root = config.get_root();
    watcher
        .watch(root, RecursiveMode::Recursive)
        .with_context(|| format!("Failed to watch {}", root.display()))?;

    let mut inputs = vec![
        rel_path(&config.config_path, root),
        rel_path(config.data_path(), root),
    ];
    if let Some(template) = &config.build.template {
        inputs.push(rel_path(template, root));
    }
    if config.build.assets.exists() {
        inputs.push(format!("{}/", rel_path(&config.build.assets, root)));
    }
    log!("watch"; "watching {}", inputs.join(", "));
    Ok(())
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

// =============================================================================
// Public API
// =============================================================================

/// Start blocking file watcher with debouncing and live rebuild.
pub fn watch_for_changes_blocking() -> Result<()> {
    let config = cfg();
    if !config.serve.watch {
        return Ok(());
    }

    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    setup_watcher(&mut watcher, &config)?;

    let mut debouncer = Debouncer::new();
    let mut session = Session::new(&config);
    drop(config);

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) && !debouncer.in_cooldown() => {
                debouncer.add(event);
            }
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) if debouncer.ready() => {
                if session.handle_changes(&debouncer.take()) {
                    debouncer.mark_rebuild();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
            _ => {}
        }
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.root = PathBuf::from("/site");
        config.config_path = PathBuf::from("/site/folio.toml");
        config.site.data = PathBuf::from("/site/portfolio.toml");
        config.build.output = PathBuf::from("/site/public");
        config.build.assets = PathBuf::from("/site/assets");
        config.build.template = Some(PathBuf::from("/site/layout.html"));
        config
    }

    // -------------------------------------------------------------------------
    // is_temp_file
    // -------------------------------------------------------------------------

    #[test]
    fn test_is_temp_file() {
        assert!(is_temp_file(Path::new("/site/portfolio.toml~")));
        assert!(is_temp_file(Path::new("/site/.portfolio.toml.swp")));
        assert!(is_temp_file(Path::new("/site/assets/logo.png.tmp")));
        assert!(is_temp_file(Path::new("/site/folio.toml.bak")));
        assert!(!is_temp_file(Path::new("/site/portfolio.toml")));
        assert!(!is_temp_file(Path::new("/site/assets/logo.png")));
    }

    // -------------------------------------------------------------------------
    // categorize
    // -------------------------------------------------------------------------

    #[test]
    fn test_categorize_inputs() {
        let config = config();
        let at = |p: &str| categorize(Path::new(p), &config);

        assert_eq!(at("/site/folio.toml"), Change::Config);
        assert_eq!(at("/site/portfolio.toml"), Change::Data);
        assert_eq!(at("/site/layout.html"), Change::Template);
        assert_eq!(at("/site/assets/img/avatar.png"), Change::Asset);
        assert_eq!(at("/site/README.md"), Change::Ignored);
    }

    #[test]
    fn test_categorize_ignores_output() {
        let mut config = config();
        config.build.assets = PathBuf::from("/site/public/assets");

        assert_eq!(
            categorize(Path::new("/site/public/index.html"), &config),
            Change::Ignored
        );
        assert_eq!(
            categorize(Path::new("/site/public/assets/logo.png"), &config),
            Change::Ignored
        );
    }

    #[test]
    fn test_categorize_without_template() {
        let mut config = config();
        config.build.template = None;
        assert_eq!(
            categorize(Path::new("/site/layout.html"), &config),
            Change::Ignored
        );
    }

    // -------------------------------------------------------------------------
    // Debouncer
    // -------------------------------------------------------------------------

    #[test]
    fn test_debouncer_skips_temp_files() {
        let mut debouncer = Debouncer::new();
        let event = Event::new(EventKind::Any)
            .add_path(PathBuf::from("/site/portfolio.toml"))
            .add_path(PathBuf::from("/site/portfolio.toml~"));
        debouncer.add(event);

        assert!(!debouncer.ready());
        assert_eq!(debouncer.timeout(), Duration::from_millis(DEBOUNCE_MS));
        assert_eq!(debouncer.take(), vec![PathBuf::from("/site/portfolio.toml")]);
        assert_eq!(debouncer.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_debouncer_ready_after_quiet_period() {
        let mut debouncer = Debouncer::new();
        debouncer.add(Event::new(EventKind::Any).add_path(PathBuf::from("/site/a")));
        debouncer.last_event = Some(Instant::now() - Duration::from_millis(DEBOUNCE_MS + 1));
        assert!(debouncer.ready());

        debouncer.mark_rebuild();
        assert!(debouncer.in_cooldown());
    }

    #[test]
    fn test_data_hash_tracks_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.toml");
        assert_eq!(data_hash(&path), None);

        fs::write(&path, "a").unwrap();
        let first = data_hash(&path);
        fs::write(&path, "a").unwrap();
        assert_eq!(data_hash(&path), first);
        fs::write(&path, "b").unwrap();
        assert_ne!(data_hash(&path), first);
    }
}
