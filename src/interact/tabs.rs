//! Tab/file switch state machine of the code-editor panel.
//!
//! There is always at least one open tab and exactly one of them is active.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TabError {
    #[error("no open tab named `{0}`")]
    Unknown(String),
}

/// Outcome of [`TabSet::open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opened {
    Created,
    Existing,
}

/// Outcome of [`TabSet::close`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closed {
    Removed,
    /// The tab was the only one left and stays open.
    KeptLast,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabSet {
    tabs: Vec<String>,
    active: usize,
}

impl TabSet {
    /// A single tab, active.
    pub fn new(first: impl Into<String>) -> Self {
        Self {
            tabs: vec![first.into()],
            active: 0,
        }
    }

    /// Add `name` if absent and make it active.
    pub fn open(&mut self, name: &str) -> Opened {
        match self.position(name) {
            Some(index) => {
                self.active = index;
                Opened::Existing
            }
            None => {
                self.tabs.push(name.to_owned());
                self.active = self.tabs.len() - 1;
                Opened::Created
            }
        }
    }

    pub fn activate(&mut self, name: &str) -> Result<(), TabError> {
        self.active = self
            .position(name)
            .ok_or_else(|| TabError::Unknown(name.to_owned()))?;
        Ok(())
    }

    /// Remove `name`. Closing the active tab activates the first remaining one.
    pub fn close(&mut self, name: &str) -> Result<Closed, TabError> {
        let index = self
            .position(name)
            .ok_or_else(|| TabError::Unknown(name.to_owned()))?;
        if self.tabs.len() == 1 {
            return Ok(Closed::KeptLast);
        }

        self.tabs.remove(index);
        if index == self.active {
            self.active = 0;
        } else if index < self.active {
            self.active -= 1;
        }
        Ok(Closed::Removed)
    }

    pub fn active(&self) -> &str {
        &self.tabs[self.active]
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active() == name
    }

    pub fn tabs(&self) -> &[String] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.tabs.iter().position(|tab| tab == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> TabSet {
        let mut set = TabSet::new("JaneDoe.java");
        set.open("README.md");
        set.open("application.yml");
        set.open("JaneDoe.java");
        set
    }

    fn active_count(set: &TabSet) -> usize {
        set.tabs().iter().filter(|t| set.is_active(t)).count()
    }

    // ------------------------------------------------------------------------
    // open / activate
    // ------------------------------------------------------------------------

    #[test]
    fn test_initial_state() {
        let set = editor();
        assert_eq!(set.active(), "JaneDoe.java");
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_open_never_duplicates() {
        let mut set = TabSet::new("Main.java");
        for name in ["Main.java", "README.md", "README.md"] {
            set.open(name);
        }
        assert_eq!(set.tabs(), ["Main.java", "README.md"]);
    }

    #[test]
    fn test_open_creates_and_activates() {
        let mut set = editor();
        assert_eq!(set.open("pom.xml"), Opened::Created);
        assert_eq!(set.active(), "pom.xml");
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_open_existing_only_activates() {
        let mut set = editor();
        assert_eq!(set.open("README.md"), Opened::Existing);
        assert_eq!(set.active(), "README.md");
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_activate_unknown() {
        let mut set = editor();
        assert_eq!(
            set.activate("nope.txt"),
            Err(TabError::Unknown("nope.txt".into()))
        );
        assert_eq!(set.active(), "JaneDoe.java");
    }

    // ------------------------------------------------------------------------
    // close
    // ------------------------------------------------------------------------

    #[test]
    fn test_close_active_selects_first_remaining() {
        let mut set = editor();
        set.activate("README.md").unwrap();
        assert_eq!(set.close("README.md"), Ok(Closed::Removed));
        assert_eq!(set.active(), "JaneDoe.java");
    }

    #[test]
    fn test_close_before_active_keeps_active() {
        let mut set = editor();
        set.activate("application.yml").unwrap();
        set.close("README.md").unwrap();
        assert_eq!(set.active(), "application.yml");
    }

    #[test]
    fn test_close_all_but_one_leaves_exactly_one_active() {
        let mut set = editor();
        set.open("pom.xml");
        let names: Vec<String> = set.tabs()[1..].to_vec();
        for name in &names {
            set.close(name).unwrap();
            assert_eq!(active_count(&set), 1);
        }
        assert_eq!(set.tabs(), ["JaneDoe.java"]);
        assert_eq!(set.active(), "JaneDoe.java");
    }

    #[test]
    fn test_close_last_is_kept() {
        let mut set = TabSet::new("Main.java");
        assert_eq!(set.close("Main.java"), Ok(Closed::KeptLast));
        assert_eq!(set.active(), "Main.java");
    }

    #[test]
    fn test_close_unknown() {
        let mut set = editor();
        assert!(set.close("x").is_err());
        assert_eq!(set.len(), 3);
    }
}
