//! Decorative identifiers derived from the person's name.
//!
//! `Jane` + `Doe` becomes the class name `JaneDoe`, the handle `janedoe`,
//! the logo text `jane.doe` and the main editor file `JaneDoe.java`.

use deunicode::deunicode;

const PLACEHOLDER_CLASS: &str = "Portfolio";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub class_name: String,
    pub handle: String,
    pub logo: String,
}

impl Identity {
    /// Pure function of the two name parts; missing parts fall back to a placeholder.
    pub fn derive(first: Option<&str>, last: Option<&str>) -> Self {
        let parts: Vec<String> = [first, last]
            .into_iter()
            .flatten()
            .map(clean_part)
            .filter(|p| !p.is_empty())
            .collect();

        if parts.is_empty() {
            return Self {
                class_name: PLACEHOLDER_CLASS.to_owned(),
                handle: PLACEHOLDER_CLASS.to_lowercase(),
                logo: PLACEHOLDER_CLASS.to_lowercase(),
            };
        }

        let class_name: String = parts.iter().map(|p| capitalize(p)).collect();
        let logo = parts
            .iter()
            .map(|p| p.to_lowercase())
            .collect::<Vec<_>>()
            .join(".");
        Self {
            handle: class_name.to_lowercase(),
            class_name,
            logo,
        }
    }

    /// Use `class_name` instead of the derived one when given.
    pub fn with_class_name(mut self, class_name: Option<&str>) -> Self {
        if let Some(name) = class_name.map(str::trim).filter(|n| !n.is_empty()) {
            self.class_name = name.to_owned();
        }
        self
    }

    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{extension}", self.class_name)
    }

    /// `com.<handle>.portfolio` unless overridden.
    pub fn package(&self, custom: Option<&str>) -> String {
        match custom.map(str::trim).filter(|p| !p.is_empty()) {
            Some(package) => package.to_owned(),
            None => format!("com.{}.portfolio", self.handle),
        }
    }
}

/// Transliterate to ASCII and keep alphanumerics only.
fn clean_part(part: &str) -> String {
    deunicode(part)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
