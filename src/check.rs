//! `folio check`: validate the data file without building.

use crate::{config::SiteConfig, data, log};
use anyhow::{Result, bail};

/// Validate the data file, logging every warning and error.
///
/// With `strict`, warnings fail the check as well. Returns the warning count.
pub fn check_data(config: &SiteConfig, strict: bool) -> Result<usize> {
    let path = config.data_path();
    let validated = match data::load(path) {
        Ok(validated) => validated,
        Err(err) => {
            for issue in err.issues() {
                log!("error"; "{}", issue);
            }
            return Err(err.into());
        }
    };

    let warnings = validated.warnings.len();
    for warning in &validated.warnings {
        log!("warn"; "{}", warning);
    }
    if strict && warnings > 0 {
        bail!("{warnings} warning(s) in {} (strict mode)", path.display());
    }

    log!("check"; "{} is valid ({} warning(s))", path.display(), warnings);
    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SAMPLE;
    use std::fs;

    fn config_with(content: &str) -> (tempfile::TempDir, SiteConfig) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.toml");
        fs::write(&path, content).unwrap();
        let mut config = SiteConfig::default();
        config.site.data = path;
        (dir, config)
    }

    const CLAMPED: &str = r#"
        [personal]
        name = "Jane Doe"
        email = "jane@example.com"
        role = "Engineer"

        [[skills]]
        category = "Languages"
        items = [{ name = "Rust", level = 140 }]
    "#;

    #[test]
    fn test_check_sample_passes() {
        let (_dir, config) = config_with(SAMPLE);
        assert_eq!(check_data(&config, true).unwrap(), 0);
    }

    #[test]
    fn test_check_warnings_fail_only_when_strict() {
        let (_dir, config) = config_with(CLAMPED);
        assert_eq!(check_data(&config, false).unwrap(), 1);
        assert!(check_data(&config, true).is_err());
    }

    #[test]
    fn test_check_reports_errors() {
        let (_dir, config) = config_with("[personal]\nname = \"\"\nemail = \"a@b\"\nrole = \"x\"");
        let err = check_data(&config, false).unwrap_err();
        assert!(format!("{err:#}").contains("personal.name"));
    }
}
