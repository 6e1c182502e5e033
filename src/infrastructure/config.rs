//! Configuration file support for quickcalc.
//!
//! Settings are read from `~/.config/quickcalc/config.toml` (or the path
//! given with `--config`). They only seed the page: the calculator selected
//! at start-up and the default text of input fields.
//!
//! If no config file exists, the built-in defaults are used.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{find_calculator, find_input, Page};

/// Root of the configuration file.
///
/// # Example TOML
/// ```toml
/// [ui]
/// start = "ntc"
///
/// [fields]
/// vin = "12"
/// th-beta = "3435"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,

    /// Field id to starting text
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UiConfig {
    /// Key of the calculator selected at start-up
    pub start: Option<String>,
}

impl Config {
    /// Drops entries that name unknown calculators or fields, logging a
    /// warning for each.
    fn validate(&mut self) {
        if let Some(start) = &self.ui.start {
            if find_calculator(start).is_none() {
                warn!("Unknown start calculator '{}', ignoring", start);
                self.ui.start = None;
            }
        }

        self.fields.retain(|id, _| {
            let known = find_input(id).is_some();
            if !known {
                warn!("Unknown field '{}' in config, ignoring", id);
            }
            known
        });
    }

    /// Returns the default path of the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("quickcalc");
        Ok(config_dir.join("config.toml"))
    }

    /// Loads the configuration from `path`, or from the default location
    /// when `path` is `None`. A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
        let mut config = Self::parse(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        config.validate();
        debug!("Config: {:?}", config);
        Ok(config)
    }

    fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Builds a fresh page whose defaults include the configured field
    /// text, with every calculator evaluated.
    pub fn build_page(&self) -> Page {
        Page::with_overrides(&self.fields)
    }

    /// Index of the start-up calculator in the calculator table.
    pub fn start_index(&self) -> usize {
        self.ui
            .start
            .as_deref()
            .and_then(|key| crate::domain::CALCULATORS.iter().position(|c| c.key == key))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::App;
    use crate::domain::{EvalReport, PLACEHOLDER};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_and_validate() {
        let mut config = Config::parse(
            r#"
[ui]
start = "ntc"

[fields]
vin = "12"
th-beta = "3435"
warp-factor = "9"
"#,
        )
        .unwrap();
        config.validate();

        assert_eq!(config.ui.start.as_deref(), Some("ntc"));
        assert_eq!(config.fields.len(), 2);
        assert!(!config.fields.contains_key("warp-factor"));
        assert_eq!(config.start_index(), 3);
    }

    #[test]
    fn test_unknown_start_is_dropped() {
        let mut config = Config::parse("[ui]\nstart = \"tardis\"\n").unwrap();
        config.validate();
        assert!(config.ui.start.is_none());
        assert_eq!(config.start_index(), 0);
    }

    #[test]
    fn test_build_page_applies_fields() {
        let mut config = Config::default();
        config.fields.insert("vin".to_string(), "12".to_string());
        let page = config.build_page();

        assert_eq!(page.get_field("vin"), "12");
        // 12 V across the default 10k/10k divider
        assert_eq!(page.get_output("vout"), "6.000");
    }

    #[test]
    fn test_reset_keeps_configured_defaults() {
        let mut config = Config::parse("[fields]\nvin = \"12\"\n").unwrap();
        config.validate();
        let mut app = App::new(config.build_page(), 0);

        app.clear_field();
        assert_eq!(app.page.get_output("vout"), PLACEHOLDER);
        app.reset_calculator();
        assert_eq!(app.page.get_field("vin"), "12");
        assert_eq!(app.page.get_output("vout"), "6.000");
    }

    #[test]
    fn test_eval_starts_from_configured_defaults() {
        let mut config = Config::default();
        config.fields.insert("vin".to_string(), "12".to_string());
        let page = config.build_page();

        let report = EvalReport::build(&page, "divider", &["r2=30000"]).unwrap();
        assert_eq!(report.inputs["vin"], "12");
        assert_eq!(report.outputs["vout"], "9.000");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(dir.path().join("absent.toml").as_path())).unwrap();
        assert!(config.fields.is_empty());
        assert!(config.ui.start.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[fields]\nbuck-vref = \"0.6\"\nnot-a-field = \"1\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.fields.get("buck-vref").map(String::as_str), Some("0.6"));
        assert_eq!(config.fields.len(), 1);
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[fields\nvin = ").unwrap();
        assert!(Config::load(Some(file.path())).is_err());
    }
}
