use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::keybindings::KeybindingsConfig;
use crate::utils::paths::get_config_path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default = "default_timeoutlen")]
    pub timeoutlen: u64,

    /// Domain list to use instead of the built-in one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,

    #[serde(default)]
    pub bell_on_failure: bool,

    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

fn default_theme() -> String {
    "default".to_string()
}

fn default_timeoutlen() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            timeoutlen: default_timeoutlen(),
            catalog_path: None,
            bell_on_failure: false,
            keybindings: KeybindingsConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", config_path.display()))?;

        config.keybindings = config.keybindings.merge_with_defaults();

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, "default");
        assert_eq!(config.timeoutlen, 1000);
        assert!(config.catalog_path.is_none());
        assert!(!config.bell_on_failure);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("theme"));
        assert!(!toml_str.contains("catalog_path"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
        theme = "dark"
        catalog_path = "/tmp/domains.txt"
        bell_on_failure = true
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "dark");
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/domains.txt")));
        assert!(config.bell_on_failure);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.theme, "default");
    }

    #[test]
    fn test_load_merges_keybindings_with_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[keybindings.navigate]\n\"c\" = \"copy\"").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.keybindings.navigate.get("c").map(String::as_str), Some("copy"));
        assert_eq!(config.keybindings.navigate.get("q").map(String::as_str), Some("quit"));
    }

    #[test]
    fn test_load_invalid_file_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "theme = [").unwrap();
        assert!(Config::load_from(file.path()).is_err());
    }
}
