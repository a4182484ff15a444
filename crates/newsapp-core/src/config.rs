//! Configuration management for NewsApp.
//!
//! Loads configuration from ${NEWSAPP_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides the API base URL.
pub const API_URL_ENV: &str = "NEWSAPP_API_URL";

/// Commented template written by `config init`.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Lays the user's values over the template so its comments survive edits.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;

    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Copies every value of `source` into `target`, descending into tables.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for NewsApp configuration and data directories.
    //!
    //! NEWSAPP_HOME resolution order:
    //! 1. NEWSAPP_HOME environment variable (if set)
    //! 2. ~/.config/newsapp (default)
    //! 3. ./.newsapp when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the NewsApp home directory.
    pub fn newsapp_home() -> PathBuf {
        if let Ok(home) = std::env::var("NEWSAPP_HOME")
            && !home.trim().is_empty()
        {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".newsapp"),
            |h| h.join(".config").join("newsapp"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        newsapp_home().join("config.toml")
    }

    /// Returns the path to the persisted session file.
    pub fn session_path() -> PathBuf {
        newsapp_home().join("session.json")
    }

    /// Returns the default log directory.
    pub fn logs_dir() -> PathBuf {
        newsapp_home().join("logs")
    }
}

/// Remote API configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the news API (scheme, host and port).
    pub base_url: Option<String>,
}

impl ApiConfig {
    /// Base URL used when neither the environment nor the config sets one.
    pub const DEFAULT_BASE_URL: &str = "http://localhost:3007";

    /// Returns the configured base URL if set and non-empty.
    pub fn effective_base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Resolves the base URL with precedence: override > config > default.
    ///
    /// The override is typically the `--api-url` flag or `NEWSAPP_API_URL`.
    /// The returned URL never ends with a slash.
    ///
    /// # Errors
    /// Returns an error if the selected URL does not parse.
    pub fn resolve_base_url(&self, override_url: Option<&str>) -> Result<String> {
        let selected = override_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or_else(|| self.effective_base_url())
            .unwrap_or(Self::DEFAULT_BASE_URL);

        url::Url::parse(selected).with_context(|| format!("Invalid API base URL: {selected}"))?;
        Ok(selected.trim_end_matches('/').to_string())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive when `NEWSAPP_LOG` is unset.
    pub level: String,
    /// Optional log file path for the TUI (defaults to `<home>/logs/newsapp.log`).
    pub file: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

impl LogConfig {
    /// Returns the log file path for the TUI.
    pub fn file_path(&self) -> PathBuf {
        self.file
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map_or_else(
                || paths::logs_dir().join("newsapp.log"),
                PathBuf::from,
            )
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote API settings.
    pub api: ApiConfig,
    /// Logging settings.
    pub log: LogConfig,
}

impl Config {
    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Saves only the `api.base_url` field to the default config file.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the file cannot be written.
    pub fn save_api_url(url: &str) -> Result<()> {
        Self::save_api_url_to(&paths::config_path(), url)
    }

    /// Saves only the `api.base_url` field to a specific config file path.
    ///
    /// Creates the file with default template if it doesn't exist.
    /// If file exists, merges user values into the latest template.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the file cannot be written.
    pub fn save_api_url_to(path: &Path, url: &str) -> Result<()> {
        use toml_edit::{DocumentMut, Item, Table, value};

        let url = url.trim();
        url::Url::parse(url).with_context(|| format!("Invalid API base URL: {url}"))?;

        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        if !doc.contains_table("api") {
            doc["api"] = Item::Table(Table::new());
        }
        doc["api"]["base_url"] = value(url.trim_end_matches('/'));

        Self::write_config(path, &doc.to_string())
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Writes through a sibling temp file and renames it into place.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.api.base_url, None);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "[api]\nbase_url = \"http://news.test:9000\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(
            config.api.effective_base_url(),
            Some("http://news.test:9000")
        );
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_default_template_parses_to_defaults() {
        let config: Config = toml::from_str(default_config_template()).unwrap();
        assert_eq!(config.api.base_url, None);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_init_creates_config_with_template() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# NewsApp Configuration"));
        assert!(contents.contains("# base_url ="));
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "").unwrap();

        assert!(Config::init(&config_path).is_err());
    }

    #[test]
    fn test_base_url_defaults_to_local_backend() {
        let config = Config::default();
        assert_eq!(
            config.api.resolve_base_url(None).unwrap(),
            "http://localhost:3007"
        );
    }

    #[test]
    fn test_base_url_precedence_override_then_config() {
        let api = ApiConfig {
            base_url: Some("http://config.test:8000/".to_string()),
        };
        assert_eq!(
            api.resolve_base_url(None).unwrap(),
            "http://config.test:8000"
        );
        assert_eq!(
            api.resolve_base_url(Some("http://flag.test:1234")).unwrap(),
            "http://flag.test:1234"
        );
        assert_eq!(
            api.resolve_base_url(Some("   ")).unwrap(),
            "http://config.test:8000"
        );
    }

    #[test]
    fn test_base_url_empty_config_is_none() {
        let api = ApiConfig {
            base_url: Some("   ".to_string()),
        };
        assert_eq!(api.effective_base_url(), None);
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let api = ApiConfig::default();
        let err = api.resolve_base_url(Some("not a url")).unwrap_err();
        assert!(err.to_string().contains("Invalid API base URL"));
    }

    #[test]
    fn test_save_api_url_creates_file_with_template() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        Config::save_api_url_to(&config_path, "http://localhost:3008/").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(
            config.api.effective_base_url(),
            Some("http://localhost:3008")
        );
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# NewsApp Configuration"));
    }

    #[test]
    fn test_save_api_url_preserves_other_fields() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[log]\nlevel = \"debug\"\n").unwrap();

        Config::save_api_url_to(&config_path, "http://news.test").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.api.effective_base_url(), Some("http://news.test"));
    }

    #[test]
    fn test_save_api_url_rejects_invalid_url() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        assert!(Config::save_api_url_to(&config_path, "localhost").is_err());
        assert!(!config_path.exists());
    }

    #[test]
    fn test_log_file_defaults_under_home() {
        let log = LogConfig::default();
        assert!(log.file_path().ends_with("logs/newsapp.log"));

        let custom = LogConfig {
            file: Some("/tmp/custom.log".to_string()),
            ..Default::default()
        };
        assert_eq!(custom.file_path(), PathBuf::from("/tmp/custom.log"));
    }
}
