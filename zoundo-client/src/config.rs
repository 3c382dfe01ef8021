// zoundo-client/src/config.rs
use anyhow::{anyhow, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = "zoundo-cli";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// API base URL; endpoints are appended to it
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Bearer token from the last login
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Sent as `accept-language` on every request
    #[serde(default = "default_language")]
    pub language: String,
    /// Log every request and its outcome
    #[serde(default)]
    pub debug: bool,
}

fn default_api_url() -> String {
    "https://api.zoundo.com".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            language: default_language(),
            debug: false,
        }
    }
}

impl Config {
    /// Load from the user config dir, creating a default file on first run,
    /// then apply environment overrides
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            let default = Self::default();
            default.save_to(&config_path)?;
            default
        };

        config.apply_env();
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        // Set permissions to 600 (owner read/write only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Store (or with `None`, forget) the token in the config file without
    /// persisting any environment overrides
    pub fn save_token(token: Option<String>) -> Result<()> {
        let config_path = Self::config_path()?;
        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            Self::default()
        };
        config.token = token;
        config.save_to(&config_path)
    }

    pub fn config_path() -> Result<PathBuf> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("Cannot determine config directory"))?;
        Ok(base_dirs
            .config_dir()
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME))
    }

    fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Override file values with `ZOUNDO_API_URL`, `ZOUNDO_TOKEN`, `ZOUNDO_LANG`
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("ZOUNDO_API_URL") {
            self.api_url = url;
        }
        if let Some(token) = lookup("ZOUNDO_TOKEN") {
            self.token = Some(token);
        }
        if let Some(language) = lookup("ZOUNDO_LANG") {
            self.language = language;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_keys() {
        let config: Config = toml::from_str("token = \"abc\"").unwrap();
        assert_eq!(config.api_url, "https://api.zoundo.com");
        assert_eq!(config.language, "en");
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert!(!config.debug);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            api_url: "http://localhost:8004".to_string(),
            token: Some("t0k".to_string()),
            language: "fr".to_string(),
            debug: true,
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_url, "http://localhost:8004");
        assert_eq!(loaded.token.as_deref(), Some("t0k"));
        assert_eq!(loaded.language, "fr");
        assert!(loaded.debug);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            "ZOUNDO_TOKEN" => Some("from-env".to_string()),
            "ZOUNDO_LANG" => Some("ru".to_string()),
            _ => None,
        });
        assert_eq!(config.token.as_deref(), Some("from-env"));
        assert_eq!(config.language, "ru");
        assert_eq!(config.api_url, "https://api.zoundo.com");
    }
}
