use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const DEFAULT_API_BASE: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_LANGUAGE: &str = "zh-CN";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tmdb_api_key: Option<String>,
    pub language: String,
    pub api_base: String,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tmdb_api_key: None,
            language: DEFAULT_LANGUAGE.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_seconds: 10,
        }
    }
}

/// Path to ~/.config/seasonfold/config.yaml
pub fn get_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("seasonfold").join("config.yaml"))
}

impl Config {
    /// Load config from ~/.config/seasonfold/config.yaml, or defaults when absent
    pub fn load() -> Result<Self> {
        match get_config_path() {
            Some(path) if path.exists() => {
                info!("Loading config from {}", path.display());
                Self::load_from_file(&path)
            }
            _ => {
                debug!("No config.yaml found, using defaults");
                Ok(Config::default())
            }
        }
    }

    /// Load config from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&contents)?;

        if let Some(ref key) = config.tmdb_api_key {
            if key == "YOUR_API_KEY_HERE" || key.is_empty() {
                warn!("TMDB API key not configured in config.yaml");
                config.tmdb_api_key = None;
            }
        }

        Ok(config)
    }

    /// TMDB API key from the environment, then the config file
    pub fn get_tmdb_api_key(&self) -> Option<String> {
        std::env::var("TMDB_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| self.tmdb_api_key.clone())
    }

    /// Metadata language from the environment, then the config file
    pub fn get_language(&self) -> String {
        std::env::var("TMDB_LANGUAGE")
            .ok()
            .filter(|lang| !lang.is_empty())
            .unwrap_or_else(|| self.language.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert!(config.tmdb_api_key.is_none());
        assert_eq!(config.language, "zh-CN");
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.timeout_seconds, 10);
    }

    #[test]
    fn test_config_deserialization_fills_defaults() {
        let yaml = r#"
tmdb_api_key: my_tmdb_key
language: en-US
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.tmdb_api_key, Some("my_tmdb_key".to_string()));
        assert_eq!(config.language, "en-US");
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.timeout_seconds, 10);
    }

    #[test]
    fn test_load_from_file_drops_placeholder_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tmdb_api_key: YOUR_API_KEY_HERE\ntimeout_seconds: 30").unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert!(config.tmdb_api_key.is_none());
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            tmdb_api_key: Some("tmdb_test".to_string()),
            ..Default::default()
        };

        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("tmdb_api_key: tmdb_test"));
        assert!(yaml.contains("language: zh-CN"));
    }
}
