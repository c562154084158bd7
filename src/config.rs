use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: Option<String>,
    pub debounce_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            debounce_ms: 300,
            request_timeout_secs: 10,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        // Try CWD config.toml first, then ~/.config/github-user-tui/config.toml
        let paths = config_paths();

        for path in paths {
            if path.exists() {
                let contents = std::fs::read_to_string(&path)?;
                let config: AppConfig = toml::from_str(&contents)?;
                return Ok(config);
            }
        }

        Ok(AppConfig::default())
    }

    #[cfg(test)]
    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(toml_str)?;
        Ok(config)
    }
}

fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // CWD config.toml
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join("config.toml"));
    }

    // ~/.config/github-user-tui/config.toml
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("github-user-tui").join("config.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.api_url.is_none());
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_load_from_full_toml() {
        let toml_str = r#"
            api_url = "https://github.example.com/api/v3"
            debounce_ms = 500
            request_timeout_secs = 5
        "#;

        let config = AppConfig::load_from_str(toml_str).unwrap();
        assert_eq!(
            config.api_url,
            Some("https://github.example.com/api/v3".to_string())
        );
        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn test_load_from_partial_toml_uses_defaults() {
        let toml_str = r#"
            debounce_ms = 150
        "#;

        let config = AppConfig::load_from_str(toml_str).unwrap();
        assert_eq!(config.debounce_ms, 150);
        assert_eq!(config.request_timeout_secs, 10);
        assert!(config.api_url.is_none());
    }

    #[test]
    fn test_load_from_empty_toml_uses_defaults() {
        let toml_str = "";
        let config = AppConfig::load_from_str(toml_str).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_invalid_toml_returns_error() {
        let toml_str = "this is not valid toml [[[";
        let result = AppConfig::load_from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_paths_includes_cwd() {
        let paths = config_paths();
        assert!(!paths.is_empty());
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(paths[0], cwd.join("config.toml"));
    }
}
