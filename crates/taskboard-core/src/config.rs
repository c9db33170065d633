use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{TaskboardError, TaskboardResult};

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the task API, without the `/tasks/` suffix.
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// Initial sort key for the board (`created_at`, `priority` or `due_date`).
    #[serde(default)]
    pub default_sort: Option<String>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/taskboard/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("taskboard/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("taskboard\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Loads the user config, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load() -> Self {
        Self::config_path()
            .filter(|path| path.exists())
            .and_then(|path| Self::load_from(&path).ok())
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> TaskboardResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| TaskboardError::Config(e.to_string()))
    }

    pub fn effective_api_base_url(&self) -> &str {
        self.api_base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn effective_default_sort(&self) -> &str {
        self.default_sort.as_deref().unwrap_or("created_at")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.effective_api_base_url(), DEFAULT_API_BASE_URL);
        assert_eq!(config.effective_default_sort(), "created_at");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = AppConfig {
            api_base_url: Some("http://tasks.local/api/".to_string()),
            default_sort: None,
        };
        assert_eq!(config.effective_api_base_url(), "http://tasks.local/api");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_base_url = \"http://example.test/api\"").unwrap();
        writeln!(file, "default_sort = \"priority\"").unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.effective_api_base_url(), "http://example.test/api");
        assert_eq!(config.effective_default_sort(), "priority");
    }

    #[test]
    fn test_load_from_invalid_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_base_url = ").unwrap();

        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, TaskboardError::Config(_)));
    }
}
