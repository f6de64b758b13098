use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::version::error::ConfigError;

/// Default log level when neither the config nor RUST_LOG sets one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Tool configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolConfig {
    pub tags: TagsConfig,
    pub log: LogConfig,
}

impl ToolConfig {
    /// Load configuration from a JSON file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Which tagged versions are shown
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TagsConfig {
    /// Channel names to keep (case-insensitive); empty keeps everything
    pub allow_list: Vec<String>,
    /// Whether pre-release channel entries are produced at all
    pub show_prereleases: bool,
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            allow_list: Vec::new(),
            show_prereleases: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LogConfig {
    pub level: String,
    /// Write logs to [`log_path`] instead of stderr
    pub file: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: false,
        }
    }
}

/// Returns the path to the data directory for version-tags.
/// Uses $XDG_DATA_HOME/version-tags if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/version-tags,
/// or ./version-tags if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("version-tags.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("version-tags")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn tool_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<ToolConfig>(json!({
            "tags": {
                "allowList": ["beta"]
            }
        }))
        .unwrap();

        assert_eq!(result.tags.allow_list, vec!["beta".to_string()]);
        assert!(result.tags.show_prereleases);
        assert_eq!(result.log, LogConfig::default());
    }

    #[test]
    fn tool_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<ToolConfig>(json!({
            "tags": {
                "allowList": ["alpha", "RC"],
                "showPrereleases": false
            },
            "log": {
                "level": "debug",
                "file": true
            }
        }))
        .unwrap();

        assert_eq!(
            result,
            ToolConfig {
                tags: TagsConfig {
                    allow_list: vec!["alpha".to_string(), "RC".to_string()],
                    show_prereleases: false,
                },
                log: LogConfig {
                    level: "debug".to_string(),
                    file: true,
                },
            }
        );
    }

    #[test]
    fn load_without_path_returns_defaults() {
        assert_eq!(ToolConfig::load(None).unwrap(), ToolConfig::default());
    }

    #[test]
    fn load_reads_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "tags": {{ "allowList": ["next"] }} }}"#).unwrap();

        let result = ToolConfig::load(Some(file.path())).unwrap();

        assert_eq!(result.tags.allow_list, vec!["next".to_string()]);
    }

    #[test]
    fn load_rejects_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let result = ToolConfig::load(Some(file.path()));

        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn load_reports_missing_file() {
        let result = ToolConfig::load(Some(Path::new("/nonexistent/version-tags.json")));

        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn data_dir_with_env_uses_xdg_data_home_when_set() {
        let path = data_dir_with_env(
            Some("/tmp/test-data".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-data/version-tags"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_home_local_share() {
        let path = data_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(path, PathBuf::from("/home/user/.local/share/version-tags"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = data_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./version-tags"));
    }
}
