//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and page settings
    #[serde(default)]
    pub scrape: ScrapeConfig,

    /// Where extracted rows end up
    #[serde(default)]
    pub destination: Destination,

    /// Storage backend selection
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.scrape.user_agent.trim().is_empty() {
            return Err(AppError::validation("scrape.user_agent is empty"));
        }
        if self.scrape.timeout_secs == 0 {
            return Err(AppError::validation("scrape.timeout_secs must be > 0"));
        }
        url::Url::parse(&self.scrape.source_url)
            .map_err(|e| AppError::validation(format!("scrape.source_url is invalid: {e}")))?;
        if self.scrape.content_selectors.is_empty() {
            return Err(AppError::validation("scrape.content_selectors is empty"));
        }
        match &self.destination {
            Destination::AppendExisting { file_id } => {
                if file_id.trim().is_empty() {
                    return Err(AppError::validation(
                        "destination.file_id is required for append_existing",
                    ));
                }
            }
            Destination::CreateNew {
                filename_keyword, ..
            } => {
                if filename_keyword.trim().is_empty() {
                    return Err(AppError::validation(
                        "destination.filename_keyword is required for create_new",
                    ));
                }
            }
        }
        if self.storage.backend == StorageBackend::Local
            && self.storage.local_dir.trim().is_empty()
        {
            return Err(AppError::validation(
                "storage.local_dir is required for the local backend",
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scrape: ScrapeConfig::default(),
            destination: Destination::default(),
            storage: StorageConfig::default(),
        }
    }
}

/// HTTP client and page settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// URL of the ranking page
    #[serde(default = "defaults::source_url")]
    pub source_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// CSS selectors tried in order to pick the content region
    #[serde(default = "defaults::content_selectors")]
    pub content_selectors: Vec<String>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            source_url: defaults::source_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            content_selectors: defaults::content_selectors(),
        }
    }
}

/// Destination strategy for extracted rows.
///
/// `append_existing` downloads a tracked CSV, appends timestamped rows and
/// overwrites it in place; `create_new` uploads a brand-new timestamped file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Destination {
    AppendExisting {
        /// Id of the CSV file to append to
        file_id: String,
    },
    CreateNew {
        /// User-supplied token used in the generated file name
        filename_keyword: String,

        /// Optional parent folder for the new file
        #[serde(default, skip_serializing_if = "Option::is_none")]
        folder_id: Option<String>,
    },
}

impl Default for Destination {
    fn default() -> Self {
        Self::AppendExisting {
            file_id: String::new(),
        }
    }
}

/// Storage backend selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Which backend persists the CSV
    #[serde(default)]
    pub backend: StorageBackend,

    /// Root directory for the local backend
    #[serde(default = "defaults::local_dir")]
    pub local_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            local_dir: defaults::local_dir(),
        }
    }
}

/// Available storage backends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    Drive,
    Local,
}

mod defaults {
    // Scrape defaults
    pub fn source_url() -> String {
        "https://mimorin2014.com/".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; seatrank/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn content_selectors() -> Vec<String> {
        vec![".entry-body".into(), "#main".into()]
    }

    // Storage defaults
    pub fn local_dir() -> String {
        "storage".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn append_config() -> Config {
        Config {
            destination: Destination::AppendExisting {
                file_id: "abc123".to_string(),
            },
            ..Config::default()
        }
    }

    #[test]
    fn validate_append_config_ok() {
        assert!(append_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = append_config();
        config.scrape.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = append_config();
        config.scrape.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_source_url() {
        let mut config = append_config();
        config.scrape.source_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_missing_file_id() {
        assert!(Config::default().validate().is_err());
    }

    #[test]
    fn validate_rejects_missing_filename_keyword() {
        let mut config = append_config();
        config.destination = Destination::CreateNew {
            filename_keyword: "".to_string(),
            folder_id: None,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_append_destination_from_toml() {
        let config: Config = toml::from_str(
            r#"
            [destination]
            mode = "append_existing"
            file_id = "1EJeJ"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.destination,
            Destination::AppendExisting {
                file_id: "1EJeJ".to_string()
            }
        );
    }

    #[test]
    fn parse_create_destination_from_toml() {
        let config: Config = toml::from_str(
            r#"
            [destination]
            mode = "create_new"
            filename_keyword = "weekly"
            folder_id = "folder9"

            [storage]
            backend = "local"
            local_dir = "out"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.destination,
            Destination::CreateNew {
                filename_keyword: "weekly".to_string(),
                folder_id: Some("folder9".to_string()),
            }
        );
        assert_eq!(config.storage.backend, StorageBackend::Local);
        assert!(config.validate().is_ok());
    }
}
