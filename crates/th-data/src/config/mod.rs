//! Application configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::DataError;

/// Environment variable naming a JSON configuration file
pub const CONFIG_ENV: &str = "TEMPLE_HUB_CONFIG";

/// Environment variable overriding the database location
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

const MAX_CARDS_PER_ROW: usize = 4;

/// Settings of the heritage hub
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Temple cards per grid row on the browse page
    pub cards_per_row: usize,

    /// Contributions listed on the home page
    pub recent_limit: usize,

    /// Entries in the recent activity feed of the contributions page
    pub recent_activity_limit: usize,

    /// Seed an empty catalog with sample records on startup
    pub seed_sample_data: bool,

    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("data/temple_heritage.db"),
            cards_per_row: 2,
            recent_limit: 5,
            recent_activity_limit: 10,
            seed_sample_data: false,
            log_filter: "info".to_string(),
        }
    }
}

impl HubConfig {
    /// Load from `TEMPLE_HUB_CONFIG` and `DATABASE_URL`, falling back to defaults
    pub fn load() -> Result<Self, DataError> {
        let file = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let database_url = std::env::var(DATABASE_URL_ENV).ok();
        Self::load_from(file.as_deref(), database_url)
    }

    /// Load from an optional JSON file, then apply an optional database URL override
    pub fn load_from(file: Option<&Path>, database_url: Option<String>) -> Result<Self, DataError> {
        let mut config = match file {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    DataError::Config(format!("Failed to read config file {}: {}", path.display(), e))
                })?;
                debug!("Loaded configuration from {}", path.display());
                Self::from_json(&text)?
            }
            None => Self::default(),
        };

        if let Some(url) = database_url.filter(|url| !url.trim().is_empty()) {
            config.database_path = database_path_from_url(&url)?;
        }

        Ok(config.normalized())
    }

    pub fn from_json(text: &str) -> Result<Self, DataError> {
        let config: Self = serde_json::from_str(text)?;
        Ok(config.normalized())
    }

    fn normalized(mut self) -> Self {
        let clamped = self.cards_per_row.clamp(1, MAX_CARDS_PER_ROW);
        if clamped != self.cards_per_row {
            warn!("cards_per_row {} out of range, using {}", self.cards_per_row, clamped);
            self.cards_per_row = clamped;
        }
        self
    }
}

/// Resolve a `DATABASE_URL` value to a file path.
///
/// Accepts plain paths and `sqlite:` URLs (`sqlite://path`, `sqlite:path`),
/// dropping any `?query` suffix. Other schemes are rejected.
pub fn database_path_from_url(url: &str) -> Result<PathBuf, DataError> {
    let url = url.trim();

    let rest = if let Some(rest) = url.strip_prefix("sqlite://") {
        rest
    } else if let Some(rest) = url.strip_prefix("sqlite:") {
        rest
    } else if url.contains("://") {
        return Err(DataError::Config(format!("Unsupported database URL: {}", url)));
    } else {
        url
    };

    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() {
        return Err(DataError::Config(format!("Database URL has no path: {}", url)));
    }
    Ok(PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HubConfig::default();
        assert_eq!(config.database_path, PathBuf::from("data/temple_heritage.db"));
        assert_eq!(config.cards_per_row, 2);
        assert_eq!(config.recent_limit, 5);
        assert!(!config.seed_sample_data);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = HubConfig::from_json(r#"{ "cards_per_row": 3, "seed_sample_data": true }"#).unwrap();
        assert_eq!(config.cards_per_row, 3);
        assert!(config.seed_sample_data);
        assert_eq!(config.recent_activity_limit, 10);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_cards_per_row_clamped() {
        assert_eq!(HubConfig::from_json(r#"{ "cards_per_row": 0 }"#).unwrap().cards_per_row, 1);
        assert_eq!(HubConfig::from_json(r#"{ "cards_per_row": 9 }"#).unwrap().cards_per_row, 4);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(HubConfig::from_json("{ nope"), Err(DataError::Json(_))));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = HubConfig::load_from(Some(Path::new("/nonexistent/templehub.json")), None);
        assert!(matches!(result, Err(DataError::Config(_))));
    }

    #[test]
    fn test_database_url_override() {
        let config = HubConfig::load_from(None, Some("sqlite:///tmp/temples.db?mode=rwc".to_string())).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/temples.db"));

        let config = HubConfig::load_from(None, Some("  ".to_string())).unwrap();
        assert_eq!(config.database_path, HubConfig::default().database_path);
    }

    #[test]
    fn test_database_path_from_url() {
        assert_eq!(database_path_from_url("catalog.db").unwrap(), PathBuf::from("catalog.db"));
        assert_eq!(database_path_from_url("sqlite:catalog.db").unwrap(), PathBuf::from("catalog.db"));
        assert!(database_path_from_url("postgres://localhost/temples").is_err());
        assert!(database_path_from_url("sqlite://").is_err());
    }
}
