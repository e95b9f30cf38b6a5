//! Application configuration
//!
//! Loaded from a TOML file; every field has a default so an empty file (or
//! no file at all) yields a working setup with no accounts.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{UserId, UserRole};
use crate::storage::DEFAULT_APP_KEY;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "RENDYWS_CONFIG";

/// File name looked up in the user config directory
pub const CONFIG_FILE_NAME: &str = "rendyws.toml";

/// What to do when a new booking overlaps an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Accept overlapping requests; the reviewer sorts it out
    #[default]
    Allow,
    /// Refuse a slot held by a pending or approved booking
    Reject,
}

/// Ledger behavior settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub overlap_policy: OverlapPolicy,
    /// Bookings shown in the dashboard's "recent" list
    pub recent_limit: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            overlap_policy: OverlapPolicy::Allow,
            recent_limit: 5,
        }
    }
}

/// Account created on startup if its email is not registered yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedAccount {
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub name: String,
    pub email: String,
    /// Plain text; hashed before it is stored
    pub password: String,
    #[serde(default = "default_role")]
    pub role: UserRole,
}

fn default_role() -> UserRole {
    UserRole::User
}

/// Top-level configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix of the persisted entry keys
    pub app_key: String,
    /// SQLite file; defaults to the platform data directory
    pub database_path: Option<PathBuf>,
    pub ledger: LedgerConfig,
    pub accounts: Vec<SeedAccount>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_key: DEFAULT_APP_KEY.to_string(),
            database_path: None,
            ledger: LedgerConfig::default(),
            accounts: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Reading configuration");
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Resolve the configuration in lookup order: explicit path,
    /// `RENDYWS_CONFIG`, the user config directory, built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load(Path::new(&path));
        }

        if let Some(dirs) = project_dirs() {
            let path = dirs.config_dir().join(CONFIG_FILE_NAME);
            if path.exists() {
                return Self::load(&path);
            }
        }

        info!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Database file location, falling back to the platform data directory
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let dirs = project_dirs().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine data directory",
            ))
        })?;

        Ok(dirs.data_dir().join("rendyws.db"))
    }

    fn validate(&self) -> Result<()> {
        if self.app_key.trim().is_empty() {
            return Err(Error::Validation("app_key must not be empty".to_string()));
        }
        if self.ledger.recent_limit == 0 {
            return Err(Error::Validation(
                "ledger.recent_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "rendyws", "rendyws")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.app_key, "rendyws");
        assert_eq!(config.ledger.recent_limit, 5);
        assert_eq!(config.ledger.overlap_policy, OverlapPolicy::Allow);
    }

    #[test]
    fn test_full_config() {
        let config = AppConfig::from_toml_str(
            r#"
            app_key = "coworking"
            database_path = "/tmp/coworking.db"

            [ledger]
            overlap_policy = "reject"
            recent_limit = 3

            [[accounts]]
            user_id = 999
            name = "Admin"
            email = "admin@example.com"
            password = "secret"
            role = "admin"

            [[accounts]]
            name = "Member"
            email = "member@example.com"
            password = "secret1"
            "#,
        )
        .unwrap();

        assert_eq!(config.app_key, "coworking");
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/tmp/coworking.db"));
        assert_eq!(config.ledger.overlap_policy, OverlapPolicy::Reject);
        assert_eq!(config.ledger.recent_limit, 3);
        assert_eq!(config.accounts.len(), 2);
        assert_eq!(config.accounts[0].role, UserRole::Admin);
        assert_eq!(config.accounts[1].role, UserRole::User);
        assert_eq!(config.accounts[1].user_id, None);
    }

    #[test]
    fn test_shipped_example_parses() {
        let config =
            AppConfig::from_toml_str(include_str!("../../../rendyws.example.toml")).unwrap();
        assert_eq!(config.app_key, "rendyws");
        assert_eq!(config.accounts.len(), 2);
        assert_eq!(config.accounts[1].user_id, Some(999));
        assert_eq!(config.accounts[1].role, UserRole::Admin);
    }

    #[test]
    fn test_rejects_unknown_policy() {
        let result = AppConfig::from_toml_str("[ledger]\noverlap_policy = \"maybe\"\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_zero_recent_limit() {
        let result = AppConfig::from_toml_str("[ledger]\nrecent_limit = 0\n");
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "app_key = \"custom\"\n").unwrap();

        let config = AppConfig::resolve(Some(&path)).unwrap();
        assert_eq!(config.app_key, "custom");
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let dir = tempdir().unwrap();
        let result = AppConfig::resolve(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
