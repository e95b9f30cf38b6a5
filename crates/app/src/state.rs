//! Application state management

use std::path::{Path, PathBuf};

use rendyws_core::auth::{self, AccountAuthProvider};
use rendyws_core::{AppConfig, Database, Ledger, Result, RoomCatalog, Session};
use tracing::debug;

/// Everything a command needs: storage, configuration, and the room catalog
pub struct AppState {
    pub db: Database,
    pub config: AppConfig,
    pub catalog: RoomCatalog,
}

impl AppState {
    /// Resolve the configuration and open the database it points to
    pub fn new(config_path: Option<&Path>, db_override: Option<PathBuf>) -> Result<Self> {
        let config = AppConfig::resolve(config_path)?;
        let db_path = match db_override {
            Some(path) => path,
            None => config.database_path()?,
        };

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        debug!(path = %db_path.display(), "Opening database");
        let db = Database::open(&db_path)?;
        Self::with_database(db, config)
    }

    /// Wrap an opened database, applying the key prefix and seed accounts
    pub fn with_database(db: Database, config: AppConfig) -> Result<Self> {
        let db = db.with_app_key(&config.app_key);
        auth::seed_accounts(&db, &config.accounts)?;

        Ok(Self {
            db,
            config,
            catalog: RoomCatalog::builtin(),
        })
    }

    pub fn ledger(&self) -> Ledger<'_, Database> {
        Ledger::new(&self.db, &self.catalog, self.config.ledger.clone())
    }

    pub fn auth_provider(&self) -> AccountAuthProvider<'_, Database> {
        AccountAuthProvider::new(&self.db)
    }

    /// The signed-in session, or an authentication error
    pub fn session(&self) -> Result<Session> {
        auth::require_session(&self.db)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use rendyws_core::{SeedAccount, UserRole};

    pub const MEMBER_EMAIL: &str = "rendyreza@rendyws.com";
    pub const MEMBER_PASSWORD: &str = "123456";
    pub const ADMIN_EMAIL: &str = "rendyadmin@gmail.com";
    pub const ADMIN_PASSWORD: &str = "12345";

    /// In-memory state seeded with the demo member and administrator
    pub fn demo_state() -> AppState {
        let config = AppConfig {
            accounts: vec![
                SeedAccount {
                    user_id: Some(1),
                    name: "RendyReza".to_string(),
                    email: MEMBER_EMAIL.to_string(),
                    password: MEMBER_PASSWORD.to_string(),
                    role: UserRole::User,
                },
                SeedAccount {
                    user_id: Some(999),
                    name: "Admin".to_string(),
                    email: ADMIN_EMAIL.to_string(),
                    password: ADMIN_PASSWORD.to_string(),
                    role: UserRole::Admin,
                },
            ],
            ..AppConfig::default()
        };
        AppState::with_database(Database::open_in_memory().unwrap(), config).unwrap()
    }

    pub fn sign_in(state: &AppState, email: &str, password: &str) -> Session {
        auth::login(&state.auth_provider(), &state.db, email, password).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_opens_database_in_nested_directory() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("rendyws.db");
        let config_path = dir.path().join("rendyws.toml");
        std::fs::write(&config_path, "app_key = \"testws\"\n").unwrap();

        let state = AppState::new(Some(&config_path), Some(db_path.clone())).unwrap();
        assert!(db_path.exists());
        assert_eq!(state.db.keys().bookings, "testws_bookings");
    }

    #[test]
    fn test_seeds_demo_accounts() {
        let state = demo_state();
        assert_eq!(state.db.accounts().list().unwrap().len(), 2);
        assert!(state.session().is_err());

        let session = sign_in(&state, ADMIN_EMAIL, ADMIN_PASSWORD);
        assert!(session.is_admin());
        assert_eq!(state.session().unwrap(), session);
    }
}
