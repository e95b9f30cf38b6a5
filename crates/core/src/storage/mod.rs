//! SQLite storage layer for RendyWS

mod accounts;
mod bookings;
mod kv;
mod migrations;
mod parse;
mod sessions;
mod traits;

use rusqlite::Connection;
use std::path::Path;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::models::{Account, Booking, NewAccount, Session, UserStats};

pub use accounts::AccountStore;
pub use bookings::{BookingStore, StatsStore};
pub use kv::KvStore;
pub use sessions::SessionStore;
pub use traits::{AccountRepository, LedgerRepository, SessionRepository, Storage};

/// Prefix used for persisted keys unless configured otherwise
pub const DEFAULT_APP_KEY: &str = "rendyws";

/// Names of the persisted entries, derived from the app key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub user: String,
    pub bookings: String,
    pub user_stats: String,
}

impl StorageKeys {
    pub fn new(app_key: &str) -> Self {
        Self {
            user: format!("{}_user", app_key),
            bookings: format!("{}_bookings", app_key),
            user_stats: format!("{}_user_stats", app_key),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new(DEFAULT_APP_KEY)
    }
}

/// Main database handle
pub struct Database {
    conn: Connection,
    keys: StorageKeys,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn,
            keys: StorageKeys::default(),
        })
    }

    /// Use a different key prefix for the persisted entries
    pub fn with_app_key(mut self, app_key: &str) -> Self {
        debug!(app_key, "Using storage key prefix");
        self.keys = StorageKeys::new(app_key);
        self
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Get current schema version
    pub fn schema_version(&self) -> Result<u32> {
        migrations::get_current_version(&self.conn)
    }

    /// Get raw key/value store
    pub fn kv(&self) -> KvStore<'_> {
        KvStore::new(&self.conn)
    }

    /// Get session store
    pub fn sessions(&self) -> SessionStore<'_> {
        SessionStore::new(&self.conn, &self.keys.user)
    }

    /// Get booking list store
    pub fn bookings(&self) -> BookingStore<'_> {
        BookingStore::new(&self.conn, &self.keys.bookings)
    }

    /// Get statistics store
    pub fn stats(&self) -> StatsStore<'_> {
        StatsStore::new(&self.conn, &self.keys.user_stats)
    }

    /// Get account store
    pub fn accounts(&self) -> AccountStore<'_> {
        AccountStore::new(&self.conn)
    }
}

// Implement repository traits for Database
// This enables using Database through the trait interface

impl SessionRepository for Database {
    fn load_session(&self) -> Result<Option<Session>> {
        self.sessions().load()
    }

    fn save_session(&self, session: &Session) -> Result<()> {
        self.sessions().save(session)
    }

    fn clear_session(&self) -> Result<()> {
        self.sessions().clear()
    }
}

impl LedgerRepository for Database {
    fn load_bookings(&self) -> Result<Vec<Booking>> {
        self.bookings().load_all()
    }

    fn load_stats(&self) -> Result<UserStats> {
        self.stats().load()
    }

    fn save_stats(&self, stats: &UserStats) -> Result<()> {
        self.stats().save(stats)
    }

    fn commit(&self, bookings: &[Booking], stats: &UserStats) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        BookingStore::new(&tx, &self.keys.bookings).save_all(bookings)?;
        StatsStore::new(&tx, &self.keys.user_stats).save(stats)?;
        tx.commit()?;
        Ok(())
    }
}

impl AccountRepository for Database {
    fn create_account(&self, account: &NewAccount) -> Result<Account> {
        self.accounts().create(account)
    }

    fn find_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        self.accounts().find_by_email(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_keys_follow_app_key() {
        let keys = StorageKeys::new("coworking");
        assert_eq!(keys.user, "coworking_user");
        assert_eq!(keys.bookings, "coworking_bookings");
        assert_eq!(keys.user_stats, "coworking_user_stats");
    }

    #[test]
    fn test_file_database_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rendyws.db");

        {
            let db = Database::open(&path).unwrap();
            db.kv().set("rendyws_user", "{}").unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.kv().get("rendyws_user").unwrap().as_deref(), Some("{}"));
        assert_eq!(db.schema_version().unwrap(), 2);
    }

    #[test]
    fn test_app_key_isolates_entries() {
        let db = Database::open_in_memory().unwrap().with_app_key("other");
        db.stats()
            .save(&UserStats {
                total_bookings: 7,
                ..Default::default()
            })
            .unwrap();

        assert!(db.kv().get("rendyws_user_stats").unwrap().is_none());
        assert!(db.kv().get("other_user_stats").unwrap().is_some());
    }

    #[test]
    fn test_commit_writes_both_entries() {
        let db = Database::open_in_memory().unwrap();
        let stats = UserStats {
            total_bookings: 1,
            ..Default::default()
        };
        db.commit(&[], &stats).unwrap();

        assert!(db.load_bookings().unwrap().is_empty());
        assert_eq!(db.load_stats().unwrap().total_bookings, 1);
        assert_eq!(db.kv().get("rendyws_bookings").unwrap().as_deref(), Some("[]"));
    }

    fn register_and_find<R: AccountRepository + ?Sized>(repo: &R) -> Account {
        repo.create_account(&NewAccount {
            user_id: None,
            name: "Dewi".to_string(),
            email: "dewi@example.com".to_string(),
            role: crate::models::UserRole::User,
            password_hash: "$argon2id$stub".to_string(),
        })
        .unwrap();
        repo.find_account_by_email("dewi@example.com").unwrap().unwrap()
    }

    #[test]
    fn test_accounts_through_repository() {
        let db = Database::open_in_memory().unwrap();
        let account = register_and_find(&db);
        assert_eq!(account.name, "Dewi");
        assert!(db.find_account_by_email("nobody@example.com").unwrap().is_none());
    }
}
