//! Storage repository traits
//!
//! These traits define the storage interface the ledger and auth code are
//! written against, allowing for different implementations (SQLite, mock,
//! future remote backend).

use crate::error::Result;
use crate::models::{Account, Booking, NewAccount, Session, UserStats};

/// Current-session persistence
pub trait SessionRepository {
    /// Load the stored session, if any
    fn load_session(&self) -> Result<Option<Session>>;

    /// Store the session, replacing any previous one
    fn save_session(&self, session: &Session) -> Result<()>;

    /// Remove the stored session
    fn clear_session(&self) -> Result<()>;
}

/// Booking list and statistics persistence
pub trait LedgerRepository {
    /// All bookings in insertion order
    fn load_bookings(&self) -> Result<Vec<Booking>>;

    /// Cached statistics record
    fn load_stats(&self) -> Result<UserStats>;

    /// Persist statistics alone
    fn save_stats(&self, stats: &UserStats) -> Result<()>;

    /// Persist bookings and statistics together, all or nothing
    fn commit(&self, bookings: &[Booking], stats: &UserStats) -> Result<()>;
}

/// Account persistence
pub trait AccountRepository {
    /// Create an account
    fn create_account(&self, account: &NewAccount) -> Result<Account>;

    /// Find account by email
    fn find_account_by_email(&self, email: &str) -> Result<Option<Account>>;
}

/// Combined storage interface
pub trait Storage: SessionRepository + LedgerRepository + AccountRepository {}

impl<T: SessionRepository + LedgerRepository + AccountRepository> Storage for T {}
