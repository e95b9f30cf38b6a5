//! Booking list and statistics storage

use rusqlite::Connection;

use super::kv::KvStore;
use crate::error::Result;
use crate::models::{Booking, UserStats};

/// The booking array, kept in insertion order
pub struct BookingStore<'a> {
    kv: KvStore<'a>,
    key: &'a str,
}

impl<'a> BookingStore<'a> {
    pub fn new(conn: &'a Connection, key: &'a str) -> Self {
        Self {
            kv: KvStore::new(conn),
            key,
        }
    }

    /// All bookings as written; missing entry means an empty ledger
    pub fn load_all(&self) -> Result<Vec<Booking>> {
        Ok(self.kv.get_json(self.key)?.unwrap_or_default())
    }

    pub fn save_all(&self, bookings: &[Booking]) -> Result<()> {
        self.kv.set_json(self.key, bookings)
    }
}

/// The single cached statistics record
pub struct StatsStore<'a> {
    kv: KvStore<'a>,
    key: &'a str,
}

impl<'a> StatsStore<'a> {
    pub fn new(conn: &'a Connection, key: &'a str) -> Self {
        Self {
            kv: KvStore::new(conn),
            key,
        }
    }

    /// Stored stats, or an unstamped zero record
    pub fn load(&self) -> Result<UserStats> {
        Ok(self.kv.get_json(self.key)?.unwrap_or_default())
    }

    pub fn save(&self, stats: &UserStats) -> Result<()> {
        self.kv.set_json(self.key, stats)
    }
}
