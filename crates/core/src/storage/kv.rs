//! Key/value entries
//!
//! Each key holds one JSON document, the way the browser build kept its
//! state in local storage.

use chrono::Utc;
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

use super::parse::OptionalExt;
use crate::error::Result;

pub struct KvStore<'a> {
    conn: &'a Connection,
}

impl<'a> KvStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Raw value for `key`
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Insert or replace the raw value for `key`
    #[instrument(skip(self, value), fields(len = value.len()))]
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Remove `key`; absent keys are fine
    pub fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Decode the JSON document under `key`
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Encode `value` as JSON under `key`
    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;

    #[test]
    fn test_set_get_remove() {
        let db = Database::open_in_memory().unwrap();
        let kv = db.kv();

        assert!(kv.get("rendyws_user").unwrap().is_none());

        kv.set("rendyws_user", "{}").unwrap();
        assert_eq!(kv.get("rendyws_user").unwrap().as_deref(), Some("{}"));

        kv.set("rendyws_user", "[]").unwrap();
        assert_eq!(kv.get("rendyws_user").unwrap().as_deref(), Some("[]"));

        kv.remove("rendyws_user").unwrap();
        assert!(kv.get("rendyws_user").unwrap().is_none());

        // Removing again is a no-op
        kv.remove("rendyws_user").unwrap();
    }

    #[test]
    fn test_json_round_trip() {
        let db = Database::open_in_memory().unwrap();
        let kv = db.kv();

        kv.set_json("numbers", &vec![1, 2, 3]).unwrap();
        let numbers: Vec<i32> = kv.get_json("numbers").unwrap().unwrap();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_get_json_malformed() {
        let db = Database::open_in_memory().unwrap();
        let kv = db.kv();

        kv.set("numbers", "not json").unwrap();
        let result: Result<Option<Vec<i32>>> = kv.get_json("numbers");
        assert!(matches!(result, Err(crate::Error::Serialization(_))));
    }
}
