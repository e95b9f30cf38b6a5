//! Session entry storage

use rusqlite::Connection;
use tracing::{debug, warn};

use super::kv::KvStore;
use crate::error::{Error, Result};
use crate::models::Session;

pub struct SessionStore<'a> {
    kv: KvStore<'a>,
    key: &'a str,
}

impl<'a> SessionStore<'a> {
    pub fn new(conn: &'a Connection, key: &'a str) -> Self {
        Self {
            kv: KvStore::new(conn),
            key,
        }
    }

    /// Load the stored session.
    ///
    /// An entry that no longer decodes is removed and reported as absent.
    pub fn load(&self) -> Result<Option<Session>> {
        match self.kv.get_json::<Session>(self.key) {
            Ok(session) => Ok(session),
            Err(Error::Serialization(e)) => {
                warn!(key = self.key, error = %e, "Discarding malformed session entry");
                self.kv.remove(self.key)?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        debug!(user_id = session.user_id, "Storing session");
        self.kv.set_json(self.key, session)
    }

    pub fn clear(&self) -> Result<()> {
        self.kv.remove(self.key)
    }
}
