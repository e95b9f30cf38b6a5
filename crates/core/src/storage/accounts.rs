//! Account storage operations

use chrono::Utc;
use rusqlite::{params, Connection, Row};
use tracing::instrument;

use super::parse::{parse_datetime, parse_role, OptionalExt};
use crate::error::Result;
use crate::models::{Account, NewAccount, UserId};

const SELECT_ACCOUNT: &str =
    "SELECT user_id, name, email, role, password_hash, created_at FROM accounts";

pub struct AccountStore<'a> {
    conn: &'a Connection,
}

impl<'a> AccountStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Account> {
        Ok(Account {
            user_id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            role: parse_role(&row.get::<_, String>(3)?)?,
            password_hash: row.get(4)?,
            created_at: parse_datetime(&row.get::<_, String>(5)?)?,
        })
    }

    /// Insert an account, returning it with its assigned ID
    #[instrument(skip(self, account), fields(email = %account.email, role = %account.role.as_str()))]
    pub fn create(&self, account: &NewAccount) -> Result<Account> {
        let created_at = Utc::now();
        self.conn.execute(
            "INSERT INTO accounts (user_id, name, email, role, password_hash, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                account.user_id,
                account.name,
                account.email,
                account.role.as_str(),
                account.password_hash,
                created_at.to_rfc3339(),
            ],
        )?;

        Ok(Account {
            user_id: account.user_id.unwrap_or_else(|| self.conn.last_insert_rowid()),
            name: account.name.clone(),
            email: account.email.clone(),
            role: account.role,
            password_hash: account.password_hash.clone(),
            created_at,
        })
    }

    /// Find account by email, ignoring case
    #[instrument(skip(self))]
    pub fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE email = ?1", SELECT_ACCOUNT))?;
        let account = stmt.query_row(params![email], Self::from_row).optional()?;
        Ok(account)
    }

    /// Find account by ID
    pub fn find_by_id(&self, user_id: UserId) -> Result<Option<Account>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE user_id = ?1", SELECT_ACCOUNT))?;
        let account = stmt.query_row(params![user_id], Self::from_row).optional()?;
        Ok(account)
    }

    /// All accounts ordered by ID
    pub fn list(&self) -> Result<Vec<Account>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY user_id", SELECT_ACCOUNT))?;
        let accounts = stmt
            .query_map([], Self::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(accounts)
    }
}
