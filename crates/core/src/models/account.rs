//! Account model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{UserId, UserRole};

/// A registered account with its argon2 password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Account to be inserted; `user_id` is assigned by storage when absent
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub user_id: Option<UserId>,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub password_hash: String,
}

/// Who an authentication provider says the caller is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl From<&Account> for Identity {
    fn from(account: &Account) -> Self {
        Self {
            user_id: account.user_id,
            name: account.name.clone(),
            email: account.email.clone(),
            role: account.role,
        }
    }
}
