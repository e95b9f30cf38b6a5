//! RendyWS Core Library
//!
//! Room catalog, booking ledger, authentication, and storage for the RendyWS
//! co-working booking service.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod invariants;
pub mod ledger;
pub mod models;
pub mod permissions;
pub mod storage;

pub use auth::{AccountAuthProvider, AuthProvider, RegistrationForm};
pub use catalog::{RoomCatalog, RoomFilter};
pub use config::{AppConfig, LedgerConfig, OverlapPolicy, SeedAccount};
pub use error::{Error, Result};
pub use ledger::{BookingOrder, Dashboard, Ledger};
pub use models::*;
pub use permissions::*;
pub use storage::{
    AccountRepository, Database, LedgerRepository, SessionRepository, Storage, StorageKeys,
};
