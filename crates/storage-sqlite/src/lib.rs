//! SQLite storage implementation for the rent ledger.
//!
//! This crate holds every Diesel dependency of the workspace. It implements
//! the repository traits of `rentledger-core` and contains:
//! - Connection pooling and the single-writer actor
//! - Embedded Diesel migrations
//! - Repository implementations and their database models
//!
//! ```text
//!   core (domain, traits)
//!          │
//!          ▼
//!   storage-sqlite (this crate)
//!          │
//!          ▼
//!       SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

pub mod properties;
pub mod realms;
pub mod rents;
pub mod tenants;

#[cfg(test)]
mod test_support;

pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

pub use errors::{IntoCore, StorageError};

pub use properties::PropertyRepository;
pub use realms::RealmRepository;
pub use rents::RentRecordRepository;
pub use tenants::TenantRepository;

pub use rentledger_core::errors::{DatabaseError, Error, Result};
