//! Rent Ledger Core - domain entities, services, and traits.
//!
//! This crate contains the rent accounting logic: billing periods, per-tenant
//! ledger derivation with balance carry-forward, and realm-wide aggregates.
//! It is database-agnostic and defines traits that are implemented by the
//! `storage-sqlite` crate. Every operation takes an explicit `realm_id`.

pub mod errors;
pub mod periods;
pub mod properties;
pub mod realms;
pub mod rents;
pub mod tenants;

pub use periods::{Period, PeriodCalendar};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
