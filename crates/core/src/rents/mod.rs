//! Rents module - rent records, ledger derivation, and realm aggregation.

mod ledger;
mod rents_model;
mod rents_service;
mod rents_traits;


pub use ledger::RentLedger;
pub use rents_model::{
    IntegrityWarning, LedgerEntry, NewRentRecord, RentList, RentRecord, RentStatus, RentSummary,
    TenantRent, TenantRentHistory, MAX_AMOUNT,
};
pub use rents_service::RentService;
pub use rents_traits::{RentRecordRepositoryTrait, RentServiceTrait};
