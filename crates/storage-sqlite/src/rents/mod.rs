//! SQLite storage implementation for rent records.

mod model;
mod repository;

pub use model::{RentRecordChangesDB, RentRecordDB};
pub use repository::RentRecordRepository;
