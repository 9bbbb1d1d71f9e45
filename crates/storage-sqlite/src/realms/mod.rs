//! SQLite storage implementation for realms.

mod model;
mod repository;

pub use model::{RealmDB, RealmMemberDB};
pub use repository::RealmRepository;
