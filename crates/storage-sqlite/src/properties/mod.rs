//! SQLite storage implementation for properties.

mod model;
mod repository;

pub use model::PropertyDB;
pub use repository::PropertyRepository;
