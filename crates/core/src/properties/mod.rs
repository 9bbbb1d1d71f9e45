//! Properties module - read models, directory trait, and overview counting.

mod properties_model;
mod properties_service;
mod properties_traits;

pub use properties_model::{Property, PropertyOverview};
pub use properties_service::PropertyService;
pub use properties_traits::{PropertyRepositoryTrait, PropertyServiceTrait};
