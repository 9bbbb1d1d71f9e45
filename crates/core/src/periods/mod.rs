//! Billing periods - the (month, year) value type and calendar arithmetic.

mod calendar;
mod period_model;

pub use calendar::PeriodCalendar;
pub use period_model::Period;
