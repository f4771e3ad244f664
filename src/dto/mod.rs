//! View models handed to templates and API responses.

pub mod categories;
pub mod products;
