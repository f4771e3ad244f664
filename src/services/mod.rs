//! Framework-free business logic; routes stay thin wrappers around these.

pub mod categories;
pub mod errors;
pub mod products;

pub use errors::{ServiceError, ServiceResult};
