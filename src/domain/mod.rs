//! Framework-agnostic domain entities and value objects.

pub mod category;
pub mod product;
pub mod types;
