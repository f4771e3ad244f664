//! Web form definitions and their validated payload conversions.

pub mod categories;
pub mod products;
