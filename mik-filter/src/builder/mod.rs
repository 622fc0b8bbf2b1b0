//! Query builder: filtering requests to nested condition trees.

mod filter;
mod select;
mod types;

// Re-export all public items
pub use select::{QueryBuilder, build};
pub use types::{BuiltQuery, CONTAINS, GTE, LTE, MODE};
