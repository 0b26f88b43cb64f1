//! Inventory domain module.
//!
//! This crate contains the item record and the business rules that guard it,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod item;
pub mod query;
pub mod stats;

pub use item::{Item, ItemFields, MAX_QUANTITY};
pub use query::ItemFilter;
pub use stats::InventoryStats;
