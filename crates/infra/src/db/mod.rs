//! Database adapters (connection pool, schema, item repository).

pub mod error;
pub mod inventory_store;
pub mod schema;

pub use error::{StoreError, StoreResult};
pub use inventory_store::InventoryStore;
