//! Infrastructure layer: SQLite storage, CSV transfer, config.

pub mod config;
pub mod csv_io;
pub mod db;

pub use config::{AppConfig, ConfigError};
pub use csv_io::{CsvError, ImportReport, RowFailure};
pub use db::{InventoryStore, StoreError, StoreResult};
