use serde::{Deserialize, Serialize};

/// Aggregate figures over the whole inventory.
///
/// The empty inventory is the all-zero value, never a missing one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryStats {
    pub total_items: i64,
    pub total_quantity: i64,
    pub total_value: f64,
    pub total_categories: i64,
}
