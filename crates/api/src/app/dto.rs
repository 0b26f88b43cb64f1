use serde::Deserialize;

use stockroom_infra::ImportReport;
use stockroom_inventory::{InventoryStats, Item, ItemFields, ItemFilter};

// -------------------------
// Request DTOs
// -------------------------

/// Body of create and update requests. `description` may be omitted; text
/// fields are trimmed before they reach the store.
#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub price: f64,
    #[serde(default)]
    pub description: String,
}

impl From<ItemRequest> for ItemFields {
    fn from(req: ItemRequest) -> Self {
        ItemFields::new(req.name, req.category, req.quantity, req.price)
            .with_description(req.description)
            .trimmed()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListItemsQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl From<ListItemsQuery> for ItemFilter {
    fn from(q: ListItemsQuery) -> Self {
        ItemFilter::new(q.category, q.search)
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn item_to_json(item: &Item) -> serde_json::Value {
    serde_json::json!({
        "id": item.id.get(),
        "name": item.name,
        "category": item.category,
        "quantity": item.quantity,
        "price": item.price,
        "description": item.description,
        "total_value": item.total_value(),
        "created_at": item.created_at.to_rfc3339(),
        "updated_at": item.updated_at.to_rfc3339(),
    })
}

pub fn stats_to_json(stats: InventoryStats) -> serde_json::Value {
    serde_json::json!({
        "total_items": stats.total_items,
        "total_quantity": stats.total_quantity,
        "total_value": stats.total_value,
        "total_categories": stats.total_categories,
    })
}

pub fn import_report_to_json(report: &ImportReport) -> serde_json::Value {
    serde_json::json!({
        "imported": report.imported,
        "failed": report.failed(),
        "failures": report.failures.iter().map(|f| serde_json::json!({
            "line": f.line,
            "reason": f.reason,
        })).collect::<Vec<_>>(),
    })
}
