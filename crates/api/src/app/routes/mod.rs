use axum::{
    routing::{get, post},
    Router,
};

pub mod items;
pub mod reports;
pub mod system;
pub mod transfer;

/// Router for the `/api` endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/items", get(items::list_items).post(items::create_item))
        .route(
            "/items/:id",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
        .route("/categories", get(reports::list_categories))
        .route("/stats", get(reports::summary_stats))
        .route("/export", get(transfer::export_csv))
        .route("/import", post(transfer::import_csv))
}
