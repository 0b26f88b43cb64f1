use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.store().get_categories().await {
        Ok(categories) => (StatusCode::OK, Json(categories)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn summary_stats(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.store().get_summary_stats().await {
        Ok(stats) => (StatusCode::OK, Json(dto::stats_to_json(stats))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
