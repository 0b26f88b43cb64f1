use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::Extension,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use stockroom_infra::csv_io;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn export_csv(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let mut buf = Vec::new();
    if let Err(e) = csv_io::export_items(services.store(), &mut buf).await {
        return errors::csv_error_to_response(e);
    }

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"inventory.csv\""),
        ],
        buf,
    )
        .into_response()
}

/// Import a CSV body. Bad rows are reported, not fatal.
pub async fn import_csv(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> axum::response::Response {
    match csv_io::import_items(services.store(), body.as_ref()).await {
        Ok(report) => (StatusCode::OK, Json(dto::import_report_to_json(&report))).into_response(),
        Err(e) => errors::csv_error_to_response(e),
    }
}
