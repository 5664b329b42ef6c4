use axum::{Json, http::Uri};

use crate::{errors::AppError, types::HealthStatus};

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
    })
}

pub async fn handler_404(uri: Uri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}
