use axum::{
    Json,
    extract::{Path, rejection::PathRejection},
    http::StatusCode,
};

use crate::{
    errors::AppError,
    extractors::Normalized,
    models::{CreateTransaction, UpdateTransaction},
    types::Updated,
};

pub async fn create_transaction(
    Normalized(transaction): Normalized<CreateTransaction>,
) -> Result<(StatusCode, Json<CreateTransaction>), AppError> {
    tracing::info!(
        amount = transaction.amount,
        category = %transaction.category,
        recurring = transaction.recurring,
        "transaction accepted"
    );

    Ok((StatusCode::CREATED, Json(transaction)))
}

pub async fn update_transaction(
    path: Result<Path<i64>, PathRejection>,
    Normalized(changes): Normalized<UpdateTransaction>,
) -> Result<Json<Updated<UpdateTransaction>>, AppError> {
    let Path(id) = path?;
    tracing::info!(id, "transaction update accepted");

    Ok(Json(Updated { id, changes }))
}
