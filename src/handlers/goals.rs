use axum::{
    Json,
    extract::{Path, rejection::PathRejection},
    http::StatusCode,
};

use crate::{
    errors::AppError,
    extractors::Normalized,
    models::{CreateGoal, UpdateGoal},
    types::Updated,
};

pub async fn create_goal(
    Normalized(goal): Normalized<CreateGoal>,
) -> Result<(StatusCode, Json<CreateGoal>), AppError> {
    tracing::info!(
        title = %goal.title,
        category = %goal.category,
        target_amount = goal.target_amount,
        "goal accepted"
    );

    Ok((StatusCode::CREATED, Json(goal)))
}

pub async fn update_goal(
    path: Result<Path<i64>, PathRejection>,
    Normalized(changes): Normalized<UpdateGoal>,
) -> Result<Json<Updated<UpdateGoal>>, AppError> {
    let Path(id) = path?;
    tracing::info!(id, status = ?changes.status, "goal update accepted");

    Ok(Json(Updated { id, changes }))
}
