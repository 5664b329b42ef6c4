use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, patch, post},
};

use crate::{
    config::ServerConfig,
    handlers::{
        create_goal, create_transaction, handler_404, health, update_goal, update_transaction,
    },
    middleware::{ValidationGate, validate_body},
    schema::Contract,
};

/// Builds the API router. Every create/update route sits behind the
/// validation gate for its contract.
pub fn create_router(config: &ServerConfig) -> Router {
    let gate = |contract| {
        from_fn_with_state(ValidationGate::new(contract, config.body_limit), validate_body)
    };

    Router::new()
        .route("/health", get(health))
        .route(
            "/api/goals",
            post(create_goal).route_layer(gate(Contract::GoalCreate)),
        )
        .route(
            "/api/goals/{id}",
            patch(update_goal).route_layer(gate(Contract::GoalUpdate)),
        )
        .route(
            "/api/transactions",
            post(create_transaction).route_layer(gate(Contract::TransactionCreate)),
        )
        .route(
            "/api/transactions/{id}",
            patch(update_transaction).route_layer(gate(Contract::TransactionUpdate)),
        )
        .fallback(handler_404)
}
