use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{event, instrument, Level};

use crate::{
    cqrs::{AddToCartCommand, CommandHandler},
    dtos::{ApiError, WebhookRequest},
    errors::CartWebhookError,
    state::AppState,
};

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/addToCart", post(add_to_cart))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

pub async fn index() -> &'static str {
    "cart webhook is running"
}

#[instrument(name = "add_to_cart", skip_all, fields(invocation_id = %uuid::Uuid::new_v4()))]
pub async fn add_to_cart(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<WebhookRequest>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let command = match parse_command(payload) {
        Ok(command) => command,
        Err(e) => return error_response(e),
    };

    match state.add_to_cart_command_handler.handle(&command).await {
        Ok(response) => (StatusCode::OK, Json(json!(response))),
        Err(e) => error_response(e),
    }
}

fn parse_command(payload: Result<Json<WebhookRequest>, JsonRejection>) -> Result<AddToCartCommand, CartWebhookError> {
    let Json(request) = payload.map_err(|rejection| CartWebhookError::Validation(rejection.body_text()))?;

    let parameters = request
        .session_info
        .and_then(|session_info| session_info.parameters)
        .ok_or_else(|| CartWebhookError::Validation(String::from("sessionInfo.parameters is required")))?;

    AddToCartCommand::try_from(parameters)
}

fn error_response(e: CartWebhookError) -> (StatusCode, Json<Value>) {
    let status = e.status_code();
    match &e {
        CartWebhookError::Validation(_) => event!(Level::INFO, status = status.as_u16(), "Rejected webhook request: {}", e),
        _ => event!(Level::ERROR, status = status.as_u16(), "Webhook request failed: {}", e),
    }

    (status, Json(json!(ApiError { error: e.public_message() })))
}
