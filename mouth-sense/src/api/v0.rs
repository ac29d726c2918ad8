//! API v0 endpoints.
//!
//! Version 0 signals an unstable API -- breaking changes are expected
//! until the service reaches 1.0.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::{router::OpenApiRouter, routes};

use super::server::SharedState;
use crate::api_client::types::{
    Classification, ClassificationRequest, ErrorResponse, SessionSnapshot,
};
use crate::error::Error;
use crate::tracing::prelude::*;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Build the v0 API routes with OpenAPI metadata.
pub fn routes() -> OpenApiRouter<SharedState> {
    OpenApiRouter::new()
        .routes(routes!(health))
        .routes(routes!(classify))
        .routes(routes!(get_session))
}

fn api_error(err: Error) -> ApiError {
    let status = match &err {
        Error::WindowUnavailable(_) => StatusCode::BAD_GATEWAY,
        Error::Classify(_) => StatusCode::UNPROCESSABLE_ENTITY,
        Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    debug!(status = %status, error = %err, "Classification request failed");

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = OK, description = "Server is running", body = String),
    ),
)]
async fn health() -> &'static str {
    "OK"
}

/// Classify the probe's current state from its latest samples.
#[utoipa::path(
    post,
    path = "/classification",
    tag = "classification",
    request_body = ClassificationRequest,
    responses(
        (status = OK, description = "Classification result", body = Classification),
        (status = BAD_GATEWAY, description = "Sample feed unavailable", body = ErrorResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Baseline missing or samples malformed", body = ErrorResponse),
    ),
)]
async fn classify(
    State(state): State<SharedState>,
    Json(req): Json<ClassificationRequest>,
) -> Result<Json<Classification>, ApiError> {
    let result = state
        .orchestrator
        .classify(req.update_environment)
        .await
        .map_err(api_error)?;

    Ok(Json(Classification::from(&result)))
}

/// Return the last decision, cached baseline and device state.
#[utoipa::path(
    get,
    path = "/session",
    tag = "classification",
    responses(
        (status = OK, description = "Current session state", body = SessionSnapshot),
    ),
)]
async fn get_session(State(state): State<SharedState>) -> Json<SessionSnapshot> {
    Json(state.orchestrator.snapshot())
}
