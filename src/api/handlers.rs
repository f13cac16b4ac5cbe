//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde_json::Value;
use tracing::{info, warn};

use super::AppState;
use super::types::{ErrorResponse, SizeResponse};
use crate::config::{ConfigError, SizingConfig};

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Returns the default configuration.
///
/// `GET /defaults` → 200 + `SizingConfig` JSON
pub async fn get_defaults(State(state): State<Arc<AppState>>) -> Json<SizingConfig> {
    Json(state.defaults.clone())
}

/// Sizes a system from a (partial) JSON configuration.
///
/// Fields missing from the body are taken from `state.defaults`, the same
/// configuration `GET /defaults` returns.
///
/// `POST /size` → 200 + `SizeResponse` JSON
/// Malformed body or out-of-range input → 400 + `ErrorResponse`
pub async fn post_size(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SizeResponse>, ApiError> {
    let Json(patch) = body.map_err(|rejection| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: rejection.body_text(),
                field: None,
            }),
        )
    })?;

    let result = state
        .defaults
        .overlay_json(patch)
        .and_then(|cfg| cfg.compute())
        .map_err(bad_request)?;

    info!(
        kva = result.inverter.kva_display,
        batteries = result.battery.unit_count,
        panels = result.panels.panel_count,
        "sized system"
    );
    Ok(Json(SizeResponse::from(result)))
}

fn bad_request(err: ConfigError) -> ApiError {
    warn!(error = %err, "rejecting sizing request");
    let field = match &err {
        ConfigError::Invalid(e) => Some(e.field().to_string()),
        _ => None,
    };
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: err.to_string(),
            field,
        }),
    )
}
