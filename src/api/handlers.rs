//! HTTP handlers

use axum::{body::Bytes, extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

use crate::gateway::{ImagesRequest, ImagesResponse};
use crate::{AppState, Result};

/// `POST /v1/images/generations` - OpenAI-compatible image generation.
///
/// The body is read raw and parsed leniently: absent or malformed JSON
/// degrades to the default request instead of a 4xx.
pub async fn create_image(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ImagesResponse>> {
    let request: ImagesRequest = serde_json::from_slice(&body).unwrap_or_else(|e| {
        debug!(error = %e, "Unparseable request body, using defaults");
        ImagesRequest::default()
    });

    let response = state.gateway.handle(request).await?;
    Ok(Json(response))
}

/// `GET /health` - liveness probe. Reads only configuration, so it stays
/// responsive while a generation holds the gate.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model": state.settings.model.path,
    }))
}
