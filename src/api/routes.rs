//! Route table and middleware stack

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api::handlers;
use crate::AppState;

/// Build the application router
pub async fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/v1/images/generations", post(handlers::create_image))
        .route("/health", get(handlers::health))
        .layer(cors)
        .layer(middleware::from_fn(preflight_body))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The CORS layer answers every OPTIONS request itself, before routing, with
/// an empty body; the wire contract promises `{}`. This sits outside the CORS
/// layer and swaps the body in, keeping the status and headers the layer
/// produced. The gate and engine are never involved.
async fn preflight_body(request: Request, next: Next) -> Response {
    let is_options = request.method() == Method::OPTIONS;
    let response = next.run(request).await;

    if !is_options || response.status() != StatusCode::OK {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    Response::from_parts(parts, Body::from("{}"))
}
