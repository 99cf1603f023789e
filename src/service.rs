//! Request handlers for the file server.
//!
//! The CORS headers themselves are not set here. They are attached by
//! `SetResponseHeaderLayer`s around the whole router so that every
//! response carries them, including errors produced by these handlers.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::Extension,
    http::{Request, StatusCode},
    response::IntoResponse,
};
use tower::util::ServiceExt;
use tower_http::services::ServeDir;

use crate::Config;

/// Serves a file from the base directory.
///
/// `ServeDir` resolves directory paths to their `index.html`, infers
/// `Content-Type` from the extension, and rejects `..` components, so a
/// request can never read outside the base directory.
pub(crate) async fn serve_file(
    Extension(config): Extension<Arc<Config>>,
    req: Request<Body>,
) -> impl IntoResponse {
    let service = ServeDir::new(&config.root);

    service
        .oneshot(req)
        .await
        .map_err(|e| (StatusCode::NOT_FOUND, e.to_string()))
}

/// Answers CORS pre-flight requests with an empty success response.
pub(crate) async fn preflight() -> impl IntoResponse {
    StatusCode::OK
}
