//! Request path stamping for error responses
//!
//! `AppError` renders its envelope without knowing which request produced
//! it. This middleware fills in `path` on the way out.

use axum::{
    body::Body,
    extract::Request,
    http::header::CONTENT_LENGTH,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiErrorBody;

/// Rewrite error envelopes so `path` holds the request path
pub async fn stamp_error_path(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let response = next.run(request).await;

    let Some(mut body) = response.extensions().get::<ApiErrorBody>().cloned() else {
        return response;
    };
    body.path = path;

    let bytes = match serde_json::to_vec(&body) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize error body");
            return response;
        }
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes)).into_response()
}
