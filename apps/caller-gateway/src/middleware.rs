//! Caller resolution middleware.
//!
//! Runs the resolution chain for every request and attaches the resulting
//! [`Principal`] as a request extension. This layer never rejects a request
//! on authentication grounds; authorization happens at the operation.

use axum::body::Body;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::StatusCode;

use caller_resolver_sdk::CallerRequest;
use caller_security::Principal;

use crate::api::error::Problem;
use crate::state::AppState;

/// Resolve the caller and attach the principal to the request.
///
/// The body is buffered once (bounded by the configured limit) so the
/// signed-request adapter can verify it, then restored for the handler.
pub async fn resolve_principal(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();

    let bytes = match axum::body::to_bytes(body, state.body_limit_bytes).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::debug!(error = %err, "Failed to buffer request body");
            return Problem::new(
                StatusCode::PAYLOAD_TOO_LARGE,
                "Payload Too Large",
                "Request body exceeds the configured limit",
            )
            .into_response();
        }
    };

    let view = CallerRequest::new(parts.headers.clone(), bytes.clone());
    let principal: Principal = state.chain.resolve(&view).await;

    let mut request = Request::from_parts(parts, Body::from(bytes));
    request.extensions_mut().insert(principal);
    next.run(request).await
}
