//! Router assembly.

use axum::Router;
use axum::routing::{get, post};

use crate::api::handlers;
use crate::middleware::resolve_principal;
use crate::state::AppState;

/// Build the gateway router with the resolution middleware applied to every
/// route.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/whoami", get(handlers::whoami))
        .route("/tools/rag-search", post(handlers::rag_search))
        .route("/tools/diagnostics", post(handlers::diagnostics))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            resolve_principal,
        ))
        .with_state(state)
}
