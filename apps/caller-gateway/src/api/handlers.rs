//! Request handlers.

use axum::Json;
use axum::extract::{Extension, State};
use serde_json::json;
use tracing::info;

use caller_security::Principal;

use crate::api::dto::{PrincipalDto, RagSearchRequest, ToolResponse, WhoamiResponse};
use crate::api::error::Problem;
use crate::domain::tools;
use crate::state::AppState;

/// Operation names as registered in the policy set.
pub const OP_RAG_SEARCH: &str = "rag_search";
pub const OP_DIAGNOSTICS: &str = "diagnostics";

/// Service information.
pub async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "service": "caller-gateway",
        "endpoints": {
            "/whoami": "Show the resolved caller principal",
            "/tools/rag-search": "Search RAG knowledge base (requires rag:read, weak auth)",
            "/tools/diagnostics": "System diagnostics (requires diag:read, strong auth)",
        }
    }))
}

/// Identity introspection: returns the principal the chain produced,
/// unchanged. Not authorization-gated; it demonstrates that every entry
/// point normalizes identically.
#[tracing::instrument(skip_all, fields(principal_id = principal.id()))]
pub async fn whoami(Extension(principal): Extension<Principal>) -> Json<WhoamiResponse> {
    Json(WhoamiResponse {
        principal: PrincipalDto::from(&principal),
    })
}

/// Invoke the RAG search tool.
#[tracing::instrument(skip_all, fields(principal_id = principal.id(), query = %body.query))]
pub async fn rag_search(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<RagSearchRequest>,
) -> Result<Json<ToolResponse>, Problem> {
    // Centralized authorization: the tool itself is auth-agnostic.
    state.authorizer.authorize(&principal, OP_RAG_SEARCH)?;

    info!("Invoking rag_search");
    let data = tools::rag_search(&principal, &body.query);

    Ok(Json(ToolResponse {
        success: true,
        data,
        principal: PrincipalDto::from(&principal),
    }))
}

/// Invoke the diagnostics tool.
#[tracing::instrument(skip_all, fields(principal_id = principal.id()))]
pub async fn diagnostics(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<ToolResponse>, Problem> {
    state.authorizer.authorize(&principal, OP_DIAGNOSTICS)?;

    info!("Invoking diagnostics");
    let data = tools::diagnostics(&principal);

    Ok(Json(ToolResponse {
        success: true,
        data,
        principal: PrincipalDto::from(&principal),
    }))
}
