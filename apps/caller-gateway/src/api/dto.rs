//! REST DTOs.

use std::collections::BTreeSet;

use caller_security::{AuthMethod, AuthStrength, Principal};

/// Public attributes of a resolved principal.
///
/// This is the exact structure the introspection endpoint returns, proving
/// that every entry point normalizes to the same identity.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PrincipalDto {
    pub id: String,
    pub tenant: Option<String>,
    pub method: AuthMethod,
    pub strength: AuthStrength,
    pub entitlements: BTreeSet<String>,
    pub is_authenticated: bool,
}

impl From<&Principal> for PrincipalDto {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id().to_owned(),
            tenant: principal.tenant().map(str::to_owned),
            method: principal.method(),
            strength: principal.strength(),
            entitlements: principal.entitlements().clone(),
            is_authenticated: principal.is_authenticated(),
        }
    }
}

/// `GET /whoami` response.
#[derive(Debug, serde::Serialize)]
pub struct WhoamiResponse {
    pub principal: PrincipalDto,
}

/// `POST /tools/rag-search` request body.
#[derive(Debug, serde::Deserialize)]
pub struct RagSearchRequest {
    pub query: String,
}

/// Envelope for tool invocation responses.
#[derive(Debug, serde::Serialize)]
pub struct ToolResponse {
    pub success: bool,
    pub data: serde_json::Value,
    pub principal: PrincipalDto,
}
