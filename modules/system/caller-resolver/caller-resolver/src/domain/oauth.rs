//! OAuth bearer-token adapter.

use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::debug;

use caller_resolver_sdk::{AdapterError, CallerRequest, CredentialAdapter, RoleMapping};
use caller_security::{AuthMethod, AuthStrength, Principal};

use crate::config::OauthConfig;

/// Claims the adapter reads from a validated token. Expiry is enforced by
/// the JWT library itself.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    tenant_id: Option<String>,
    role: Option<String>,
}

/// Validates HS256 bearer tokens and maps the role claim to entitlements.
pub struct OauthAdapter {
    decoding_key: DecodingKey,
    validation: Validation,
    default_role: String,
    roles: Arc<dyn RoleMapping>,
}

impl OauthAdapter {
    #[must_use]
    pub fn new(config: &OauthConfig, roles: Arc<dyn RoleMapping>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }
        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.expose_secret().as_bytes()),
            validation,
            default_role: config.default_role.clone(),
            roles,
        }
    }
}

#[async_trait]
impl CredentialAdapter for OauthAdapter {
    fn name(&self) -> &'static str {
        "oauth"
    }

    fn applies(&self, request: &CallerRequest) -> bool {
        request.bearer_token().is_some()
    }

    async fn resolve(&self, request: &CallerRequest) -> Result<Option<Principal>, AdapterError> {
        let Some(token) = request.bearer_token() else {
            return Ok(None);
        };
        let claims = match jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
        {
            Ok(data) => data.claims,
            Err(err) => {
                debug!(error = %err, "Bearer token rejected");
                return Ok(None);
            }
        };
        let role = claims.role.as_deref().unwrap_or(&self.default_role);
        let entitlements = self.roles.entitlements_for(role);
        Ok(Some(
            Principal::builder()
                .id(claims.sub)
                .maybe_tenant(claims.tenant_id)
                .method(AuthMethod::Oauth)
                .strength(AuthStrength::Strong)
                .entitlements(entitlements)
                .build(),
        ))
    }
}
