//! Third-party signed-request adapter.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use caller_resolver_sdk::{
    AdapterError, CallerRequest, CredentialAdapter, SignatureVerifier, SignerDirectory,
};
use caller_security::{AuthMethod, AuthStrength, Principal};

use crate::config::SignedConfig;

use super::subject_principal;

/// Resolves partner-signed requests into weak principals.
///
/// The signature covers the request body plus a timestamp; a configurable
/// freshness window rejects replayed requests.
pub struct SignedRequestAdapter {
    signature_header: String,
    timestamp_header: String,
    signer_header: String,
    freshness_window_secs: i64,
    verifier: Arc<dyn SignatureVerifier>,
    directory: Arc<dyn SignerDirectory>,
}

impl SignedRequestAdapter {
    #[must_use]
    pub fn new(
        config: &SignedConfig,
        verifier: Arc<dyn SignatureVerifier>,
        directory: Arc<dyn SignerDirectory>,
    ) -> Self {
        Self {
            signature_header: config.signature_header.clone(),
            timestamp_header: config.timestamp_header.clone(),
            signer_header: config.signer_header.clone(),
            freshness_window_secs: config.freshness_window_secs,
            verifier,
            directory,
        }
    }

    fn timestamp_is_fresh(&self, timestamp: &str) -> bool {
        let Ok(ts) = timestamp.parse::<i64>() else {
            return false;
        };
        let now = chrono::Utc::now().timestamp();
        (now - ts).abs() <= self.freshness_window_secs
    }
}

#[async_trait]
impl CredentialAdapter for SignedRequestAdapter {
    fn name(&self) -> &'static str {
        "signed"
    }

    fn applies(&self, request: &CallerRequest) -> bool {
        request.has_header(&self.signature_header) && request.has_header(&self.timestamp_header)
    }

    async fn resolve(&self, request: &CallerRequest) -> Result<Option<Principal>, AdapterError> {
        let Some(signature) = request.header(&self.signature_header) else {
            return Ok(None);
        };
        let Some(timestamp) = request.header(&self.timestamp_header) else {
            debug!("Signed request missing timestamp header");
            return Ok(None);
        };
        if !self.timestamp_is_fresh(timestamp) {
            debug!("Signed request timestamp outside freshness window");
            return Ok(None);
        }
        if !self.verifier.verify(timestamp, request.body(), signature) {
            debug!("Request signature did not verify");
            return Ok(None);
        }
        let Some(signer) = request.header(&self.signer_header) else {
            debug!("Signed request missing signer header");
            return Ok(None);
        };
        match self.directory.lookup(signer).await? {
            // Strength stays Weak even if the directory record is generous.
            Some(record) => Ok(Some(subject_principal(
                record,
                AuthMethod::Signed,
                AuthStrength::Weak,
            ))),
            None => Ok(Some(
                Principal::builder()
                    .id(format!("partner_unknown_{signer}"))
                    .method(AuthMethod::Signed)
                    .strength(AuthStrength::Weak)
                    .build(),
            )),
        }
    }
}
