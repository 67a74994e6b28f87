//! Protected operations.
//!
//! Tools are auth-agnostic: they receive the already-resolved principal for
//! audit fields only and contain no authentication or authorization logic;
//! the gateway authorizes before invoking them.

use serde_json::json;

use caller_security::Principal;

/// Search over the RAG knowledge base.
#[must_use]
pub fn rag_search(principal: &Principal, query: &str) -> serde_json::Value {
    let results = json!([
        {
            "chunk_id": "doc_1_chunk_3",
            "content": format!("Sample result for query: {query}"),
            "score": 0.95
        },
        {
            "chunk_id": "doc_2_chunk_7",
            "content": format!("Another relevant result for: {query}"),
            "score": 0.87
        }
    ]);

    json!({
        "query": query,
        "results": results,
        "count": 2,
        "principal_id": principal.id(),
        "tenant_id": principal.tenant(),
    })
}

/// System diagnostics, a sensitive operation gated on strong auth by
/// policy rather than by this function.
#[must_use]
pub fn diagnostics(principal: &Principal) -> serde_json::Value {
    json!({
        "system": {
            "os": std::env::consts::OS,
            "architecture": std::env::consts::ARCH,
        },
        "principal": {
            "id": principal.id(),
            "tenant": principal.tenant(),
            "method": principal.method(),
            "strength": principal.strength(),
            "entitlements": principal.entitlements(),
        },
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use caller_security::{AuthMethod, AuthStrength};

    #[test]
    fn rag_search_echoes_query_and_caller() {
        let principal = Principal::builder()
            .id("user_alice")
            .tenant("acme_corp")
            .method(AuthMethod::Cookie)
            .strength(AuthStrength::Strong)
            .build();

        let data = rag_search(&principal, "rust auth");
        assert_eq!(data["query"], "rust auth");
        assert_eq!(data["count"], 2);
        assert_eq!(data["principal_id"], "user_alice");
        assert_eq!(data["tenant_id"], "acme_corp");
    }

    #[test]
    fn diagnostics_reports_principal_attributes() {
        let data = diagnostics(&Principal::anonymous());
        assert_eq!(data["principal"]["id"], "anonymous");
        assert_eq!(data["principal"]["method"], "anonymous");
    }
}
