//! Per-operation authorization policies.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use arc_swap::ArcSwap;
use caller_security::AuthStrength;

/// Authorization requirement attached to a protected operation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperationPolicy {
    /// Operation name, the registry key.
    pub operation: String,

    /// Entitlements the caller must hold, all of them.
    #[serde(default)]
    pub required_entitlements: BTreeSet<String>,

    /// Minimum acceptable authentication strength.
    #[serde(default = "default_min_strength")]
    pub min_strength: AuthStrength,

    /// Human-readable description, surfaced in service listings only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_min_strength() -> AuthStrength {
    AuthStrength::Weak
}

impl OperationPolicy {
    #[must_use]
    pub fn new(
        operation: impl Into<String>,
        required_entitlements: impl IntoIterator<Item = String>,
        min_strength: AuthStrength,
    ) -> Self {
        Self {
            operation: operation.into(),
            required_entitlements: required_entitlements.into_iter().collect(),
            min_strength,
            description: None,
        }
    }
}

/// Read-mostly map of operation name → policy.
///
/// Registration happens at startup (or under an explicit administrative
/// action) and swaps a fresh immutable snapshot; lookups on the hot path are
/// lock-free snapshot reads and never race with registration.
pub struct PolicyRegistry {
    policies: ArcSwap<HashMap<String, OperationPolicy>>,
}

impl PolicyRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            policies: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    /// Build a registry from an initial set of policies.
    #[must_use]
    pub fn from_policies(policies: impl IntoIterator<Item = OperationPolicy>) -> Self {
        let map: HashMap<String, OperationPolicy> = policies
            .into_iter()
            .map(|p| (p.operation.clone(), p))
            .collect();
        Self {
            policies: ArcSwap::from_pointee(map),
        }
    }

    /// Register a policy. Idempotent by operation name, last write wins.
    pub fn register(&self, policy: OperationPolicy) {
        let current = self.policies.load();
        let mut next: HashMap<String, OperationPolicy> = (**current).clone();
        next.insert(policy.operation.clone(), policy);
        self.policies.store(Arc::new(next));
    }

    /// Look up the policy for an operation.
    #[must_use]
    pub fn get(&self, operation: &str) -> Option<OperationPolicy> {
        self.policies.load().get(operation).cloned()
    }

    /// Number of registered policies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.policies.load().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.policies.load().is_empty()
    }
}

impl Default for PolicyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn register_and_lookup() {
        let registry = PolicyRegistry::new();
        registry.register(OperationPolicy::new(
            "rag_search",
            ["rag:read".to_owned()],
            AuthStrength::Weak,
        ));

        let policy = registry.get("rag_search").unwrap();
        assert!(policy.required_entitlements.contains("rag:read"));
        assert_eq!(policy.min_strength, AuthStrength::Weak);
        assert!(registry.get("unknown_op").is_none());
    }

    #[test]
    fn re_registration_is_last_write_wins() {
        let registry = PolicyRegistry::new();
        registry.register(OperationPolicy::new(
            "diagnostics",
            ["diag:read".to_owned()],
            AuthStrength::Weak,
        ));
        registry.register(OperationPolicy::new(
            "diagnostics",
            ["diag:read".to_owned()],
            AuthStrength::Strong,
        ));

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("diagnostics").unwrap().min_strength,
            AuthStrength::Strong
        );
    }

    #[test]
    fn from_policies_seeds_the_registry() {
        let registry = PolicyRegistry::from_policies([
            OperationPolicy::new("a", [], AuthStrength::Weak),
            OperationPolicy::new("b", [], AuthStrength::Strong),
        ]);
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
    }

    #[test]
    fn policy_deserializes_with_defaults() {
        let policy: OperationPolicy =
            serde_json::from_str(r#"{"operation": "rag_search"}"#).unwrap();
        assert_eq!(policy.min_strength, AuthStrength::Weak);
        assert!(policy.required_entitlements.is_empty());
    }
}
