//! The authorization decision engine.

use std::collections::BTreeSet;
use std::sync::Arc;

use caller_security::Principal;

use crate::policy::PolicyRegistry;

/// Machine-readable denial reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// The authentication mechanism's trust rank is below the policy's
    /// minimum.
    InsufficientAuthStrength,
    /// The caller lacks one or more required entitlements.
    MissingEntitlements,
    /// No policy is registered for the operation (fail-closed mode only).
    NoPolicy,
}

impl DenyReason {
    /// Stable machine reason code.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InsufficientAuthStrength => "insufficient_auth_strength",
            Self::MissingEntitlements => "missing_entitlements",
            Self::NoPolicy => "no_policy",
        }
    }
}

/// Authorization denial: fatal for the current operation invocation only.
///
/// Carries the machine reason code and the denying principal's public
/// attributes for caller-side diagnostics.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct AccessDenied {
    reason: DenyReason,
    message: String,
    principal: Principal,
}

impl AccessDenied {
    #[must_use]
    pub fn reason(&self) -> DenyReason {
        self.reason
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Public attributes of the principal that was denied.
    #[must_use]
    pub fn principal(&self) -> &Principal {
        &self.principal
    }
}

/// What to do when no policy is registered for an operation.
///
/// The default is fail-open; deployments can opt into fail-closed, which
/// denies with reason [`DenyReason::NoPolicy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    #[default]
    Allow,
    Deny,
}

/// Centralized authorization engine.
///
/// Evaluates a resolved principal against the target operation's policy.
/// Strength is checked before entitlements, so when both fail the reported
/// reason is `insufficient_auth_strength`. Evaluation is synchronous pure
/// computation over the policy snapshot, with no I/O and no suspension.
pub struct Authorizer {
    registry: Arc<PolicyRegistry>,
    missing_policy: MissingPolicy,
}

impl Authorizer {
    #[must_use]
    pub fn new(registry: Arc<PolicyRegistry>, missing_policy: MissingPolicy) -> Self {
        Self {
            registry,
            missing_policy,
        }
    }

    /// Authorize `principal` to invoke `operation`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied`] with a machine reason code when the policy's
    /// strength or entitlement requirements are not met (or, in fail-closed
    /// mode, when no policy is registered).
    pub fn authorize(&self, principal: &Principal, operation: &str) -> Result<(), AccessDenied> {
        let Some(policy) = self.registry.get(operation) else {
            return match self.missing_policy {
                MissingPolicy::Allow => Ok(()),
                MissingPolicy::Deny => Err(AccessDenied {
                    reason: DenyReason::NoPolicy,
                    message: format!("No policy registered for operation '{operation}'"),
                    principal: principal.clone(),
                }),
            };
        };

        if principal.strength() < policy.min_strength {
            return Err(AccessDenied {
                reason: DenyReason::InsufficientAuthStrength,
                message: format!(
                    "Operation '{operation}' requires auth strength {:?}, but caller has {:?}",
                    policy.min_strength,
                    principal.strength()
                ),
                principal: principal.clone(),
            });
        }

        let missing: BTreeSet<&String> = policy
            .required_entitlements
            .iter()
            .filter(|e| !principal.has_entitlement(e))
            .collect();
        if !missing.is_empty() {
            return Err(AccessDenied {
                reason: DenyReason::MissingEntitlements,
                message: format!(
                    "Operation '{operation}' requires entitlements {:?}, but caller lacks {:?}",
                    policy.required_entitlements, missing
                ),
                principal: principal.clone(),
            });
        }

        Ok(())
    }

    /// Non-raising wrapper around [`Authorizer::authorize`].
    #[must_use]
    pub fn can_access(&self, principal: &Principal, operation: &str) -> bool {
        self.authorize(principal, operation).is_ok()
    }
}
