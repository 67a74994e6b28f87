use std::collections::BTreeSet;

/// How the caller was authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// Platform session cookie.
    Cookie,
    /// OAuth 2.0 / OIDC bearer token.
    Oauth,
    /// Third-party-signed request (shared-secret signature).
    Signed,
    /// No credentials presented or none resolved.
    Anonymous,
}

/// Trust rank of the authentication mechanism itself, independent of what the
/// caller is permitted to do.
///
/// Variants are declared in ascending order so `>=` comparisons follow the
/// rank: `Anonymous < Weak < Strong`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AuthStrength {
    Anonymous,
    Weak,
    Strong,
}

/// `Principal` is the canonical, immutable record of "who is calling".
///
/// Every authentication entry point normalizes to this structure; the
/// authorization engine decides based on it alone. Constructed once per
/// request by exactly one credential adapter (or synthesized as the anonymous
/// principal by the resolution chain) and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Principal {
    /// Caller ID, unique within a tenant scope.
    id: String,
    /// Caller's tenant. Absent for anonymous or tenant-less callers.
    tenant: Option<String>,
    /// Which adapter produced this principal.
    method: AuthMethod,
    /// Trust rank of the authentication mechanism used.
    strength: AuthStrength,
    /// Opaque permission strings held by the caller.
    entitlements: BTreeSet<String>,
}

impl Principal {
    /// Create a new `Principal` builder.
    #[must_use]
    pub fn builder() -> PrincipalBuilder {
        PrincipalBuilder::default()
    }

    /// The canonical principal for unauthenticated requests.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            id: "anonymous".to_owned(),
            tenant: None,
            method: AuthMethod::Anonymous,
            strength: AuthStrength::Anonymous,
            entitlements: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn tenant(&self) -> Option<&str> {
        self.tenant.as_deref()
    }

    #[must_use]
    pub fn method(&self) -> AuthMethod {
        self.method
    }

    #[must_use]
    pub fn strength(&self) -> AuthStrength {
        self.strength
    }

    #[must_use]
    pub fn entitlements(&self) -> &BTreeSet<String> {
        &self.entitlements
    }

    /// Whether this is an authenticated (non-anonymous) principal.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.method != AuthMethod::Anonymous
    }

    /// Whether the caller holds a specific entitlement (exact-string match).
    #[must_use]
    pub fn has_entitlement(&self, entitlement: &str) -> bool {
        self.entitlements.contains(entitlement)
    }
}

/// Builder for [`Principal`].
///
/// Defaults to the anonymous identity; `build()` enforces the invariant that
/// an anonymous principal carries anonymous strength and no entitlements.
#[derive(Default)]
pub struct PrincipalBuilder {
    id: Option<String>,
    tenant: Option<String>,
    method: Option<AuthMethod>,
    strength: Option<AuthStrength>,
    entitlements: BTreeSet<String>,
}

impl PrincipalBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    #[must_use]
    pub fn maybe_tenant(mut self, tenant: Option<String>) -> Self {
        self.tenant = tenant;
        self
    }

    #[must_use]
    pub fn method(mut self, method: AuthMethod) -> Self {
        self.method = Some(method);
        self
    }

    #[must_use]
    pub fn strength(mut self, strength: AuthStrength) -> Self {
        self.strength = Some(strength);
        self
    }

    #[must_use]
    pub fn entitlements(mut self, entitlements: impl IntoIterator<Item = String>) -> Self {
        self.entitlements = entitlements.into_iter().collect();
        self
    }

    #[must_use]
    pub fn build(self) -> Principal {
        let method = self.method.unwrap_or(AuthMethod::Anonymous);
        if method == AuthMethod::Anonymous {
            // Anonymous implies no trust and no permissions regardless of
            // what the builder was fed.
            return Principal {
                id: self.id.unwrap_or_else(|| "anonymous".to_owned()),
                tenant: None,
                method,
                strength: AuthStrength::Anonymous,
                entitlements: BTreeSet::new(),
            };
        }
        Principal {
            id: self.id.unwrap_or_default(),
            tenant: self.tenant,
            method,
            strength: self.strength.unwrap_or(AuthStrength::Anonymous),
            entitlements: self.entitlements,
        }
    }
}
