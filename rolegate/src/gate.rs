//! # Access Gate
//!
//! Per-route decision function. A gate is configured once with a resource
//! and a minimum level, and then answers allow/deny for each request's role
//! token. It is transport-agnostic; `rolegate-http` mounts it on an HTTP
//! pipeline.
//!
//! Every inconclusive case is a denial:
//!
//! ```text
//! token absent or empty        -> deny
//! no role with that name       -> deny
//! role lacks the access level  -> deny
//! otherwise                    -> allow
//! ```

use std::fmt;
use std::sync::Arc;

use crate::access::{AccessLevel, AccessMask};
use crate::registry::Registry;
use crate::resource::Resource;

/// Request header carrying the role name, by convention.
pub const AUTHORIZED_ROLE_HEADER: &str = "Authorized-Role";

/// Why a request was denied.
///
/// Only meant for diagnostics; callers must not expose it to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenyReason {
    /// No role token, or an empty one
    MissingToken,
    /// The token names no registered role
    UnknownRole,
    /// The role's grant is below the required level, or absent
    InsufficientAccess,
}

impl DenyReason {
    /// Get the string representation of the reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            DenyReason::MissingToken => "missing_token",
            DenyReason::UnknownRole => "unknown_role",
            DenyReason::InsufficientAccess => "insufficient_access",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Continue to the next stage.
    Allow,
    /// Short-circuit with a generic forbidden response.
    Deny(DenyReason),
}

impl Decision {
    /// Check if the request may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Guard for one resource at one minimum access level.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use rolegate::{AccessLevel, Registry, Role};
///
/// let author = Role::builder("author").grant("article", AccessLevel::Modify).build().unwrap();
/// let registry = Arc::new(Registry::new([author]).unwrap());
///
/// let gate = registry.guard("article", AccessLevel::Modify);
/// assert!(gate.check(Some("author")));
/// assert!(!gate.check(Some("ghost")));
/// assert!(!gate.check(None));
/// ```
#[derive(Debug, Clone)]
pub struct AccessGate {
    registry: Arc<Registry>,
    resource: String,
    minimal: AccessLevel,
    mask: AccessMask,
}

impl AccessGate {
    /// Create a gate; the required mask is computed here, once.
    pub fn new<R: Resource + ?Sized>(
        registry: Arc<Registry>,
        resource: &R,
        minimal: AccessLevel,
    ) -> Self {
        Self {
            registry,
            resource: resource.identity().into_owned(),
            minimal,
            mask: AccessMask::min_level(minimal),
        }
    }

    /// Identity of the protected resource.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Minimum level required to pass.
    pub fn minimal(&self) -> AccessLevel {
        self.minimal
    }

    /// Precomputed mask the role's grant is tested against.
    pub fn mask(&self) -> AccessMask {
        self.mask
    }

    /// The registry this gate consults.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Decide a request carrying `token` as its role name.
    ///
    /// Emits exactly one event per decision: `debug` on allow, `info` on deny.
    pub fn decide(&self, token: Option<&str>) -> Decision {
        let decision = self.evaluate(token);
        match decision {
            Decision::Allow => tracing::debug!(
                role = token.unwrap_or_default(),
                resource = %self.resource,
                minimal = %self.minimal,
                "Access allowed"
            ),
            Decision::Deny(reason) => tracing::info!(
                reason = %reason,
                resource = %self.resource,
                minimal = %self.minimal,
                "Access denied"
            ),
        }
        decision
    }

    /// Shorthand for `decide(token).is_allowed()`.
    pub fn check(&self, token: Option<&str>) -> bool {
        self.decide(token).is_allowed()
    }

    fn evaluate(&self, token: Option<&str>) -> Decision {
        let name = match token {
            Some(name) if !name.is_empty() => name,
            _ => return Decision::Deny(DenyReason::MissingToken),
        };

        let Some(role) = self.registry.find_role(name) else {
            return Decision::Deny(DenyReason::UnknownRole);
        };

        if role.can_access(self.resource.as_str(), self.mask) {
            Decision::Allow
        } else {
            Decision::Deny(DenyReason::InsufficientAccess)
        }
    }
}
