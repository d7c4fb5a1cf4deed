//! Role definitions loaded from configuration.
//!
//! Definitions are plain serde data; converting them into a [`Registry`]
//! goes through the regular constructors, so every role and registry
//! invariant is checked again.
//!
//! ```json
//! {
//!   "roles": [
//!     { "name": "author", "grants": [{ "resource": "article", "level": "modify" }] },
//!     { "name": "reader", "grants": [{ "resource": "article", "level": "read" }] }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::access::AccessLevel;
use crate::error::RbacResult;
use crate::registry::Registry;
use crate::role::{with_optional_resource, Role};

/// A single resource grant in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantDefinition {
    /// Resource identity. Missing fails with `NilResource`.
    #[serde(default)]
    pub resource: Option<String>,

    /// Granted level.
    pub level: AccessLevel,
}

/// A role in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    /// Role name.
    pub name: String,

    /// Grants, applied in order.
    #[serde(default)]
    pub grants: Vec<GrantDefinition>,
}

impl RoleDefinition {
    /// Build the role described by this definition.
    pub fn to_role(&self) -> RbacResult<Role> {
        Role::new(
            self.name.as_str(),
            self.grants
                .iter()
                .map(|g| with_optional_resource(g.resource.as_deref(), g.level)),
        )
    }
}

impl From<&Role> for RoleDefinition {
    fn from(role: &Role) -> Self {
        let mut grants: Vec<GrantDefinition> = role
            .grants()
            .map(|(resource, level)| GrantDefinition {
                resource: Some(resource.to_string()),
                level,
            })
            .collect();
        grants.sort_by(|a, b| a.resource.cmp(&b.resource));

        Self {
            name: role.name().to_string(),
            grants,
        }
    }
}

/// Seed configuration for a registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Roles, in seeding order.
    #[serde(default)]
    pub roles: Vec<RoleDefinition>,
}

impl RegistryConfig {
    /// Parse configuration from JSON.
    pub fn from_json(json: &str) -> RbacResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render configuration as pretty JSON.
    pub fn to_json(&self) -> RbacResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build every role, failing on the first invalid one.
    pub fn roles(&self) -> RbacResult<Vec<Role>> {
        self.roles.iter().map(RoleDefinition::to_role).collect()
    }

    /// Build a registry seeded with the configured roles.
    pub fn into_registry(self) -> RbacResult<Registry> {
        let roles = self.roles()?;
        tracing::info!(roles = roles.len(), "Loaded role definitions");
        Registry::new(roles)
    }
}
