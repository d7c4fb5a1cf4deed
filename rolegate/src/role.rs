//! # Roles
//!
//! A role binds a name to a set of per-resource access levels. Roles are
//! built in one fallible call from an ordered list of [`Grant`]s and are
//! immutable afterwards.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::access::{AccessLevel, AccessMask};
use crate::error::{RbacError, RbacResult};
use crate::resource::Resource;

/// A single resource grant applied while constructing a role.
///
/// Grants are inert until passed to [`Role::new`] or [`RoleBuilder::build`];
/// validation happens there so a failing grant discards the whole role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    resource: Option<String>,
    level: AccessLevel,
}

impl Grant {
    /// Identity of the granted resource, if one was supplied.
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// Granted level.
    pub fn level(&self) -> AccessLevel {
        self.level
    }
}

/// Grant `level` on `resource`.
///
/// # Example
///
/// ```
/// use rolegate::{with_resource, AccessLevel, Role};
///
/// let role = Role::new("author", [with_resource("article", AccessLevel::Modify)]).unwrap();
/// assert_eq!(role.access_level("article"), Some(AccessLevel::Modify));
/// ```
pub fn with_resource<R: Resource + ?Sized>(resource: &R, level: AccessLevel) -> Grant {
    Grant {
        resource: Some(resource.identity().into_owned()),
        level,
    }
}

/// Grant `level` on a resource that may be missing.
///
/// A missing resource fails role construction with
/// [`RbacError::NilResource`]. An empty identity is an ordinary resource.
pub fn with_optional_resource<R: Resource + ?Sized>(
    resource: Option<&R>,
    level: AccessLevel,
) -> Grant {
    Grant {
        resource: resource.map(|r| r.identity().into_owned()),
        level,
    }
}

/// A named bundle of resource grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    name: String,
    resources: HashMap<String, AccessLevel>,
}

impl Role {
    /// Construct a role, applying `grants` in order.
    ///
    /// # Errors
    ///
    /// - [`RbacError::InvalidName`] if `name` is empty
    /// - [`RbacError::NilResource`] if a grant has no resource
    /// - [`RbacError::DuplicateResource`] if a resource is granted twice
    ///
    /// No role is produced when any grant fails.
    pub fn new<I>(name: impl Into<String>, grants: I) -> RbacResult<Self>
    where
        I: IntoIterator<Item = Grant>,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(RbacError::InvalidName);
        }

        let mut resources = HashMap::new();
        for grant in grants {
            let Some(resource) = grant.resource else {
                return Err(RbacError::NilResource);
            };
            match resources.entry(resource) {
                Entry::Occupied(entry) => {
                    return Err(RbacError::DuplicateResource(entry.key().clone()));
                }
                Entry::Vacant(entry) => {
                    entry.insert(grant.level);
                }
            }
        }

        Ok(Self { name, resources })
    }

    /// Start building a role with the given name.
    pub fn builder(name: impl Into<String>) -> RoleBuilder {
        RoleBuilder::new(name)
    }

    /// Role name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check whether the role can access the resource.
    ///
    /// Resources without a grant are always denied.
    pub fn can_access<R: Resource + ?Sized>(&self, resource: &R, mask: AccessMask) -> bool {
        self.access_level(resource)
            .map(|level| mask.permits(level))
            .unwrap_or(false)
    }

    /// Level granted on `resource`, if any.
    pub fn access_level<R: Resource + ?Sized>(&self, resource: &R) -> Option<AccessLevel> {
        self.resources.get(&*resource.identity()).copied()
    }

    /// Iterate over `(resource identity, level)` grants in no particular order.
    pub fn grants(&self) -> impl Iterator<Item = (&str, AccessLevel)> {
        self.resources.iter().map(|(id, level)| (id.as_str(), *level))
    }

    /// Number of granted resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Check if the role grants nothing.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// Builder collecting grants for a [`Role`].
///
/// ```
/// use rolegate::{AccessLevel, AccessMask, Role};
///
/// let role = Role::builder("editor")
///     .grant("article", AccessLevel::Modify)
///     .grant("comment", AccessLevel::Delete)
///     .build()
///     .unwrap();
///
/// assert!(role.can_access("article", AccessMask::min_level(AccessLevel::Read)));
/// assert!(!role.can_access("article", AccessMask::min_level(AccessLevel::Delete)));
/// ```
#[derive(Debug, Clone)]
pub struct RoleBuilder {
    name: String,
    grants: Vec<Grant>,
}

impl RoleBuilder {
    /// Create a builder for a role named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            grants: Vec::new(),
        }
    }

    /// Add a grant on `resource`.
    pub fn grant<R: Resource + ?Sized>(mut self, resource: &R, level: AccessLevel) -> Self {
        self.grants.push(with_resource(resource, level));
        self
    }

    /// Add a grant on a resource that may be missing.
    pub fn grant_optional<R: Resource + ?Sized>(
        mut self,
        resource: Option<&R>,
        level: AccessLevel,
    ) -> Self {
        self.grants.push(with_optional_resource(resource, level));
        self
    }

    /// Validate every grant and produce the role.
    pub fn build(self) -> RbacResult<Role> {
        Role::new(self.name, self.grants)
    }
}
