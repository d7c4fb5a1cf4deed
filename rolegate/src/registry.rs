//! # Registry
//!
//! The concurrent store of every known role, keyed by name. It is built once
//! at startup, can only grow afterwards, and is shared by reference with the
//! gates that consult it.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::access::AccessLevel;
use crate::error::{RbacError, RbacResult};
use crate::gate::AccessGate;
use crate::resource::Resource;
use crate::role::Role;

/// Roles keyed by name, guarded by a read/write lock.
///
/// Lookups take the shared lock and additions the exclusive one. Roles are
/// stored behind `Arc` so a lookup releases the lock before the caller
/// evaluates anything.
///
/// # Example
///
/// ```
/// use rolegate::{AccessLevel, Registry, Role};
///
/// let admin = Role::builder("admin").grant("article", AccessLevel::Delete).build().unwrap();
/// let registry = Registry::new([admin]).unwrap();
///
/// let reader = Role::builder("reader").grant("article", AccessLevel::Read).build().unwrap();
/// registry.add_role(reader).unwrap();
///
/// assert!(registry.find_role("reader").is_some());
/// assert!(registry.find_role("ghost").is_none());
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    roles: RwLock<HashMap<String, Arc<Role>>>,
}

impl Registry {
    /// Construct a registry seeded with `roles`.
    ///
    /// # Errors
    ///
    /// [`RbacError::DuplicateRole`] if two seed roles share a name; no
    /// registry is produced in that case.
    pub fn new<I>(roles: I) -> RbacResult<Self>
    where
        I: IntoIterator<Item = Role>,
    {
        let mut map = HashMap::new();
        for role in roles {
            match map.entry(role.name().to_string()) {
                Entry::Occupied(entry) => {
                    return Err(RbacError::DuplicateRole(entry.key().clone()));
                }
                Entry::Vacant(entry) => {
                    entry.insert(Arc::new(role));
                }
            }
        }

        tracing::debug!(roles = map.len(), "Role registry created");
        Ok(Self {
            roles: RwLock::new(map),
        })
    }

    /// Create an empty registry.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add a role unless one with the same name already exists.
    ///
    /// The existence check and the insert happen under one exclusive lock,
    /// so of several concurrent additions with the same name exactly one
    /// succeeds.
    pub fn add_role(&self, role: Role) -> RbacResult<()> {
        let mut roles = self.write();
        match roles.entry(role.name().to_string()) {
            Entry::Occupied(entry) => {
                tracing::warn!(role = %entry.key(), "Rejected role redefinition");
                Err(RbacError::RoleAlreadyDefined(entry.key().clone()))
            }
            Entry::Vacant(entry) => {
                tracing::debug!(role = %entry.key(), grants = role.len(), "Role added");
                entry.insert(Arc::new(role));
                Ok(())
            }
        }
    }

    /// Find a role by name.
    pub fn find_role(&self, name: &str) -> Option<Arc<Role>> {
        self.read().get(name).cloned()
    }

    /// Check if a role with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Names of all registered roles, sorted.
    pub fn role_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered roles.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if no roles are registered.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Build a gate protecting `resource` at a minimum of `minimal`.
    ///
    /// The gate keeps this handle to the registry, so roles added later are
    /// visible to it. Clone the `Arc` first to build several gates.
    pub fn guard<R: Resource + ?Sized>(
        self: Arc<Self>,
        resource: &R,
        minimal: AccessLevel,
    ) -> AccessGate {
        AccessGate::new(self, resource, minimal)
    }

    // Every critical section is a single map operation, so a poisoned lock
    // still guards a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<Role>>> {
        self.roles.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<Role>>> {
        self.roles.write().unwrap_or_else(|p| p.into_inner())
    }
}
