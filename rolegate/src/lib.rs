//! # Rolegate
//!
//! In-process role-based access control: decides whether a named role may
//! act on a named resource at or above a required access level.
//!
//! ## Overview
//!
//! The rolegate crate handles:
//! - **Access levels**: Ordered tiers (none, read, modify, delete) and the
//!   minimum-level bitmask used to compare them
//! - **Resources**: Anything with a stable string identity
//! - **Roles**: Immutable bundles of resource grants
//! - **Registry**: Concurrent, append-only store of roles
//! - **Gates**: Per-route allow/deny decisions over a role token
//!
//! ## Architecture
//!
//! ```text
//! request -> token -> Registry::find_role -> Role::can_access(resource, mask) -> allow/deny
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use rolegate::{AccessLevel, Registry, Role};
//!
//! let author = Role::builder("author")
//!     .grant("article", AccessLevel::Modify)
//!     .build()
//!     .unwrap();
//! let reader = Role::builder("reader")
//!     .grant("article", AccessLevel::Read)
//!     .build()
//!     .unwrap();
//!
//! let registry = Arc::new(Registry::new([author, reader]).unwrap());
//! let gate = registry.guard("article", AccessLevel::Modify);
//!
//! assert!(gate.check(Some("author")));
//! assert!(!gate.check(Some("reader")));
//! assert!(!gate.check(None));
//! ```
//!
//! ## Deny by Default
//!
//! A missing token, an unknown role, and a resource the role has no grant
//! for all deny. Only configuration calls return errors.

pub mod access;
pub mod config;
pub mod error;
pub mod gate;
pub mod registry;
pub mod resource;
pub mod role;

// Re-export main types for convenience
pub use access::{min_access_level, AccessLevel, AccessMask};
pub use config::{GrantDefinition, RegistryConfig, RoleDefinition};
pub use error::{RbacError, RbacResult};
pub use gate::{AccessGate, Decision, DenyReason, AUTHORIZED_ROLE_HEADER};
pub use registry::Registry;
pub use resource::Resource;
pub use role::{with_optional_resource, with_resource, Grant, Role, RoleBuilder};
