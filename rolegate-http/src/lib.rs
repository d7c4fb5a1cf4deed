//! # Rolegate HTTP
//!
//! Tower middleware that mounts [`rolegate`] access gates on HTTP routes.
//!
//! ## Overview
//!
//! Each guarded route is configured once with a resource and a minimum
//! access level. Per request the middleware:
//! - reads the role name from the `Authorized-Role` header (configurable)
//! - looks the role up in the shared [`Registry`](rolegate::Registry)
//! - forwards the request untouched when the role has enough access
//! - otherwise answers `403 Forbidden` with a generic body and never calls
//!   the wrapped handler
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use axum::{routing::post, Router};
//! use rolegate::{AccessLevel, Registry, Role};
//! use rolegate_http::RegistryExt;
//!
//! let author = Role::builder("author")
//!     .grant("article", AccessLevel::Modify)
//!     .build()
//!     .unwrap();
//! let registry = Arc::new(Registry::new([author]).unwrap());
//!
//! let app: Router = Router::new()
//!     .route("/articles", post(|| async { "created" }))
//!     .route_layer(registry.guard_layer("article", AccessLevel::Modify));
//! ```
//!
//! ## Configuration
//!
//! [`GateConfig::from_env`] reads `ROLEGATE_ROLE_HEADER` and
//! `ROLEGATE_DENY_BODY`; pass it to [`GuardLayer::with_config`].

pub mod config;
pub mod layer;

// Re-export main types
pub use config::{ConfigError, GateConfig};
pub use layer::{GuardFuture, GuardLayer, GuardService, RegistryExt};
