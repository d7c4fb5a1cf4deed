//! End-to-end tests for role registration and gate decisions.
//!
//! Scenario: an "article" resource guarded at `Modify`, an "author" role
//! with `Modify`, a "reader" role with `Read`, and requests carrying various
//! role tokens.

use rolegate::{
    with_resource, AccessLevel, AccessMask, Decision, DenyReason, RbacError, Registry, Resource,
    Role,
};
use std::borrow::Cow;
use std::sync::Arc;

/// The protected resource.
struct Article;

impl Resource for Article {
    fn identity(&self) -> Cow<'_, str> {
        Cow::Borrowed("article")
    }
}

fn seeded_registry() -> Arc<Registry> {
    let author = Role::new("author", [with_resource(&Article, AccessLevel::Modify)]).unwrap();
    Arc::new(Registry::new([author]).unwrap())
}

#[test]
fn test_article_scenario() {
    let registry = seeded_registry();
    let gate = Arc::clone(&registry).guard(&Article, AccessLevel::Modify);

    assert_eq!(gate.decide(Some("author")), Decision::Allow);

    let reader = Role::new("reader", [with_resource(&Article, AccessLevel::Read)]).unwrap();
    registry.add_role(reader).unwrap();
    assert_eq!(
        gate.decide(Some("reader")),
        Decision::Deny(DenyReason::InsufficientAccess)
    );

    assert!(!gate.check(None));
    assert!(!gate.check(Some("")));
    assert_eq!(
        gate.decide(Some("ghost")),
        Decision::Deny(DenyReason::UnknownRole)
    );
}

#[test]
fn test_resource_identity_is_by_string() {
    let registry = seeded_registry();
    let role = registry.find_role("author").unwrap();

    // A plain string with the same identity is the same resource.
    assert!(role.can_access("article", AccessMask::min_level(AccessLevel::Read)));
    assert!(role.can_access(&Article, AccessMask::min_level(AccessLevel::Modify)));
    assert!(!role.can_access("articles", AccessMask::min_level(AccessLevel::Read)));
}

#[test]
fn test_monotonic_levels_through_gates() {
    let registry = Arc::new(Registry::empty());
    for level in AccessLevel::all() {
        let role = Role::new(level.as_str(), [with_resource(&Article, level)]).unwrap();
        registry.add_role(role).unwrap();
    }

    for required in AccessLevel::all() {
        let gate = Arc::clone(&registry).guard(&Article, required);
        for granted in AccessLevel::all() {
            assert_eq!(
                gate.check(Some(granted.as_str())),
                granted >= required,
                "granted {granted}, required {required}"
            );
        }
    }
}

#[test]
fn test_failed_registration_leaves_registry_untouched() {
    let registry = seeded_registry();

    let duplicate = Role::builder("editor")
        .grant(&Article, AccessLevel::Read)
        .grant("article", AccessLevel::Modify)
        .build();
    assert!(matches!(duplicate, Err(RbacError::DuplicateResource(_))));

    let impostor = Role::new("author", [with_resource(&Article, AccessLevel::Delete)]).unwrap();
    assert_eq!(
        registry.add_role(impostor),
        Err(RbacError::RoleAlreadyDefined("author".to_string()))
    );

    assert_eq!(registry.role_names(), vec!["author"]);
    let author = registry.find_role("author").unwrap();
    assert_eq!(author.access_level(&Article), Some(AccessLevel::Modify));
}

#[test]
fn test_concurrent_gate_checks_and_additions() {
    let registry = seeded_registry();
    let gate = Arc::clone(&registry).guard(&Article, AccessLevel::Read);

    std::thread::scope(|s| {
        for worker in 0..4 {
            let registry = &registry;
            s.spawn(move || {
                for i in 0..50 {
                    let name = format!("worker-{worker}-{i}");
                    let grants = [with_resource(&Article, AccessLevel::Read)];
                    let role = Role::new(name.as_str(), grants).unwrap();
                    registry.add_role(role).unwrap();
                }
            });
        }
        for _ in 0..4 {
            let gate = &gate;
            s.spawn(move || {
                for _ in 0..200 {
                    assert!(gate.check(Some("author")));
                    assert!(!gate.check(Some("ghost")));
                }
            });
        }
    });

    assert_eq!(registry.len(), 201);
    assert!(gate.check(Some("worker-3-49")));
}
