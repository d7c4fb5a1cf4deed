//! End-to-end tests for the guard middleware on an axum router.
//!
//! A POST route is protected for the "article" resource at `Modify`. Requests
//! are driven through the router with `oneshot`, covering:
//! 1. author (Modify) -> 200
//! 2. reader (Read) -> 403
//! 3. no header / empty header -> 403
//! 4. unknown role -> 403

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::routing::post;
use axum::Router;
use rolegate::{AccessLevel, Registry, Resource, Role, AUTHORIZED_ROLE_HEADER};
use rolegate_http::{GateConfig, GuardLayer, RegistryExt};
use std::borrow::Cow;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

/// The protected resource.
struct Article;

impl Resource for Article {
    fn identity(&self) -> Cow<'_, str> {
        Cow::Borrowed("article")
    }
}

/// Test fixture: a guarded router plus a counter of handler invocations.
struct TestFixture {
    registry: Arc<Registry>,
    app: Router,
    calls: Arc<AtomicUsize>,
}

impl TestFixture {
    fn new() -> Self {
        let author = Role::builder("author")
            .grant(&Article, AccessLevel::Modify)
            .build()
            .unwrap();
        let registry = Arc::new(Registry::new([author]).unwrap());
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        let app = Router::new()
            .route(
                "/",
                post(move |headers: HeaderMap| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    async move {
                        // Echo the request id to prove the request arrives untouched.
                        headers
                            .get("x-request-id")
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or("none")
                            .to_string()
                    }
                }),
            )
            .route_layer(registry.guard_layer(&Article, AccessLevel::Modify));

        Self {
            registry,
            app,
            calls,
        }
    }

    async fn post(&self, role: Option<&str>) -> (StatusCode, String) {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/")
            .header("x-request-id", "req-42");
        if let Some(role) = role {
            builder = builder.header(AUTHORIZED_ROLE_HEADER, role);
        }
        let request = builder.body(Body::empty()).unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn handler_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[tokio::test]
async fn test_author_allowed() {
    let fixture = TestFixture::new();
    let (status, body) = fixture.post(Some("author")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "req-42");
    assert_eq!(fixture.handler_calls(), 1);
}

#[tokio::test]
async fn test_reader_forbidden() {
    let fixture = TestFixture::new();
    let reader = Role::builder("reader")
        .grant(&Article, AccessLevel::Read)
        .build()
        .unwrap();
    fixture.registry.add_role(reader).unwrap();

    let (status, body) = fixture.post(Some("reader")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, "Forbidden");
    assert_eq!(fixture.handler_calls(), 0);
}

#[tokio::test]
async fn test_without_role_forbidden() {
    let fixture = TestFixture::new();
    let (status, _) = fixture.post(None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(fixture.handler_calls(), 0);
}

#[tokio::test]
async fn test_empty_role_forbidden() {
    let fixture = TestFixture::new();
    let (status, _) = fixture.post(Some("")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(fixture.handler_calls(), 0);
}

#[tokio::test]
async fn test_role_not_found_forbidden() {
    let fixture = TestFixture::new();
    let (status, body) = fixture.post(Some("ghost")).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(!body.contains("ghost"));
    assert!(!body.contains("article"));
    assert!(!body.contains("modify"));
    assert_eq!(fixture.handler_calls(), 0);
}

#[tokio::test]
async fn test_roles_added_after_mount_are_honored() {
    let fixture = TestFixture::new();
    assert_eq!(fixture.post(Some("editor")).await.0, StatusCode::FORBIDDEN);

    let editor = Role::builder("editor")
        .grant(&Article, AccessLevel::Delete)
        .build()
        .unwrap();
    fixture.registry.add_role(editor).unwrap();

    assert_eq!(fixture.post(Some("editor")).await.0, StatusCode::OK);
}

#[tokio::test]
async fn test_configured_header_and_body() {
    let registry = Arc::new(
        Registry::new([Role::builder("author")
            .grant(&Article, AccessLevel::Modify)
            .build()
            .unwrap()])
        .unwrap(),
    );
    let config = GateConfig {
        role_header: "X-Role".to_string(),
        deny_body: "access denied".to_string(),
    };
    let layer = GuardLayer::with_config(
        Arc::clone(&registry).guard(&Article, AccessLevel::Read),
        &config,
    )
    .unwrap();
    let app = Router::new()
        .route("/", post(|| async { "ok" }))
        .route_layer(layer);

    let allowed = Request::builder()
        .method(Method::POST)
        .uri("/")
        .header("X-Role", "author")
        .body(Body::empty())
        .unwrap();
    assert_eq!(
        app.clone().oneshot(allowed).await.unwrap().status(),
        StatusCode::OK
    );

    let denied = Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(AUTHORIZED_ROLE_HEADER, "author")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(denied).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"access denied");
}
