//! Authentication test helpers
//!
//! Builds an in-memory twirl router with a seeded founder account and
//! wraps the request plumbing used by the API tests.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use twirl::backend::auth::{
    AuthService, BootstrapState, FounderBootstrap, MemoryAccountStore, PasswordHasher, TokenKeys,
};
use twirl::backend::routes::create_router;
use twirl::backend::server::{AppState, FatalReceiver, FatalSignal};

pub const SECRET: &[u8] = b"integration-test-secret";
pub const FOUNDER: &str = "founder";
pub const FOUNDER_PASSWORD: &str = "Founder-Pass-01";

/// Lowest bcrypt cost, keeps the suite fast
pub const TEST_COST: u32 = 4;

pub struct TestApp {
    pub router: Router,
    pub auth: AuthService,
    pub fatal_rx: FatalReceiver,
}

/// Router over a fresh memory store holding only the founder
pub async fn spawn_app() -> TestApp {
    let store = Arc::new(MemoryAccountStore::new());

    let bootstrap = FounderBootstrap::new(
        store.clone(),
        PasswordHasher::new(TEST_COST),
        FOUNDER,
        FOUNDER_PASSWORD,
    );
    let state = bootstrap.cycle().await.expect("founder seeding failed");
    assert_eq!(state, BootstrapState::Seeding);

    let auth = AuthService::new(
        store,
        TokenKeys::new(SECRET),
        PasswordHasher::new(TEST_COST),
    );
    let (fatal, fatal_rx) = FatalSignal::channel();
    let router = create_router(AppState::new(auth.clone(), fatal));

    TestApp {
        router,
        auth,
        fatal_rx,
    }
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

impl TestApp {
    /// POST `body` to `path`, returning the status and decoded JSON body
    pub async fn post(
        &self,
        path: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method("POST").uri(path);
        if let Some(value) = authorization {
            request = request.header(header::AUTHORIZATION, value);
        }
        let request = match body {
            Some(json) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => request.body(Body::empty()),
        }
        .expect("failed to build request");

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router call failed");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    /// Log in through the API and return the raw token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let (status, body) = self
            .post(
                "/api/v1/auth/login",
                None,
                Some(serde_json::json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["token"]
            .as_str()
            .expect("token missing from login response")
            .to_string()
    }
}
