#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc};

use application::{
    Environment, HitCounter, RandomIdGenerator, ResourceService, ResourceServiceDependencies,
    SystemClock,
};
use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use config::HashingConfig;
use domain::ChirpValidator;
use infrastructure::{Argon2PasswordHasher, MemoryStore};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;
use web_api::{router, AppState};

pub const INDEX_HTML: &str = "<html><body>Welcome to Chirpy</body></html>";

pub struct TestApp {
    pub router: Router,
    pub service: Arc<ResourceService>,
    pub static_dir: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.static_dir);
    }
}

pub fn test_app(environment: Environment) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let hasher = Argon2PasswordHasher::new(&HashingConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
        max_concurrent: 2,
    })
    .expect("hasher");

    let service = Arc::new(ResourceService::new(ResourceServiceDependencies {
        account_repository: store.clone(),
        chirp_repository: store,
        password_hasher: Arc::new(hasher),
        clock: Arc::new(SystemClock),
        id_generator: Arc::new(RandomIdGenerator),
        hit_counter: Arc::new(HitCounter::new()),
        chirp_validator: ChirpValidator::default(),
        environment,
    }));

    let static_dir = std::env::temp_dir().join(format!("chirpy-static-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&static_dir).expect("static dir");
    std::fs::write(static_dir.join("index.html"), INDEX_HTML).expect("index.html");

    let router = router(AppState::new(service.clone(), static_dir.clone()));
    TestApp {
        router,
        service,
        static_dir,
    }
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn send_raw(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
    let response = app.clone().oneshot(request).await.expect("request");
    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (
        status,
        headers,
        String::from_utf8_lossy(&body_bytes).into_owned(),
    )
}

pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, _, body) = send_raw(app, request).await;
    let body = serde_json::from_str(&body).unwrap_or(json!({}));
    (status, body)
}

pub async fn create_account(app: &Router, email: &str, password: &str) -> Value {
    let (status, body) = send_request(
        app,
        json_request(
            "POST",
            "/api/users",
            json!({ "email": email, "password": password }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}
