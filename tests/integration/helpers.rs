//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use rhsenso_api::AppState;
use rhsenso_auth::PasswordHasher;
use rhsenso_core::config::{AppConfig, StoreProvider};
use rhsenso_database::Backend;
use rhsenso_database::repositories::MemoryAccountStore;
use rhsenso_entity::user::LocalUser;

pub const ADMIN: &str = "admin";
pub const CLERK: &str = "clerk";
pub const PASSWORD: &str = "senha-forte";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Seeded accounts
    pub accounts: MemoryAccountStore,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.database.provider = StoreProvider::Memory;
    config.auth.jwt_secret = "integration-test-secret".into();
    config.pagination.default_page_size = 10;
    config.pagination.max_page_size = 50;
    config
}

impl TestApp {
    /// Create a new test application with an administrator and a clerk
    /// holding read and create grants on `jornadas`.
    pub async fn new() -> Self {
        let accounts = MemoryAccountStore::new();
        let hasher = PasswordHasher::new();
        for (login, admin) in [(ADMIN, true), (CLERK, false)] {
            accounts
                .add_local(LocalUser {
                    login: login.into(),
                    display_name: login.to_uppercase(),
                    email: None,
                    password_hash: Some(hasher.hash_password(PASSWORD).unwrap()),
                    active: true,
                    admin,
                })
                .await;
        }
        accounts.grant(CLERK, "jornadas", "CI").await;

        let state = AppState::new(test_config(), Backend::Memory(accounts.clone()));
        let router = rhsenso_api::router::build_router(state);

        Self { router, accounts }
    }

    /// Log in and return the access token.
    pub async fn token(&self, login: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({ "login": login, "password": PASSWORD })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.body["data"]["accessToken"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }

    /// Send a request through the router.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        if body.is_some() {
            req = req.header("Content-Type", "application/json");
        }
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let body = body
            .map(|b| Body::from(serde_json::to_vec(&b).unwrap()))
            .unwrap_or_else(Body::empty);
        let req = req.body(body).unwrap();

        let response = self.router.clone().oneshot(req).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// A Jornada body.
pub fn jornada(empresa: i32, filial: i32, tipo: &str, ano: i32, mes: i32, horas: f64) -> Value {
    json!({
        "cdEmpresa": empresa,
        "cdFilial": filial,
        "tpJornada": tipo,
        "ano": ano,
        "mes": mes,
        "qtHoras": horas,
        "qtDiasUteis": null,
    })
}
