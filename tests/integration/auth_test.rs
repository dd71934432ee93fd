//! Login and identity endpoints.

use axum::http::StatusCode;
use serde_json::json;

use rhsenso_entity::user::LocalUser;

use crate::helpers::{CLERK, PASSWORD, TestApp};

#[tokio::test]
async fn login_returns_bearer_token_and_identity() {
    let app = TestApp::new().await;
    let r = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "login": CLERK, "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(r.status, StatusCode::OK);
    assert_eq!(r.body["data"]["tokenType"], "Bearer");
    assert_eq!(r.body["data"]["user"]["subject"], CLERK);
    assert_eq!(r.body["data"]["user"]["permissions"]["jornadas"], "CI");
}

#[tokio::test]
async fn failed_logins_look_the_same() {
    let app = TestApp::new().await;
    app.accounts
        .add_local(LocalUser {
            login: "inativo".into(),
            display_name: "Inativo".into(),
            email: None,
            password_hash: None,
            active: false,
            admin: false,
        })
        .await;

    let mut messages = Vec::new();
    for (login, password) in [(CLERK, "errada"), ("ninguem", PASSWORD), ("inativo", PASSWORD)] {
        let r = app
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({ "login": login, "password": password })),
                None,
            )
            .await;
        assert_eq!(r.status, StatusCode::UNAUTHORIZED);
        messages.push(r.body["message"].clone());
    }
    assert!(messages.iter().all(|m| *m == messages[0]));
}

#[tokio::test]
async fn me_reflects_the_token() {
    let app = TestApp::new().await;
    let token = app.token(CLERK).await;

    let r = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(r.status, StatusCode::OK);
    assert_eq!(r.body["data"]["subject"], CLERK);
    assert_eq!(r.body["data"]["strategy"], "onprem");
    assert_eq!(r.body["data"]["admin"], false);

    let r = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(r.status, StatusCode::UNAUTHORIZED);
}
