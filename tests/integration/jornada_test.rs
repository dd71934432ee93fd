//! The Jornada create/read/update/delete walkthrough.

use axum::http::StatusCode;

use crate::helpers::{ADMIN, TestApp, jornada};

const KEY: &str = "cdEmpresa=1&cdFilial=1&tpJornada=A&ano=2024&mes=3";

#[tokio::test]
async fn jornada_lifecycle() {
    let app = TestApp::new().await;
    let token = app.token(ADMIN).await;
    let t = Some(token.as_str());

    let created = app
        .request("POST", "/api/jornadas", Some(jornada(1, 1, "A", 2024, 3, 220.0)), t)
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    assert_eq!(created.body["success"], true);
    assert_eq!(
        created.headers["location"],
        format!("/api/jornadas/by-key?{KEY}").as_str()
    );

    let found = app
        .request("GET", &format!("/api/jornadas/by-key?{KEY}"), None, t)
        .await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["data"], jornada(1, 1, "A", 2024, 3, 220.0));

    let updated = app
        .request(
            "PUT",
            &format!("/api/jornadas?{KEY}"),
            Some(jornada(1, 1, "A", 2024, 3, 200.0)),
            t,
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK, "{}", updated.body);
    assert_eq!(updated.body["data"]["qtHoras"], 200.0);

    let found = app
        .request("GET", &format!("/api/jornadas/find?{KEY}"), None, t)
        .await;
    assert_eq!(found.body["data"]["qtHoras"], 200.0);

    let recreated = app
        .request("POST", "/api/jornadas", Some(jornada(1, 1, "A", 2024, 3, 220.0)), t)
        .await;
    assert_eq!(recreated.status, StatusCode::CONFLICT);
    assert_eq!(recreated.body["code"], "CONFLICT");

    let found = app
        .request("GET", &format!("/api/jornadas/find?{KEY}"), None, t)
        .await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["data"]["qtHoras"], 200.0);

    let deleted = app
        .request("DELETE", &format!("/api/jornadas?{KEY}"), None, t)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["success"], true);
    assert!(deleted.body.get("data").is_none());

    let missing = app
        .request("GET", &format!("/api/jornadas/by-key?{KEY}"), None, t)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["success"], false);
    assert_eq!(missing.body["code"], "NOT_FOUND");

    let again = app
        .request("DELETE", &format!("/api/jornadas?{KEY}"), None, t)
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_create_is_conflict_and_count_is_unchanged() {
    let app = TestApp::new().await;
    let token = app.token(ADMIN).await;
    let t = Some(token.as_str());
    let body = jornada(1, 1, "A", 2024, 3, 220.0);

    let first = app.request("POST", "/api/jornadas", Some(body.clone()), t).await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app.request("POST", "/api/jornadas", Some(body), t).await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["message"], "Record already exists");

    let list = app.request("GET", "/api/jornadas", None, t).await;
    assert_eq!(list.body["data"]["totalCount"], 1);
}

#[tokio::test]
async fn key_change_on_update_is_rejected() {
    let app = TestApp::new().await;
    let token = app.token(ADMIN).await;
    let t = Some(token.as_str());
    app.request("POST", "/api/jornadas", Some(jornada(1, 1, "A", 2024, 3, 220.0)), t)
        .await;

    let moved = app
        .request(
            "PUT",
            &format!("/api/jornadas?{KEY}"),
            Some(jornada(1, 1, "A", 2024, 4, 220.0)),
            t,
        )
        .await;
    assert_eq!(moved.status, StatusCode::BAD_REQUEST);

    let absent = app
        .request("PUT", "/api/jornadas", Some(jornada(9, 9, "Z", 2024, 1, 1.0)), t)
        .await;
    assert_eq!(absent.status, StatusCode::NOT_FOUND);
}
