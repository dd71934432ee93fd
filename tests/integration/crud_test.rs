//! Generic resource behaviour across the registered tables.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{ADMIN, CLERK, TestApp, jornada};

#[tokio::test]
async fn location_header_points_at_the_created_record() {
    let app = TestApp::new().await;
    let token = app.token(ADMIN).await;
    let batida = json!({
        "noMatric": "00012345",
        "cdEmpresa": 1,
        "cdFilial": 2,
        "data": "2024-03-15",
        "hora": "08:01:30",
        "tpBatida": "E",
        "cdRelogio": "REL-01",
        "flImportada": false,
        "dtRegistro": null,
    });

    let created = app
        .request("POST", "/api/batidas", Some(batida.clone()), Some(&token))
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    let location = created.headers["location"].to_str().unwrap().to_string();
    assert!(location.contains("hora=08%3A01%3A30"), "{location}");

    let found = app.request("GET", &location, None, Some(&token)).await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["data"], batida);
}

#[tokio::test]
async fn location_header_keeps_fractional_seconds() {
    let app = TestApp::new().await;
    let token = app.token(ADMIN).await;
    let batida = json!({
        "noMatric": "00012345",
        "cdEmpresa": 1,
        "cdFilial": 2,
        "data": "2024-03-15",
        "hora": "08:01:30.250",
        "tpBatida": "E",
        "cdRelogio": "REL-01",
        "flImportada": false,
        "dtRegistro": null,
    });

    let created = app
        .request("POST", "/api/batidas", Some(batida.clone()), Some(&token))
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    let location = created.headers["location"].to_str().unwrap().to_string();
    assert!(location.contains("hora=08%3A01%3A30.250"), "{location}");

    let found = app.request("GET", &location, None, Some(&token)).await;
    assert_eq!(found.status, StatusCode::OK, "{}", found.body);
    assert_eq!(found.body["data"], batida);

    let delete_path = location.replacen("/by-key", "", 1);
    let deleted = app.request("DELETE", &delete_path, None, Some(&token)).await;
    assert_eq!(deleted.status, StatusCode::OK, "{}", deleted.body);

    let gone = app.request("GET", &location, None, Some(&token)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn validation_errors_list_each_field() {
    let app = TestApp::new().await;
    let token = app.token(ADMIN).await;

    let horario = json!({
        "cdCargHor": "H001",
        "dcCargHor": "Comercial",
        "hEntrada": "08:00:00",
        "hSaida": "17:00:00",
        "hIntIni": "12:00:00",
        "hIntFim": null,
    });
    let r = app.request("POST", "/api/horarios", Some(horario), Some(&token)).await;
    assert_eq!(r.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        r.body["errors"],
        json!(["record: hIntIni and hIntFim must be given together"])
    );

    let r = app
        .request("GET", "/api/jornadas/by-key?cdEmpresa=1&ano=2024", None, Some(&token))
        .await;
    assert_eq!(r.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        r.body["errors"],
        json!(["missing key fields: cdFilial, tpJornada, mes"])
    );
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let app = TestApp::new().await;
    let token = app.token(ADMIN).await;

    let r = app
        .request("POST", "/api/jornadas", Some(json!({ "cdEmpresa": "um" })), Some(&token))
        .await;
    assert_eq!(r.status, StatusCode::BAD_REQUEST);
    assert_eq!(r.body["success"], false);
    assert_eq!(r.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn unique_constraint_conflict_names_the_index() {
    let app = TestApp::new().await;
    let token = app.token(ADMIN).await;
    let motivo = |cd: &str| {
        json!({ "tpOcorr": "FA", "cdMotOc": cd, "dcMotOc": "Atestado medico", "flAtivo": true })
    };

    let first = app.request("POST", "/api/motivos-frequencia", Some(motivo("0001")), Some(&token)).await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app.request("POST", "/api/motivos-frequencia", Some(motivo("0002")), Some(&token)).await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert!(
        second.body["message"]
            .as_str()
            .unwrap()
            .contains("ux_mfre1_tpocorr_dcmotoc")
    );
}

#[tokio::test]
async fn grants_limit_what_a_clerk_can_do() {
    let app = TestApp::new().await;
    let token = app.token(CLERK).await;
    let key = "cdEmpresa=1&cdFilial=1&tpJornada=A&ano=2024&mes=3";

    let created = app
        .request("POST", "/api/jornadas", Some(jornada(1, 1, "A", 2024, 3, 220.0)), Some(&token))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let listed = app.request("GET", "/api/jornadas", None, Some(&token)).await;
    assert_eq!(listed.status, StatusCode::OK);

    let updated = app
        .request(
            "PUT",
            &format!("/api/jornadas?{key}"),
            Some(jornada(1, 1, "A", 2024, 3, 100.0)),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::FORBIDDEN);
    assert_eq!(updated.body["code"], "FORBIDDEN");

    let deleted = app
        .request("DELETE", &format!("/api/jornadas?{key}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::FORBIDDEN);

    let other = app.request("GET", "/api/horarios", None, Some(&token)).await;
    assert_eq!(other.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn resource_routes_require_a_token() {
    let app = TestApp::new().await;
    let r = app.request("GET", "/api/jornadas", None, None).await;
    assert_eq!(r.status, StatusCode::UNAUTHORIZED);

    let r = app.request("GET", "/api/jornadas", None, Some("not-a-jwt")).await;
    assert_eq!(r.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn catalog_describes_registered_resources() {
    let app = TestApp::new().await;
    let r = app.request("GET", "/api/resources", None, None).await;
    assert_eq!(r.status, StatusCode::OK);

    let resources = r.body["data"].as_array().unwrap();
    let names: Vec<_> = resources.iter().map(|r| r["resource"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec!["jornadas", "horarios", "motivos-frequencia", "ocorrencias-frequencia", "batidas"]
    );
    assert_eq!(
        resources[0]["keyFields"],
        json!(["cdEmpresa", "cdFilial", "tpJornada", "ano", "mes"])
    );
    assert_eq!(resources[2]["unique"][0]["name"], "ux_mfre1_tpocorr_dcmotoc");
}

#[tokio::test]
async fn health_endpoints_respond() {
    let app = TestApp::new().await;
    let live = app.request("GET", "/api/health", None, None).await;
    assert_eq!(live.status, StatusCode::OK);
    assert_eq!(live.body["data"]["status"], "ok");

    let ready = app.request("GET", "/api/health/ready", None, None).await;
    assert_eq!(ready.status, StatusCode::OK);
}
