//! Paging, ordering and filtering through the list endpoint.

use std::collections::HashSet;

use axum::http::StatusCode;
use serde_json::Value;

use crate::helpers::{ADMIN, TestApp, jornada};

async fn seeded() -> (TestApp, String) {
    let app = TestApp::new().await;
    let token = app.token(ADMIN).await;
    for empresa in [3, 1, 2] {
        for mes in [2, 1, 3, 4] {
            let r = app
                .request(
                    "POST",
                    "/api/jornadas",
                    Some(jornada(empresa, 1, "A", 2024, mes, 100.0 + f64::from(mes))),
                    Some(&token),
                )
                .await;
            assert_eq!(r.status, StatusCode::CREATED);
        }
    }
    (app, token)
}

fn key_of(item: &Value) -> (i64, i64) {
    (
        item["cdEmpresa"].as_i64().unwrap(),
        item["mes"].as_i64().unwrap(),
    )
}

#[tokio::test]
async fn pages_cover_every_record_once() {
    let (app, token) = seeded().await;

    let mut seen = HashSet::new();
    let mut total_items = 0;
    for page in 1..=3 {
        let r = app
            .request("GET", &format!("/api/jornadas?page={page}&pageSize=5"), None, Some(&token))
            .await;
        assert_eq!(r.status, StatusCode::OK);
        let data = &r.body["data"];
        assert_eq!(data["totalCount"], 12);
        assert_eq!(data["totalPages"], 3);
        assert_eq!(data["hasPrevious"], page > 1);
        assert_eq!(data["hasNext"], page < 3);
        for item in data["items"].as_array().unwrap() {
            assert!(seen.insert(key_of(item)), "duplicate key across pages");
            total_items += 1;
        }
    }
    assert_eq!(total_items, 12);
}

#[tokio::test]
async fn default_order_follows_key_fields() {
    let (app, token) = seeded().await;
    let r = app.request("GET", "/api/jornadas?pageSize=4", None, Some(&token)).await;
    let keys: Vec<_> = r.body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(key_of)
        .collect();
    assert_eq!(keys, vec![(1, 1), (1, 2), (1, 3), (1, 4)]);
}

#[tokio::test]
async fn sort_and_filter_apply_before_paging() {
    let (app, token) = seeded().await;
    let r = app
        .request(
            "GET",
            "/api/jornadas?cdEmpresa=2&sortBy=qtHoras&sortDir=desc",
            None,
            Some(&token),
        )
        .await;
    let months: Vec<_> = r.body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["mes"].as_i64().unwrap())
        .collect();
    assert_eq!(months, vec![4, 3, 2, 1]);
    assert_eq!(r.body["data"]["totalCount"], 4);
}

#[tokio::test]
async fn bad_paging_input_is_clamped() {
    let (app, token) = seeded().await;
    let r = app
        .request("GET", "/api/jornadas?page=-3&pageSize=500", None, Some(&token))
        .await;
    assert_eq!(r.status, StatusCode::OK);
    assert_eq!(r.body["data"]["page"], 1);
    assert_eq!(r.body["data"]["pageSize"], 50);

    let past_end = app
        .request("GET", "/api/jornadas?page=99", None, Some(&token))
        .await;
    assert_eq!(past_end.body["data"]["items"], serde_json::json!([]));
    assert_eq!(past_end.body["data"]["totalCount"], 12);
}

#[tokio::test]
async fn unknown_sort_or_filter_field_is_bad_request() {
    let (app, token) = seeded().await;
    for query in ["sortBy=salario", "salario=10", "sortDir=sideways"] {
        let r = app
            .request("GET", &format!("/api/jornadas?{query}"), None, Some(&token))
            .await;
        assert_eq!(r.status, StatusCode::BAD_REQUEST, "{query}");
        assert_eq!(r.body["code"], "VALIDATION_ERROR");
    }
}
