//! Handler tests for the Tags domain
//!
//! These tests verify the HTTP surface: status codes, the pagination
//! envelope, and the per-field error shape for validation failures.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_tags::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::{TestDatabase, TestDataBuilder};
use tower::ServiceExt; // For oneshot()

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn test_app() -> (TestDatabase, axum::Router) {
    let db = TestDatabase::new().await;
    let service = TagService::new(PgTagRepository::new(db.connection()));
    let app = handlers::router(service);
    (db, app)
}

#[tokio::test]
async fn test_create_tag_returns_201_with_derived_slug() {
    let (_db, app) = test_app().await;
    let builder = TestDataBuilder::from_test_name("tag_handler_create");

    let name = builder.name("tag", "main");
    let response = app
        .oneshot(post_json("/", json!({ "name": name })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let tag = json_body(response.into_body()).await;
    assert_eq!(tag["name"], name);
    assert_eq!(tag["slug"], slug::slugify(&name));
    assert_eq!(tag["is_active"], true);
}

#[tokio::test]
async fn test_create_tag_empty_body_reports_name_required() {
    let (_db, app) = test_app().await;

    let response = app.oneshot(post_json("/", json!({}))).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["details"]["name"][0]["code"], "required");
}

#[tokio::test]
async fn test_create_duplicate_name_reports_unique() {
    let (_db, app) = test_app().await;
    let builder = TestDataBuilder::from_test_name("tag_handler_dup");

    let name = builder.name("tag", "dup");
    let response = app
        .clone()
        .oneshot(post_json("/", json!({ "name": name })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(post_json(
            "/",
            json!({ "name": name, "slug": "another-slug" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["details"]["name"][0]["code"], "unique");
}

#[tokio::test]
async fn test_list_tags_envelope_shape() {
    let (_db, app) = test_app().await;
    let builder = TestDataBuilder::from_test_name("tag_handler_list");

    for i in 0..3 {
        let response = app
            .clone()
            .oneshot(post_json(
                "/",
                json!({ "name": builder.name("tag", &format!("t{}", i)) }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/?per_page=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["current_page"], 1);
    assert_eq!(body["meta"]["per_page"], 2);
    assert_eq!(body["meta"]["total"], 3);
    assert_eq!(body["meta"]["last_page"], 2);
    assert_eq!(body["links"]["first"], "/api/tags?page=1");
    assert_eq!(body["links"]["next"], "/api/tags?page=2");

    // Default order is id descending
    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert!(ids[0] > ids[1]);
}

#[tokio::test]
async fn test_list_tags_page_zero_is_the_first_page() {
    let (_db, app) = test_app().await;
    let builder = TestDataBuilder::from_test_name("tag_handler_page_zero");

    let response = app
        .clone()
        .oneshot(post_json(
            "/",
            json!({ "name": builder.name("tag", "zero") }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/?page=0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["meta"]["current_page"], 1);
    assert_eq!(body["meta"]["from"], 1);
    assert!(body["links"]["prev"].is_null());
}

#[tokio::test]
async fn test_get_tag_missing_and_malformed_id() {
    let (_db, app) = test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/999999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(Request::builder().uri("/abc").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_patch_updates_and_delete_returns_204() {
    let (_db, app) = test_app().await;
    let builder = TestDataBuilder::from_test_name("tag_handler_lifecycle");

    let response = app
        .clone()
        .oneshot(post_json(
            "/",
            json!({ "name": builder.name("tag", "cycle") }),
        ))
        .await
        .unwrap();
    let created = json_body(response.into_body()).await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(format!("/{}", id))
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&json!({ "is_active": false })).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response.into_body()).await;
    assert_eq!(updated["is_active"], false);
    assert_eq!(updated["slug"], created["slug"]);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
