//! Router tests: requests go through the full axum stack against an
//! in-memory SQLite store.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use potluck_core::{
  PersonRepository,
  person::{Person, PersonPatch, PersonRow},
  store::{Inserted, PersonStore},
};
use potluck_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;
use uuid::Uuid;

use crate::api_router;

async fn app() -> Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  api_router(Arc::new(PersonRepository::new(store)))
}

async fn send(
  app:    &Router,
  method: &str,
  uri:    &str,
  body:   Option<Value>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(json) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(json.to_string())
    }
    None => Body::empty(),
  };
  let resp = app
    .clone()
    .oneshot(builder.body(body).unwrap())
    .await
    .unwrap();

  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let value = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, value)
}

async fn create(app: &Router, body: Value) -> Person {
  let (status, value) = send(app, "POST", "/people", Some(body)).await;
  assert_eq!(status, StatusCode::CREATED, "body: {value}");
  serde_json::from_value(value).unwrap()
}

// ── GET /people ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_empty_returns_empty_array() {
  let app = app().await;
  let (status, body) = send(&app, "GET", "/people", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!([]));
}

#[tokio::test]
async fn list_is_sorted_by_name() {
  let app = app().await;
  for name in ["Zeca", "ana", "Bruno"] {
    create(&app, json!({ "name": name })).await;
  }

  let (status, body) = send(&app, "GET", "/people", None).await;
  assert_eq!(status, StatusCode::OK);
  let names: Vec<&str> = body
    .as_array()
    .unwrap()
    .iter()
    .map(|p| p["name"].as_str().unwrap())
    .collect();
  assert_eq!(names, ["Bruno", "Zeca", "ana"]);
}

// ── POST /people ────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_returns_201_with_normalized_record() {
  let app = app().await;
  let (status, body) = send(
    &app,
    "POST",
    "/people",
    Some(json!({ "name": "  Bia ", "food": " Arroz ", "drink": "   " })),
  )
  .await;

  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["name"], "Bia");
  assert_eq!(body["food"], "Arroz");
  assert_eq!(body["drink"], Value::Null);
  assert_eq!(body["dessert"], Value::Null);
  assert!(body["id"].as_str().is_some());
  assert!(body["created_at"].as_str().is_some());
  assert!(body["updated_at"].as_str().is_some());
}

#[tokio::test]
async fn create_without_name_returns_400() {
  let app = app().await;
  for payload in [json!({}), json!({ "name": "   " }), json!({ "name": null })] {
    let (status, body) = send(&app, "POST", "/people", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Name is required" }));
  }

  let (_, body) = send(&app, "GET", "/people", None).await;
  assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_malformed_json_returns_400() {
  let app = app().await;
  let req = Request::builder()
    .method("POST")
    .uri("/people")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{not json"))
    .unwrap();
  let resp = app.oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_duplicate_returns_409() {
  let app = app().await;
  create(&app, json!({ "name": "Ana" })).await;

  let (status, body) = send(&app, "POST", "/people", Some(json!({ "name": "Ana " }))).await;
  assert_eq!(status, StatusCode::CONFLICT);
  assert_eq!(body, json!({ "error": "Name already exists" }));
}

// ── PATCH /people/{id} ──────────────────────────────────────────────────────

#[tokio::test]
async fn patch_updates_only_given_fields() {
  let app = app().await;
  let bia = create(&app, json!({ "name": "Bia", "food": "Arroz" })).await;

  let uri = format!("/people/{}", bia.id);
  let (status, body) = send(&app, "PATCH", &uri, Some(json!({ "drink": "Suco" }))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["food"], "Arroz");
  assert_eq!(body["drink"], "Suco");
  assert_eq!(body["dessert"], Value::Null);
}

#[tokio::test]
async fn patch_blank_or_null_clears_field() {
  let app = app().await;
  let ana = create(
    &app,
    json!({ "name": "Ana", "food": "Farofa", "dessert": "Pudim" }),
  )
  .await;

  let uri = format!("/people/{}", ana.id);
  let (status, body) = send(
    &app,
    "PATCH",
    &uri,
    Some(json!({ "food": "  ", "dessert": null })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["food"], Value::Null);
  assert_eq!(body["dessert"], Value::Null);

  let (_, list) = send(&app, "GET", "/people", None).await;
  assert_eq!(list[0]["food"], Value::Null);
}

#[tokio::test]
async fn patch_without_fields_returns_400() {
  let app = app().await;
  let ana = create(&app, json!({ "name": "Ana", "food": "Farofa" })).await;
  let uri = format!("/people/{}", ana.id);

  for payload in [json!({}), json!({ "name": "Renamed" })] {
    let (status, body) = send(&app, "PATCH", &uri, Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No valid fields to update" }));
  }

  let (_, list) = send(&app, "GET", "/people", None).await;
  assert_eq!(list[0]["name"], "Ana");
  assert_eq!(list[0]["food"], "Farofa");
}

#[tokio::test]
async fn patch_ignores_name_alongside_fields() {
  let app = app().await;
  let ana = create(&app, json!({ "name": "Ana" })).await;

  let uri = format!("/people/{}", ana.id);
  let (status, body) = send(
    &app,
    "PATCH",
    &uri,
    Some(json!({ "name": "Renamed", "drink": "Guaraná" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["name"], "Ana");
  assert_eq!(body["drink"], "Guaraná");
}

#[tokio::test]
async fn patch_unknown_id_returns_404() {
  let app = app().await;
  let uri = format!("/people/{}", Uuid::new_v4());
  let (status, body) = send(&app, "PATCH", &uri, Some(json!({ "food": "Bolo" }))).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body, json!({ "error": "Person not found" }));
}

#[tokio::test]
async fn patch_non_uuid_id_returns_404() {
  let app = app().await;
  let (status, body) =
    send(&app, "PATCH", "/people/not-a-uuid", Some(json!({ "food": "Bolo" }))).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body, json!({ "error": "Person not found" }));
}

// ── Store failures ──────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("store offline")]
struct Offline;

struct OfflineStore;

impl PersonStore for OfflineStore {
  type Error = Offline;

  async fn list_people(&self) -> Result<Vec<Person>, Offline> { Err(Offline) }

  async fn insert_person(&self, _row: PersonRow) -> Result<Inserted, Offline> {
    Err(Offline)
  }

  async fn update_person(
    &self,
    _id: Uuid,
    _patch: PersonPatch,
  ) -> Result<Vec<Person>, Offline> {
    Err(Offline)
  }
}

#[tokio::test]
async fn store_failures_return_500() {
  let app = api_router(Arc::new(PersonRepository::new(OfflineStore)));

  let (status, body) = send(&app, "GET", "/people", None).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(body, json!({ "error": "Failed to fetch people" }));

  let (status, body) = send(&app, "POST", "/people", Some(json!({ "name": "Ana" }))).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(body, json!({ "error": "Failed to create person" }));

  let uri = format!("/people/{}", Uuid::new_v4());
  let (status, body) = send(&app, "PATCH", &uri, Some(json!({ "food": "Bolo" }))).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(body, json!({ "error": "Failed to update person" }));
}
