//! Handlers for `/people` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/people` | All people, sorted by name |
//! | `POST`  | `/people` | Body: [`NewPerson`]; returns 201 + stored person |
//! | `PATCH` | `/people/{id}` | Body: [`PersonPatch`]; returns the updated person |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use potluck_core::{
  PersonRepository,
  person::{NewPerson, Person, PersonPatch},
  store::PersonStore,
};
use uuid::Uuid;

use crate::error::ApiError;

fn bad_body(rejection: JsonRejection) -> ApiError {
  ApiError::BadRequest(rejection.body_text())
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /people`
pub async fn list<S>(
  State(repo): State<Arc<PersonRepository<S>>>,
) -> Result<Json<Vec<Person>>, ApiError>
where
  S: PersonStore + 'static,
{
  let people = repo
    .list()
    .await
    .map_err(|e| ApiError::from_core(e, "Failed to fetch people"))?;
  Ok(Json(people))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /people` with body `{"name": "...", "food"?, "drink"?, "dessert"?}`
pub async fn create<S>(
  State(repo): State<Arc<PersonRepository<S>>>,
  body: Result<Json<NewPerson>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PersonStore + 'static,
{
  let Json(input) = body.map_err(bad_body)?;
  let person = repo
    .create(input)
    .await
    .map_err(|e| ApiError::from_core(e, "Failed to create person"))?;
  Ok((StatusCode::CREATED, Json(person)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /people/{id}` with any subset of `{"food", "drink", "dessert"}`.
///
/// An id that is not a UUID cannot name a person, so it is reported as 404.
pub async fn update<S>(
  State(repo): State<Arc<PersonRepository<S>>>,
  id: Result<Path<Uuid>, PathRejection>,
  body: Result<Json<PersonPatch>, JsonRejection>,
) -> Result<Json<Person>, ApiError>
where
  S: PersonStore + 'static,
{
  let Path(id) = id.map_err(|_| ApiError::NotFound("Person not found".into()))?;
  let Json(patch) = body.map_err(bad_body)?;
  let person = repo
    .update(id, patch)
    .await
    .map_err(|e| ApiError::from_core(e, "Failed to update person"))?;
  Ok(Json(person))
}
