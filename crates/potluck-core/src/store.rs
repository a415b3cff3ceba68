//! The `PersonStore` trait: the capability boundary to the record store.
//!
//! The trait is implemented by storage backends (e.g. `potluck-store-sqlite`).
//! [`crate::PersonRepository`] depends on this abstraction only, so a backend
//! never has to leak its own error codes: uniqueness conflicts come back as
//! [`Inserted::Conflict`], and a missing row is an empty update result.

use std::future::Future;

use uuid::Uuid;

use crate::person::{Person, PersonPatch, PersonRow};

/// Outcome of a single insert statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inserted {
  /// The row was written; this is the record as persisted.
  Created(Person),
  /// The store rejected the row because its `name` is already taken.
  Conflict,
}

/// Abstraction over the table holding [`Person`] rows.
///
/// Every method is a single statement against the store. Atomicity of that
/// statement is the only concurrency guarantee the repository relies on.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PersonStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All rows, ordered by `name` ascending under the store's collation.
  fn list_people(
    &self,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Insert `row`, assigning `id`, `created_at`, and `updated_at`.
  fn insert_person(
    &self,
    row: PersonRow,
  ) -> impl Future<Output = Result<Inserted, Self::Error>> + Send + '_;

  /// Apply the touched fields of `patch` to the row with `id` and return
  /// every row the statement changed: one on success, none if `id` does not
  /// exist. The store refreshes `updated_at` itself.
  fn update_person(
    &self,
    id: Uuid,
    patch: PersonPatch,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;
}
