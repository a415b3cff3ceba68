//! JSON REST API for the potluck board.
//!
//! Exposes an axum [`Router`] backed by a [`PersonRepository`] over any
//! [`potluck_core::store::PersonStore`]. TLS and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", potluck_api::api_router(repo.clone()))
//! ```

pub mod error;
pub mod people;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, patch},
};
use potluck_core::{PersonRepository, store::PersonStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `repo`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(repo: Arc<PersonRepository<S>>) -> Router<()>
where
  S: PersonStore + 'static,
{
  Router::new()
    .route("/people", get(people::list::<S>).post(people::create::<S>))
    .route("/people/{id}", patch(people::update::<S>))
    .with_state(repo)
}

#[cfg(test)]
mod tests;
