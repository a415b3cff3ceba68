//! Error types for `potluck-core`.

use thiserror::Error;
use uuid::Uuid;

/// The four ways a repository operation can fail.
#[derive(Debug, Error)]
pub enum Error {
  /// A required field was missing or empty after normalization.
  #[error("invalid input: {0}")]
  InvalidInput(String),

  #[error("a person named {0:?} already exists")]
  DuplicateName(String),

  #[error("person not found: {0}")]
  NotFound(Uuid),

  /// Any failure reported by the underlying store.
  #[error("store unavailable: {0}")]
  StoreUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::StoreUnavailable(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
