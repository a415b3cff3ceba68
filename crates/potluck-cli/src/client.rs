//! Async HTTP client wrapping the potluck JSON API.

use std::time::Duration;

use anyhow::{Context, Result};
use potluck_core::person::{NewPerson, Person, PersonPatch};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

/// Connection settings for the potluck API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// A non-2xx response from the API, with the server's `error` message.
#[derive(Debug, Error)]
#[error("{status}: {message}")]
pub struct ApiFailure {
  pub status:  StatusCode,
  pub message: String,
}

impl ApiFailure {
  pub fn is_conflict(&self) -> bool { self.status == StatusCode::CONFLICT }
}

#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

/// Async HTTP client for the potluck JSON REST API.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  /// Turn a non-success response into an [`ApiFailure`].
  async fn check(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let message = resp
      .json::<ErrorBody>()
      .await
      .map(|b| b.error)
      .unwrap_or_else(|_| status.to_string());
    tracing::debug!(%status, %message, "request failed");
    Err(ApiFailure { status, message }.into())
  }

  /// `GET /api/people`
  pub async fn list_people(&self) -> Result<Vec<Person>> {
    let resp = self
      .client
      .get(self.url("/people"))
      .send()
      .await
      .context("GET /people failed")?;
    let resp = Self::check(resp).await.context("GET /people")?;
    resp.json().await.context("deserialising people")
  }

  /// `POST /api/people`
  pub async fn create_person(&self, input: &NewPerson) -> Result<Person> {
    let resp = self
      .client
      .post(self.url("/people"))
      .json(input)
      .send()
      .await
      .context("POST /people failed")?;
    let resp = Self::check(resp).await.context("POST /people")?;
    resp.json().await.context("deserialising created person")
  }

  /// `PATCH /api/people/{id}`
  pub async fn update_person(&self, id: Uuid, patch: &PersonPatch) -> Result<Person> {
    let path = format!("/people/{id}");
    let resp = self
      .client
      .patch(self.url(&path))
      .json(patch)
      .send()
      .await
      .with_context(|| format!("PATCH {path} failed"))?;
    let resp = Self::check(resp).await.with_context(|| format!("PATCH {path}"))?;
    resp.json().await.context("deserialising updated person")
  }
}

/// `true` if `err` carries a 409 from the API.
pub fn is_conflict(err: &anyhow::Error) -> bool {
  err
    .downcast_ref::<ApiFailure>()
    .is_some_and(ApiFailure::is_conflict)
}
