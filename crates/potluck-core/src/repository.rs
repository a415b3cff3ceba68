//! [`PersonRepository`]: domain-level access to the people on the board.
//!
//! Each operation is one round trip to the store. The repository never checks
//! before it writes: it attempts the write and interprets what the store
//! reports, so there is no window between a check and the insert/update.

use tracing::debug;
use uuid::Uuid;

use crate::{
  Error, Result,
  person::{NewPerson, Person, PersonPatch},
  store::{Inserted, PersonStore},
};

/// Translates list/create/update into store calls and store outcomes into
/// [`Error`] kinds.
///
/// The store is injected at construction; cloning the repository clones the
/// store handle.
#[derive(Debug, Clone)]
pub struct PersonRepository<S> {
  store: S,
}

impl<S: PersonStore> PersonRepository<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub fn store(&self) -> &S { &self.store }

  /// Every person, sorted by name under the store's collation.
  pub async fn list(&self) -> Result<Vec<Person>> {
    self.store.list_people().await.map_err(Error::store)
  }

  /// Sign a new person up.
  ///
  /// Fails with [`Error::InvalidInput`] if the name is blank and with
  /// [`Error::DuplicateName`] if the store reports the name as taken.
  pub async fn create(&self, input: NewPerson) -> Result<Person> {
    let row = input
      .normalized()
      .ok_or_else(|| Error::InvalidInput("Name is required".into()))?;
    let name = row.name.clone();

    match self.store.insert_person(row).await.map_err(Error::store)? {
      Inserted::Created(person) => {
        debug!(id = %person.id, name = %person.name, "person created");
        Ok(person)
      }
      Inserted::Conflict => Err(Error::DuplicateName(name)),
    }
  }

  /// Change any subset of a person's food, drink, and dessert.
  ///
  /// Fails with [`Error::InvalidInput`] if `patch` touches nothing (the store
  /// is not called) and with [`Error::NotFound`] if the store updated no row.
  pub async fn update(&self, id: Uuid, patch: PersonPatch) -> Result<Person> {
    if patch.is_empty() {
      return Err(Error::InvalidInput("No valid fields to update".into()));
    }

    let rows = self
      .store
      .update_person(id, patch.normalized())
      .await
      .map_err(Error::store)?;

    let person = rows.into_iter().next().ok_or(Error::NotFound(id))?;
    debug!(id = %person.id, "person updated");
    Ok(person)
  }
}
