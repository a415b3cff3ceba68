//! [`SqliteStore`]: the SQLite implementation of [`PersonStore`].

use std::path::Path;

use potluck_core::{
  person::{Person, PersonPatch, PersonRow},
  store::{Inserted, PersonStore},
};
use tracing::debug;
use uuid::Uuid;

use crate::{
  Result,
  encode::{PERSON_COLUMNS, RawPerson, encode_uuid},
  schema::{NOW, SCHEMA},
};

/// Insert outcome before the row is decoded off the database thread.
enum RawInserted {
  Created(RawPerson),
  Conflict,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A potluck board backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl std::fmt::Debug for SqliteStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SqliteStore").finish_non_exhaustive()
  }
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  type Error = crate::Error;

  async fn list_people(&self) -> Result<Vec<Person>> {
    let raws: Vec<RawPerson> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PERSON_COLUMNS} FROM people ORDER BY name ASC"
        ))?;
        let rows = stmt
          .query_map([], RawPerson::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }

  async fn insert_person(&self, row: PersonRow) -> Result<Inserted> {
    let id_str = encode_uuid(Uuid::new_v4());
    let PersonRow { name, food, drink, dessert } = row;
    let name_for_log = name.clone();

    let raw = self
      .conn
      .call(move |conn| {
        let inserted = conn.query_row(
          &format!(
            "INSERT INTO people (id, name, food, drink, dessert)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING {PERSON_COLUMNS}"
          ),
          rusqlite::params![id_str, name, food, drink, dessert],
          RawPerson::from_row,
        );

        match inserted {
          Ok(raw) => Ok(RawInserted::Created(raw)),
          Err(rusqlite::Error::SqliteFailure(err, _))
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
          {
            Ok(RawInserted::Conflict)
          }
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    match raw {
      RawInserted::Created(raw) => Ok(Inserted::Created(raw.into_person()?)),
      RawInserted::Conflict => {
        debug!(name = %name_for_log, "insert rejected by unique constraint");
        Ok(Inserted::Conflict)
      }
    }
  }

  async fn update_person(&self, id: Uuid, patch: PersonPatch) -> Result<Vec<Person>> {
    let writes = patch.writes();

    // Build `SET col = ?n, ...` from the touched fields only; the id is the
    // last positional parameter.
    let mut assignments: Vec<String> = writes
      .iter()
      .enumerate()
      .map(|(i, (column, _))| format!("{column} = ?{}", i + 1))
      .collect();
    assignments.push(format!("updated_at = {NOW}"));

    let sql = format!(
      "UPDATE people SET {}
       WHERE id = ?{}
       RETURNING {PERSON_COLUMNS}",
      assignments.join(", "),
      writes.len() + 1,
    );

    let mut values: Vec<Option<String>> = writes
      .into_iter()
      .map(|(_, value)| value.map(str::to_owned))
      .collect();
    values.push(Some(encode_uuid(id)));

    let raws: Vec<RawPerson> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(values), RawPerson::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }
}
