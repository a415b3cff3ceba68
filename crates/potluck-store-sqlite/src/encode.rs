//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings written by SQLite itself. UUIDs
//! are stored as hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use potluck_core::person::Person;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Raw row ──────────────────────────────────────────────────────────────────

/// Column list shared by every statement that reads a person back.
pub const PERSON_COLUMNS: &str =
  "id, name, food, drink, dessert, created_at, updated_at";

/// A `people` row as it comes off the wire, before decoding.
pub struct RawPerson {
  pub id:         String,
  pub name:       String,
  pub food:       Option<String>,
  pub drink:      Option<String>,
  pub dessert:    Option<String>,
  pub created_at: String,
  pub updated_at: String,
}

impl RawPerson {
  /// Read a row selected with [`PERSON_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      name:       row.get(1)?,
      food:       row.get(2)?,
      drink:      row.get(3)?,
      dessert:    row.get(4)?,
      created_at: row.get(5)?,
      updated_at: row.get(6)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      id:         decode_uuid(&self.id)?,
      name:       self.name,
      food:       self.food,
      drink:      self.drink,
      dessert:    self.dessert,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decodes_sqlite_timestamps() {
    let dt = decode_dt("2025-12-31T23:59:58.123Z").unwrap();
    assert_eq!(dt.timestamp_subsec_millis(), 123);
  }

  #[test]
  fn rejects_garbage_timestamp() {
    assert!(matches!(decode_dt("yesterday"), Err(Error::DateParse(_))));
  }

  #[test]
  fn uuid_roundtrips_through_text() {
    let id = Uuid::new_v4();
    assert_eq!(decode_uuid(&encode_uuid(id)).unwrap(), id);
  }
}
