//! Person: the single record type on the board.
//!
//! A person signs up under a unique name and optionally says which food,
//! drink, and dessert they will bring. The name never changes after creation;
//! the three contributions may be set, changed, or cleared at any time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

// ─── Normalization ───────────────────────────────────────────────────────────

/// Trim `value` and map an empty result to `None`.
///
/// Every free-text field goes through this before it reaches the store, so an
/// empty string is never persisted.
pub fn normalize(value: Option<&str>) -> Option<String> {
  value
    .map(str::trim)
    .filter(|v| !v.is_empty())
    .map(str::to_owned)
}

// ─── Person ──────────────────────────────────────────────────────────────────

/// A persisted sign-up, exactly as the store returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  /// Store-generated; never changes.
  pub id:         Uuid,
  pub name:       String,
  pub food:       Option<String>,
  pub drink:      Option<String>,
  pub dessert:    Option<String>,
  /// Store-assigned at insert.
  pub created_at: DateTime<Utc>,
  /// Store-assigned; refreshed on every update.
  pub updated_at: DateTime<Utc>,
}

// ─── Create input ────────────────────────────────────────────────────────────

/// Raw input to [`crate::PersonRepository::create`].
///
/// Nothing here is trusted: the repository trims every field and rejects a
/// blank name before anything reaches the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPerson {
  #[serde(default)]
  pub name:    Option<String>,
  #[serde(default)]
  pub food:    Option<String>,
  #[serde(default)]
  pub drink:   Option<String>,
  #[serde(default)]
  pub dessert: Option<String>,
}

impl NewPerson {
  pub fn named(name: impl Into<String>) -> Self {
    Self { name: Some(name.into()), ..Self::default() }
  }

  pub fn with_food(mut self, food: impl Into<String>) -> Self {
    self.food = Some(food.into());
    self
  }

  pub fn with_drink(mut self, drink: impl Into<String>) -> Self {
    self.drink = Some(drink.into());
    self
  }

  pub fn with_dessert(mut self, dessert: impl Into<String>) -> Self {
    self.dessert = Some(dessert.into());
    self
  }

  /// Normalize into an insertable row. Returns `None` if the name is missing
  /// or blank.
  pub fn normalized(&self) -> Option<PersonRow> {
    Some(PersonRow {
      name:    normalize(self.name.as_deref())?,
      food:    normalize(self.food.as_deref()),
      drink:   normalize(self.drink.as_deref()),
      dessert: normalize(self.dessert.as_deref()),
    })
  }
}

/// A validated, normalized row ready for insertion. `id` and timestamps are
/// left to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRow {
  pub name:    String,
  pub food:    Option<String>,
  pub drink:   Option<String>,
  pub dessert: Option<String>,
}

// ─── Partial update ──────────────────────────────────────────────────────────

/// What an update does to a single optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate {
  /// Leave the stored value alone.
  #[default]
  Unset,
  /// Store null.
  Clear,
  /// Store this value. Always trimmed and non-empty once normalized.
  Set(String),
}

impl FieldUpdate {
  /// Build from a caller-supplied value: `None` and blank strings clear the
  /// field, anything else sets it (trimmed).
  pub fn from_input(value: Option<&str>) -> Self {
    match normalize(value) {
      Some(v) => Self::Set(v),
      None => Self::Clear,
    }
  }

  pub fn is_unset(&self) -> bool { matches!(self, Self::Unset) }

  /// Re-apply normalization to a `Set` value.
  pub fn normalized(self) -> Self {
    match self {
      Self::Set(v) => Self::from_input(Some(&v)),
      other => other,
    }
  }

  /// The value to write, or `None` if the field is not being touched.
  /// `Some(None)` means "write null".
  pub fn as_write(&self) -> Option<Option<&str>> {
    match self {
      Self::Unset => None,
      Self::Clear => Some(None),
      Self::Set(v) => Some(Some(v.as_str())),
    }
  }
}

// An absent key never reaches these impls: `#[serde(default)]` on the owning
// field yields `Unset`, and `skip_serializing_if` drops it on the way out.

impl<'de> Deserialize<'de> for FieldUpdate {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(Self::from_input(value.as_deref()))
  }
}

impl Serialize for FieldUpdate {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    match self {
      Self::Unset | Self::Clear => serializer.serialize_none(),
      Self::Set(v) => serializer.serialize_some(v),
    }
  }
}

/// A partial update to a person's contributions.
///
/// There is no `name` field: names are immutable, and a `name` key in an
/// incoming JSON payload is silently ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonPatch {
  #[serde(default, skip_serializing_if = "FieldUpdate::is_unset")]
  pub food:    FieldUpdate,
  #[serde(default, skip_serializing_if = "FieldUpdate::is_unset")]
  pub drink:   FieldUpdate,
  #[serde(default, skip_serializing_if = "FieldUpdate::is_unset")]
  pub dessert: FieldUpdate,
}

impl PersonPatch {
  /// `true` if no field would be touched.
  pub fn is_empty(&self) -> bool {
    self.food.is_unset() && self.drink.is_unset() && self.dessert.is_unset()
  }

  pub fn normalized(self) -> Self {
    Self {
      food:    self.food.normalized(),
      drink:   self.drink.normalized(),
      dessert: self.dessert.normalized(),
    }
  }

  /// The touched fields as `(column, value)` pairs, in a fixed order.
  pub fn writes(&self) -> Vec<(&'static str, Option<&str>)> {
    [
      ("food", &self.food),
      ("drink", &self.drink),
      ("dessert", &self.dessert),
    ]
    .into_iter()
    .filter_map(|(column, update)| update.as_write().map(|v| (column, v)))
    .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalize_trims_and_drops_blank() {
    assert_eq!(normalize(Some("  Farofa ")), Some("Farofa".to_owned()));
    assert_eq!(normalize(Some(" \t\n")), None);
    assert_eq!(normalize(Some("")), None);
    assert_eq!(normalize(None), None);
  }

  #[test]
  fn new_person_rejects_blank_name() {
    assert!(NewPerson::named("   ").normalized().is_none());
    assert!(NewPerson::default().normalized().is_none());
  }

  #[test]
  fn new_person_normalizes_optional_fields() {
    let row = NewPerson::named("  Bia ")
      .with_food(" Arroz ")
      .with_drink("  ")
      .normalized()
      .unwrap();
    assert_eq!(row.name, "Bia");
    assert_eq!(row.food.as_deref(), Some("Arroz"));
    assert_eq!(row.drink, None);
    assert_eq!(row.dessert, None);
  }

  #[test]
  fn patch_decodes_absent_null_blank_and_value() {
    let patch: PersonPatch =
      serde_json::from_str(r#"{"food": null, "drink": "  Suco  "}"#).unwrap();
    assert_eq!(patch.food, FieldUpdate::Clear);
    assert_eq!(patch.drink, FieldUpdate::Set("Suco".into()));
    assert_eq!(patch.dessert, FieldUpdate::Unset);

    let patch: PersonPatch = serde_json::from_str(r#"{"dessert": "   "}"#).unwrap();
    assert_eq!(patch.dessert, FieldUpdate::Clear);
  }

  #[test]
  fn patch_ignores_name_key() {
    let patch: PersonPatch = serde_json::from_str(r#"{"name": "Other"}"#).unwrap();
    assert!(patch.is_empty());
  }

  #[test]
  fn patch_serializes_only_touched_fields() {
    let patch = PersonPatch {
      food: FieldUpdate::Clear,
      drink: FieldUpdate::Set("Suco".into()),
      ..PersonPatch::default()
    };
    let json = serde_json::to_value(&patch).unwrap();
    assert_eq!(json, serde_json::json!({ "food": null, "drink": "Suco" }));
  }

  #[test]
  fn normalized_patch_clears_blank_set() {
    let patch = PersonPatch {
      food: FieldUpdate::Set("   ".into()),
      dessert: FieldUpdate::Set(" Pudim ".into()),
      ..PersonPatch::default()
    }
    .normalized();
    assert_eq!(patch.food, FieldUpdate::Clear);
    assert_eq!(patch.dessert, FieldUpdate::Set("Pudim".into()));
    assert_eq!(patch.writes(), vec![("food", None), ("dessert", Some("Pudim"))]);
  }
}
