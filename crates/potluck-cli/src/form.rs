//! Add and edit forms.

use potluck_core::person::{FieldUpdate, NewPerson, Person, PersonPatch};
use uuid::Uuid;

pub const LABELS: [&str; 4] = ["Name", "Food", "Drink", "Dessert"];

const NAME: usize = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormKind {
  Add,
  /// Editing an existing person; the name field is shown but locked.
  Edit(Uuid),
}

#[derive(Debug, Clone)]
pub struct Form {
  pub kind:   FormKind,
  /// Name, food, drink and dessert, in [`LABELS`] order.
  pub fields: [String; 4],
  pub focus:  usize,
}

impl Form {
  pub fn add() -> Self {
    Self { kind: FormKind::Add, fields: Default::default(), focus: NAME }
  }

  /// Prefill with `person`'s current values.
  pub fn edit(person: &Person) -> Self {
    let value = |v: &Option<String>| v.clone().unwrap_or_default();
    Self {
      kind:   FormKind::Edit(person.id),
      fields: [
        person.name.clone(),
        value(&person.food),
        value(&person.drink),
        value(&person.dessert),
      ],
      focus:  NAME + 1,
    }
  }

  pub fn title(&self) -> &'static str {
    match self.kind {
      FormKind::Add => " Add a person or family ",
      FormKind::Edit(_) => " Edit ",
    }
  }

  pub fn is_locked(&self, index: usize) -> bool {
    index == NAME && matches!(self.kind, FormKind::Edit(_))
  }

  fn first_editable(&self) -> usize {
    if self.is_locked(NAME) { NAME + 1 } else { NAME }
  }

  pub fn focus_next(&mut self) {
    self.focus += 1;
    if self.focus >= self.fields.len() {
      self.focus = self.first_editable();
    }
  }

  pub fn focus_prev(&mut self) {
    if self.focus == self.first_editable() {
      self.focus = self.fields.len() - 1;
    } else {
      self.focus -= 1;
    }
  }

  pub fn push(&mut self, c: char) { self.fields[self.focus].push(c); }

  pub fn pop(&mut self) { self.fields[self.focus].pop(); }

  /// Input for `POST /people`, or `None` while the name is blank.
  pub fn to_new_person(&self) -> Option<NewPerson> {
    if self.fields[NAME].trim().is_empty() {
      return None;
    }
    let optional = |i: usize| {
      let v = self.fields[i].trim();
      (!v.is_empty()).then(|| v.to_owned())
    };
    Some(NewPerson {
      name:    Some(self.fields[NAME].trim().to_owned()),
      food:    optional(1),
      drink:   optional(2),
      dessert: optional(3),
    })
  }

  /// Input for `PATCH /people/{id}`: all three fields, blanks clear.
  pub fn to_patch(&self) -> PersonPatch {
    PersonPatch {
      food:    FieldUpdate::from_input(Some(&self.fields[1])),
      drink:   FieldUpdate::from_input(Some(&self.fields[2])),
      dessert: FieldUpdate::from_input(Some(&self.fields[3])),
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;

  fn bia() -> Person {
    let now = Utc::now();
    Person {
      id:         Uuid::new_v4(),
      name:       "Bia".into(),
      food:       Some("Arroz".into()),
      drink:      None,
      dessert:    None,
      created_at: now,
      updated_at: now,
    }
  }

  #[test]
  fn add_form_requires_a_name() {
    let mut form = Form::add();
    assert!(form.to_new_person().is_none());

    " Ana ".chars().for_each(|c| form.push(c));
    form.focus_next();
    "  ".chars().for_each(|c| form.push(c));
    let input = form.to_new_person().unwrap();
    assert_eq!(input.name.as_deref(), Some("Ana"));
    assert_eq!(input.food, None);
  }

  #[test]
  fn edit_form_skips_locked_name() {
    let mut form = Form::edit(&bia());
    assert_eq!(form.focus, 1);
    form.focus_prev();
    assert_eq!(form.focus, 3);
    form.focus_next();
    assert_eq!(form.focus, 1);
    assert!(form.is_locked(0));
  }

  #[test]
  fn add_form_cycles_through_all_fields() {
    let mut form = Form::add();
    for expected in [1, 2, 3, 0] {
      form.focus_next();
      assert_eq!(form.focus, expected);
    }
    form.focus_prev();
    assert_eq!(form.focus, 3);
  }

  #[test]
  fn edit_patch_sends_every_field() {
    let mut form = Form::edit(&bia());
    form.focus_next();
    "Suco".chars().for_each(|c| form.push(c));
    form.focus = 1;
    (0..5).for_each(|_| form.pop());

    let patch = form.to_patch();
    assert_eq!(patch.food, FieldUpdate::Clear);
    assert_eq!(patch.drink, FieldUpdate::Set("Suco".into()));
    assert_eq!(patch.dessert, FieldUpdate::Clear);
  }
}
