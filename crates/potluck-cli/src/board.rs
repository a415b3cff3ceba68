//! The in-memory board: the list as last fetched, plus local merges after
//! successful writes.
//!
//! Merging is a presentation convenience. The server stays the source of
//! truth; a reload replaces everything here.

use std::time::{Duration, Instant};

use potluck_core::person::Person;

/// How long a notification stays on screen.
pub const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Default)]
pub struct Board {
  people: Vec<Person>,
}

impl Board {
  /// Replace the whole list with a fresh fetch (already sorted by the server).
  pub fn load(&mut self, people: Vec<Person>) { self.people = people; }

  pub fn people(&self) -> &[Person] { &self.people }

  /// Add a freshly-created person and re-sort by name.
  ///
  /// Sorting compares names byte-wise, the same order the store returns.
  pub fn merge_created(&mut self, person: Person) {
    self.people.push(person);
    self.people.sort_by(|a, b| a.name.cmp(&b.name));
  }

  /// Replace the entry with the same id in place. Returns `false` if the
  /// person is not on the board.
  pub fn replace_updated(&mut self, person: Person) -> bool {
    match self.people.iter_mut().find(|p| p.id == person.id) {
      Some(slot) => {
        *slot = person;
        true
      }
      None => false,
    }
  }

  /// People whose name contains `term`, ignoring case. An empty term matches
  /// everyone.
  pub fn filtered(&self, term: &str) -> Vec<&Person> {
    let term = term.to_lowercase();
    self
      .people
      .iter()
      .filter(|p| p.name.to_lowercase().contains(&term))
      .collect()
  }
}

/// Index into a six-colour palette, picked from the first character of a
/// name so each card keeps its colour across reloads.
pub fn palette_index(name: &str) -> usize {
  name.chars().next().map_or(0, |c| c as usize % 6)
}

// ─── Notifications ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
  Success,
  Error,
}

/// A transient message that dismisses itself after [`TOAST_TTL`].
#[derive(Debug, Clone)]
pub struct Toast {
  pub message:  String,
  pub kind:     ToastKind,
  pub shown_at: Instant,
}

impl Toast {
  pub fn success(message: impl Into<String>) -> Self {
    Self { message: message.into(), kind: ToastKind::Success, shown_at: Instant::now() }
  }

  pub fn error(message: impl Into<String>) -> Self {
    Self { message: message.into(), kind: ToastKind::Error, shown_at: Instant::now() }
  }

  pub fn is_expired(&self, now: Instant) -> bool {
    now.saturating_duration_since(self.shown_at) >= TOAST_TTL
  }
}
