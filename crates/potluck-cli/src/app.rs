//! Application state machine and event dispatcher.

use std::{sync::Arc, time::Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use potluck_core::person::Person;

use crate::{
  board::{Board, Toast},
  client::{self, ApiClient},
  form::{Form, FormKind},
};

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// People as last fetched, plus local merges.
  pub board: Board,

  /// Current name filter (only editable when `filter_active`).
  pub filter: String,

  /// Whether the user is typing a filter query.
  pub filter_active: bool,

  /// Cursor position within the *filtered* list.
  pub list_cursor: usize,

  /// Open add/edit form, drawn over the board.
  pub form: Option<Form>,

  /// Transient notification shown in the status bar.
  pub toast: Option<Toast>,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,
}

impl App {
  /// Create an [`App`] with an empty board.
  pub fn new(client: ApiClient) -> Self {
    Self {
      board: Board::default(),
      filter: String::new(),
      filter_active: false,
      list_cursor: 0,
      form: None,
      toast: None,
      client: Arc::new(client),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch everyone from the API and replace the board.
  pub async fn load_people(&mut self) -> anyhow::Result<()> {
    let people = self.client.list_people().await?;
    self.board.load(people);
    self.list_cursor = 0;
    Ok(())
  }

  // ── Filtered list ─────────────────────────────────────────────────────────

  pub fn filtered_people(&self) -> Vec<&Person> { self.board.filtered(&self.filter) }

  /// The person under the list cursor in the filtered view, if any.
  pub fn cursor_person(&self) -> Option<&Person> {
    self.filtered_people().get(self.list_cursor).copied()
  }

  /// Drop the notification once it has been on screen long enough.
  pub fn tick(&mut self, now: Instant) {
    if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
      self.toast = None;
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    if self.form.is_some() {
      self.handle_form_key(key).await;
      return Ok(true);
    }

    // Filter input mode: all printable keys go into the filter string.
    if self.filter_active {
      self.handle_filter_key(key);
      return Ok(true);
    }

    Ok(self.handle_list_key(key))
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
      }
      KeyCode::Enter => self.filter_active = false,
      KeyCode::Backspace => {
        self.filter.pop();
      }
      KeyCode::Char(c) => self.filter.push(c),
      _ => return,
    }
    self.list_cursor = 0;
  }

  fn handle_list_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,

      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered_people().len();
        if self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.list_cursor = 0;
      }
      KeyCode::Esc => {
        self.filter.clear();
        self.list_cursor = 0;
      }

      KeyCode::Char('a') => self.form = Some(Form::add()),
      KeyCode::Enter | KeyCode::Char('e') => {
        self.form = self.cursor_person().map(Form::edit);
      }

      _ => {}
    }
    true
  }

  async fn handle_form_key(&mut self, key: KeyEvent) {
    let Some(form) = self.form.as_mut() else { return };
    match key.code {
      KeyCode::Esc => self.form = None,
      KeyCode::Tab | KeyCode::Down => form.focus_next(),
      KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
      KeyCode::Backspace if !form.is_locked(form.focus) => form.pop(),
      KeyCode::Char(c) if !form.is_locked(form.focus) => form.push(c),
      KeyCode::Enter => {
        if let Some(form) = self.form.take() {
          self.submit(form).await;
        }
      }
      _ => {}
    }
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn submit(&mut self, form: Form) {
    match form.kind.clone() {
      FormKind::Add => self.submit_add(form).await,
      FormKind::Edit(id) => {
        let patch = form.to_patch();
        match self.client.update_person(id, &patch).await {
          Ok(person) => {
            self.board.replace_updated(person);
            self.toast = Some(Toast::success("Updated!"));
          }
          Err(e) => {
            tracing::warn!(error = %e, "update failed");
            self.toast = Some(Toast::error("Could not update. Please try again."));
          }
        }
      }
    }
  }

  async fn submit_add(&mut self, form: Form) {
    let Some(input) = form.to_new_person() else {
      // Nothing to send yet; keep the form open.
      self.form = Some(form);
      return;
    };

    match self.client.create_person(&input).await {
      Ok(person) => {
        let id = person.id;
        self.board.merge_created(person);
        self.list_cursor = self
          .filtered_people()
          .iter()
          .position(|p| p.id == id)
          .unwrap_or(self.list_cursor);
        self.toast = Some(Toast::success("Added!"));
      }
      Err(e) => {
        tracing::warn!(error = %e, "create failed");
        self.toast = Some(if client::is_conflict(&e) {
          Toast::error("That name is already on the list!")
        } else {
          Toast::error("Could not add person. Please try again.")
        });
        self.form = Some(form);
      }
    }
  }
}
