use crate::config::Config;
use crate::scoring::{self, ScoreSummary};
use crate::state::{AppState, Draft, SaveOutcome};
use crate::store::{self, DirStore};
use chrono::Utc;
use std::time::Instant;

/// Number of free-text rows at the top of the entry form; rating rows follow.
pub const TEXT_FIELDS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tab {
    Entry,
    Dashboard,
    Matrix,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    EditingField,
    ConfirmDelete(usize),
    ConfirmQuit,
    Help,
}

pub struct App {
    pub state: AppState,
    pub draft: Draft,
    pub field_cursor: usize,
    pub edit_buffer: String,
    pub input_mode: InputMode,
    pub current_tab: Tab,
    pub table_state: ratatui::widgets::TableState,
    pub config: Config,
    pub store: DirStore,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub verbose: bool,
}

impl App {
    pub fn new(state: AppState, config: Config, store: DirStore, verbose: bool) -> Self {
        let mut table_state = ratatui::widgets::TableState::default();
        if !state.use_cases.is_empty() {
            table_state.select(Some(0));
        }

        let mut app = Self {
            state,
            draft: Draft::default(),
            field_cursor: 0,
            edit_buffer: String::new(),
            input_mode: InputMode::Normal,
            current_tab: Tab::Entry,
            table_state,
            config,
            store,
            flash_message: None,
            should_quit: false,
            verbose,
        };
        app.restore_autosaved_draft();
        app
    }

    /// Pick up a leftover autosave snapshot from a previous session.
    fn restore_autosaved_draft(&mut self) {
        match store::load_draft(&self.store) {
            Ok(Some(draft)) => {
                self.draft = draft;
                self.state.dirty = true;
                let _ = store::clear_draft(&self.store);
                self.show_flash("Restored autosaved draft".to_string());
            }
            Ok(None) => {}
            Err(e) => crate::buffered_eprintln!("Failed to read autosave: {}", e),
        }
    }

    /// Dimension names in form order (value group, then feasibility).
    pub fn dimension_names(&self) -> Vec<String> {
        self.config.dimensions.all_dimensions().cloned().collect()
    }

    /// Total form rows: text fields plus one per rating dimension.
    pub fn field_count(&self) -> usize {
        TEXT_FIELDS + self.config.dimensions.all_dimensions().count()
    }

    /// Live preview of the scores the current draft would save with.
    pub fn preview(&self) -> ScoreSummary {
        scoring::score(&self.draft.ratings, &self.config.dimensions)
    }

    pub fn field_label(&self, index: usize) -> String {
        match index {
            0 => "Title *".to_string(),
            1 => "Business Process *".to_string(),
            2 => "Pain Points *".to_string(),
            3 => "Opportunities *".to_string(),
            4 => "PII Considerations *".to_string(),
            5 => "Data Availability *".to_string(),
            6 => "AI Impact *".to_string(),
            7 => "Additional Information".to_string(),
            _ => {
                let dims = self.dimension_names();
                dims.get(index - TEXT_FIELDS)
                    .map(|name| self.config.dimensions.label_for(name).to_string())
                    .unwrap_or_default()
            }
        }
    }

    pub fn text_field(&self, index: usize) -> &str {
        match index {
            0 => &self.draft.title,
            1 => &self.draft.business_process,
            2 => &self.draft.pain_points,
            3 => &self.draft.opportunities,
            4 => &self.draft.pii_considerations,
            5 => &self.draft.data_availability,
            6 => &self.draft.ai_impact,
            _ => &self.draft.additional_information,
        }
    }

    fn text_field_mut(&mut self, index: usize) -> &mut String {
        match index {
            0 => &mut self.draft.title,
            1 => &mut self.draft.business_process,
            2 => &mut self.draft.pain_points,
            3 => &mut self.draft.opportunities,
            4 => &mut self.draft.pii_considerations,
            5 => &mut self.draft.data_availability,
            6 => &mut self.draft.ai_impact,
            _ => &mut self.draft.additional_information,
        }
    }

    /// Current rating for the dimension at a form row, defaulting to scale min.
    pub fn rating_at(&self, index: usize) -> i64 {
        let dims = self.dimension_names();
        dims.get(index - TEXT_FIELDS)
            .and_then(|name| self.draft.ratings.get(name).copied())
            .unwrap_or(self.config.dimensions.scale.min as i64)
    }

    pub fn next_field(&mut self) {
        if self.field_cursor + 1 < self.field_count() {
            self.field_cursor += 1;
        } else {
            self.field_cursor = 0;
        }
    }

    pub fn previous_field(&mut self) {
        if self.field_cursor == 0 {
            self.field_cursor = self.field_count() - 1;
        } else {
            self.field_cursor -= 1;
        }
    }

    /// Begin text entry on the selected row (no-op on rating rows).
    pub fn start_edit_field(&mut self) {
        if self.field_cursor < TEXT_FIELDS {
            self.edit_buffer = self.text_field(self.field_cursor).to_string();
            self.input_mode = InputMode::EditingField;
        }
    }

    pub fn commit_field(&mut self) {
        let value = self.edit_buffer.clone();
        *self.text_field_mut(self.field_cursor) = value;
        self.edit_buffer.clear();
        self.state.dirty = true;
        self.input_mode = InputMode::Normal;
    }

    pub fn cancel_field(&mut self) {
        self.edit_buffer.clear();
        self.input_mode = InputMode::Normal;
    }

    /// Nudge the rating on the selected row, clamped to the scale.
    pub fn adjust_rating(&mut self, delta: i64) {
        if self.field_cursor < TEXT_FIELDS {
            return;
        }
        let dims = self.dimension_names();
        let Some(name) = dims.get(self.field_cursor - TEXT_FIELDS) else {
            return;
        };
        let scale = self.config.dimensions.scale;
        let current = self
            .draft
            .ratings
            .get(name)
            .copied()
            .unwrap_or(scale.min as i64);
        let next = (current + delta)
            .max(scale.min as i64)
            .min(scale.max as i64);
        self.draft.ratings.insert(name.clone(), next);
        self.state.dirty = true;
    }

    /// Save the form: create or update, persist, reset the form.
    pub fn save_use_case(&mut self) {
        match self.state.save(&self.draft, &self.config.dimensions, Utc::now()) {
            Ok(outcome) => {
                // The in-memory collection is authoritative even when the
                // write fails; the user is warned and nothing retries.
                let persist_err = store::save_collection(&self.store, &self.state.use_cases).err();
                let _ = store::clear_draft(&self.store);
                self.draft = Draft::default();
                self.field_cursor = 0;
                self.sync_table_selection();
                self.show_flash(match (persist_err, outcome) {
                    (Some(e), _) => format!("Failed to save data: {}", e),
                    (None, SaveOutcome::Created) => "Use case saved".to_string(),
                    (None, SaveOutcome::Updated) => "Use case updated".to_string(),
                });
            }
            Err(_missing) => {
                // Presence check only; a single warning, no per-field detail.
                self.show_flash("Please fill in all required fields".to_string());
            }
        }
    }

    /// Reset the form without saving.
    pub fn clear_form(&mut self) {
        self.draft = Draft::default();
        self.field_cursor = 0;
        self.state.cancel_edit();
        let _ = store::clear_draft(&self.store);
        self.show_flash("Form cleared".to_string());
    }

    /// Load the dashboard selection into the form for editing.
    pub fn edit_selected(&mut self) {
        let Some(index) = self.table_state.selected() else {
            return;
        };
        if let Some(draft) = self.state.begin_edit(index) {
            self.draft = draft;
            self.field_cursor = 0;
            self.current_tab = Tab::Entry;
            self.show_flash("Use case loaded for editing".to_string());
        }
    }

    pub fn request_delete(&mut self) {
        if let Some(index) = self.table_state.selected() {
            if index < self.state.use_cases.len() {
                self.input_mode = InputMode::ConfirmDelete(index);
            }
        }
    }

    pub fn confirm_delete(&mut self, index: usize) {
        if let Some(removed) = self.state.delete(index) {
            if let Err(e) = store::save_collection(&self.store, &self.state.use_cases) {
                self.show_flash(format!("Failed to save data: {}", e));
            } else {
                self.show_flash(format!("Deleted: {}", removed.title));
            }
            self.sync_table_selection();
        }
        self.input_mode = InputMode::Normal;
    }

    /// Quit, asking first when the form has unsaved edits.
    pub fn request_quit(&mut self) {
        if self.state.dirty {
            self.input_mode = InputMode::ConfirmQuit;
        } else {
            self.should_quit = true;
        }
    }

    pub fn confirm_quit(&mut self) {
        // Best effort: keep the half-entered form for next launch.
        self.autosave_tick();
        self.should_quit = true;
    }

    /// Periodic snapshot of a dirty form. Idempotent; a later explicit save
    /// clears the snapshot.
    pub fn autosave_tick(&mut self) {
        if !self.state.dirty || self.draft.title.trim().is_empty() {
            return;
        }
        if let Err(e) = store::save_draft(&self.store, &self.draft) {
            crate::buffered_eprintln!("Autosave failed: {}", e);
        } else if self.verbose {
            crate::buffered_eprintln!("Autosaved draft '{}'", self.draft.title.trim());
        }
    }

    pub fn next_tab(&mut self) {
        self.current_tab = match self.current_tab {
            Tab::Entry => Tab::Dashboard,
            Tab::Dashboard => Tab::Matrix,
            Tab::Matrix => Tab::Entry,
        };
    }

    pub fn next_row(&mut self) {
        let len = self.state.use_cases.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let len = self.state.use_cases.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    /// Keep the dashboard selection valid after the collection changes.
    fn sync_table_selection(&mut self) {
        let len = self.state.use_cases.len();
        if len == 0 {
            self.table_state.select(None);
        } else {
            match self.table_state.selected() {
                Some(i) if i >= len => self.table_state.select(Some(len - 1)),
                None => self.table_state.select(Some(0)),
                _ => {}
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }
}
