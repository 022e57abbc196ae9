//! Application state definitions

use super::focus::{focus_targets, FocusTarget};
use super::forms::{
    FieldDefinitionForm, FieldPath, FieldType, FormError, FormEvent, FormOutcome, RowId, TextEdit,
};
use std::collections::{HashSet, VecDeque};

/// An input the user has typed into, keyed by row identity so that
/// removing a row does not move its touched flag onto a neighbour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Touched {
    Name,
    Code,
    RowName(RowId),
    RowValue(RowId),
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub form: FieldDefinitionForm,

    // Focus
    pub active_form_field: usize,

    // Error display
    touched: HashSet<Touched>,
    pub submit_attempted: bool,

    // Feedback
    pub status_message: Option<String>,
    pub submitted_count: usize,
    error_queue: VecDeque<String>,
}

impl AppState {
    pub fn new(form: FieldDefinitionForm) -> Self {
        Self {
            form,
            ..Default::default()
        }
    }

    /// Currently focused target
    pub fn active_target(&self) -> FocusTarget {
        let targets = focus_targets(&self.form);
        let index = self.active_form_field.min(targets.len() - 1);
        targets[index]
    }

    /// Move to next form field
    pub fn next_form_field(&mut self) {
        let count = focus_targets(&self.form).len();
        self.active_form_field = (self.active_form_field + 1) % count;
    }

    /// Move to previous form field
    pub fn prev_form_field(&mut self) {
        let count = focus_targets(&self.form).len();
        if self.active_form_field == 0 {
            self.active_form_field = count - 1;
        } else {
            self.active_form_field -= 1;
        }
    }

    /// Move focus onto `target` if it is currently on the form
    pub fn focus(&mut self, target: FocusTarget) {
        if let Some(index) = focus_targets(&self.form).iter().position(|t| *t == target) {
            self.active_form_field = index;
        }
    }

    fn clamp_focus(&mut self) {
        let count = focus_targets(&self.form).len();
        self.active_form_field = self.active_form_field.min(count - 1);
    }

    /// Apply a keystroke to the focused text input
    pub fn form_text_edit(&mut self, edit: TextEdit) -> Result<(), FormError> {
        let Some(path) = self.active_target().text_path() else {
            return Ok(());
        };
        let current = self.form.state().text(path).unwrap_or_default();
        let value = edit.apply(current);
        self.form.apply(FormEvent::Edit { path, value })?;
        self.touch(path);
        Ok(())
    }

    pub fn form_input_char(&mut self, c: char) -> Result<(), FormError> {
        self.form_text_edit(TextEdit::Insert(c))
    }

    pub fn form_backspace(&mut self) -> Result<(), FormError> {
        self.form_text_edit(TextEdit::Backspace)
    }

    pub fn select_field_type(&mut self, field_type: FieldType) {
        self.form.select_field_type(field_type);
        self.clamp_focus();
    }

    pub fn toggle_field_type(&mut self) {
        self.select_field_type(self.form.selected_type().toggle());
    }

    /// Append a row and focus its name input
    pub fn add_row(&mut self) {
        if let Ok(FormOutcome::RowAdded(id)) = self.form.apply(FormEvent::AddRow) {
            if let Some(index) = self.form.state().rows.position(id) {
                self.focus(FocusTarget::RowName(index));
            }
        }
    }

    pub fn remove_row(&mut self, index: usize) -> Result<(), FormError> {
        let removed = self.form.state().rows.get(index).map(|r| r.id());
        self.form.apply(FormEvent::RemoveRow(index))?;
        if let Some(id) = removed {
            self.touched
                .retain(|t| !matches!(t, Touched::RowName(r) | Touched::RowValue(r) if *r == id));
        }
        self.clamp_focus();
        Ok(())
    }

    fn touch(&mut self, path: FieldPath) {
        let rows = &self.form.state().rows;
        let touched = match path {
            FieldPath::Name => Some(Touched::Name),
            FieldPath::Code => Some(Touched::Code),
            FieldPath::RowName(i) => rows.get(i).map(|r| Touched::RowName(r.id())),
            FieldPath::RowValue(i) => rows.get(i).map(|r| Touched::RowValue(r.id())),
            FieldPath::FieldType | FieldPath::Rows => None,
        };
        if let Some(t) = touched {
            self.touched.insert(t);
        }
    }

    fn is_touched(&self, path: FieldPath) -> bool {
        let rows = &self.form.state().rows;
        match path {
            FieldPath::Name => self.touched.contains(&Touched::Name),
            FieldPath::Code => self.touched.contains(&Touched::Code),
            FieldPath::RowName(i) => rows
                .get(i)
                .is_some_and(|r| self.touched.contains(&Touched::RowName(r.id()))),
            FieldPath::RowValue(i) => rows
                .get(i)
                .is_some_and(|r| self.touched.contains(&Touched::RowValue(r.id()))),
            FieldPath::FieldType | FieldPath::Rows => false,
        }
    }

    /// Error message to display for `path`, once the user has typed into it
    /// or tried to save
    pub fn visible_error(&self, path: FieldPath) -> Option<String> {
        if self.submit_attempted || self.is_touched(path) {
            self.form.error_for(path)
        } else {
            None
        }
    }

    /// Reset the form to its defaults
    pub fn clear_form(&mut self) {
        self.form.reset();
        self.active_form_field = 0;
        self.touched.clear();
        self.submit_attempted = false;
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }
}
