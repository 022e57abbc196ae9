//! Form state and the field definition form controller

use super::field::{FieldError, FieldPath, FieldType};
use super::row::{FieldEntry, RowId, RowList};
use super::validation::{validate, FieldChoice, ValidationReport};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Contract errors raised by form operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("row index {index} is out of range for {len} row(s)")]
    RowOutOfRange { index: usize, len: usize },

    #[error("{0} cannot be edited directly")]
    NotEditable(FieldPath),

    #[error(transparent)]
    InvalidSelection(FieldError),
}

/// Complete in-memory representation of the user's input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub code: String,
    pub field_type: FieldType,
    pub rows: RowList,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            code: String::new(),
            field_type: FieldType::Text,
            rows: RowList::seeded(),
        }
    }
}

impl FormState {
    /// Schema branch selected by the current field type
    pub fn choice(&self) -> FieldChoice<'_> {
        FieldChoice::of(self.field_type, &self.rows)
    }

    /// Content equality that ignores row identities
    pub fn same_content(&self, other: &FormState) -> bool {
        self.name == other.name
            && self.code == other.code
            && self.field_type == other.field_type
            && self.rows.same_content(&other.rows)
    }

    /// Copy of this state with `path` set to `value`
    fn with_value(&self, path: FieldPath, value: String) -> Result<FormState, FormError> {
        let mut next = self.clone();
        match path {
            FieldPath::Name => next.name = value,
            FieldPath::Code => next.code = value,
            FieldPath::FieldType => {
                next.field_type = value.parse().map_err(FormError::InvalidSelection)?
            }
            FieldPath::Rows => return Err(FormError::NotEditable(path)),
            FieldPath::RowName(index) | FieldPath::RowValue(index) => {
                let len = next.rows.len();
                let row = next
                    .rows
                    .get_mut(index)
                    .ok_or(FormError::RowOutOfRange { index, len })?;
                if matches!(path, FieldPath::RowName(_)) {
                    row.name = value;
                } else {
                    row.value = value;
                }
            }
        }
        Ok(next)
    }

    /// Value currently stored at `path`, if it names a text input
    pub fn text(&self, path: FieldPath) -> Option<&str> {
        match path {
            FieldPath::Name => Some(&self.name),
            FieldPath::Code => Some(&self.code),
            FieldPath::RowName(i) => self.rows.get(i).map(|r| r.name.as_str()),
            FieldPath::RowValue(i) => self.rows.get(i).map(|r| r.value.as_str()),
            FieldPath::FieldType | FieldPath::Rows => None,
        }
    }
}

/// Record handed to the submission consumer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub name: String,
    pub code: String,
    pub field_type: FieldType,
    /// Choices, only present for multiple-choice definitions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field: Vec<FieldEntry>,
}

impl FieldDefinition {
    fn from_state(state: &FormState) -> Self {
        let field = match state.choice() {
            FieldChoice::Text => Vec::new(),
            FieldChoice::Multiple(rows) => rows.entries(),
        };
        Self {
            name: state.name.clone(),
            code: state.code.clone(),
            field_type: state.field_type,
            field,
        }
    }
}

/// Intents emitted by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Edit { path: FieldPath, value: String },
    SelectFieldType(FieldType),
    AddRow,
    RemoveRow(usize),
    Submit,
}

/// Result of a successfully applied event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Updated,
    RowAdded(RowId),
    Submitted(FieldDefinition),
    /// Submit was requested while the form is invalid or untouched
    SubmitBlocked,
}

/// Controller owning a field definition's state and validity
#[derive(Debug, Clone)]
pub struct FieldDefinitionForm {
    initial: FormState,
    state: FormState,
    /// Observed copy of the field type driving conditional rendering
    selected_type: FieldType,
    report: ValidationReport,
}

impl FieldDefinitionForm {
    pub fn new() -> Self {
        Self::from_defaults(FormState::default())
    }

    /// Form whose defaults start with `field_type` selected
    pub fn with_field_type(field_type: FieldType) -> Self {
        Self::from_defaults(FormState {
            field_type,
            ..FormState::default()
        })
    }

    fn from_defaults(initial: FormState) -> Self {
        let report = validate(&initial);
        Self {
            selected_type: initial.field_type,
            state: initial.clone(),
            initial,
            report,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn selected_type(&self) -> FieldType {
        self.selected_type
    }

    /// Rows to render; hidden while the text type is selected
    pub fn visible_rows(&self) -> Option<&RowList> {
        match self.selected_type {
            FieldType::Text => None,
            FieldType::Multiple => Some(&self.state.rows),
        }
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn error_for(&self, path: FieldPath) -> Option<String> {
        self.report.message(path)
    }

    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }

    /// Whether the content differs from the initial defaults
    pub fn is_dirty(&self) -> bool {
        !self.state.same_content(&self.initial)
    }

    pub fn can_submit(&self) -> bool {
        self.is_valid() && self.is_dirty()
    }

    /// Apply a presentation intent
    pub fn apply(&mut self, event: FormEvent) -> Result<FormOutcome, FormError> {
        tracing::debug!(?event, "form event");
        match event {
            FormEvent::Edit { path, value } => {
                self.edit(path, value)?;
                Ok(FormOutcome::Updated)
            }
            FormEvent::SelectFieldType(field_type) => {
                self.select_field_type(field_type);
                Ok(FormOutcome::Updated)
            }
            FormEvent::AddRow => Ok(FormOutcome::RowAdded(self.add_row())),
            FormEvent::RemoveRow(index) => {
                self.remove_row(index)?;
                Ok(FormOutcome::Updated)
            }
            FormEvent::Submit => Ok(match self.submit() {
                Some(record) => FormOutcome::Submitted(record),
                None => FormOutcome::SubmitBlocked,
            }),
        }
    }

    /// Set the value at `path`; on error the state is left untouched
    pub fn edit(&mut self, path: FieldPath, value: impl Into<String>) -> Result<(), FormError> {
        let next = self.state.with_value(path, value.into())?;
        self.replace(next);
        Ok(())
    }

    pub fn select_field_type(&mut self, field_type: FieldType) {
        let next = FormState {
            field_type,
            ..self.state.clone()
        };
        self.replace(next);
    }

    pub fn add_row(&mut self) -> RowId {
        let mut next = self.state.clone();
        let id = next.rows.add_row();
        self.replace(next);
        id
    }

    pub fn remove_row(&mut self, index: usize) -> Result<(), FormError> {
        let mut next = self.state.clone();
        next.rows.remove_row(index)?;
        self.replace(next);
        Ok(())
    }

    /// The record to hand off, when the form is valid and dirty
    pub fn submit(&self) -> Option<FieldDefinition> {
        if !self.can_submit() {
            tracing::debug!(
                issues = self.report.issues().len(),
                dirty = self.is_dirty(),
                "submit blocked"
            );
            return None;
        }
        Some(FieldDefinition::from_state(&self.state))
    }

    /// Discard edits and return to the initial defaults
    pub fn reset(&mut self) {
        let defaults = FormState {
            rows: self.initial.rows.reissued(),
            ..self.initial.clone()
        };
        *self = Self::from_defaults(defaults);
    }

    fn replace(&mut self, next: FormState) {
        self.report = validate(&next);
        self.selected_type = next.field_type;
        self.state = next;
    }
}

impl Default for FieldDefinitionForm {
    fn default() -> Self {
        Self::new()
    }
}
