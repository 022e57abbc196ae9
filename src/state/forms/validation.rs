//! Pure validation of a field definition
//!
//! The report is recomputed from scratch for every state; nothing is cached
//! between calls, so a row issue disappears as soon as the form leaves
//! multiple-choice mode.

use super::field::{FieldError, FieldPath, FieldType};
use super::form_state::FormState;
use super::row::RowList;

const NAME_REQUIRED: &str = "name is a required field";
const CODE_REQUIRED: &str = "code is a required field";
const ROW_NAME_REQUIRED: &str = "Name is required";
const ROW_VALUE_REQUIRED: &str = "Value is required";

/// The branch of the schema that applies to a state
#[derive(Debug, Clone, Copy)]
pub enum FieldChoice<'a> {
    Text,
    Multiple(&'a RowList),
}

impl<'a> FieldChoice<'a> {
    pub fn of(field_type: FieldType, rows: &'a RowList) -> Self {
        match field_type {
            FieldType::Text => Self::Text,
            FieldType::Multiple => Self::Multiple(rows),
        }
    }
}

/// One failed rule, attached to the path it concerns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub path: FieldPath,
    pub error: FieldError,
}

/// Outcome of validating a form state, issues kept in declared field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<FieldIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    pub fn error(&self, path: FieldPath) -> Option<&FieldError> {
        self.issues
            .iter()
            .find(|issue| issue.path == path)
            .map(|issue| &issue.error)
    }

    /// Human readable message for `path`
    pub fn message(&self, path: FieldPath) -> Option<String> {
        self.error(path).map(ToString::to_string)
    }

    /// Record an issue unless the path already carries one
    fn push(&mut self, path: FieldPath, error: FieldError) {
        if self.error(path).is_none() {
            self.issues.push(FieldIssue { path, error });
        }
    }
}

/// Validate a snapshot of the form
pub fn validate(state: &FormState) -> ValidationReport {
    let mut report = ValidationReport::default();

    if state.name.is_empty() {
        report.push(FieldPath::Name, FieldError::missing(NAME_REQUIRED));
    }
    if state.code.is_empty() {
        report.push(FieldPath::Code, FieldError::missing(CODE_REQUIRED));
    }

    match state.choice() {
        FieldChoice::Text => {}
        FieldChoice::Multiple(rows) if rows.is_empty() => {
            report.push(FieldPath::Rows, FieldError::EmptyRowList);
        }
        FieldChoice::Multiple(rows) => {
            for (index, row) in rows.iter().enumerate() {
                if row.name.is_empty() {
                    report.push(
                        FieldPath::RowName(index),
                        FieldError::missing(ROW_NAME_REQUIRED),
                    );
                }
                if row.value.is_empty() {
                    report.push(
                        FieldPath::RowValue(index),
                        FieldError::missing(ROW_VALUE_REQUIRED),
                    );
                }
            }
        }
    }

    report
}
