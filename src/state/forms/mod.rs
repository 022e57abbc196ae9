//! Form domain layer
//!
//! Toolkit-independent field definition form: row list, validation and the
//! controller that ties them together. The terminal view only reads from it
//! and sends it [`FormEvent`]s.

mod field;
mod form_state;
mod row;
mod validation;

pub use field::{FieldError, FieldPath, FieldType, TextEdit};
pub use form_state::{
    FieldDefinition, FieldDefinitionForm, FormError, FormEvent, FormOutcome, FormState,
};
pub use row::{FieldEntry, Row, RowId, RowList};
pub use validation::{validate, FieldChoice, FieldIssue, ValidationReport};
