//! Form field value objects: field type, field paths, field errors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Kind of value a field definition holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// A single free-text value
    #[default]
    Text,
    /// A list of name/value choices
    Multiple,
}

impl FieldType {
    /// All selectable types, in display order
    pub const ALL: [FieldType; 2] = [FieldType::Text, FieldType::Multiple];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Multiple => "multiple",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Multiple => "Multiple Choice",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::Text => Self::Multiple,
            Self::Multiple => Self::Text,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "multiple" => Ok(Self::Multiple),
            other => Err(FieldError::InvalidSelection {
                value: other.to_string(),
            }),
        }
    }
}

/// Address of a value inside the form, rendered like `rows[2].value`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldPath {
    Name,
    Code,
    FieldType,
    Rows,
    RowName(usize),
    RowValue(usize),
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => f.write_str("name"),
            Self::Code => f.write_str("code"),
            Self::FieldType => f.write_str("fieldType"),
            Self::Rows => f.write_str("rows"),
            Self::RowName(i) => write!(f, "rows[{i}].name"),
            Self::RowValue(i) => write!(f, "rows[{i}].value"),
        }
    }
}

/// A field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{message}")]
    MissingRequired { message: &'static str },

    #[error("\"{value}\" is not a valid field type")]
    InvalidSelection { value: String },

    #[error("At least one value is required")]
    EmptyRowList,
}

impl FieldError {
    pub fn missing(message: &'static str) -> Self {
        Self::MissingRequired { message }
    }
}

/// A single keystroke-level change to a text input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Backspace,
}

impl TextEdit {
    /// Produce the edited copy of `current`
    pub fn apply(&self, current: &str) -> String {
        let mut next = current.to_string();
        match self {
            Self::Insert(c) => next.push(*c),
            Self::Backspace => {
                next.pop();
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod field_type {
        use super::*;

        #[test]
        fn test_default_is_text() {
            assert_eq!(FieldType::default(), FieldType::Text);
        }

        #[test]
        fn test_parse_known_values() {
            assert_eq!("text".parse::<FieldType>(), Ok(FieldType::Text));
            assert_eq!("multiple".parse::<FieldType>(), Ok(FieldType::Multiple));
        }

        #[test]
        fn test_parse_unknown_value_is_invalid_selection() {
            let err = "checkbox".parse::<FieldType>().unwrap_err();
            assert_eq!(
                err,
                FieldError::InvalidSelection {
                    value: "checkbox".to_string()
                }
            );
            assert_eq!(err.to_string(), "\"checkbox\" is not a valid field type");
        }

        #[test]
        fn test_parse_is_case_sensitive() {
            assert!("Text".parse::<FieldType>().is_err());
        }

        #[test]
        fn test_toggle() {
            assert_eq!(FieldType::Text.toggle(), FieldType::Multiple);
            assert_eq!(FieldType::Multiple.toggle(), FieldType::Text);
        }

        #[test]
        fn test_serializes_lowercase() {
            let json = serde_json::to_string(&FieldType::Multiple).unwrap();
            assert_eq!(json, "\"multiple\"");
            let parsed: FieldType = serde_json::from_str("\"text\"").unwrap();
            assert_eq!(parsed, FieldType::Text);
        }

        #[test]
        fn test_display_matches_wire_value() {
            for ty in FieldType::ALL {
                assert_eq!(ty.to_string(), ty.as_str());
            }
        }
    }

    mod field_path {
        use super::*;

        #[test]
        fn test_display() {
            assert_eq!(FieldPath::Name.to_string(), "name");
            assert_eq!(FieldPath::FieldType.to_string(), "fieldType");
            assert_eq!(FieldPath::Rows.to_string(), "rows");
            assert_eq!(FieldPath::RowName(0).to_string(), "rows[0].name");
            assert_eq!(FieldPath::RowValue(2).to_string(), "rows[2].value");
        }
    }

    mod text_edit {
        use super::*;

        #[test]
        fn test_insert_appends() {
            assert_eq!(TextEdit::Insert('g').apply("En"), "Eng");
        }

        #[test]
        fn test_backspace_on_empty_is_noop() {
            assert_eq!(TextEdit::Backspace.apply(""), "");
        }

        #[test]
        fn test_backspace_removes_last_char() {
            assert_eq!(TextEdit::Backspace.apply("ENG"), "EN");
        }
    }
}
