//! Keyboard focus order for the field definition form

use super::forms::{FieldDefinitionForm, FieldPath};

/// Something on the form that can take keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Name,
    Code,
    FieldType,
    RowName(usize),
    RowValue(usize),
    RemoveRow(usize),
    AddRow,
    Save,
    Cancel,
}

impl FocusTarget {
    /// Path of the text input behind this target
    pub fn text_path(&self) -> Option<FieldPath> {
        match self {
            Self::Name => Some(FieldPath::Name),
            Self::Code => Some(FieldPath::Code),
            Self::RowName(i) => Some(FieldPath::RowName(*i)),
            Self::RowValue(i) => Some(FieldPath::RowValue(*i)),
            _ => None,
        }
    }

    /// Row this target belongs to
    pub fn row_index(&self) -> Option<usize> {
        match self {
            Self::RowName(i) | Self::RowValue(i) | Self::RemoveRow(i) => Some(*i),
            _ => None,
        }
    }

    pub fn is_button(&self) -> bool {
        matches!(
            self,
            Self::RemoveRow(_) | Self::AddRow | Self::Save | Self::Cancel
        )
    }
}

/// Focus targets in tab order; row targets only while rows are visible
pub fn focus_targets(form: &FieldDefinitionForm) -> Vec<FocusTarget> {
    let mut targets = vec![FocusTarget::Name, FocusTarget::Code, FocusTarget::FieldType];
    if let Some(rows) = form.visible_rows() {
        for index in 0..rows.len() {
            targets.push(FocusTarget::RowName(index));
            targets.push(FocusTarget::RowValue(index));
            targets.push(FocusTarget::RemoveRow(index));
        }
        targets.push(FocusTarget::AddRow);
    }
    targets.push(FocusTarget::Save);
    targets.push(FocusTarget::Cancel);
    targets
}
