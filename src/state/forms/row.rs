//! Ordered name/value rows with stable identities

use super::form_state::FormError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identity assigned to a row at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(Uuid);

impl RowId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One name/value pair of a multiple-choice field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    id: RowId,
    pub name: String,
    pub value: String,
}

impl Row {
    fn empty() -> Self {
        Self {
            id: RowId::generate(),
            name: String::new(),
            value: String::new(),
        }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    /// Name/value without the identity
    pub fn entry(&self) -> FieldEntry {
        FieldEntry {
            name: self.name.clone(),
            value: self.value.clone(),
        }
    }
}

/// A row as handed to the submission consumer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEntry {
    pub name: String,
    pub value: String,
}

/// Row sequence kept in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowList {
    rows: Vec<Row>,
}

impl RowList {
    /// A list holding a single empty row
    pub fn seeded() -> Self {
        let mut list = Self::default();
        list.add_row();
        list
    }

    /// Copy of the rows' contents under freshly generated identities
    pub fn reissued(&self) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|row| Row {
                id: RowId::generate(),
                name: row.name.clone(),
                value: row.value.clone(),
            })
            .collect();
        Self { rows }
    }

    /// Append an empty row and return its identity
    pub fn add_row(&mut self) -> RowId {
        let row = Row::empty();
        let id = row.id;
        self.rows.push(row);
        id
    }

    /// Remove the row at `index`, keeping every other row's identity
    pub fn remove_row(&mut self, index: usize) -> Result<Row, FormError> {
        if index >= self.rows.len() {
            return Err(FormError::RowOutOfRange {
                index,
                len: self.rows.len(),
            });
        }
        Ok(self.rows.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Row> {
        self.rows.get_mut(index)
    }

    pub fn position(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|r| r.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row contents in order, ignoring identities
    pub fn entries(&self) -> Vec<FieldEntry> {
        self.rows.iter().map(Row::entry).collect()
    }

    /// Content equality that ignores row identities
    pub fn same_content(&self, other: &RowList) -> bool {
        self.rows.len() == other.rows.len()
            && self
                .rows
                .iter()
                .zip(other.rows.iter())
                .all(|(a, b)| a.name == b.name && a.value == b.value)
    }
}

impl<'a> IntoIterator for &'a RowList {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn filled(entries: &[(&str, &str)]) -> RowList {
        let mut list = RowList::default();
        for (name, value) in entries {
            list.add_row();
            let row = list.get_mut(list.len() - 1).unwrap();
            row.name = name.to_string();
            row.value = value.to_string();
        }
        list
    }

    #[test]
    fn test_seeded_has_one_empty_row() {
        let list = RowList::seeded();
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).unwrap().name, "");
        assert_eq!(list.get(0).unwrap().value, "");
    }

    #[test]
    fn test_add_row_appends_at_end() {
        let mut list = filled(&[("Level", "L1")]);
        let id = list.add_row();
        assert_eq!(list.len(), 2);
        assert_eq!(list.position(id), Some(1));
        assert_eq!(list.get(0).unwrap().name, "Level");
    }

    #[test]
    fn test_add_row_ids_are_unique() {
        let mut list = RowList::default();
        let ids: HashSet<RowId> = (0..50).map(|_| list.add_row()).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_remove_row_keeps_order_and_ids() {
        let mut list = filled(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let first = list.get(0).unwrap().id();
        let last = list.get(2).unwrap().id();

        let removed = list.remove_row(1).unwrap();
        assert_eq!(removed.name, "b");
        assert_eq!(
            list.entries(),
            vec![
                FieldEntry {
                    name: "a".into(),
                    value: "1".into()
                },
                FieldEntry {
                    name: "c".into(),
                    value: "3".into()
                },
            ]
        );
        assert_eq!(list.get(0).unwrap().id(), first);
        assert_eq!(list.get(1).unwrap().id(), last);
    }

    #[test]
    fn test_remove_row_out_of_range() {
        let mut list = filled(&[("a", "1")]);
        let err = list.remove_row(1).unwrap_err();
        assert!(matches!(err, FormError::RowOutOfRange { index: 1, len: 1 }));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_row_on_empty_list() {
        let mut list = RowList::default();
        assert!(list.remove_row(0).is_err());
    }

    #[test]
    fn test_add_then_remove_restores_content_without_reusing_id() {
        let mut list = filled(&[("a", "1"), ("b", "2")]);
        let before = list.clone();

        let added = list.add_row();
        list.remove_row(2).unwrap();
        assert!(list.same_content(&before));
        assert_eq!(list.len(), before.len());

        let next = list.add_row();
        assert_ne!(next, added);
    }

    #[test]
    fn test_same_content_ignores_ids() {
        let a = filled(&[("Level", "L1")]);
        let b = filled(&[("Level", "L1")]);
        assert_ne!(a, b);
        assert!(a.same_content(&b));
        assert!(!a.same_content(&filled(&[("Level", "L2")])));
    }

    #[test]
    fn test_reissued_keeps_content_with_new_ids() {
        let list = filled(&[("Level", "L1"), ("Tier", "T2")]);
        let copy = list.reissued();
        assert!(copy.same_content(&list));
        for row in &list {
            assert_eq!(copy.position(row.id()), None);
        }
    }
}
