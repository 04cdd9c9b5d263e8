//! In-memory mirror of the remote section list.
//!
//! The store is a plain data structure: it knows nothing about the network
//! or the terminal. List order is the display order and the persisted order.

use std::collections::HashSet;

use thiserror::Error;

use crate::section::{Section, SectionId};

/// Misuse of the store. These indicate a bug in the caller, not bad user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("section id {0} is already present")]
    DuplicateId(SectionId),

    #[error("order does not match the held sections (expected {expected} ids, got {actual})")]
    OrderMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Default, Clone)]
pub struct SectionStore {
    sections: Vec<Section>,
    selected: Option<SectionId>,
}

impl SectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with a full server listing, keeping its order.
    ///
    /// # Errors
    /// Returns [`StoreError::DuplicateId`] if the listing repeats an id; the
    /// store is left unchanged.
    pub fn load_all(&mut self, sections: Vec<Section>) -> Result<(), StoreError> {
        let mut seen = HashSet::with_capacity(sections.len());
        for section in &sections {
            if !seen.insert(&section.id) {
                return Err(StoreError::DuplicateId(section.id.clone()));
            }
        }
        self.sections = sections;
        if self
            .selected
            .as_ref()
            .is_some_and(|id| self.get(id).is_none())
        {
            self.selected = None;
        }
        Ok(())
    }

    /// Add a freshly created section at the end.
    ///
    /// # Errors
    /// Returns [`StoreError::DuplicateId`] if the id is already held.
    pub fn append(&mut self, section: Section) -> Result<(), StoreError> {
        if self.get(&section.id).is_some() {
            return Err(StoreError::DuplicateId(section.id));
        }
        self.sections.push(section);
        Ok(())
    }

    /// Ids in the order they are held and rendered.
    pub fn current_order(&self) -> Vec<SectionId> {
        self.sections.iter().map(|s| s.id.clone()).collect()
    }

    /// Set or clear the section loaded into the editor.
    ///
    /// An id the store does not hold clears the selection.
    pub fn select(&mut self, id: Option<SectionId>) {
        self.selected = id.filter(|id| self.get(id).is_some());
    }

    pub const fn selected(&self) -> Option<&SectionId> {
        self.selected.as_ref()
    }

    pub fn selected_section(&self) -> Option<&Section> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// Adopt a new order for the held sections.
    ///
    /// # Errors
    /// Returns [`StoreError::OrderMismatch`] unless `order` is a permutation of
    /// the held ids; the store is left unchanged.
    pub fn reorder(&mut self, order: &[SectionId]) -> Result<(), StoreError> {
        let mismatch = || StoreError::OrderMismatch {
            expected: self.sections.len(),
            actual: order.len(),
        };
        if order.len() != self.sections.len() {
            return Err(mismatch());
        }
        let unique: HashSet<&SectionId> = order.iter().collect();
        if unique.len() != order.len() {
            return Err(mismatch());
        }

        let mut reordered = Vec::with_capacity(order.len());
        for id in order {
            let section = self.get(id).ok_or_else(mismatch)?;
            reordered.push(section.clone());
        }
        self.sections = reordered;
        Ok(())
    }

    pub fn get(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == id)
    }

    pub fn position(&self, id: &SectionId) -> Option<usize> {
        self.sections.iter().position(|s| &s.id == id)
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<SectionId> {
        values.iter().copied().map(SectionId::from).collect()
    }

    fn abc() -> SectionStore {
        let mut store = SectionStore::new();
        store
            .load_all(vec![
                Section::new("1", "A", "alpha"),
                Section::new("2", "B", "beta"),
                Section::new("3", "C", "gamma"),
            ])
            .unwrap();
        store
    }

    #[test]
    fn test_load_all_preserves_server_order() {
        let store = abc();
        assert_eq!(store.current_order(), ids(&["1", "2", "3"]));
    }

    #[test]
    fn test_load_all_rejects_duplicate_ids_and_keeps_previous_contents() {
        let mut store = abc();
        let err = store
            .load_all(vec![Section::new("9", "X", "x"), Section::new("9", "Y", "y")])
            .unwrap_err();
        assert_eq!(err, StoreError::DuplicateId(SectionId::from("9")));
        assert_eq!(store.current_order(), ids(&["1", "2", "3"]));
    }

    #[test]
    fn test_append_adds_to_end() {
        let mut store = abc();
        store.append(Section::new("4", "D", "delta")).unwrap();
        assert_eq!(store.current_order(), ids(&["1", "2", "3", "4"]));
    }

    #[test]
    fn test_append_existing_id_is_rejected() {
        let mut store = abc();
        let err = store.append(Section::new("2", "B again", "x")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(_)));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_select_and_clear() {
        let mut store = abc();
        store.select(Some(SectionId::from("2")));
        assert_eq!(store.selected_section().map(|s| s.title.as_str()), Some("B"));
        store.select(None);
        assert!(store.selected().is_none());
    }

    #[test]
    fn test_select_unknown_id_clears_selection() {
        let mut store = abc();
        store.select(Some(SectionId::from("1")));
        store.select(Some(SectionId::from("missing")));
        assert!(store.selected().is_none());
    }

    #[test]
    fn test_reorder_applies_permutation() {
        let mut store = abc();
        store.reorder(&ids(&["3", "1", "2"])).unwrap();
        assert_eq!(store.current_order(), ids(&["3", "1", "2"]));
        assert_eq!(store.sections()[0].title, "C");
    }

    #[test]
    fn test_reorder_rejects_non_permutations() {
        let mut store = abc();
        assert!(store.reorder(&ids(&["1", "2"])).is_err());
        assert!(store.reorder(&ids(&["1", "1", "2"])).is_err());
        assert!(store.reorder(&ids(&["1", "2", "9"])).is_err());
        assert_eq!(store.current_order(), ids(&["1", "2", "3"]));
    }

    #[test]
    fn test_reload_drops_selection_of_vanished_section() {
        let mut store = abc();
        store.select(Some(SectionId::from("3")));
        store.load_all(vec![Section::new("1", "A", "alpha")]).unwrap();
        assert!(store.selected().is_none());
    }
}
