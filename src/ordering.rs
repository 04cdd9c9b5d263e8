//! Drag-to-reorder for the section list.
//!
//! The controller keeps a live preview of the list while an item is lifted
//! and hands back the settled order when the gesture ends. Positions are in
//! list coordinates (terminal rows for the TUI), but nothing here depends on
//! rendering: the caller supplies the box of every visible item.

use crate::section::SectionId;
use crate::store::{SectionStore, StoreError};

/// Vertical extent of a rendered list item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemBox {
    pub top: f32,
    pub height: f32,
}

impl ItemBox {
    pub const fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    pub fn midpoint(&self) -> f32 {
        self.top + self.height / 2.0
    }
}

/// Index of the insertion anchor for a pointer at `pointer_y`.
///
/// The anchor is the first box (in visual order) whose midpoint is at or below
/// the pointer. When no box qualifies the insertion point is the end,
/// `boxes.len()`.
pub fn insertion_index(pointer_y: f32, boxes: &[ItemBox]) -> usize {
    boxes
        .iter()
        .position(|b| pointer_y <= b.midpoint())
        .unwrap_or(boxes.len())
}

/// Gesture state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Button is down on an item but the pointer has not moved yet.
    Pressed { id: SectionId },
    /// The item is lifted and the preview follows the pointer.
    Dragging {
        lifted: SectionId,
        preview: Vec<SectionId>,
    },
}

/// Outcome of releasing the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Release {
    /// No gesture was in progress.
    None,
    /// Press and release without movement.
    Click(SectionId),
    /// A drag settled; this is the authoritative order to persist.
    Dropped(Vec<SectionId>),
}

#[derive(Debug, Default)]
pub struct OrderingController {
    state: DragState,
}

impl OrderingController {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn state(&self) -> &DragState {
        &self.state
    }

    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub const fn is_active(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    pub fn lifted(&self) -> Option<&SectionId> {
        match &self.state {
            DragState::Dragging { lifted, .. } => Some(lifted),
            _ => None,
        }
    }

    /// Button down on an item. Does not lift it yet.
    pub fn press(&mut self, id: SectionId) {
        tracing::debug!(%id, "ordering.press");
        self.state = DragState::Pressed { id };
    }

    /// Ids in the order the list should be drawn right now.
    pub fn visible_order(&self, store: &SectionStore) -> Vec<SectionId> {
        match &self.state {
            DragState::Dragging { preview, .. } => preview.clone(),
            _ => store.current_order(),
        }
    }

    /// Pointer moved over the list.
    ///
    /// `boxes` holds the rendered box of every item in the current visible
    /// order (including the lifted one, which is excluded here). The first
    /// movement after [`press`](Self::press) lifts the item. Returns whether
    /// the preview order changed.
    pub fn pointer_moved(
        &mut self,
        store: &SectionStore,
        pointer_y: f32,
        boxes: &[(SectionId, ItemBox)],
    ) -> bool {
        if let DragState::Pressed { id } = &self.state {
            let id = id.clone();
            if store.get(&id).is_none() {
                self.state = DragState::Idle;
                return false;
            }
            tracing::debug!(%id, "ordering.lift");
            self.state = DragState::Dragging {
                lifted: id,
                preview: store.current_order(),
            };
        }

        let DragState::Dragging { lifted, preview } = &mut self.state else {
            return false;
        };

        let (others, other_boxes): (Vec<SectionId>, Vec<ItemBox>) = boxes
            .iter()
            .filter(|(id, _)| *id != *lifted)
            .map(|(id, b)| (id.clone(), *b))
            .unzip();
        let anchor = insertion_index(pointer_y, &other_boxes);

        let mut next: Vec<SectionId> = preview
            .iter()
            .filter(|id| **id != *lifted)
            .cloned()
            .collect();
        let at = others
            .get(anchor)
            .and_then(|anchor_id| next.iter().position(|id| id == anchor_id))
            .unwrap_or(next.len());
        next.insert(at, lifted.clone());

        if next == *preview {
            return false;
        }
        tracing::debug!(lifted = %lifted, at, "ordering.preview");
        *preview = next;
        true
    }

    /// Pointer released.
    ///
    /// A finished drag commits the preview to the store and returns it as
    /// [`Release::Dropped`], even when the order did not change.
    ///
    /// # Errors
    /// Returns [`StoreError::OrderMismatch`] if the store changed underneath
    /// the drag; the gesture is abandoned and nothing should be persisted.
    pub fn release(&mut self, store: &mut SectionStore) -> Result<Release, StoreError> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => Ok(Release::None),
            DragState::Pressed { id } => Ok(Release::Click(id)),
            DragState::Dragging { lifted, preview } => {
                store.reorder(&preview)?;
                tracing::debug!(%lifted, "ordering.drop");
                Ok(Release::Dropped(preview))
            }
        }
    }

    /// A section was appended to the store mid-gesture; keep the preview a
    /// permutation of the store by placing it last.
    pub fn section_appended(&mut self, id: &SectionId) {
        if let DragState::Dragging { preview, .. } = &mut self.state
            && !preview.contains(id)
        {
            preview.push(id.clone());
        }
    }

    /// Abandon the gesture without touching the store.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::Section;
    use proptest::prelude::*;

    const ROWS: f32 = 3.0;

    fn ids(values: &[&str]) -> Vec<SectionId> {
        values.iter().copied().map(SectionId::from).collect()
    }

    fn store_of(n: usize) -> SectionStore {
        let mut store = SectionStore::new();
        store
            .load_all(
                (1..=n)
                    .map(|i| Section::new(i.to_string(), format!("S{i}"), "body"))
                    .collect(),
            )
            .unwrap();
        store
    }

    /// Lay the visible order out top to bottom, `ROWS` tall each.
    fn layout(ctrl: &OrderingController, store: &SectionStore) -> Vec<(SectionId, ItemBox)> {
        ctrl.visible_order(store)
            .into_iter()
            .enumerate()
            .map(|(i, id)| (id, ItemBox::new(i as f32 * ROWS, ROWS)))
            .collect()
    }

    fn move_to(ctrl: &mut OrderingController, store: &SectionStore, y: f32) -> bool {
        let boxes = layout(ctrl, store);
        ctrl.pointer_moved(store, y, &boxes)
    }

    #[test]
    fn test_insertion_index_picks_first_midpoint_at_or_below_pointer() {
        let boxes = [ItemBox::new(0.0, 10.0), ItemBox::new(10.0, 10.0), ItemBox::new(20.0, 10.0)];
        assert_eq!(insertion_index(0.0, &boxes), 0);
        assert_eq!(insertion_index(5.0, &boxes), 0);
        assert_eq!(insertion_index(5.1, &boxes), 1);
        assert_eq!(insertion_index(15.0, &boxes), 1);
        assert_eq!(insertion_index(25.0, &boxes), 2);
        assert_eq!(insertion_index(25.5, &boxes), 3);
    }

    #[test]
    fn test_insertion_index_of_empty_list_is_zero() {
        assert_eq!(insertion_index(42.0, &[]), 0);
    }

    #[test]
    fn test_section_appended_mid_drag_lands_last() {
        let mut store = SectionStore::new();
        store
            .load_all(vec![
                Section::new("1", "A", "a"),
                Section::new("2", "B", "b"),
            ])
            .unwrap();
        let boxes = vec![
            (SectionId::from("1"), ItemBox::new(0.0, ROWS)),
            (SectionId::from("2"), ItemBox::new(ROWS, ROWS)),
        ];
        let mut ctrl = OrderingController::new();
        ctrl.press(SectionId::from("2"));
        ctrl.pointer_moved(&store, 0.0, &boxes);

        store.append(Section::new("9", "C", "c")).unwrap();
        ctrl.section_appended(&SectionId::from("9"));
        ctrl.section_appended(&SectionId::from("9"));

        assert_eq!(
            ctrl.release(&mut store).unwrap(),
            Release::Dropped(ids(&["2", "1", "9"]))
        );
        assert_eq!(store.current_order(), ids(&["2", "1", "9"]));
    }

    #[test]
    fn test_drag_last_before_first() {
        let mut store = store_of(3);
        let mut ctrl = OrderingController::new();
        ctrl.press(SectionId::from("3"));
        assert!(move_to(&mut ctrl, &store, 0.0));
        assert_eq!(ctrl.visible_order(&store), ids(&["3", "1", "2"]));

        let release = ctrl.release(&mut store).unwrap();
        assert_eq!(release, Release::Dropped(ids(&["3", "1", "2"])));
        assert_eq!(store.current_order(), ids(&["3", "1", "2"]));
        assert!(!ctrl.is_active());
    }

    #[test]
    fn test_drag_first_to_end() {
        let mut store = store_of(3);
        let mut ctrl = OrderingController::new();
        ctrl.press(SectionId::from("1"));
        move_to(&mut ctrl, &store, 100.0);
        assert_eq!(
            ctrl.release(&mut store).unwrap(),
            Release::Dropped(ids(&["2", "3", "1"]))
        );
    }

    #[test]
    fn test_repeated_identical_pointer_positions_do_not_churn() {
        let store = store_of(4);
        let mut ctrl = OrderingController::new();
        ctrl.press(SectionId::from("4"));
        assert!(move_to(&mut ctrl, &store, 4.0));
        let settled = ctrl.visible_order(&store);
        assert!(!move_to(&mut ctrl, &store, 4.0));
        assert!(!move_to(&mut ctrl, &store, 4.0));
        assert_eq!(ctrl.visible_order(&store), settled);
    }

    #[test]
    fn test_drop_at_origin_still_persists_unchanged_order() {
        let mut store = store_of(3);
        let mut ctrl = OrderingController::new();
        ctrl.press(SectionId::from("2"));
        // Over its own midpoint: the anchor is item 3, so it stays put.
        assert!(!move_to(&mut ctrl, &store, 4.5));
        assert!(ctrl.is_dragging());
        assert_eq!(
            ctrl.release(&mut store).unwrap(),
            Release::Dropped(ids(&["1", "2", "3"]))
        );
    }

    #[test]
    fn test_click_without_movement_does_not_drag() {
        let mut store = store_of(3);
        let mut ctrl = OrderingController::new();
        ctrl.press(SectionId::from("2"));
        assert!(!ctrl.is_dragging());
        assert_eq!(
            ctrl.release(&mut store).unwrap(),
            Release::Click(SectionId::from("2"))
        );
        assert_eq!(store.current_order(), ids(&["1", "2", "3"]));
    }

    #[test]
    fn test_release_when_idle_is_none() {
        let mut store = store_of(1);
        let mut ctrl = OrderingController::new();
        assert_eq!(ctrl.release(&mut store).unwrap(), Release::None);
    }

    #[test]
    fn test_cancel_discards_preview() {
        let store = store_of(3);
        let mut ctrl = OrderingController::new();
        ctrl.press(SectionId::from("3"));
        move_to(&mut ctrl, &store, 0.0);
        ctrl.cancel();
        assert_eq!(ctrl.visible_order(&store), ids(&["1", "2", "3"]));
    }

    #[test]
    fn test_release_after_store_replaced_is_an_error() {
        let mut store = store_of(3);
        let mut ctrl = OrderingController::new();
        ctrl.press(SectionId::from("3"));
        move_to(&mut ctrl, &store, 0.0);
        store
            .load_all(vec![Section::new("1", "S1", "body")])
            .unwrap();
        assert!(ctrl.release(&mut store).is_err());
        assert!(!ctrl.is_active());
    }

    #[test]
    fn test_press_on_unknown_id_never_lifts() {
        let store = store_of(2);
        let mut ctrl = OrderingController::new();
        ctrl.press(SectionId::from("nope"));
        assert!(!move_to(&mut ctrl, &store, 0.0));
        assert!(!ctrl.is_active());
    }

    proptest! {
        #[test]
        fn prop_drag_relocates_only_the_lifted_item(n in 2usize..12, from_seed in 0usize..64, to_seed in 0usize..64) {
            let from = from_seed % n;
            let to = to_seed % n;
            let mut store = store_of(n);
            let original = store.current_order();
            let lifted = original[from].clone();

            let mut ctrl = OrderingController::new();
            ctrl.press(lifted.clone());
            // Among the other items, aim at the top edge of the one that
            // should end up right after the lifted item.
            let boxes = layout(&ctrl, &store);
            let others: Vec<_> = boxes.iter().filter(|(id, _)| *id != lifted).collect();
            let y = others.get(to).map_or(1_000.0, |(_, b)| b.top);
            ctrl.pointer_moved(&store, y, &boxes);

            let Release::Dropped(order) = ctrl.release(&mut store).unwrap() else {
                panic!("expected a drop");
            };
            let mut expected = original.clone();
            let moved = expected.remove(from);
            expected.insert(to, moved);
            prop_assert_eq!(&order, &expected);
            prop_assert_eq!(store.current_order(), expected);
        }
    }
}
