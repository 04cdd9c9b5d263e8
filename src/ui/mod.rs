//! Terminal UI components.
//!
//! Layout helpers here are shared by rendering and mouse hit-testing, so a
//! list item is always clicked where it was drawn.

mod overlays;
mod render;
mod status;

use std::rc::Rc;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::ordering::ItemBox;
use crate::section::SectionId;

pub use render::render;

pub const LIST_WIDTH_PERCENT: u16 = 40;
pub const EDITOR_WIDTH_PERCENT: u16 = 60;
/// Rows per list item: title, preview, spacer.
pub const ITEM_HEIGHT: u16 = 3;
/// Toast row plus status row.
pub const FOOTER_ROWS: u16 = 2;
const TITLE_FIELD_ROWS: u16 = 3;

/// Split the screen into the main area, the toast row and the status row.
pub fn split_body(area: Rect) -> (Rect, Rect, Rect) {
    let footer = FOOTER_ROWS.min(area.height);
    let main = Rect {
        height: area.height - footer,
        ..area
    };
    let toast = Rect {
        y: area.y + main.height,
        height: footer.min(1),
        ..area
    };
    let status = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: footer.saturating_sub(1),
        ..area
    };
    (main, toast, status)
}

pub fn split_main_columns(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(LIST_WIDTH_PERCENT),
            Constraint::Percentage(EDITOR_WIDTH_PERCENT),
        ])
        .split(area)
}

/// Outer (bordered) list area for a terminal of size `area`.
pub fn list_area(area: Rect) -> Rect {
    let (main, _, _) = split_body(area);
    split_main_columns(main)[0]
}

/// Rows available to list items, inside the border.
pub fn list_inner_area(area: Rect) -> Rect {
    inner(list_area(area))
}

/// Outer areas of the title and content inputs.
pub fn editor_field_areas(area: Rect) -> (Rect, Rect) {
    let (main, _, _) = split_body(area);
    let editor = split_main_columns(main)[1];
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(TITLE_FIELD_ROWS), Constraint::Min(0)])
        .split(editor);
    (chunks[0], chunks[1])
}

pub const fn visible_item_count(list: Rect) -> usize {
    (list.height / ITEM_HEIGHT) as usize
}

/// Box of every item in `order`, scrolled by `scroll` items.
///
/// Items scrolled off the top get negative tops; the midpoint rule still
/// orders them correctly.
pub fn item_boxes(list: Rect, scroll: usize, order: Vec<SectionId>) -> Vec<(SectionId, ItemBox)> {
    let height = f32::from(ITEM_HEIGHT);
    #[allow(clippy::cast_precision_loss)]
    let first = f32::from(list.y) - scroll as f32 * height;
    order
        .into_iter()
        .enumerate()
        .map(|(i, id)| {
            #[allow(clippy::cast_precision_loss)]
            let top = (i as f32).mul_add(height, first);
            (id, ItemBox::new(top, height))
        })
        .collect()
}

/// Index (in visible order) of the item drawn at `row`.
pub fn item_index_at(list: Rect, scroll: usize, row: u16) -> Option<usize> {
    if row < list.y || row >= list.y + list.height {
        return None;
    }
    let slot = ((row - list.y) / ITEM_HEIGHT) as usize;
    (slot < visible_item_count(list)).then_some(scroll + slot)
}

pub const fn contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

const fn inner(rect: Rect) -> Rect {
    Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}
