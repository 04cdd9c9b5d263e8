use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::editor::EditorPane;
use crate::export::{DEFAULT_OUTPUT, DEFAULT_TITLE};
use crate::ordering::{ItemBox, OrderingController};
use crate::section::{Section, SectionId};
use crate::store::SectionStore;

use super::effects::Effect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state. The three
/// components share one [`SectionStore`], passed to them by reference.
#[derive(Debug)]
pub struct Model {
    /// Local mirror of the remote sections
    pub store: SectionStore,
    /// Title/content form
    pub editor: EditorPane,
    /// Drag-to-reorder state for the list
    pub ordering: OrderingController,
    /// Terminal size (width, height)
    pub size: (u16, u16),
    /// First list item shown
    pub list_scroll: usize,
    /// Whether the initial listing has arrived
    pub loaded: bool,
    /// Requests queued or in flight
    pub pending_requests: usize,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Heading used when exporting
    pub document_title: String,
    /// Where Ctrl+E writes the combined document
    pub output_path: PathBuf,
    /// Service base URL shown in the status bar
    pub server_url: String,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    toast: Option<Toast>,
    effects: Vec<Effect>,
}

impl Model {
    /// Create an empty model for a terminal of the given size.
    pub fn new(size: (u16, u16)) -> Self {
        Self {
            store: SectionStore::new(),
            editor: EditorPane::new(),
            ordering: OrderingController::new(),
            size,
            list_scroll: 0,
            loaded: false,
            pending_requests: 0,
            help_visible: false,
            should_quit: false,
            document_title: DEFAULT_TITLE.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            server_url: String::new(),
            config_global_path: None,
            config_local_path: None,
            toast: None,
            effects: Vec::new(),
        }
    }

    pub fn area(&self) -> Rect {
        Rect::new(0, 0, self.size.0, self.size.1)
    }

    /// Sections in the order they should be drawn (the drag preview while dragging).
    pub fn visible_sections(&self) -> Vec<&Section> {
        self.ordering
            .visible_order(&self.store)
            .iter()
            .filter_map(|id| self.store.get(id))
            .collect()
    }

    /// Rendered boxes of every list item, in visible order.
    pub fn item_boxes(&self) -> Vec<(SectionId, ItemBox)> {
        let list = crate::ui::list_inner_area(self.area());
        crate::ui::item_boxes(list, self.list_scroll, self.ordering.visible_order(&self.store))
    }

    /// Id of the list item drawn at terminal `row`, if any.
    pub fn item_at_row(&self, row: u16) -> Option<SectionId> {
        let list = crate::ui::list_inner_area(self.area());
        let index = crate::ui::item_index_at(list, self.list_scroll, row)?;
        self.ordering.visible_order(&self.store).get(index).cloned()
    }

    pub(super) fn max_list_scroll(&self) -> usize {
        let list = crate::ui::list_inner_area(self.area());
        let visible = crate::ui::visible_item_count(list);
        self.store.len().saturating_sub(visible)
    }

    pub(super) fn queue(&mut self, effect: Effect) {
        self.pending_requests += 1;
        self.effects.push(effect);
    }

    pub(super) const fn request_finished(&mut self) {
        self.pending_requests = self.pending_requests.saturating_sub(1);
    }

    /// Hand queued remote calls to the caller, leaving the queue empty.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn queued_effects(&self) -> &[Effect] {
        &self.effects
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self::new((80, 24))
    }
}
