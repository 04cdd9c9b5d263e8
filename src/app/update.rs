use crate::app::Model;
use crate::app::effects::Effect;
use crate::app::model::ToastLevel;
use crate::editor::{Direction, Field};
use crate::ordering::Release;
use crate::section::{Section, SectionId};
use crate::sync::RemoteError;

/// All possible events and actions in the application.
///
/// These represent user input, remote results, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editor
    /// Clear the form for a new section
    NewSection,
    /// Load a section into the form
    SelectSection(SectionId),
    /// Validate the form and create a section from it
    Save,
    /// Move keyboard focus to the other input
    FocusNext,
    /// Focus a specific input (mouse click)
    FocusField(Field),
    /// Insert a character at the cursor
    EditorInsertChar(char),
    /// Enter key
    EditorNewline,
    /// Delete character before cursor (Backspace)
    EditorDeleteBack,
    /// Delete character at cursor (Delete)
    EditorDeleteForward,
    /// Move cursor in a direction
    EditorMoveCursor(Direction),
    /// Move cursor to beginning of line (Home)
    EditorMoveHome,
    /// Move cursor to end of line (End)
    EditorMoveEnd,

    // Ordering
    /// Mouse down on a list item
    PressItem(SectionId),
    /// Mouse moved to a terminal row with the button held
    PointerMoved(u16),
    /// Mouse up
    Release,
    /// Abandon the current drag
    CancelDrag,

    // List
    /// Scroll the list up by n items
    ListScrollUp(usize),
    /// Scroll the list down by n items
    ListScrollDown(usize),

    // Remote
    /// Fetch the full listing
    Load,
    /// Listing arrived (or failed)
    Loaded(Result<Vec<Section>, RemoteError>),
    /// Create finished
    Created(Result<Section, RemoteError>),
    /// Reorder finished
    OrderPersisted(Result<(), RemoteError>),

    // Other
    /// Write the combined markdown document
    Export,
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,
    /// Terminal resized
    Resize(u16, u16),
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// Remote calls are only queued as [`Effect`]s; the event loop runs them.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Editor
        Message::NewSection => {
            model.editor.start_new(&mut model.store);
        }
        Message::SelectSection(id) => {
            if !model.editor.select(&mut model.store, &id) {
                tracing::debug!(%id, "select: unknown section");
            }
        }
        Message::Save => match model.editor.save() {
            Ok(draft) => {
                tracing::debug!(title = %draft.title, "save: queue create");
                model.queue(Effect::CreateSection(draft));
            }
            Err(err) => {
                tracing::warn!(%err, "save: validation failed");
                model.show_toast(ToastLevel::Warning, err.to_string());
            }
        },
        Message::FocusNext => model.editor.toggle_focus(),
        Message::FocusField(field) => model.editor.set_focus(field),
        Message::EditorInsertChar(ch) => model.editor.insert_char(ch),
        Message::EditorNewline => model.editor.newline(),
        Message::EditorDeleteBack => model.editor.delete_back(),
        Message::EditorDeleteForward => model.editor.delete_forward(),
        Message::EditorMoveCursor(dir) => model.editor.move_cursor(dir),
        Message::EditorMoveHome => model.editor.move_home(),
        Message::EditorMoveEnd => model.editor.move_end(),

        // Ordering
        Message::PressItem(id) => model.ordering.press(id),
        Message::PointerMoved(row) => {
            if model.ordering.is_active() {
                let boxes = model.item_boxes();
                model
                    .ordering
                    .pointer_moved(&model.store, f32::from(row), &boxes);
            }
        }
        Message::Release => match model.ordering.release(&mut model.store) {
            Ok(Release::Dropped(order)) => model.queue(Effect::PersistOrder(order)),
            Ok(Release::Click(id)) => {
                model.editor.select(&mut model.store, &id);
            }
            Ok(Release::None) => {}
            Err(err) => {
                tracing::error!(%err, "drop discarded");
                model.show_toast(ToastLevel::Error, format!("Reorder discarded: {err}"));
            }
        },
        Message::CancelDrag => model.ordering.cancel(),

        // List
        Message::ListScrollUp(n) => {
            model.list_scroll = model.list_scroll.saturating_sub(n);
        }
        Message::ListScrollDown(n) => {
            model.list_scroll = (model.list_scroll + n).min(model.max_list_scroll());
        }

        // Remote
        Message::Load => model.queue(Effect::LoadAll),
        Message::Loaded(result) => {
            model.request_finished();
            match result {
                Ok(sections) => {
                    model.ordering.cancel();
                    let count = sections.len();
                    match model.store.load_all(sections) {
                        Ok(()) => {
                            model.loaded = true;
                            model.list_scroll = model.list_scroll.min(model.max_list_scroll());
                            model.show_toast(ToastLevel::Info, format!("Loaded {count} section(s)"));
                        }
                        Err(err) => {
                            tracing::error!(%err, "load rejected");
                            model.show_toast(ToastLevel::Error, format!("Load failed: {err}"));
                        }
                    }
                }
                Err(err) => {
                    tracing::error!(%err, "load failed");
                    model.show_toast(ToastLevel::Error, format!("Load failed: {err}"));
                }
            }
        }
        Message::Created(result) => {
            model.request_finished();
            match result {
                Ok(section) => {
                    let title = section.title.clone();
                    let id = section.id.clone();
                    if let Err(err) = model.editor.created(&mut model.store, section) {
                        tracing::error!(%err, "created section not appended");
                    } else {
                        model.ordering.section_appended(&id);
                        model.show_toast(ToastLevel::Info, format!("Saved \"{title}\""));
                    }
                }
                Err(err) => {
                    tracing::error!(%err, "create failed");
                    model.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
                }
            }
        }
        Message::OrderPersisted(result) => {
            model.request_finished();
            if let Err(err) = result {
                tracing::error!(%err, "reorder failed");
                model.show_toast(ToastLevel::Error, format!("Reorder failed: {err}"));
            }
        }

        // Other
        Message::Export => {}
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }
        Message::Resize(width, height) => {
            model.size = (width, height);
            model.list_scroll = model.list_scroll.min(model.max_list_scroll());
        }
        Message::Quit => {
            model.should_quit = true;
        }
    }
    model
}
