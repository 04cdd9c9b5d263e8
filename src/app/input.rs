use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, Message, Model};
use crate::editor::{Direction, Field};

const WHEEL_STEP: usize = 1;

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return match mouse.kind {
                MouseEventKind::Down(_) => Some(Message::HideHelp),
                _ => None,
            };
        }

        let area = model.area();
        let list = crate::ui::list_inner_area(area);
        let in_list = crate::ui::contains(list, mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if in_list {
                    return model.item_at_row(mouse.row).map(Message::PressItem);
                }
                let (title, content) = crate::ui::editor_field_areas(area);
                if crate::ui::contains(title, mouse.column, mouse.row) {
                    return Some(Message::FocusField(Field::Title));
                }
                if crate::ui::contains(content, mouse.column, mouse.row) {
                    return Some(Message::FocusField(Field::Content));
                }
                None
            }
            // Rows outside the list still move the preview: above the list
            // lands first, below lands last.
            MouseEventKind::Drag(MouseButton::Left) if model.ordering.is_active() => {
                Some(Message::PointerMoved(mouse.row))
            }
            MouseEventKind::Up(MouseButton::Left) if model.ordering.is_active() => {
                Some(Message::Release)
            }
            MouseEventKind::ScrollDown if in_list => Some(Message::ListScrollDown(WHEEL_STEP)),
            MouseEventKind::ScrollUp if in_list => Some(Message::ListScrollUp(WHEEL_STEP)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('q' | 'c') => Some(Message::Quit),
                KeyCode::Char('n') => Some(Message::NewSection),
                KeyCode::Char('s') => Some(Message::Save),
                KeyCode::Char('e') => Some(Message::Export),
                KeyCode::Char('r') => Some(Message::Load),
                _ => None,
            };
        }

        let page = crate::ui::visible_item_count(crate::ui::list_inner_area(model.area())).max(1);
        match key.code {
            KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Esc if model.ordering.is_active() => Some(Message::CancelDrag),
            KeyCode::Tab | KeyCode::BackTab => Some(Message::FocusNext),
            KeyCode::Enter => Some(Message::EditorNewline),
            KeyCode::Backspace => Some(Message::EditorDeleteBack),
            KeyCode::Delete => Some(Message::EditorDeleteForward),
            KeyCode::Left => Some(Message::EditorMoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::EditorMoveCursor(Direction::Right)),
            KeyCode::Up => Some(Message::EditorMoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::EditorMoveCursor(Direction::Down)),
            KeyCode::Home => Some(Message::EditorMoveHome),
            KeyCode::End => Some(Message::EditorMoveEnd),
            KeyCode::PageUp => Some(Message::ListScrollUp(page)),
            KeyCode::PageDown => Some(Message::ListScrollDown(page)),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
                Some(Message::EditorInsertChar(c))
            }
            _ => None,
        }
    }
}
