use thiserror::Error;

use crate::section::{Section, SectionId};
use crate::store::{SectionStore, StoreError};

use super::field::{Direction, TextField};

/// A required draft field was blank after trimming.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is required")]
    MissingTitle,
    #[error("Content is required")]
    MissingContent,
}

/// Trimmed title/content pair ready to be sent to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content: String,
}

/// Which input receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Title,
    Content,
}

/// The title/content form.
#[derive(Debug)]
pub struct EditorPane {
    title: TextField,
    content: TextField,
    focus: Field,
}

impl Default for EditorPane {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorPane {
    pub fn new() -> Self {
        Self {
            title: TextField::single_line(),
            content: TextField::multi_line(),
            focus: Field::Title,
        }
    }

    pub const fn title(&self) -> &TextField {
        &self.title
    }

    pub const fn content(&self) -> &TextField {
        &self.content
    }

    pub const fn focus(&self) -> Field {
        self.focus
    }

    pub const fn set_focus(&mut self, field: Field) {
        self.focus = field;
    }

    pub const fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Field::Title => Field::Content,
            Field::Content => Field::Title,
        };
    }

    /// Blank form for a new section; clears the store selection.
    pub fn start_new(&mut self, store: &mut SectionStore) {
        self.title.clear();
        self.content.clear();
        self.focus = Field::Title;
        store.select(None);
    }

    /// Load an existing section into the form and mark it current.
    ///
    /// Returns `false` if the store does not hold `id`.
    pub fn select(&mut self, store: &mut SectionStore, id: &SectionId) -> bool {
        let Some(section) = store.get(id) else {
            return false;
        };
        self.title.set_text(&section.title);
        self.content.set_text(&section.content);
        store.select(Some(id.clone()));
        true
    }

    /// Validate the form.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] when the trimmed title or content is empty.
    pub fn save(&self) -> Result<Draft, ValidationError> {
        let title = self.title.text().trim().to_string();
        let content = self.content.text().trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if content.is_empty() {
            return Err(ValidationError::MissingContent);
        }
        Ok(Draft { title, content })
    }

    /// Record a section the service just created and reset the form.
    ///
    /// # Errors
    /// Propagates [`StoreError::DuplicateId`]; the form is reset regardless.
    pub fn created(&mut self, store: &mut SectionStore, section: Section) -> Result<(), StoreError> {
        let appended = store.append(section);
        self.start_new(store);
        appended
    }

    fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            Field::Title => &mut self.title,
            Field::Content => &mut self.content,
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        self.focused_mut().insert_char(ch);
    }

    /// Enter: newline in content, jump to content from the title.
    pub fn newline(&mut self) {
        match self.focus {
            Field::Title => self.focus = Field::Content,
            Field::Content => self.content.split_line(),
        }
    }

    pub fn delete_back(&mut self) {
        self.focused_mut().delete_back();
    }

    pub fn delete_forward(&mut self) {
        self.focused_mut().delete_forward();
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        self.focused_mut().move_cursor(direction);
    }

    pub fn move_home(&mut self) {
        self.focused_mut().move_home();
    }

    pub fn move_end(&mut self) {
        self.focused_mut().move_end();
    }
}
