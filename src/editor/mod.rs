//! The section form.
//!
//! Two rope-backed inputs (title and content) plus the new/select/save
//! operations that bind them to the [`SectionStore`](crate::store::SectionStore).

mod field;
mod pane;

pub use field::{Cursor, Direction, TextField};
pub use pane::{Draft, EditorPane, Field, ValidationError};
