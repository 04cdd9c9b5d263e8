// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. store::SectionStore)
    clippy::module_name_repetitions
)]

//! # Sectionist
//!
//! A terminal editor for documents kept as an ordered list of sections on a
//! remote section service.
//!
//! Sectionist keeps a local mirror of the service and lets you:
//! - Write new sections in a title/content form
//! - Open existing sections by clicking them
//! - Reorder sections by dragging them with the mouse
//! - Export the whole document as one markdown file
//!
//! ## Architecture
//!
//! Sectionist uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions, remote calls queued as effects
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`store`]: Local mirror of the remote sections
//! - [`editor`]: Title/content form
//! - [`ordering`]: Drag-to-reorder
//! - [`sync`]: HTTP client for the section service
//! - [`export`]: Combined markdown output
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod config;
pub mod editor;
pub mod export;
pub mod ordering;
pub mod section;
pub mod store;
pub mod sync;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::section::{Section, SectionId};
    pub use crate::store::SectionStore;
    pub use crate::sync::{SectionRemote, SyncClient};
}
