//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! `update` never talks to the network. It queues [`Effect`]s, which the
//! event loop runs on worker threads; each one comes back as a result
//! message.

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use effects::{Effect, execute};
pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;
use std::sync::Arc;

use crate::export::{DEFAULT_OUTPUT, DEFAULT_TITLE};
use crate::sync::SectionRemote;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    remote: Arc<dyn SectionRemote>,
    server_url: String,
    output_path: PathBuf,
    document_title: String,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application talking to `remote`.
    pub fn new(remote: Arc<dyn SectionRemote>) -> Self {
        Self {
            remote,
            server_url: String::new(),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            document_title: DEFAULT_TITLE.to_string(),
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Service URL shown in the status bar.
    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into();
        self
    }

    /// Set where Ctrl+E writes the combined document.
    pub fn with_output_path(mut self, path: PathBuf) -> Self {
        self.output_path = path;
        self
    }

    /// Set the heading of the exported document.
    pub fn with_document_title(mut self, title: impl Into<String>) -> Self {
        self.document_title = title.into();
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}
