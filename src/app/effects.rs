use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use crate::app::{App, Message, Model, ToastLevel};
use crate::editor::Draft;
use crate::section::SectionId;
use crate::sync::{RemoteError, SectionRemote};

/// A remote call requested by [`update`](crate::app::update).
///
/// Each effect produces exactly one result [`Message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadAll,
    CreateSection(Draft),
    PersistOrder(Vec<SectionId>),
}

impl Effect {
    /// Result message used when the call could not even be attempted.
    pub fn failed(&self, err: RemoteError) -> Message {
        match self {
            Self::LoadAll => Message::Loaded(Err(err)),
            Self::CreateSection(_) => Message::Created(Err(err)),
            Self::PersistOrder(_) => Message::OrderPersisted(Err(err)),
        }
    }
}

/// Run one effect to completion on the current thread.
pub fn execute(remote: &dyn SectionRemote, effect: Effect) -> Message {
    match effect {
        Effect::LoadAll => Message::Loaded(remote.load_all()),
        Effect::CreateSection(draft) => {
            Message::Created(remote.create_section(&draft.title, &draft.content))
        }
        Effect::PersistOrder(order) => Message::OrderPersisted(remote.persist_order(&order)),
    }
}

/// Run `effect` on a worker thread and send its result message to `tx`.
pub(super) fn spawn(remote: Arc<dyn SectionRemote>, effect: Effect, tx: Sender<Message>) {
    let fallback = tx.clone();
    let failed = effect.failed(RemoteError::Transport("worker thread unavailable".to_string()));
    let spawned = thread::Builder::new()
        .name("sectionist-sync".to_string())
        .spawn(move || {
            let msg = execute(remote.as_ref(), effect);
            // The receiver only goes away when the app is quitting.
            let _ = tx.send(msg);
        });
    if let Err(err) = spawned {
        tracing::error!(%err, "failed to spawn sync worker");
        let _ = fallback.send(failed);
    }
}

impl App {
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        if let Message::Export = msg {
            Self::export(model);
        }
    }

    fn export(model: &mut Model) {
        let sections = model.store.sections();
        match crate::export::write_markdown(&model.output_path, &model.document_title, sections) {
            Ok(()) => {
                tracing::info!(path = %model.output_path.display(), count = sections.len(), "export");
                let text = format!("Exported to {}", model.output_path.display());
                model.show_toast(ToastLevel::Info, text);
            }
            Err(err) => {
                tracing::error!(error = %format!("{err:#}"), "export failed");
                model.show_toast(ToastLevel::Error, format!("Export failed: {err:#}"));
            }
        }
    }
}
