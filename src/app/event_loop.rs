use std::io::stdout;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};

use super::effects;

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or drawing fails.
    /// Remote failures never end the loop; they surface as toasts.
    pub fn run(&self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - sectionist requires an interactive terminal")?;
        let size = terminal.size()?;
        let result = execute!(stdout(), EnableMouseCapture)
            .context("Failed to enable mouse capture")
            .and_then(|()| {
                let mut model = self.initial_model((size.width, size.height));
                self.event_loop(&mut terminal, &mut model)
            });

        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();
        result
    }

    pub(super) fn initial_model(&self, size: (u16, u16)) -> Model {
        let mut model = Model::new(size);
        model.server_url.clone_from(&self.server_url);
        model.document_title.clone_from(&self.document_title);
        model.output_path.clone_from(&self.output_path);
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        update(model, Message::Load)
    }

    /// Apply one message: state transition, local side effects, then hand
    /// any queued remote calls to worker threads.
    fn dispatch(&self, model: &mut Model, msg: Message, tx: &Sender<Message>) {
        tracing::trace!(?msg, "event.message");
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        Self::handle_message_side_effects(model, &side_msg);
        for effect in model.take_effects() {
            effects::spawn(self.remote.clone(), effect, tx.clone());
        }
    }

    fn event_loop(&self, terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let (tx, rx): (Sender<Message>, Receiver<Message>) = mpsc::channel();
        for effect in model.take_effects() {
            effects::spawn(self.remote.clone(), effect, tx.clone());
        }
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            // Remote results
            while let Ok(msg) = rx.try_recv() {
                self.dispatch(model, msg, &tx);
                needs_render = true;
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }

            let poll_ms = if model.pending_requests > 0 { 50 } else { 250 };
            if event::poll(Duration::from_millis(poll_ms))? {
                if let Some(msg) = Self::handle_event(&event::read()?, model) {
                    self.dispatch(model, msg, &tx);
                    needs_render = true;
                }

                // Coalesce bursts (drag motion, key repeat) into a single render.
                while event::poll(Duration::from_millis(0))? {
                    if let Some(msg) = Self::handle_event(&event::read()?, model) {
                        self.dispatch(model, msg, &tx);
                        needs_render = true;
                    }
                }
            }
        }
        Ok(())
    }
}
