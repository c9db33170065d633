use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::time::Duration;
use taskboard_api::MutationOutcome;
use taskboard_core::TaskboardResult;
use taskboard_domain::Task;
use tokio::sync::mpsc;

use crate::state::RequestKey;

/// Completion report of a spawned API action.
#[derive(Debug)]
pub enum ApiOutcome {
    Loaded(TaskboardResult<Vec<Task>>),
    Mutated {
        key: RequestKey,
        /// Ticket of the form that submitted the request, if any.
        form_ticket: Option<u64>,
        result: TaskboardResult<MutationOutcome>,
    },
}

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Tick,
    Api(ApiOutcome),
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    tx: mpsc::UnboundedSender<Event>,
    shutdown_tx: mpsc::UnboundedSender<()>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, mut shutdown_rx) = mpsc::unbounded_channel();
        let input_tx = tx.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                    _ = tokio::time::sleep(Duration::from_millis(16)) => {
                        let event = if event::poll(Duration::from_millis(0)).unwrap_or(false) {
                            match event::read() {
                                Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                                    Event::Key(key)
                                }
                                _ => continue,
                            }
                        } else {
                            Event::Tick
                        };
                        if input_tx.send(event).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self {
            rx,
            tx,
            shutdown_tx,
        }
    }

    /// Sender for spawned tasks reporting back into the event loop.
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.tx.clone()
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(());
    }
}
