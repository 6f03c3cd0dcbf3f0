//! Event plumbing for the terminal front end.
//!
//! Terminal input, controller notifications, finished submissions and a
//! periodic tick are funnelled into one channel so the app loop handles them
//! strictly in arrival order.

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use wayfinder_core::{SharedController, SubmitOutcome, WizardEvent};

/// Everything the app loop reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Key(KeyEvent),
    /// Terminal was resized to new dimensions
    Resize(u16, u16),
    /// Periodic tick, drives the "thinking" indicator
    Tick,
    Wizard(WizardEvent),
    /// The reply to submission `id` was filed, or failed
    Submitted { id: u64, outcome: SubmitOutcome },
}

pub struct EventHandler {
    tx: UnboundedSender<AppEvent>,
    rx: UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    /// Start the terminal reader, the notification forwarder and the ticker.
    pub fn start(wizard: &SharedController, tick: Duration) -> Self {
        let (tx, rx) = unbounded_channel();

        let input_tx = tx.clone();
        tokio::spawn(async move {
            let mut reader = EventStream::new();
            while let Some(Ok(event)) = reader.next().await {
                let app_event = match event {
                    Event::Key(key) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                    Event::Resize(width, height) => AppEvent::Resize(width, height),
                    _ => continue,
                };
                if input_tx.send(app_event).is_err() {
                    break;
                }
            }
        });

        let mut notifications = wizard.subscribe();
        let wizard_tx = tx.clone();
        tokio::spawn(async move {
            while let Some(event) = notifications.recv().await {
                if wizard_tx.send(AppEvent::Wizard(event)).is_err() {
                    break;
                }
            }
        });

        let tick_tx = tx.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            loop {
                interval.tick().await;
                if tick_tx.send(AppEvent::Tick).is_err() {
                    break;
                }
            }
        });

        Self { tx, rx }
    }

    /// Handle for background work to report back on.
    pub fn sender(&self) -> UnboundedSender<AppEvent> {
        self.tx.clone()
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}
