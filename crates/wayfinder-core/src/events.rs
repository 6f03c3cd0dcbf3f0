//! Change notifications emitted by the controller.
//!
//! Views subscribe once and receive every event emitted afterwards, in
//! emission order. Subscribers whose receiver was dropped are pruned on the
//! next emission.

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardEvent {
    /// The active step changed (or was re-selected).
    StepChanged(usize),
    /// The log of the given step gained messages.
    MessagesChanged(usize),
    /// The given step's progress is now the given percent.
    ProgressChanged(usize, u8),
}

impl WizardEvent {
    pub fn step(&self) -> usize {
        match *self {
            Self::StepChanged(step) | Self::MessagesChanged(step) | Self::ProgressChanged(step, _) => step,
        }
    }
}

#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<UnboundedSender<WizardEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> UnboundedReceiver<WizardEvent> {
        let (tx, rx) = unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn emit(&mut self, event: WizardEvent) {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    #[cfg(test)]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
