//! Journey state model. Pure data, no I/O.

use crate::message::Message;
use std::collections::HashMap;

/// Percentage points a step gains per submitted message.
pub const PROGRESS_INCREMENT: u8 = 20;
pub const PROGRESS_MAX: u8 = 100;

/// Mutable session state, owned exclusively by the controller.
#[derive(Debug, Clone)]
pub(crate) struct WizardState {
    pub current_step: usize,
    pub progress: Vec<u8>,
    pub log: HashMap<usize, Vec<Message>>,
}

impl WizardState {
    pub fn new(step_count: usize, welcome: Option<&str>) -> Self {
        let mut log = HashMap::new();
        if let Some(text) = welcome {
            log.insert(0, vec![Message::agent(text)]);
        }
        Self {
            current_step: 0,
            progress: vec![0; step_count],
            log,
        }
    }

    pub fn step_count(&self) -> usize {
        self.progress.len()
    }

    pub fn messages(&self, step: usize) -> &[Message] {
        self.log.get(&step).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn append(&mut self, step: usize, message: Message) {
        self.log.entry(step).or_default().push(message);
    }

    /// Raise a step's progress by one increment, saturating at 100.
    pub fn advance_progress(&mut self, step: usize) -> u8 {
        let slot = &mut self.progress[step];
        *slot = slot.saturating_add(PROGRESS_INCREMENT).min(PROGRESS_MAX);
        *slot
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            current_step: self.current_step,
            step_count: self.step_count(),
            progress: self.progress.clone(),
            messages: self.messages(self.current_step).to_vec(),
        }
    }
}

/// Owned, read-only copy of the state handed to views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardSnapshot {
    pub current_step: usize,
    pub step_count: usize,
    pub progress: Vec<u8>,
    /// Log of `current_step` only.
    pub messages: Vec<Message>,
}

impl WizardSnapshot {
    pub fn is_first(&self) -> bool {
        self.current_step == 0
    }

    pub fn is_last(&self) -> bool {
        self.current_step + 1 >= self.step_count
    }

    pub fn progress_of(&self, step: usize) -> u8 {
        self.progress.get(step).copied().unwrap_or(0)
    }

    pub fn is_complete(&self, step: usize) -> bool {
        self.progress_of(step) == PROGRESS_MAX
    }

    /// Mean completion across all steps, rounded down.
    pub fn overall_progress(&self) -> u8 {
        if self.progress.is_empty() {
            return 0;
        }
        let total: usize = self.progress.iter().map(|p| *p as usize).sum();
        (total / self.progress.len()) as u8
    }
}
