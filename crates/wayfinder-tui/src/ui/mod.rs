//! Terminal views for the journey.
//!
//! Each screen region keeps its own copy of the state it draws and refreshes
//! it only when a controller notification it cares about arrives.

pub mod app;
pub mod cards;
pub mod chat;
pub mod footer;
pub mod guide;
pub mod header;
pub mod insights;
pub mod page;
pub mod sidebar;

use wayfinder_core::{SharedController, WizardEvent};

pub trait View {
    /// Whether `event` touches anything this view draws.
    fn wants(&self, event: &WizardEvent) -> bool;

    /// Re-read the slice of state this view draws.
    fn refresh(&mut self, wizard: &SharedController);
}

/// Text gauge such as `████░░░░░░`.
pub fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (percent.min(100) as usize * width) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
