//! # Wayfinder Core Library
//!
//! Journey logic for Wayfinder, independent of any user interface: the step
//! catalog, the wizard controller that owns a session's state, the change
//! notifications views subscribe to, and the pluggable agent responder.
//!
//! ## Modules
//!
//! - `catalog`: Step definitions and the built-in Design Thinking journey
//! - `controller`: Navigation, message submission and progress tracking
//! - `shared`: Thread-safe controller handle for async front ends
//! - `events`: Change notifications
//! - `responder`: Agent reply strategies
//! - `slider`: Wraparound card cursor
//! - `settings`: Application configuration management
//! - `theme`: UI theming system

pub mod catalog;
pub mod controller;
pub mod error;
pub mod events;
pub mod message;
pub mod responder;
pub mod settings;
pub mod shared;
pub mod slider;
pub mod state;
pub mod theme;

pub use catalog::{Step, StepCatalog};
pub use controller::{SubmitOutcome, WizardController};
pub use error::{Result, WizardError};
pub use events::WizardEvent;
pub use message::{Message, MessageOrigin};
pub use responder::{CannedResponder, EchoResponder, Responder};
pub use shared::{SharedController, Submission};
pub use state::{WizardSnapshot, PROGRESS_INCREMENT};
