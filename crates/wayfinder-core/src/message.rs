use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageOrigin {
    User,
    Agent,
}

/// A single chat entry in a step's log. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub origin: MessageOrigin,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(origin: MessageOrigin, text: impl Into<String>) -> Self {
        Self {
            origin,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageOrigin::User, text)
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(MessageOrigin::Agent, text)
    }

    pub fn is_user(&self) -> bool {
        self.origin == MessageOrigin::User
    }

    /// Local wall-clock label shown above chat bubbles, e.g. "10:31 AM".
    pub fn clock_label(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%I:%M %p")
            .to_string()
    }
}
