use async_trait::async_trait;
use rand::seq::IndexedRandom;
use std::time::Duration;

/// Produces the agent's reply to a submitted message.
///
/// Implementations may suspend (the canned responder sleeps to simulate
/// thinking time); the controller bounds the wait with a timeout.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn reply(&self, submitted: &str, prompts: &[String]) -> anyhow::Result<String>;
}

/// Placeholder agent: waits, then echoes the message back with a random
/// follow-up question from the active step.
#[derive(Debug, Clone)]
pub struct CannedResponder {
    delay: Duration,
}

impl CannedResponder {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for CannedResponder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl Responder for CannedResponder {
    async fn reply(&self, submitted: &str, prompts: &[String]) -> anyhow::Result<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(canned_reply(submitted, pick_prompt(prompts)))
    }
}

fn pick_prompt(prompts: &[String]) -> Option<&str> {
    prompts.choose(&mut rand::rng()).map(String::as_str)
}

fn canned_reply(submitted: &str, follow_up: Option<&str>) -> String {
    let opener = format!(
        "That's an interesting point about \"{}\". Let me help you explore this further.",
        submitted
    );
    match follow_up {
        Some(question) => format!("{} {}", opener, question),
        None => opener,
    }
}

/// Deterministic responder: answers with the step's first prompt, or the
/// submitted text when the step has none. Never sleeps.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoResponder;

#[async_trait]
impl Responder for EchoResponder {
    async fn reply(&self, submitted: &str, prompts: &[String]) -> anyhow::Result<String> {
        Ok(prompts
            .first()
            .cloned()
            .unwrap_or_else(|| submitted.to_string()))
    }
}
