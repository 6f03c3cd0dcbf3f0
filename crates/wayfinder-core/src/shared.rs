//! Thread-safe handle over a single [`WizardController`].
//!
//! Every mutation goes through one mutex, so there is exactly one writer at a
//! time. The lock is never held across an `.await`: a submission files the
//! user message under the lock, releases it while the responder works, then
//! re-acquires it to file the reply.

use crate::catalog::StepCatalog;
use crate::controller::{PendingReply, SubmitOutcome, WizardController};
use crate::error::Result;
use crate::events::WizardEvent;
use crate::state::WizardSnapshot;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc::UnboundedReceiver;

#[derive(Clone)]
pub struct SharedController {
    inner: Arc<Mutex<WizardController>>,
}

impl SharedController {
    pub fn new(controller: WizardController) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, WizardController> {
        // Poisoned locks are recovered, not propagated.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn subscribe(&self) -> UnboundedReceiver<WizardEvent> {
        self.lock().subscribe()
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        self.lock().snapshot()
    }

    pub fn catalog(&self) -> Arc<StepCatalog> {
        self.lock().catalog()
    }

    pub fn current_step(&self) -> usize {
        self.lock().current_step()
    }

    pub fn go_to_step(&self, index: usize) -> Result<()> {
        self.lock().go_to_step(index)
    }

    pub fn step_forward(&self) -> bool {
        self.lock().step_forward()
    }

    pub fn step_backward(&self) -> bool {
        self.lock().step_backward()
    }

    /// Files the user message and bumps progress on the active step right
    /// away. The returned [`Submission`] owes the agent's reply. `None` for
    /// blank input.
    pub fn begin_submission(&self, text: &str) -> Option<Submission> {
        let pending = self.lock().begin_submission(text)?;
        Some(Submission {
            wizard: self.clone(),
            pending,
        })
    }

    pub async fn submit_message(&self, text: &str) -> SubmitOutcome {
        match self.begin_submission(text) {
            Some(submission) => submission.complete().await,
            None => SubmitOutcome::Ignored,
        }
    }
}

/// A submission whose user half is already filed.
pub struct Submission {
    wizard: SharedController,
    pending: PendingReply,
}

impl Submission {
    /// The step the message was filed on; the reply lands there too.
    pub fn step(&self) -> usize {
        self.pending.step()
    }

    /// Waits for the responder without holding the controller, then files
    /// the reply and emits `MessagesChanged` and `ProgressChanged`.
    pub async fn complete(self) -> SubmitOutcome {
        let reply = self.pending.resolve().await;
        self.wizard.lock().finish_submission(self.pending, reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Step;
    use crate::message::MessageOrigin;
    use crate::responder::Responder;
    use async_trait::async_trait;
    use std::time::Duration;

    struct SlowResponder;

    #[async_trait]
    impl Responder for SlowResponder {
        async fn reply(&self, submitted: &str, _prompts: &[String]) -> anyhow::Result<String> {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Ok(format!("re: {submitted}"))
        }
    }

    fn shared() -> SharedController {
        let steps = vec![
            Step::new("Empathize", "", vec!["Why?".into()]),
            Step::new("Define", "", vec!["What?".into()]),
        ];
        let catalog = StepCatalog::new(steps, None).unwrap();
        SharedController::new(WizardController::new(catalog, Arc::new(SlowResponder)))
    }

    #[tokio::test(start_paused = true)]
    async fn state_stays_readable_while_reply_is_pending() {
        let wizard = shared();
        let task = {
            let wizard = wizard.clone();
            tokio::spawn(async move { wizard.submit_message("focus").await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;

        // User half is visible before the agent answers.
        let snapshot = wizard.snapshot();
        assert_eq!(snapshot.messages.len(), 1);
        assert_eq!(snapshot.messages[0].origin, MessageOrigin::User);
        assert_eq!(snapshot.progress[0], 20);

        assert_eq!(task.await.unwrap(), SubmitOutcome::Replied);
        let snapshot = wizard.snapshot();
        assert_eq!(snapshot.messages.len(), 2);
        assert_eq!(snapshot.messages[1].text, "re: focus");
    }

    #[tokio::test(start_paused = true)]
    async fn reply_is_filed_on_the_step_it_was_asked_on() {
        let wizard = shared();
        let mut rx = wizard.subscribe();
        let task = {
            let wizard = wizard.clone();
            tokio::spawn(async move { wizard.submit_message("on step zero").await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;
        wizard.go_to_step(1).unwrap();
        task.await.unwrap();

        assert!(wizard.snapshot().messages.is_empty());
        wizard.go_to_step(0).unwrap();
        assert_eq!(wizard.snapshot().messages.len(), 2);

        let events: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        assert_eq!(
            events,
            vec![
                WizardEvent::StepChanged(1),
                WizardEvent::MessagesChanged(0),
                WizardEvent::ProgressChanged(0, 20),
                WizardEvent::StepChanged(0),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn begun_submission_is_pinned_to_its_step() {
        let wizard = shared();
        let submission = wizard.begin_submission("pinned").unwrap();
        assert_eq!(submission.step(), 0);
        assert_eq!(wizard.snapshot().progress[0], 20);

        wizard.go_to_step(1).unwrap();
        assert_eq!(submission.complete().await, SubmitOutcome::Replied);

        let snapshot = wizard.snapshot();
        assert_eq!(snapshot.progress, vec![20, 0]);
        assert!(snapshot.messages.is_empty());
        wizard.go_to_step(0).unwrap();
        let texts: Vec<_> = wizard.snapshot().messages.into_iter().map(|m| m.text).collect();
        assert_eq!(texts, vec!["pinned", "re: pinned"]);
    }

    #[tokio::test]
    async fn blank_input_is_ignored_through_the_handle() {
        let wizard = shared();
        assert!(wizard.begin_submission("\t ").is_none());
        assert_eq!(wizard.submit_message("  ").await, SubmitOutcome::Ignored);
        assert!(wizard.snapshot().messages.is_empty());
    }
}
