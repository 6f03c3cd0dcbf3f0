//! The wizard controller: sole owner and mutator of a session's journey state.
//!
//! Views never touch the state directly. They call the navigation and
//! submission operations here, then re-render from [`WizardSnapshot`]s when
//! the controller's [`WizardEvent`]s arrive.
//!
//! Re-selecting the active step through [`WizardController::go_to_step`]
//! still emits `StepChanged`; only the clamped `step_forward`/`step_backward`
//! calls at the ends of the journey are silent.

use crate::catalog::{Step, StepCatalog};
use crate::error::{Result, WizardError};
use crate::events::{EventBus, WizardEvent};
use crate::message::Message;
use crate::responder::Responder;
use crate::state::{WizardSnapshot, WizardState};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// What became of a `submit_message` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing changed.
    Ignored,
    /// The user message and the agent's reply were both filed.
    Replied,
    /// The user message was filed but the responder failed or timed out.
    ReplyFailed(String),
}

/// Work captured when a submission begins, resolved without holding the
/// controller so reads stay available while the agent thinks.
pub(crate) struct PendingReply {
    step: usize,
    text: String,
    prompts: Vec<String>,
    responder: Arc<dyn Responder>,
    timeout: Duration,
}

impl PendingReply {
    pub(crate) fn step(&self) -> usize {
        self.step
    }

    pub(crate) async fn resolve(&self) -> std::result::Result<String, String> {
        let call = self.responder.reply(&self.text, &self.prompts);
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(reply)) => Ok(reply),
            Ok(Err(err)) => Err(format!("responder failed: {err}")),
            Err(_) => Err(format!("responder timed out after {}ms", self.timeout.as_millis())),
        }
    }
}

pub struct WizardController {
    session_id: Uuid,
    catalog: Arc<StepCatalog>,
    state: WizardState,
    events: EventBus,
    responder: Arc<dyn Responder>,
    reply_timeout: Duration,
}

impl WizardController {
    pub const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(5);

    /// Start a new session at the first step, seeding the catalog's welcome message.
    pub fn new(catalog: StepCatalog, responder: Arc<dyn Responder>) -> Self {
        let state = WizardState::new(catalog.len(), catalog.welcome());
        let session_id = Uuid::new_v4();
        info!(session = %session_id, steps = catalog.len(), "journey session started");
        Self {
            session_id,
            catalog: Arc::new(catalog),
            state,
            events: EventBus::new(),
            responder,
            reply_timeout: Self::DEFAULT_REPLY_TIMEOUT,
        }
    }

    pub fn with_reply_timeout(mut self, timeout: Duration) -> Self {
        self.reply_timeout = timeout;
        self
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn catalog(&self) -> Arc<StepCatalog> {
        Arc::clone(&self.catalog)
    }

    pub fn step_count(&self) -> usize {
        self.catalog.len()
    }

    pub fn current_step(&self) -> usize {
        self.state.current_step
    }

    pub fn active_step(&self) -> Option<&Step> {
        self.catalog.get(self.state.current_step)
    }

    pub fn subscribe(&mut self) -> UnboundedReceiver<WizardEvent> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        self.state.snapshot()
    }

    pub fn go_to_step(&mut self, index: usize) -> Result<()> {
        let step_count = self.step_count();
        if index >= step_count {
            return Err(WizardError::OutOfRange { index, step_count });
        }
        self.state.current_step = index;
        self.state.log.entry(index).or_default();
        debug!(session = %self.session_id, step = index, "step changed");
        self.events.emit(WizardEvent::StepChanged(index));
        Ok(())
    }

    /// Move to the next step. Returns false, without notifying, at the last step.
    pub fn step_forward(&mut self) -> bool {
        let next = self.state.current_step + 1;
        if next >= self.step_count() {
            return false;
        }
        self.go_to_step(next).is_ok()
    }

    /// Move to the previous step. Returns false, without notifying, at the first step.
    pub fn step_backward(&mut self) -> bool {
        let Some(previous) = self.state.current_step.checked_sub(1) else {
            return false;
        };
        self.go_to_step(previous).is_ok()
    }

    /// Submit a user message on the active step and file the agent's reply.
    pub async fn submit_message(&mut self, text: &str) -> SubmitOutcome {
        let Some(pending) = self.begin_submission(text) else {
            return SubmitOutcome::Ignored;
        };
        let reply = pending.resolve().await;
        self.finish_submission(pending, reply)
    }

    /// Files the user message and bumps progress. `None` for blank input.
    pub(crate) fn begin_submission(&mut self, text: &str) -> Option<PendingReply> {
        if text.trim().is_empty() {
            return None;
        }
        let step = self.state.current_step;
        self.state.append(step, Message::user(text));
        let progress = self.state.advance_progress(step);
        debug!(session = %self.session_id, step, progress, "user message filed");

        let prompts = self
            .catalog
            .get(step)
            .map(|s| s.prompts.clone())
            .unwrap_or_default();
        Some(PendingReply {
            step,
            text: text.to_string(),
            prompts,
            responder: Arc::clone(&self.responder),
            timeout: self.reply_timeout,
        })
    }

    pub(crate) fn finish_submission(
        &mut self,
        pending: PendingReply,
        reply: std::result::Result<String, String>,
    ) -> SubmitOutcome {
        let step = pending.step;
        let outcome = match reply {
            Ok(text) => {
                self.state.append(step, Message::agent(text));
                SubmitOutcome::Replied
            }
            Err(reason) => {
                warn!(session = %self.session_id, step, %reason, "no agent reply filed");
                SubmitOutcome::ReplyFailed(reason)
            }
        };
        self.events.emit(WizardEvent::MessagesChanged(step));
        self.events
            .emit(WizardEvent::ProgressChanged(step, self.state.progress[step]));
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Step;
    use crate::message::MessageOrigin;
    use crate::responder::EchoResponder;
    use async_trait::async_trait;

    struct FailingResponder;

    #[async_trait]
    impl Responder for FailingResponder {
        async fn reply(&self, _submitted: &str, _prompts: &[String]) -> anyhow::Result<String> {
            anyhow::bail!("agent offline")
        }
    }

    struct StalledResponder;

    #[async_trait]
    impl Responder for StalledResponder {
        async fn reply(&self, _submitted: &str, _prompts: &[String]) -> anyhow::Result<String> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok("too late".into())
        }
    }

    fn catalog(steps: usize) -> StepCatalog {
        let steps = (0..steps)
            .map(|i| Step::new(format!("Step {i}"), "", vec![format!("Question {i}?")]))
            .collect();
        StepCatalog::new(steps, Some("Welcome!".into())).unwrap()
    }

    fn controller(steps: usize) -> WizardController {
        WizardController::new(catalog(steps), Arc::new(EchoResponder))
    }

    fn drain(rx: &mut UnboundedReceiver<WizardEvent>) -> Vec<WizardEvent> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    #[test]
    fn go_to_step_moves_and_notifies() {
        let mut wizard = controller(5);
        let mut rx = wizard.subscribe();

        wizard.go_to_step(3).unwrap();
        assert_eq!(wizard.snapshot().current_step, 3);
        assert_eq!(drain(&mut rx), vec![WizardEvent::StepChanged(3)]);
    }

    #[test]
    fn go_to_step_out_of_range_leaves_state_untouched() {
        let mut wizard = controller(5);
        wizard.go_to_step(2).unwrap();
        let mut rx = wizard.subscribe();

        let err = wizard.go_to_step(5).unwrap_err();
        assert!(matches!(err, WizardError::OutOfRange { index: 5, step_count: 5 }));
        assert_eq!(wizard.current_step(), 2);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn reselecting_active_step_still_notifies() {
        let mut wizard = controller(3);
        let mut rx = wizard.subscribe();
        wizard.go_to_step(0).unwrap();
        wizard.go_to_step(0).unwrap();
        assert_eq!(
            drain(&mut rx),
            vec![WizardEvent::StepChanged(0), WizardEvent::StepChanged(0)]
        );
    }

    #[test]
    fn stepping_clamps_at_both_ends_without_notifying() {
        let mut wizard = controller(10);
        let mut rx = wizard.subscribe();

        assert!(!wizard.step_backward());
        assert_eq!(wizard.current_step(), 0);
        assert!(drain(&mut rx).is_empty());

        wizard.go_to_step(9).unwrap();
        drain(&mut rx);
        assert!(!wizard.step_forward());
        assert_eq!(wizard.current_step(), 9);
        assert!(drain(&mut rx).is_empty());

        assert!(wizard.step_backward());
        assert_eq!(wizard.current_step(), 8);
        assert_eq!(drain(&mut rx), vec![WizardEvent::StepChanged(8)]);
    }

    #[tokio::test]
    async fn submit_files_user_then_agent_and_notifies() {
        let mut wizard = controller(3);
        let mut rx = wizard.subscribe();
        let before = wizard.snapshot().messages.len();

        let outcome = wizard.submit_message("We need focus tools").await;
        assert_eq!(outcome, SubmitOutcome::Replied);

        let snapshot = wizard.snapshot();
        assert_eq!(snapshot.messages.len(), before + 2);
        assert_eq!(snapshot.messages[before].origin, MessageOrigin::User);
        assert_eq!(snapshot.messages[before].text, "We need focus tools");
        assert_eq!(snapshot.messages[before + 1].origin, MessageOrigin::Agent);
        assert_eq!(snapshot.messages[before + 1].text, "Question 0?");
        assert_eq!(snapshot.progress[0], 20);
        assert_eq!(
            drain(&mut rx),
            vec![WizardEvent::MessagesChanged(0), WizardEvent::ProgressChanged(0, 20)]
        );
    }

    #[tokio::test]
    async fn blank_submissions_are_ignored() {
        let mut wizard = controller(2);
        let mut rx = wizard.subscribe();
        let before = wizard.snapshot();

        assert_eq!(wizard.submit_message("").await, SubmitOutcome::Ignored);
        assert_eq!(wizard.submit_message("   \t").await, SubmitOutcome::Ignored);

        assert_eq!(wizard.snapshot(), before);
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn progress_caps_at_one_hundred() {
        let mut wizard = controller(2);
        for _ in 0..6 {
            wizard.submit_message("more").await;
        }
        assert_eq!(wizard.snapshot().progress, vec![100, 0]);
    }

    #[tokio::test]
    async fn failed_reply_keeps_user_message_and_still_notifies() {
        let mut wizard = WizardController::new(catalog(2), Arc::new(FailingResponder));
        let mut rx = wizard.subscribe();

        let outcome = wizard.submit_message("hello").await;
        assert!(matches!(outcome, SubmitOutcome::ReplyFailed(ref reason) if reason.contains("agent offline")));

        let snapshot = wizard.snapshot();
        let last = snapshot.messages.last().unwrap();
        assert_eq!(last.origin, MessageOrigin::User);
        assert_eq!(snapshot.progress[0], 20);
        assert_eq!(
            drain(&mut rx),
            vec![WizardEvent::MessagesChanged(0), WizardEvent::ProgressChanged(0, 20)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_reply_times_out() {
        let mut wizard = WizardController::new(catalog(2), Arc::new(StalledResponder))
            .with_reply_timeout(Duration::from_millis(250));

        let outcome = wizard.submit_message("hello").await;
        assert_eq!(
            outcome,
            SubmitOutcome::ReplyFailed("responder timed out after 250ms".into())
        );
        assert_eq!(wizard.snapshot().messages.last().unwrap().text, "hello");
    }

    #[test]
    fn navigation_creates_empty_log_for_new_step() {
        let mut wizard = controller(3);
        wizard.go_to_step(2).unwrap();
        assert!(wizard.state.log.contains_key(&2));
        assert!(wizard.snapshot().messages.is_empty());
        assert_eq!(wizard.active_step().unwrap().name, "Step 2");
    }
}
