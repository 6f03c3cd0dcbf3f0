use super::page::{render_page, Page, RenderContext, Views};
use crate::events::{AppEvent, EventHandler};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    prelude::{CrosstermBackend, Terminal},
    widgets::{Block, Borders},
};
use std::io::Stdout;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};
use wayfinder_core::{
    settings::Settings,
    theme::{Element, Theme},
    SharedController, SubmitOutcome,
};

const TICK: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Normal,
    Editing,
}

/// A message whose reply is still pending.
struct Sending {
    id: u64,
    step: usize,
    text: String,
}

pub struct App {
    should_quit: bool,
    theme: Theme,
    settings: Settings,
    wizard: SharedController,
    views: Views,
    mode: AppMode,
    page: Page,
    input: String,
    prompt_cursor: usize,
    sending: Vec<Sending>,
    next_submission: u64,
    notice: Option<String>,
    tick: usize,
}

impl App {
    pub fn new(settings: Settings, wizard: SharedController) -> Result<Self> {
        let theme = Theme::new(settings.theme);
        let views = Views::new(&wizard)?;
        Ok(Self {
            should_quit: false,
            theme,
            settings,
            wizard,
            views,
            mode: AppMode::Normal,
            page: Page::default(),
            input: String::new(),
            prompt_cursor: 0,
            sending: Vec::new(),
            next_submission: 0,
            notice: None,
            tick: 0,
        })
    }

    pub async fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut events = EventHandler::start(&self.wizard, TICK);
        let replies = events.sender();

        self.draw(terminal)?;
        while !self.should_quit {
            let Some(event) = events.next().await else {
                break;
            };
            if self.handle_event(event, &replies) {
                self.draw(terminal)?;
            }
        }
        info!("journey closed");
        Ok(())
    }

    fn draw(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        terminal.draw(|frame| {
            let area = frame.size();
            let background = Block::new()
                .borders(Borders::NONE)
                .style(self.theme.ratatui_style(Element::Background));
            frame.render_widget(background, area);

            let shown_step = self.views.chat.current();
            let ctx = RenderContext {
                theme: &self.theme,
                mode: self.mode,
                input: &self.input,
                sending: self
                    .sending
                    .iter()
                    .filter(|s| s.step == shown_step)
                    .map(|s| s.text.as_str())
                    .collect(),
                notice: self.notice.as_deref(),
                tick: self.tick,
            };
            render_page(frame, area, self.page, &self.views, &ctx);
        })?;
        Ok(())
    }

    /// Returns whether the screen needs redrawing.
    fn handle_event(&mut self, event: AppEvent, replies: &UnboundedSender<AppEvent>) -> bool {
        match event {
            AppEvent::Key(key) => {
                self.handle_key(key, replies);
                true
            }
            AppEvent::Resize(width, height) => {
                debug!("terminal resized to {}x{}", width, height);
                true
            }
            AppEvent::Tick => {
                self.tick = self.tick.wrapping_add(1);
                !self.sending.is_empty()
            }
            AppEvent::Wizard(event) => self.views.apply(&event, &self.wizard) > 0,
            AppEvent::Submitted { id, outcome } => {
                self.sending.retain(|s| s.id != id);
                if let SubmitOutcome::ReplyFailed(reason) = outcome {
                    self.notice = Some(format!("⚠️  No reply: {}", reason));
                }
                true
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent, replies: &UnboundedSender<AppEvent>) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        self.notice = None;

        match self.mode {
            AppMode::Normal => self.handle_normal_key(key.code),
            AppMode::Editing => match key.code {
                KeyCode::Esc => self.mode = AppMode::Normal,
                KeyCode::Enter => self.submit(replies),
                KeyCode::Tab => self.cycle_prompt(),
                KeyCode::Backspace => {
                    self.input.pop();
                }
                KeyCode::Char(c) => self.input.push(c),
                _ => {}
            },
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('g') => self.page = self.page.next(),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(index) = step_for_digit(c) {
                    // Digits past the end of a short catalog have no card to select.
                    if let Err(e) = self.wizard.go_to_step(index) {
                        debug!("ignored navigation: {}", e);
                    }
                }
            }
            _ => match self.page {
                Page::Journey => match code {
                    KeyCode::Left => {
                        self.wizard.step_backward();
                    }
                    KeyCode::Right => {
                        self.wizard.step_forward();
                    }
                    KeyCode::Char('i') | KeyCode::Enter => {
                        self.mode = AppMode::Editing;
                        self.prompt_cursor = 0;
                    }
                    _ => {}
                },
                Page::Guide => match code {
                    KeyCode::Left => {
                        self.wizard.step_backward();
                    }
                    KeyCode::Right => {
                        self.wizard.step_forward();
                    }
                    _ => {}
                },
                Page::Cards => match code {
                    KeyCode::Left => self.views.cards.prev(),
                    KeyCode::Right => self.views.cards.next(),
                    KeyCode::Enter => {
                        let selected = self.views.cards.selected();
                        if self.wizard.go_to_step(selected).is_ok() {
                            self.page = Page::Journey;
                        }
                    }
                    _ => {}
                },
            },
        }
    }

    fn submit(&mut self, replies: &UnboundedSender<AppEvent>) {
        let text = std::mem::take(&mut self.input);
        // Filed now, so navigation before the reply cannot move it.
        let Some(submission) = self.wizard.begin_submission(&text) else {
            return;
        };
        let id = self.next_submission;
        self.next_submission += 1;
        self.sending.push(Sending {
            id,
            step: submission.step(),
            text,
        });

        let replies = replies.clone();
        tokio::spawn(async move {
            let outcome = submission.complete().await;
            let _ = replies.send(AppEvent::Submitted { id, outcome });
        });
    }

    fn cycle_prompt(&mut self) {
        let prompts = self.views.footer.prompts();
        if prompts.is_empty() {
            return;
        }
        let index = self.prompt_cursor % prompts.len();
        self.input = prompts[index].clone();
        self.prompt_cursor = index + 1;
    }

    fn toggle_theme(&mut self) {
        self.theme.toggle();
        self.settings.theme = self.theme.variant();
        if let Err(e) = self.settings.save() {
            warn!("failed to save theme choice: {}", e);
        }
    }
}

/// `1`..`9` select the first nine stages, `0` the tenth.
fn step_for_digit(c: char) -> Option<usize> {
    match c.to_digit(10)? {
        0 => Some(9),
        d => Some(d as usize - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use wayfinder_core::{EchoResponder, StepCatalog, WizardController};

    fn app() -> App {
        let catalog = StepCatalog::design_thinking().unwrap();
        let wizard = SharedController::new(WizardController::new(catalog, Arc::new(EchoResponder)));
        App::new(Settings::default(), wizard).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), &tx);
    }

    fn send_keys(app: &mut App, keys: &str, replies: &UnboundedSender<AppEvent>) {
        for c in keys.chars() {
            let code = if c == '\n' { KeyCode::Enter } else { KeyCode::Char(c) };
            app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), replies);
        }
    }

    #[test]
    fn digits_map_to_stages() {
        assert_eq!(step_for_digit('1'), Some(0));
        assert_eq!(step_for_digit('9'), Some(8));
        assert_eq!(step_for_digit('0'), Some(9));
        assert_eq!(step_for_digit('x'), None);
    }

    #[test]
    fn arrows_navigate_the_journey() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.wizard.current_step(), 2);
        press(&mut app, KeyCode::Char('0'));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.wizard.current_step(), 9);
    }

    #[test]
    fn tab_fills_suggested_prompts_in_turn() {
        let mut app = app();
        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.mode, AppMode::Editing);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.input, "What are users struggling with?");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.input, "What emotions are involved?");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn cards_wrap_without_moving_the_journey_until_opened() {
        let mut app = app();
        press(&mut app, KeyCode::Char('g'));
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.page, Page::Cards);

        press(&mut app, KeyCode::Left);
        assert_eq!(app.views.cards.selected(), 9);
        assert_eq!(app.wizard.current_step(), 0);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.wizard.current_step(), 9);
        assert_eq!(app.page, Page::Journey);
    }

    #[tokio::test]
    async fn blank_input_is_not_sent() {
        let mut app = app();
        press(&mut app, KeyCode::Char('i'));
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Enter);
        assert!(app.sending.is_empty());
        assert_eq!(app.wizard.snapshot().progress[0], 0);
    }

    #[tokio::test]
    async fn message_stays_on_the_stage_it_was_typed_on() {
        let mut app = app();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        send_keys(&mut app, "ihi\n", &tx);
        app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE), &tx);
        app.handle_key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE), &tx);
        assert_eq!(app.wizard.current_step(), 1);

        let submitted = loop {
            match rx.recv().await {
                Some(event @ AppEvent::Submitted { .. }) => break event,
                Some(_) => continue,
                None => panic!("submission never reported back"),
            }
        };
        assert!(matches!(
            submitted,
            AppEvent::Submitted { outcome: SubmitOutcome::Replied, .. }
        ));
        app.handle_event(submitted, &tx);
        assert!(app.sending.is_empty());

        let snapshot = app.wizard.snapshot();
        assert_eq!(snapshot.progress[0], 20);
        assert_eq!(snapshot.progress[1], 0);
        assert!(snapshot.messages.is_empty());

        app.wizard.go_to_step(0).unwrap();
        let texts: Vec<_> = app.wizard.snapshot().messages.into_iter().map(|m| m.text).collect();
        assert_eq!(texts[1..], ["hi", "What are users struggling with?"]);
    }

    #[tokio::test]
    async fn finished_reply_clears_only_its_own_pending_echo() {
        let mut app = app();
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        send_keys(&mut app, "ione\ntwo\n", &tx);
        assert_eq!(app.sending.len(), 2);
        assert!(app.sending.iter().all(|s| s.step == 0));

        let second = app.sending[1].id;
        app.handle_event(
            AppEvent::Submitted {
                id: second,
                outcome: SubmitOutcome::Replied,
            },
            &tx,
        );
        let pending: Vec<_> = app.sending.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(pending, ["one"]);
    }
}
