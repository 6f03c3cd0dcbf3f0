use super::View;
use ratatui::{
    prelude::{Alignment, Frame, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use wayfinder_core::{
    theme::{Element, Theme},
    Message, SharedController, WizardEvent,
};

const SPINNER: [&str; 4] = ["   ", ".  ", ".. ", "..."];

/// Message log of the active step, newest at the bottom.
pub struct ChatView {
    current: usize,
    agent: String,
    messages: Vec<Message>,
}

impl ChatView {
    pub fn new(wizard: &SharedController) -> Self {
        let mut view = Self {
            current: 0,
            agent: String::new(),
            messages: Vec::new(),
        };
        view.refresh(wizard);
        view
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// `sending` holds texts submitted on this step still awaiting a reply.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, sending: &[&str], tick: usize) {
        let block = Block::new()
            .borders(Borders::ALL)
            .title(" 🤖 Conversation ")
            .style(theme.ratatui_style(Element::Text));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let width = bubble_width(inner.width);
        let mut lines = Vec::new();
        for message in &self.messages {
            let style = if message.is_user() {
                theme.ratatui_style(Element::UserBubble)
            } else {
                theme.ratatui_style(Element::AgentBubble)
            };
            let author = if message.is_user() { "You" } else { self.agent.as_str() };
            lines.extend(bubble(
                author,
                &message.clock_label(),
                &message.text,
                message.is_user(),
                width,
                style,
                theme.ratatui_style(Element::Inactive),
            ));
        }

        for text in sending {
            lines.extend(bubble(
                "You",
                "sending",
                text,
                true,
                width,
                theme.ratatui_style(Element::Inactive),
                theme.ratatui_style(Element::Inactive),
            ));
        }
        if !sending.is_empty() {
            lines.push(Line::styled(
                format!("{} is thinking{}", self.agent, SPINNER[tick % SPINNER.len()]),
                theme.ratatui_style(Element::Info),
            ));
        }

        if lines.is_empty() {
            let hint = Paragraph::new(format!("Start the conversation with {}.", self.agent))
                .alignment(Alignment::Center)
                .style(theme.ratatui_style(Element::Inactive));
            frame.render_widget(hint, inner);
            return;
        }

        // Stick to the newest message.
        let overflow = lines.len().saturating_sub(inner.height as usize) as u16;
        frame.render_widget(Paragraph::new(lines).scroll((overflow, 0)), inner);
    }
}

impl View for ChatView {
    fn wants(&self, event: &WizardEvent) -> bool {
        match *event {
            WizardEvent::StepChanged(_) => true,
            WizardEvent::MessagesChanged(step) => step == self.current,
            WizardEvent::ProgressChanged(..) => false,
        }
    }

    fn refresh(&mut self, wizard: &SharedController) {
        let snapshot = wizard.snapshot();
        self.current = snapshot.current_step;
        self.messages = snapshot.messages;
        if let Some(step) = wizard.catalog().get(self.current) {
            self.agent = step.agent_label();
        }
    }
}

fn bubble_width(area_width: u16) -> usize {
    ((area_width as usize) * 3 / 4).max(12)
}

/// Author line followed by the wrapped text; user bubbles hug the right edge.
fn bubble<'a>(
    author: &str,
    when: &str,
    text: &str,
    mine: bool,
    width: usize,
    body: Style,
    meta: Style,
) -> Vec<Line<'a>> {
    let alignment = if mine { Alignment::Right } else { Alignment::Left };
    let mut lines = vec![Line::from(Span::styled(format!("{} · {}", author, when), meta))
        .alignment(alignment)];
    for row in textwrap::wrap(text, width) {
        lines.push(Line::from(Span::styled(format!(" {} ", row), body)).alignment(alignment));
    }
    lines.push(Line::raw(""));
    lines
}
