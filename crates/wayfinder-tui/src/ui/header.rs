use super::View;
use ratatui::{
    prelude::{Alignment, Constraint, Direction, Frame, Layout, Rect},
    text::{Line, Span},
    widgets::{block::Title, Block, Borders, Paragraph},
};
use wayfinder_core::{
    theme::{Element, Theme},
    SharedController, WizardEvent,
};

/// Active stage name, its agent and how far along it is.
pub struct HeaderView {
    current: usize,
    step_count: usize,
    name: String,
    agent: String,
    percent: u8,
}

impl HeaderView {
    pub fn new(wizard: &SharedController) -> Self {
        let mut view = Self {
            current: 0,
            step_count: 0,
            name: String::new(),
            agent: String::new(),
            percent: 0,
        };
        view.refresh(wizard);
        view
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::new()
            .borders(Borders::ALL)
            .title(Title::from(" Wayfinder v0.1.0 ").alignment(Alignment::Left))
            .style(theme.ratatui_style(Element::Text));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(28)])
            .split(inner);

        let stage = Line::from(vec![
            Span::styled(
                format!("{} Stage", self.name),
                theme.ratatui_style(Element::Title),
            ),
            Span::styled(
                format!(" :: Chat with {}", self.agent),
                theme.ratatui_style(Element::Inactive),
            ),
        ]);
        frame.render_widget(Paragraph::new(stage), columns[0]);

        let status_style = if self.percent == 100 {
            theme.ratatui_style(Element::Accent)
        } else {
            theme.ratatui_style(Element::Info)
        };
        let status = format!(
            "{}/{} :: {}% Complete",
            self.current + 1,
            self.step_count,
            self.percent
        );
        frame.render_widget(
            Paragraph::new(Span::styled(status, status_style)).alignment(Alignment::Right),
            columns[1],
        );
    }
}

impl View for HeaderView {
    fn wants(&self, event: &WizardEvent) -> bool {
        match *event {
            WizardEvent::StepChanged(_) => true,
            WizardEvent::ProgressChanged(step, _) => step == self.current,
            WizardEvent::MessagesChanged(_) => false,
        }
    }

    fn refresh(&mut self, wizard: &SharedController) {
        let snapshot = wizard.snapshot();
        let catalog = wizard.catalog();
        self.current = snapshot.current_step;
        self.step_count = snapshot.step_count;
        self.percent = snapshot.progress_of(snapshot.current_step);
        if let Some(step) = catalog.get(snapshot.current_step) {
            self.name = step.name.clone();
            self.agent = step.agent_label();
        }
    }
}
