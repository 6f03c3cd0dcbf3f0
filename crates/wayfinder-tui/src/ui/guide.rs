use super::View;
use ratatui::{
    prelude::{Alignment, Constraint, Direction, Frame, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use wayfinder_core::{
    theme::{Element, Theme},
    SharedController, Step, WizardEvent,
};

/// Onboarding-style walkthrough of the active stage with previous/next.
pub struct GuideView {
    step: Option<Step>,
    step_count: usize,
    is_first: bool,
    is_last: bool,
}

impl GuideView {
    pub fn new(wizard: &SharedController) -> Self {
        let mut view = Self {
            step: None,
            step_count: 0,
            is_first: true,
            is_last: false,
        };
        view.refresh(wizard);
        view
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(step) = &self.step else {
            return;
        };
        let block = Block::new()
            .borders(Borders::ALL)
            .title(format!(" Stage {} of {} ", step.index + 1, self.step_count))
            .style(theme.ratatui_style(Element::Text));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let mut lines = vec![
            Line::styled(step.name.clone(), theme.ratatui_style(Element::Title)),
            Line::styled(step.description.clone(), theme.ratatui_style(Element::Text)),
            Line::raw(""),
            Line::styled(
                format!("Guided by {}", step.agent_label()),
                theme.ratatui_style(Element::Info),
            ),
            Line::raw(""),
            Line::styled("Questions to explore", theme.ratatui_style(Element::Accent)),
        ];
        lines.extend(step.prompts.iter().map(|prompt| {
            Line::from(vec![
                Span::styled("  • ", theme.ratatui_style(Element::Accent)),
                Span::styled(prompt.clone(), theme.ratatui_style(Element::Text)),
            ])
        }));
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), chunks[0]);

        let nav_style = |enabled: bool| {
            if enabled {
                theme.ratatui_style(Element::Accent)
            } else {
                theme.ratatui_style(Element::Inactive)
            }
        };
        let nav = Line::from(vec![
            Span::styled("[←] Previous", nav_style(!self.is_first)),
            Span::raw("    "),
            Span::styled("Next [→]", nav_style(!self.is_last)),
        ]);
        frame.render_widget(Paragraph::new(nav).alignment(Alignment::Center), chunks[1]);
    }
}

impl View for GuideView {
    fn wants(&self, event: &WizardEvent) -> bool {
        matches!(event, WizardEvent::StepChanged(_))
    }

    fn refresh(&mut self, wizard: &SharedController) {
        let snapshot = wizard.snapshot();
        self.step = wizard.catalog().get(snapshot.current_step).cloned();
        self.step_count = snapshot.step_count;
        self.is_first = snapshot.is_first();
        self.is_last = snapshot.is_last();
    }
}
