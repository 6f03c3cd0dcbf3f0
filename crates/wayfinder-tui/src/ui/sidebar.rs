use super::{progress_bar, View};
use ratatui::{
    prelude::{Frame, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::sync::Arc;
use wayfinder_core::{
    theme::{Element, Theme},
    SharedController, StepCatalog, WizardEvent,
};

const CARD_HEIGHT: usize = 4;
const BAR_WIDTH: usize = 12;

/// Step cards down the left edge: number, name, agent and progress.
pub struct SidebarView {
    catalog: Arc<StepCatalog>,
    current: usize,
    progress: Vec<u8>,
}

impl SidebarView {
    pub fn new(wizard: &SharedController) -> Self {
        let mut view = Self {
            catalog: wizard.catalog(),
            current: 0,
            progress: Vec::new(),
        };
        view.refresh(wizard);
        view
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::new()
            .borders(Borders::ALL)
            .title(" Design Thinking ")
            .style(theme.ratatui_style(Element::Border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = Vec::with_capacity(self.catalog.len() * CARD_HEIGHT);
        for step in self.catalog.steps() {
            let percent = self.progress.get(step.index).copied().unwrap_or(0);
            let active = step.index == self.current;
            let card_style = if active {
                theme.ratatui_style(Element::Highlight)
            } else {
                theme.ratatui_style(Element::Text)
            };
            let mark = if percent == 100 { "✓" } else { "○" };

            lines.push(Line::from(vec![
                Span::styled(format!("{}. {} ", step.index + 1, step.name), card_style),
                Span::styled(mark, theme.ratatui_style(Element::Accent)),
            ]));
            lines.push(Line::styled(
                format!("   {}", step.agent_label()),
                theme.ratatui_style(Element::Inactive),
            ));
            lines.push(Line::from(vec![
                Span::raw("   "),
                Span::styled(
                    progress_bar(percent, BAR_WIDTH),
                    theme.ratatui_style(Element::Progress),
                ),
                Span::styled(format!(" {:>3}%", percent), theme.ratatui_style(Element::Info)),
            ]));
            lines.push(Line::raw(""));
        }

        let offset = scroll_offset(self.current, inner.height as usize);
        let paragraph = Paragraph::new(lines)
            .style(theme.ratatui_style(Element::Text))
            .scroll((offset, 0));
        frame.render_widget(paragraph, inner);
    }
}

impl View for SidebarView {
    fn wants(&self, event: &WizardEvent) -> bool {
        matches!(
            event,
            WizardEvent::StepChanged(_) | WizardEvent::ProgressChanged(..)
        )
    }

    fn refresh(&mut self, wizard: &SharedController) {
        let snapshot = wizard.snapshot();
        self.current = snapshot.current_step;
        self.progress = snapshot.progress;
    }
}

/// First visible row such that the active card is fully on screen.
fn scroll_offset(current: usize, height: usize) -> u16 {
    let card_bottom = (current + 1) * CARD_HEIGHT;
    card_bottom.saturating_sub(height) as u16
}
