use super::View;
use ratatui::{
    prelude::{Frame, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::sync::Arc;
use wayfinder_core::{
    theme::{Element, Theme},
    SharedController, StepCatalog, WizardEvent, WizardSnapshot,
};

/// Right-hand panel: per-stage percentages, overall progress and what to do next.
pub struct InsightsView {
    catalog: Arc<StepCatalog>,
    snapshot: Option<WizardSnapshot>,
}

impl InsightsView {
    pub fn new(wizard: &SharedController) -> Self {
        let mut view = Self {
            catalog: wizard.catalog(),
            snapshot: None,
        };
        view.refresh(wizard);
        view
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::new()
            .borders(Borders::ALL)
            .title(" Project Insights ")
            .style(theme.ratatui_style(Element::Border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(snapshot) = &self.snapshot else {
            return;
        };

        let name_width = (inner.width as usize).saturating_sub(6);
        let mut lines = vec![Line::styled("Overall Progress", theme.ratatui_style(Element::Title))];
        for step in self.catalog.steps() {
            let percent = snapshot.progress_of(step.index);
            let badge_style = if snapshot.is_complete(step.index) {
                theme.ratatui_style(Element::Accent)
            } else {
                theme.ratatui_style(Element::Inactive)
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<width$}", step.name, width = name_width),
                    theme.ratatui_style(Element::Text),
                ),
                Span::styled(format!("{:>4}%", percent), badge_style),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            format!("Journey {}% complete", snapshot.overall_progress()),
            theme.ratatui_style(Element::Info),
        ));
        lines.push(Line::raw(""));
        lines.push(Line::styled("Next Steps", theme.ratatui_style(Element::Title)));
        if let Some(step) = self.catalog.get(snapshot.current_step) {
            let next = if snapshot.is_complete(step.index) {
                if snapshot.is_last() {
                    "→ Review the whole journey".to_string()
                } else {
                    "→ Move on to the next stage".to_string()
                }
            } else {
                format!("→ Complete current {} stage", step.name)
            };
            lines.push(Line::styled(next, theme.ratatui_style(Element::Text)));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl View for InsightsView {
    fn wants(&self, event: &WizardEvent) -> bool {
        matches!(
            event,
            WizardEvent::StepChanged(_) | WizardEvent::ProgressChanged(..)
        )
    }

    fn refresh(&mut self, wizard: &SharedController) {
        self.snapshot = Some(wizard.snapshot());
    }
}
