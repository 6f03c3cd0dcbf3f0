use ratatui::{
    prelude::{Alignment, Constraint, Direction, Frame, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::sync::Arc;
use wayfinder_core::{
    slider::CardSlider,
    theme::{Element, Theme},
    Result, StepCatalog,
};

/// Browse the stages one card at a time. Wraps at both ends and never
/// touches the journey until a card is opened.
pub struct CardsView {
    catalog: Arc<StepCatalog>,
    slider: CardSlider,
}

impl CardsView {
    pub fn new(catalog: Arc<StepCatalog>) -> Result<Self> {
        let slider = CardSlider::new(catalog.len())?;
        Ok(Self { catalog, slider })
    }

    pub fn next(&mut self) {
        self.slider.next();
    }

    pub fn prev(&mut self) {
        self.slider.prev();
    }

    pub fn selected(&self) -> usize {
        self.slider.current()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(step) = self.catalog.get(self.slider.current()) else {
            return;
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(10),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(20),
                Constraint::Percentage(60),
                Constraint::Percentage(20),
            ])
            .split(rows[1]);

        let card = Block::new()
            .borders(Borders::ALL)
            .title(format!(" {} / {} ", step.index + 1, self.catalog.len()))
            .style(theme.ratatui_style(Element::Text));
        let body = vec![
            Line::styled(step.name.clone(), theme.ratatui_style(Element::Title)),
            Line::raw(""),
            Line::styled(step.description.clone(), theme.ratatui_style(Element::Text)),
            Line::raw(""),
            Line::styled(step.agent_label(), theme.ratatui_style(Element::Info)),
        ];
        frame.render_widget(
            Paragraph::new(body)
                .block(card)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            columns[1],
        );

        let dots: Vec<Span> = (0..self.slider.len())
            .map(|i| {
                if i == self.slider.current() {
                    Span::styled("● ", theme.ratatui_style(Element::Accent))
                } else {
                    Span::styled("○ ", theme.ratatui_style(Element::Inactive))
                }
            })
            .collect();
        frame.render_widget(
            Paragraph::new(Line::from(dots)).alignment(Alignment::Center),
            rows[2],
        );
    }
}
