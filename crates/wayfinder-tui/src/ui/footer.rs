use super::{page::Page, View};
use crate::ui::app::AppMode;
use ratatui::{
    prelude::{Alignment, Frame, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use wayfinder_core::{
    theme::{Element, Theme},
    SharedController, WizardEvent,
};

/// Message input and suggested prompts, or the key bar when not typing.
pub struct FooterView {
    agent: String,
    prompts: Vec<String>,
}

impl FooterView {
    pub fn new(wizard: &SharedController) -> Self {
        let mut view = Self {
            agent: String::new(),
            prompts: Vec::new(),
        };
        view.refresh(wizard);
        view
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        mode: AppMode,
        page: Page,
        input: &str,
        notice: Option<&str>,
    ) {
        let footer_block = Block::default()
            .borders(Borders::ALL)
            .style(theme.ratatui_style(Element::Active));
        let inner_area = footer_block.inner(area);

        let mut content = match mode {
            AppMode::Editing => {
                let display = if input.is_empty() {
                    format!("Message {}... (Enter send, Tab prompt, Esc back)", self.agent)
                } else {
                    input.to_string()
                };
                let input_line = Line::from(vec![
                    Span::styled("💬 ", theme.ratatui_style(Element::Accent)),
                    Span::styled(display, theme.ratatui_style(Element::Text)),
                    Span::styled("_", theme.ratatui_style(Element::Highlight)),
                ]);
                let mut suggestions = vec![Span::styled(
                    "Suggested: ",
                    theme.ratatui_style(Element::Inactive),
                )];
                for (i, prompt) in self.prompts.iter().enumerate() {
                    if i > 0 {
                        suggestions.push(Span::styled(" · ", theme.ratatui_style(Element::Inactive)));
                    }
                    suggestions.push(Span::styled(prompt.as_str(), theme.ratatui_style(Element::Info)));
                }
                vec![input_line, Line::from(suggestions)]
            }
            AppMode::Normal => vec![key_bar(page, theme).alignment(Alignment::Center)],
        };

        if let Some(notice) = notice {
            content.push(
                Line::styled(notice.to_string(), theme.ratatui_style(Element::Warning))
                    .alignment(Alignment::Center),
            );
        }

        let footer_paragraph = Paragraph::new(content).style(theme.ratatui_style(Element::Text));
        frame.render_widget(footer_block, area);
        frame.render_widget(footer_paragraph, inner_area);
    }
}

impl View for FooterView {
    fn wants(&self, event: &WizardEvent) -> bool {
        matches!(event, WizardEvent::StepChanged(_))
    }

    fn refresh(&mut self, wizard: &SharedController) {
        let catalog = wizard.catalog();
        if let Some(step) = catalog.get(wizard.current_step()) {
            self.agent = step.agent_label();
            self.prompts = step.prompts.clone();
        }
    }
}

fn key_bar(page: Page, theme: &Theme) -> Line<'static> {
    let mut entries: Vec<(&str, &str)> = match page {
        Page::Journey => vec![("[←/→]", " Stage"), ("[1-0]", " Jump"), ("[I]", "nput")],
        Page::Guide => vec![("[←/→]", " Stage"), ("[1-0]", " Jump")],
        Page::Cards => vec![("[←/→]", " Card"), ("[Enter]", " Open")],
    };
    entries.extend([("[G]", "o to page"), ("[T]", "heme"), ("[Q]", "uit")]);

    let mut spans = Vec::new();
    for (i, (key, label)) in entries.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" | "));
        }
        spans.push(Span::raw(key));
        spans.push(Span::styled(label, theme.ratatui_style(Element::Inactive)));
    }
    Line::from(spans)
}
