use super::{
    cards::CardsView, chat::ChatView, footer::FooterView, guide::GuideView, header::HeaderView,
    insights::InsightsView, sidebar::SidebarView, View,
};
use crate::ui::app::AppMode;
use ratatui::prelude::{Constraint, Direction, Frame, Layout, Rect};
use strum::{Display, EnumIter, IntoEnumIterator};
use wayfinder_core::{theme::Theme, Result, SharedController, WizardEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter)]
pub enum Page {
    #[default]
    Journey,
    Guide,
    Cards,
}

impl Page {
    pub fn next(self) -> Self {
        let pages: Vec<Page> = Page::iter().collect();
        let position = pages.iter().position(|p| *p == self).unwrap_or(0);
        pages[(position + 1) % pages.len()]
    }
}

/// Transient input the views draw but do not own.
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    pub mode: AppMode,
    pub input: &'a str,
    /// Texts submitted on the displayed step still waiting for a reply.
    pub sending: Vec<&'a str>,
    pub notice: Option<&'a str>,
    pub tick: usize,
}

pub struct Views {
    pub header: HeaderView,
    pub sidebar: SidebarView,
    pub chat: ChatView,
    pub insights: InsightsView,
    pub footer: FooterView,
    pub guide: GuideView,
    pub cards: CardsView,
}

impl Views {
    pub fn new(wizard: &SharedController) -> Result<Self> {
        Ok(Self {
            header: HeaderView::new(wizard),
            sidebar: SidebarView::new(wizard),
            chat: ChatView::new(wizard),
            insights: InsightsView::new(wizard),
            footer: FooterView::new(wizard),
            guide: GuideView::new(wizard),
            cards: CardsView::new(wizard.catalog())?,
        })
    }

    /// Refresh the views that draw something `event` changed. Returns how many did.
    pub fn apply(&mut self, event: &WizardEvent, wizard: &SharedController) -> usize {
        let views: [&mut dyn View; 6] = [
            &mut self.header,
            &mut self.sidebar,
            &mut self.chat,
            &mut self.insights,
            &mut self.footer,
            &mut self.guide,
        ];
        let mut refreshed = 0;
        for view in views {
            if view.wants(event) {
                view.refresh(wizard);
                refreshed += 1;
            }
        }
        refreshed
    }
}

pub fn render_page(frame: &mut Frame, area: Rect, page: Page, views: &Views, ctx: &RenderContext) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(4),
        ])
        .split(area);

    views.header.render(frame, rows[0], ctx.theme);
    match page {
        Page::Journey => render_journey(frame, rows[1], views, ctx),
        Page::Guide => views.guide.render(frame, rows[1], ctx.theme),
        Page::Cards => views.cards.render(frame, rows[1], ctx.theme),
    }
    views.footer.render(
        frame,
        rows[2],
        ctx.theme,
        ctx.mode,
        page,
        ctx.input,
        ctx.notice,
    );
}

fn render_journey(frame: &mut Frame, area: Rect, views: &Views, ctx: &RenderContext) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(30),
            Constraint::Min(30),
            Constraint::Length(28),
        ])
        .split(area);

    views.sidebar.render(frame, columns[0], ctx.theme);
    views
        .chat
        .render(frame, columns[1], ctx.theme, &ctx.sending, ctx.tick);
    views.insights.render(frame, columns[2], ctx.theme);
}
