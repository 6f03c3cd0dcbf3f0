//! Everforest theme for the journey views.
//!
//! Two variants (dark and light) share one set of semantic elements so the
//! views never name raw colours.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThemeVariant {
    #[default]
    EverforestDark,
    EverforestLight,
}

#[derive(Debug, Clone)]
struct Palette {
    background: Color,
    foreground: Color,
    accent: Color,
    info: Color,
    border: Color,
    selection: Color,
    warning: Color,
    user_bubble: Color,
}

/// Semantic UI elements the views style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Text,
    Title,
    Border,
    /// Selected step card
    Highlight,
    Accent,
    Info,
    Background,
    /// Focused input
    Active,
    Inactive,
    Warning,
    /// Progress gauges
    Progress,
    UserBubble,
    AgentBubble,
}

#[derive(Debug, Clone)]
pub struct Theme {
    variant: ThemeVariant,
    colors: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeVariant::default())
    }
}

impl Theme {
    pub fn new(variant: ThemeVariant) -> Self {
        let colors = match variant {
            ThemeVariant::EverforestDark => Palette {
                background: Color::Rgb(45, 53, 59),    // #2d353b
                foreground: Color::Rgb(211, 198, 170), // #d3c6aa
                accent: Color::Rgb(167, 192, 128),     // #a7c080
                info: Color::Rgb(127, 187, 179),       // #7fbbb3
                border: Color::Rgb(116, 125, 135),     // #747d87
                selection: Color::Rgb(64, 72, 78),     // #40484e
                warning: Color::Rgb(219, 188, 127),    // #dbbc7f
                user_bubble: Color::Rgb(58, 81, 93),   // #3a515d
            },
            ThemeVariant::EverforestLight => Palette {
                background: Color::Rgb(253, 246, 227), // #fdf6e3
                foreground: Color::Rgb(92, 106, 114),  // #5c6a72
                accent: Color::Rgb(141, 161, 1),       // #8da101
                info: Color::Rgb(53, 167, 124),        // #35a77c
                border: Color::Rgb(150, 160, 170),     // #96a0aa
                selection: Color::Rgb(243, 236, 217),  // #f3ecd9
                warning: Color::Rgb(207, 131, 44),     // #cf832c
                user_bubble: Color::Rgb(230, 226, 204), // #e6e2cc
            },
        };

        Self { variant, colors }
    }

    pub fn variant(&self) -> ThemeVariant {
        self.variant
    }

    pub fn toggle(&mut self) {
        let next = match self.variant {
            ThemeVariant::EverforestDark => ThemeVariant::EverforestLight,
            ThemeVariant::EverforestLight => ThemeVariant::EverforestDark,
        };
        *self = Self::new(next);
    }

    pub fn ratatui_style(&self, element: Element) -> Style {
        let base = Style::default().bg(self.colors.background);
        match element {
            Element::Text | Element::Background | Element::AgentBubble => {
                base.fg(self.colors.foreground)
            }
            Element::Title | Element::Accent => {
                base.fg(self.colors.accent).add_modifier(Modifier::BOLD)
            }
            Element::Border | Element::Inactive => base.fg(self.colors.border),
            Element::Highlight => Style::default()
                .fg(self.colors.foreground)
                .bg(self.colors.selection)
                .add_modifier(Modifier::BOLD),
            Element::Active => Style::default()
                .fg(self.colors.accent)
                .bg(self.colors.selection)
                .add_modifier(Modifier::BOLD),
            Element::Info => base.fg(self.colors.info),
            Element::Warning => base.fg(self.colors.warning),
            Element::Progress => Style::default()
                .fg(self.colors.accent)
                .bg(self.colors.selection),
            Element::UserBubble => Style::default()
                .fg(self.colors.foreground)
                .bg(self.colors.user_bubble),
        }
    }
}
