use std::sync::Arc;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Theme;
use crate::config::{GlobalAction, KeyResolver};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    pub key: String,
    pub description: String,
}

impl Keybinding {
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
        }
    }
}

/// Footer with the gallery position on the left and key hints on the right.
pub struct StatusBar {
    resolver: Arc<KeyResolver>,
}

impl StatusBar {
    pub const fn new(resolver: Arc<KeyResolver>) -> Self {
        Self { resolver }
    }

    pub fn render_with_keybindings(
        &self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        status: &StatusLine<'_>,
        local_keybindings: &[Keybinding],
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [status_area, hints_area] =
            Layout::horizontal([Constraint::Length(36), Constraint::Min(20)]).areas(inner);

        Self::render_status(frame, status_area, theme, status);

        let hints: Vec<Keybinding> = local_keybindings
            .iter()
            .cloned()
            .chain(self.global_keybindings())
            .collect();
        Self::render_hints(frame, hints_area, theme, &hints);
    }

    fn render_status(frame: &mut Frame, area: Rect, theme: &Theme, status: &StatusLine<'_>) {
        let line = Line::from(vec![
            Span::styled(
                format!("{}/{} ", status.position, status.total),
                Style::default()
                    .fg(theme.lavender())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(status.theme_name.to_string(), Style::default().fg(theme.overlay1())),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_hints(frame: &mut Frame, area: Rect, theme: &Theme, hints: &[Keybinding]) {
        let mut spans = Vec::new();
        for (i, kb) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", Style::default().fg(theme.surface1())));
            }
            spans.push(Span::styled(kb.key.clone(), Style::default().fg(theme.peach())));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                kb.description.clone(),
                Style::default().fg(theme.subtext0()),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    pub fn global_keybindings(&self) -> Vec<Keybinding> {
        vec![
            Keybinding::new(
                format!(
                    "{}/{}",
                    self.resolver.display_global(GlobalAction::PrevStory),
                    self.resolver.display_global(GlobalAction::NextStory)
                ),
                "Story",
            ),
            Keybinding::new(self.resolver.display_global(GlobalAction::Theme), "Theme"),
            Keybinding::new(self.resolver.display_global(GlobalAction::Quit), "Quit"),
        ]
    }
}

/// Left side of the footer.
pub struct StatusLine<'a> {
    pub position: usize,
    pub total: usize,
    pub theme_name: &'a str,
}
