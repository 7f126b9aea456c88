//! Story browser for the components.
//!
//! A [`Story`] is a full-page example of one component configuration. The
//! [`Gallery`] lists them in a sidebar, forwards keys to the current one and
//! records the actions stories report.

mod demo;
mod fixtures;
mod input_stories;
mod table_stories;

use std::collections::VecDeque;
use std::sync::Arc;

use color_eyre::eyre::bail;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, ListItem, Paragraph, Wrap};
use tracing::{debug, info};

use crate::Theme;
use crate::config::{KeyResolver, TableConfig};
use crate::ui::{Component, Handled, Keybinding, List, ListRow, Result};

pub use demo::DemoStory;
pub use input_stories::input_stories;
pub use table_stories::table_stories;

/// Entries kept in the actions panel.
pub const ACTION_LOG_CAPACITY: usize = 50;

const SIDEBAR_WIDTH: u16 = 34;
const ACTIONS_HEIGHT: u16 = 8;

/// Something a story reports to the actions panel, e.g. a selection change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedAction {
    pub name: &'static str,
    pub detail: String,
}

impl LoggedAction {
    pub fn new(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            detail: detail.into(),
        }
    }
}

/// Full-page example of a component.
pub trait Story {
    fn title(&self) -> &'static str;

    /// Sidebar section, usually the component name.
    fn group(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Handle a key event, possibly reporting an action.
    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<LoggedAction>>;

    /// Handle text delivered by a bracketed paste.
    fn handle_paste(&mut self, text: &str) -> Handled<LoggedAction> {
        _ = text;
        Handled::Ignored
    }

    /// Called on each tick for animations.
    fn on_tick(&mut self) {}

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Key hints shown in the footer while this story is active.
    fn keybindings(&self) -> Vec<Keybinding> {
        vec![]
    }
}

/// `group/title`, the name used by `--story` and the saved config.
pub fn story_id(story: &dyn Story) -> String {
    format!("{}/{}", story.group(), story.title())
}

#[derive(Clone)]
struct StoryRow {
    group: &'static str,
    title: &'static str,
}

impl ListRow for StoryRow {
    fn render_row(&self, theme: &Theme) -> ListItem<'static> {
        ListItem::new(Line::from(vec![
            Span::styled(format!("{} ", self.group), Style::default().fg(theme.overlay0())),
            Span::styled(self.title, Style::default().fg(theme.text())),
        ]))
    }
}

/// Build every story in sidebar order.
pub fn all_stories(
    config: &TableConfig,
    resolver: &Arc<KeyResolver>,
    custom: Option<Vec<serde_json::Value>>,
) -> Result<Vec<Box<dyn Story>>> {
    let mut stories = table_stories(config, resolver, custom)?;
    stories.extend(input_stories(resolver));
    stories.push(Box::new(DemoStory::new(config, resolver)?));
    Ok(stories)
}

pub struct Gallery {
    stories: Vec<Box<dyn Story>>,
    sidebar: List<StoryRow>,
    current: usize,
    actions: VecDeque<LoggedAction>,
}

impl Gallery {
    pub fn new(stories: Vec<Box<dyn Story>>) -> Result<Self> {
        if stories.is_empty() {
            bail!("the gallery needs at least one story");
        }
        let rows = stories
            .iter()
            .map(|story| StoryRow {
                group: story.group(),
                title: story.title(),
            })
            .collect();
        Ok(Self {
            stories,
            sidebar: List::new(rows),
            current: 0,
            actions: VecDeque::with_capacity(ACTION_LOG_CAPACITY),
        })
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    /// 1-based position of the current story.
    pub const fn position(&self) -> usize {
        self.current + 1
    }

    pub fn current(&self) -> &dyn Story {
        self.stories[self.current].as_ref()
    }

    pub fn current_id(&self) -> String {
        story_id(self.current())
    }

    /// Select by `group/title`, or by bare title when that is unambiguous.
    pub fn select_by_name(&mut self, name: &str) -> bool {
        let by_id = self
            .stories
            .iter()
            .position(|s| story_id(s.as_ref()).eq_ignore_ascii_case(name));
        let by_title = || {
            let mut matches = self
                .stories
                .iter()
                .enumerate()
                .filter(|(_, s)| s.title().eq_ignore_ascii_case(name));
            match (matches.next(), matches.next()) {
                (Some((i, _)), None) => Some(i),
                _ => None,
            }
        };
        match by_id.or_else(by_title) {
            Some(index) => {
                self.show(index);
                true
            }
            None => false,
        }
    }

    pub fn next(&mut self) {
        self.show((self.current + 1) % self.stories.len());
    }

    pub fn prev(&mut self) {
        let len = self.stories.len();
        self.show((self.current + len - 1) % len);
    }

    fn show(&mut self, index: usize) {
        if index != self.current {
            self.actions.clear();
        }
        self.current = index;
        self.sidebar.select(index);
        info!("Showing story {}", self.current_id());
    }

    /// Logged actions, oldest first.
    pub fn actions(&self) -> impl ExactSizeIterator<Item = &LoggedAction> {
        self.actions.iter()
    }

    fn log(&mut self, action: LoggedAction) {
        debug!("Action {}: {}", action.name, action.detail);
        if self.actions.len() == ACTION_LOG_CAPACITY {
            self.actions.pop_front();
        }
        self.actions.push_back(action);
    }

    /// Log a reported action, leaving only whether the input was used.
    fn record(&mut self, handled: Handled<LoggedAction>) -> Handled<()> {
        match handled {
            Handled::Event(action) => {
                self.log(action);
                Handled::Consumed
            }
            Handled::Consumed => Handled::Consumed,
            Handled::Ignored => Handled::Ignored,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<()>> {
        let handled = self.stories[self.current].handle_key(key)?;
        Ok(self.record(handled))
    }

    pub fn handle_paste(&mut self, text: &str) -> Handled<()> {
        let handled = self.stories[self.current].handle_paste(text);
        self.record(handled)
    }

    pub fn on_tick(&mut self) {
        self.stories[self.current].on_tick();
    }

    pub fn keybindings(&self) -> Vec<Keybinding> {
        self.current().keybindings()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [sidebar_area, main_area] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
                .areas(area);
        let [header_area, story_area, actions_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(ACTIONS_HEIGHT),
        ])
        .areas(main_area);

        let sidebar_block = panel(" Stories ", theme);
        let inner = sidebar_block.inner(sidebar_area);
        frame.render_widget(sidebar_block, sidebar_area);
        self.sidebar.render(frame, inner, theme);

        self.render_header(frame, header_area, theme);
        self.stories[self.current].render(frame, story_area, theme);
        self.render_actions(frame, actions_area, theme);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let story = self.current();
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("{} / ", story.group()),
                    Style::default().fg(theme.overlay1()),
                ),
                Span::styled(
                    story.title(),
                    Style::default()
                        .fg(theme.mauve())
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                story.description(),
                Style::default().fg(theme.subtext0()),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
    }

    fn render_actions(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = panel(" Actions ", theme);
        let visible = usize::from(block.inner(area).height);
        let skip = self.actions().len().saturating_sub(visible);
        let lines: Vec<Line> = self
            .actions()
            .skip(skip)
            .map(|action| {
                Line::from(vec![
                    Span::styled(action.name, Style::default().fg(theme.peach())),
                    Span::raw(" "),
                    Span::styled(action.detail.clone(), Style::default().fg(theme.subtext1())),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

fn panel<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border()))
        .title(title)
        .title_style(Style::default().fg(theme.overlay1()))
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    struct Echo(&'static str);

    impl Story for Echo {
        fn title(&self) -> &'static str {
            self.0
        }

        fn group(&self) -> &'static str {
            "Test"
        }

        fn description(&self) -> &'static str {
            ""
        }

        fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<LoggedAction>> {
            Ok(match key.code {
                KeyCode::Char(c) => LoggedAction::new("key", c.to_string()).into(),
                _ => Handled::Ignored,
            })
        }

        fn handle_paste(&mut self, text: &str) -> Handled<LoggedAction> {
            LoggedAction::new("paste", text).into()
        }

        fn render(&mut self, _frame: &mut Frame, _area: Rect, _theme: &Theme) {}
    }

    fn gallery() -> Gallery {
        Gallery::new(vec![Box::new(Echo("One")), Box::new(Echo("Two"))]).unwrap()
    }

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_navigation_wraps() {
        let mut gallery = gallery();
        gallery.prev();
        assert_eq!(gallery.current().title(), "Two");
        gallery.next();
        assert_eq!(gallery.position(), 1);
    }

    #[test]
    fn test_select_by_name() {
        let mut gallery = gallery();
        assert!(gallery.select_by_name("test/two"));
        assert_eq!(gallery.current_id(), "Test/Two");
        assert!(gallery.select_by_name("one"));
        assert!(!gallery.select_by_name("three"));
        assert_eq!(gallery.current().title(), "One");
    }

    #[test]
    fn test_action_log_is_bounded() {
        let mut gallery = gallery();
        for _ in 0..ACTION_LOG_CAPACITY + 5 {
            gallery.handle_key(key('x')).unwrap();
        }
        assert_eq!(gallery.actions().count(), ACTION_LOG_CAPACITY);

        gallery.next();
        assert_eq!(gallery.actions().count(), 0);
        let handled = gallery.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(!handled.unwrap().is_consumed());
    }

    #[test]
    fn test_paste_is_logged_once() {
        let mut gallery = gallery();
        assert!(gallery.handle_paste("two words").is_consumed());
        let logged: Vec<_> = gallery.actions().collect();
        assert_eq!(logged, [&LoggedAction::new("paste", "two words")]);
    }

    #[test]
    fn test_empty_gallery_is_an_error() {
        assert!(Gallery::new(Vec::new()).is_err());
    }

    #[test]
    fn test_all_stories_have_unique_ids() {
        let stories = all_stories(
            &TableConfig::default(),
            &Arc::new(KeyResolver::default()),
            None,
        )
        .unwrap();
        let mut ids: Vec<String> = stories.iter().map(|s| story_id(s.as_ref())).collect();
        let count = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), count);
        assert_eq!(count, 17);
    }
}
