use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use serde::Serialize;
use tracing::debug;

use crate::Theme;
use crate::config::{KeyResolver, NavAction, StoryAction, TableAction, TableConfig};
use crate::gallery::fixtures;
use crate::gallery::{LoggedAction, Story};
use crate::ui::{
    Column, Component, DataTable, Handled, Keybinding, Result, TableEvent, TableRecord,
    infer_columns,
};

const GROUP: &str = "DataTable";
const MAX_SELECTED_LINES: usize = 6;

/// Selection shared between a table's listener and the panel that shows it.
type SelectedRows<R> = Rc<RefCell<Vec<Arc<R>>>>;

/// A table story with runtime toggles for `loading` and `selectable`.
pub struct TableStory<R: TableRecord + Serialize + 'static> {
    title: &'static str,
    description: &'static str,
    table: DataTable<R>,
    selected: SelectedRows<R>,
    resolver: Arc<KeyResolver>,
}

impl<R: TableRecord + Serialize + 'static> TableStory<R> {
    pub fn new(
        title: &'static str,
        description: &'static str,
        table: DataTable<R>,
        resolver: Arc<KeyResolver>,
    ) -> Self {
        let selected: SelectedRows<R> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&selected);
        let table = table
            .with_title(title)
            .on_select(move |rows| *sink.borrow_mut() = rows.to_vec());
        Self {
            title,
            description,
            table,
            selected,
            resolver,
        }
    }

    fn selected_panel(&self, theme: &Theme) -> Paragraph<'static> {
        let selected = self.selected.borrow();
        let mut lines: Vec<Line> = selected
            .iter()
            .take(MAX_SELECTED_LINES)
            .map(|row| Line::from(serde_json::to_string(&**row).unwrap_or_default()))
            .collect();
        if selected.len() > MAX_SELECTED_LINES {
            lines.push(Line::from(format!(
                "... and {} more",
                selected.len() - MAX_SELECTED_LINES
            )));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border()))
            .title(format!(" Selected ({}) ", selected.len()))
            .title_style(
                Style::default()
                    .fg(theme.green())
                    .add_modifier(Modifier::BOLD),
            );
        Paragraph::new(lines)
            .style(Style::default().fg(theme.subtext1()))
            .block(block)
    }
}

/// Turn a table event into an entry for the actions panel.
pub fn table_action<R: Serialize>(event: TableEvent<R>) -> LoggedAction {
    match event {
        TableEvent::SortChanged(sort) => LoggedAction::new(
            "sort-changed",
            sort.field().map_or_else(
                || "unsorted".to_string(),
                |field| format!("{field} {:?}", sort.direction()),
            ),
        ),
        TableEvent::SelectionChanged(rows) => {
            LoggedAction::new("selection-changed", format!("{} selected", rows.len()))
        }
        TableEvent::Activated(row) => LoggedAction::new(
            "row-activated",
            serde_json::to_string(&*row).unwrap_or_default(),
        ),
    }
}

/// Key hints shared by every table host.
pub fn table_keybindings(resolver: &KeyResolver, selectable: bool) -> Vec<Keybinding> {
    let mut keybindings = vec![
        Keybinding::new(
            format!(
                "{}/{}",
                resolver.display_nav(NavAction::Up),
                resolver.display_nav(NavAction::Down)
            ),
            "Move",
        ),
        Keybinding::new(resolver.display_nav(NavAction::Select), "Open"),
        Keybinding::new(resolver.display_table(TableAction::Sort), "Sort"),
        Keybinding::new(
            format!(
                "{}/{}",
                resolver.display_table(TableAction::PrevColumn),
                resolver.display_table(TableAction::NextColumn)
            ),
            "Column",
        ),
    ];
    if selectable {
        keybindings.extend([
            Keybinding::new(resolver.display_table(TableAction::ToggleRow), "Toggle row"),
            Keybinding::new(resolver.display_table(TableAction::SelectAll), "All"),
            Keybinding::new(resolver.display_table(TableAction::ClearSelection), "Clear"),
        ]);
    }
    keybindings
}

impl<R: TableRecord + Serialize + 'static> Story for TableStory<R> {
    fn title(&self) -> &'static str {
        self.title
    }

    fn group(&self) -> &'static str {
        GROUP
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<LoggedAction>> {
        if self.resolver.matches_story(&key, StoryAction::ToggleLoading) {
            let loading = !self.table.is_loading();
            debug!("{}: loading = {}", self.title, loading);
            self.table.set_loading(loading);
            return Ok(Handled::Consumed);
        }
        if self.resolver.matches_story(&key, StoryAction::ToggleSelectable) {
            let selectable = !self.table.is_selectable();
            debug!("{}: selectable = {}", self.title, selectable);
            self.table.set_selectable(selectable);
            return Ok(Handled::Consumed);
        }
        Ok(self.table.handle_key(key)?.map(table_action))
    }

    fn on_tick(&mut self) {
        self.table.on_tick();
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if !self.table.is_selectable() {
            self.table.render(frame, area, theme);
            return;
        }

        let shown = self.selected.borrow().len().min(MAX_SELECTED_LINES + 1);
        let panel_height = u16::try_from(shown).unwrap_or(0) + 2;
        let [table_area, panel_area] =
            Layout::vertical([Constraint::Min(6), Constraint::Length(panel_height)]).areas(area);
        self.table.render(frame, table_area, theme);
        frame.render_widget(self.selected_panel(theme), panel_area);
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        let mut keybindings = vec![
            Keybinding::new(
                self.resolver.display_story(StoryAction::ToggleLoading),
                "Loading",
            ),
            Keybinding::new(
                self.resolver.display_story(StoryAction::ToggleSelectable),
                "Selectable",
            ),
        ];
        keybindings.extend(table_keybindings(&self.resolver, self.table.is_selectable()));
        keybindings
    }
}

fn story<R: TableRecord + Serialize + 'static>(
    title: &'static str,
    description: &'static str,
    columns: Vec<Column>,
    config: &TableConfig,
    resolver: &Arc<KeyResolver>,
    configure: impl FnOnce(DataTable<R>) -> DataTable<R>,
) -> Result<Box<dyn Story>> {
    let table = DataTable::new(columns, Arc::clone(resolver))?
        .with_reconcile(config.reconcile_selection)
        .with_page_size(config.page_size);
    Ok(Box::new(TableStory::new(
        title,
        description,
        configure(table),
        Arc::clone(resolver),
    )))
}

/// Every table story, in sidebar order.
pub fn table_stories(
    config: &TableConfig,
    resolver: &Arc<KeyResolver>,
    custom: Option<Vec<serde_json::Value>>,
) -> Result<Vec<Box<dyn Story>>> {
    let mut stories = vec![
        story::<fixtures::User>(
            "Default",
            "User table with sortable columns.",
            fixtures::user_columns(),
            config,
            resolver,
            |t| t.with_records(fixtures::users()),
        )?,
        story::<fixtures::User>(
            "With Selection",
            "Row selection enabled. Selected rows are listed below the table.",
            fixtures::user_columns(),
            config,
            resolver,
            |t| t.with_records(fixtures::users()).selectable(true),
        )?,
        story::<fixtures::Product>(
            "With Sorting",
            "Sortable product columns. Move between headers and sort the focused one.",
            fixtures::product_columns(),
            config,
            resolver,
            |t| t.with_records(fixtures::products()),
        )?,
        story::<fixtures::User>(
            "Loading State",
            "Loading hides the rows and shows a spinner, even with data present.",
            fixtures::user_columns(),
            config,
            resolver,
            |t| t.with_records(fixtures::users()).loading(true),
        )?,
        story::<fixtures::User>(
            "Empty State",
            "No records: the empty message replaces the body.",
            fixtures::user_columns(),
            config,
            resolver,
            |t| t,
        )?,
        story::<fixtures::SimpleItem>(
            "Simple Table",
            "Plain columns without sorting or selection.",
            fixtures::simple_columns(),
            config,
            resolver,
            |t| t.with_records(fixtures::simple_items()),
        )?,
        story::<fixtures::User>(
            "All Features",
            "Sorting and selection together.",
            fixtures::user_columns(),
            config,
            resolver,
            |t| t.with_records(fixtures::users()).selectable(true),
        )?,
    ];

    if let Some(records) = custom {
        debug!("Adding custom data story with {} records", records.len());
        let columns = infer_columns(&records);
        let records = records.into_iter().map(Arc::new).collect();
        stories.push(story::<serde_json::Value>(
            "Custom Data",
            "Records loaded from --data, with columns inferred from the first record.",
            columns,
            config,
            resolver,
            |t| t.with_records(records).selectable(true),
        )?);
    }

    Ok(stories)
}
