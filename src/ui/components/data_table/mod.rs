//! Sortable, selectable table over caller-owned records.
//!
//! The table keeps two pieces of view state on top of the records it is given:
//! a [`SortState`] that derives the display order, and a [`Selection`] keyed by
//! record identity. Neither ever reorders or mutates the caller's records.

mod column;
mod selection;
mod sort;
mod value;

use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use tracing::debug;

pub use column::{Column, TableRecord, infer_columns, validate_columns};
pub use selection::{ReconcilePolicy, RecordId, Selection};
pub use sort::{SortCache, SortDirection, SortIndicator, SortState, sorted_order};
pub use value::{MISSING_PLACEHOLDER, Value};

use crate::Theme;
use crate::config::{KeyResolver, NavAction, TableAction};
use crate::ui::widgets::Spinner;
use crate::ui::{Component, Handled, Result};

const LOADING_LABEL: &str = "Loading...";
const EMPTY_MESSAGE: &str = "No data available";
const CHECKBOX_WIDTH: u16 = 3;
const DEFAULT_PAGE_SIZE: usize = 10;

pub enum TableEvent<R> {
    SortChanged(SortState),
    SelectionChanged(Vec<Arc<R>>),
    Activated(Arc<R>),
}

/// One populated row, in display order.
pub struct RowView<'a, R> {
    pub record: &'a Arc<R>,
    pub selected: bool,
    pub cells: Vec<String>,
}

/// What the table body shows. Loading wins over empty, empty over rows.
pub enum TableBody<'a, R> {
    Loading,
    Empty,
    Rows(Vec<RowView<'a, R>>),
}

/// Header affordance of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell<'a> {
    pub title: &'a str,
    /// `None` for columns that cannot be sorted.
    pub indicator: Option<SortIndicator>,
    pub focused: bool,
}

pub struct DataTable<R: TableRecord> {
    records: Vec<Arc<R>>,
    /// Bumped whenever `records` is replaced; keys the sort cache.
    generation: u64,
    columns: Vec<Column>,
    sort: SortState,
    cache: SortCache,
    selection: Selection<R>,
    reconcile: ReconcilePolicy,
    loading: bool,
    selectable: bool,
    focused: bool,
    /// Index into `columns` of the header the sort key acts on.
    focused_column: Option<usize>,
    page_size: usize,
    state: TableState,
    title: Option<String>,
    spinner: Spinner,
    resolver: Arc<KeyResolver>,
}

impl<R: TableRecord> DataTable<R> {
    pub fn new(columns: Vec<Column>, resolver: Arc<KeyResolver>) -> Result<Self> {
        validate_columns(&columns)?;
        let focused_column = columns.iter().position(Column::is_sortable);
        Ok(Self {
            records: Vec::new(),
            generation: 0,
            columns,
            sort: SortState::default(),
            cache: SortCache::default(),
            selection: Selection::new(),
            reconcile: ReconcilePolicy::default(),
            loading: false,
            selectable: false,
            focused: true,
            focused_column,
            page_size: DEFAULT_PAGE_SIZE,
            state: TableState::default(),
            title: None,
            spinner: Spinner::new().with_label(LOADING_LABEL),
            resolver,
        })
    }

    #[must_use]
    pub fn with_records(mut self, records: Vec<Arc<R>>) -> Self {
        self.set_records(records);
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub const fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    #[must_use]
    pub const fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    #[must_use]
    pub const fn with_reconcile(mut self, policy: ReconcilePolicy) -> Self {
        self.reconcile = policy;
        self
    }

    #[must_use]
    pub const fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Register the selection-change callback.
    #[must_use]
    pub fn on_select(mut self, listener: impl FnMut(&[Arc<R>]) + 'static) -> Self {
        self.selection.set_listener(listener);
        self
    }

    /// Replace the collection.
    ///
    /// The selection is only reconciled against the new records under
    /// [`ReconcilePolicy::Prune`].
    pub fn set_records(&mut self, records: Vec<Arc<R>>) {
        self.records = records;
        self.generation = self.generation.wrapping_add(1);
        if self.reconcile == ReconcilePolicy::Prune && self.selection.retain_in(&self.records) {
            debug!("Pruned stale selection, {} selected", self.selection.len());
        }

        if self.records.is_empty() {
            self.state.select(None);
        } else if self
            .state
            .selected()
            .is_none_or(|i| i >= self.records.len())
        {
            self.state.select(Some(0));
        }
    }

    pub fn records(&self) -> &[Arc<R>] {
        &self.records
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub const fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub const fn set_selectable(&mut self, selectable: bool) {
        self.selectable = selectable;
    }

    pub const fn is_selectable(&self) -> bool {
        self.selectable
    }

    pub const fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub const fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// Indices into [`Self::records`] in display order.
    pub fn display_order(&mut self) -> &[usize] {
        self.cache.order(self.generation, &self.records, &self.sort)
    }

    /// Toggle sorting on the column with `key`.
    ///
    /// Unknown and non-sortable columns are left alone and return `false`.
    /// The cursor stays on the record it was on.
    pub fn toggle_sort(&mut self, key: &str) -> bool {
        let Some(column) = self.columns.iter().find(|c| c.key() == key) else {
            return false;
        };
        if !column.is_sortable() {
            return false;
        }
        let field = column.field_ref().to_string();

        let current = self.current_record();
        self.sort.toggle(&field);
        debug!("Sorting by {} {:?}", field, self.sort.direction());
        if let Some(record) = current {
            let id = RecordId::of(&record);
            let records = &self.records;
            let position = self
                .cache
                .order(self.generation, records, &self.sort)
                .iter()
                .position(|&i| RecordId::of(&records[i]) == id);
            self.state.select(position);
        }
        true
    }

    pub fn toggle_row(&mut self, record: &Arc<R>) -> Vec<Arc<R>> {
        let selected = self.selection.toggle(record).to_vec();
        debug!("Toggled row, {} selected", selected.len());
        selected
    }

    /// Select every record, or clear the selection if everything is already selected.
    pub fn select_all(&mut self) -> Vec<Arc<R>> {
        let selected = self.selection.toggle_all(&self.records).to_vec();
        debug!("Toggled all rows, {} selected", selected.len());
        selected
    }

    pub fn clear_selection(&mut self) -> Vec<Arc<R>> {
        self.selection.clear().to_vec()
    }

    pub fn selected(&self) -> &[Arc<R>] {
        self.selection.members()
    }

    pub fn is_selected(&self, record: &Arc<R>) -> bool {
        self.selection.contains(record)
    }

    /// Checked state of the header checkbox.
    ///
    /// True whenever the selection is as large as the collection, including
    /// the empty case.
    pub fn all_selected(&self) -> bool {
        self.selection.len() == self.records.len()
    }

    /// Record under the cursor, in display order.
    pub fn current_record(&mut self) -> Option<Arc<R>> {
        let selected = self.state.selected()?;
        let records = &self.records;
        self.cache
            .order(self.generation, records, &self.sort)
            .get(selected)
            .map(|&i| Arc::clone(&records[i]))
    }

    pub fn headers(&self) -> Vec<HeaderCell<'_>> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| HeaderCell {
                title: column.title(),
                indicator: column
                    .is_sortable()
                    .then(|| self.sort.indicator(column.field_ref())),
                focused: self.focused_column == Some(i),
            })
            .collect()
    }

    pub fn body(&mut self) -> TableBody<'_, R> {
        if self.loading {
            return TableBody::Loading;
        }
        if self.records.is_empty() {
            return TableBody::Empty;
        }

        let order = self.cache.order(self.generation, &self.records, &self.sort);
        let rows = order
            .iter()
            .map(|&i| {
                let record = &self.records[i];
                RowView {
                    record,
                    selected: self.selection.contains(record),
                    cells: self
                        .columns
                        .iter()
                        .map(|column| record.field(column.field_ref()).to_string())
                        .collect(),
                }
            })
            .collect();
        TableBody::Rows(rows)
    }

    fn has_rows(&self) -> bool {
        !self.loading && !self.records.is_empty()
    }

    fn sort_focused(&mut self) -> Option<SortState> {
        let index = self.focused_column?;
        let key = self.columns[index].key().to_string();
        self.toggle_sort(&key).then(|| self.sort.clone())
    }

    fn move_column_focus(&mut self, forward: bool) -> bool {
        let sortable: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_sortable())
            .map(|(i, _)| i)
            .collect();
        if sortable.is_empty() {
            return false;
        }
        let current = self
            .focused_column
            .and_then(|f| sortable.iter().position(|&i| i == f))
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % sortable.len()
        } else {
            (current + sortable.len() - 1) % sortable.len()
        };
        self.focused_column = Some(sortable[next]);
        true
    }

    fn select_row(&mut self, index: usize) {
        if !self.records.is_empty() {
            self.state.select(Some(index.min(self.records.len() - 1)));
        }
    }

    fn handle_selection_key(&mut self, key: &KeyEvent) -> Option<Handled<TableEvent<R>>> {
        if self.resolver.matches_table(key, TableAction::ToggleRow) {
            if !self.has_rows() {
                return Some(Handled::Consumed);
            }
            let record = self.current_record()?;
            return Some(TableEvent::SelectionChanged(self.toggle_row(&record)).into());
        }
        if self.resolver.matches_table(key, TableAction::SelectAll) {
            return Some(TableEvent::SelectionChanged(self.select_all()).into());
        }
        if self.resolver.matches_table(key, TableAction::ClearSelection) {
            return Some(TableEvent::SelectionChanged(self.clear_selection()).into());
        }
        None
    }

    fn handle_sort_key(&mut self, key: &KeyEvent) -> Option<Handled<TableEvent<R>>> {
        if self.resolver.matches_table(key, TableAction::Sort) {
            return Some(
                self.sort_focused()
                    .map_or(Handled::Consumed, |sort| TableEvent::SortChanged(sort).into()),
            );
        }
        if self.resolver.matches_table(key, TableAction::NextColumn) {
            return self.move_column_focus(true).then_some(Handled::Consumed);
        }
        if self.resolver.matches_table(key, TableAction::PrevColumn) {
            return self.move_column_focus(false).then_some(Handled::Consumed);
        }
        None
    }

    fn handle_navigation_key(&mut self, key: &KeyEvent) -> Handled<TableEvent<R>> {
        if !self.has_rows() {
            return Handled::Ignored;
        }
        let last = self.records.len() - 1;
        let selected = self.state.selected().unwrap_or(0);

        if self.resolver.matches_nav(key, NavAction::Down) {
            self.select_row((selected + 1).min(last));
        } else if self.resolver.matches_nav(key, NavAction::Up) {
            self.select_row(selected.saturating_sub(1));
        } else if self.resolver.matches_nav(key, NavAction::Home) {
            self.select_row(0);
        } else if self.resolver.matches_nav(key, NavAction::End) {
            self.select_row(last);
        } else if self.resolver.matches_nav(key, NavAction::PageDown) {
            self.select_row(selected + self.page_size);
        } else if self.resolver.matches_nav(key, NavAction::PageUp) {
            self.select_row(selected.saturating_sub(self.page_size));
        } else if self.resolver.matches_nav(key, NavAction::Select) {
            return self
                .current_record()
                .map_or(Handled::Ignored, |record| TableEvent::Activated(record).into());
        } else {
            return Handled::Ignored;
        }
        Handled::Consumed
    }

    fn widths(&self) -> Vec<Constraint> {
        let checkbox = self
            .selectable
            .then_some(Constraint::Length(CHECKBOX_WIDTH));
        checkbox
            .into_iter()
            .chain(self.columns.iter().map(Column::constraint))
            .collect()
    }

    fn header_row(&self, theme: &Theme) -> Row<'static> {
        let title_style = Style::default()
            .fg(theme.header())
            .add_modifier(Modifier::BOLD);
        let focus_style = title_style
            .fg(theme.mauve())
            .add_modifier(Modifier::UNDERLINED);

        let checkbox = self
            .selectable
            .then(|| Cell::from(checkbox(self.all_selected())).style(title_style));
        let titles = self.headers().into_iter().map(|header| {
            let text = header.indicator.map_or_else(
                || header.title.to_string(),
                |indicator| format!("{} {}", header.title, indicator.symbol()),
            );
            let style = if header.focused && self.focused {
                focus_style
            } else {
                title_style
            };
            Cell::from(text).style(style)
        });

        Row::new(checkbox.into_iter().chain(titles).collect::<Vec<_>>())
            .height(1)
            .style(Style::default().bg(theme.surface0()))
    }

    fn body_rows(&mut self, theme: &Theme) -> Option<Vec<Row<'static>>> {
        let selectable = self.selectable;
        let TableBody::Rows(rows) = self.body() else {
            return None;
        };
        Some(
            rows.into_iter()
                .map(|row| {
                    let checkbox = selectable.then(|| {
                        Cell::from(checkbox(row.selected))
                            .style(Style::default().fg(theme.success()))
                    });
                    let cells = row.cells.into_iter().map(Cell::from);
                    Row::new(checkbox.into_iter().chain(cells).collect::<Vec<_>>())
                        .style(Style::default().fg(theme.text()))
                })
                .collect(),
        )
    }
}

const fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

impl<R: TableRecord> Component for DataTable<R> {
    type Output = TableEvent<R>;

    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<Self::Output>> {
        if self.selectable
            && let Some(handled) = self.handle_selection_key(&key)
        {
            return Ok(handled);
        }
        if let Some(handled) = self.handle_sort_key(&key) {
            return Ok(handled);
        }
        Ok(self.handle_navigation_key(&key))
    }

    fn on_tick(&mut self) {
        if self.loading {
            self.spinner.on_tick();
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut inner = area;
        if let Some(title) = &self.title {
            let border = if self.focused {
                theme.border_focused()
            } else {
                theme.border()
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(border))
                .title(format!(" {title} "))
                .title_style(
                    Style::default()
                        .fg(theme.mauve())
                        .add_modifier(Modifier::BOLD),
                );
            inner = block.inner(area);
            frame.render_widget(block, area);
        }

        let header = self.header_row(theme);
        let widths = self.widths();

        if let Some(rows) = self.body_rows(theme) {
            let table = Table::new(rows, widths)
                .header(header)
                .row_highlight_style(
                    Style::default()
                        .bg(theme.selection_bg())
                        .fg(theme.lavender())
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("▶ ");
            frame.render_stateful_widget(table, inner, &mut self.state);
            return;
        }

        let [header_area, body_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
        frame.render_widget(Table::new(Vec::<Row>::new(), widths).header(header), header_area);

        if self.loading {
            self.spinner.render(frame, body_area, theme);
        } else {
            let empty = Paragraph::new(EMPTY_MESSAGE)
                .style(Style::default().fg(theme.subtext0()))
                .centered();
            let message_area =
                body_area.centered(Constraint::Percentage(100), Constraint::Length(1));
            frame.render_widget(empty, message_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell as StdCell;
    use std::rc::Rc;

    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    use super::*;

    struct Person {
        id: i64,
        name: &'static str,
    }

    impl TableRecord for Person {
        fn field(&self, name: &str) -> Value {
            match name {
                "id" => self.id.into(),
                "name" => self.name.into(),
                _ => Value::Missing,
            }
        }
    }

    fn people() -> Vec<Arc<Person>> {
        [(3, "C"), (1, "A"), (2, "B")]
            .into_iter()
            .map(|(id, name)| Arc::new(Person { id, name }))
            .collect()
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("id", "ID").sortable(),
            Column::new("name", "Name").sortable(),
            Column::new("note", "Note"),
        ]
    }

    fn table() -> DataTable<Person> {
        DataTable::new(columns(), Arc::new(KeyResolver::default()))
            .unwrap()
            .with_records(people())
    }

    fn visible_names(table: &mut DataTable<Person>) -> Vec<&'static str> {
        match table.body() {
            TableBody::Rows(rows) => rows.iter().map(|row| row.record.name).collect(),
            _ => Vec::new(),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn render(table: &mut DataTable<Person>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|frame| table.render(frame, frame.area(), &theme))
            .unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    fn buffer_to_string(buf: &Buffer) -> String {
        let mut lines = Vec::new();
        for y in 0..buf.area.height {
            let mut line = String::new();
            for x in 0..buf.area.width {
                line.push_str(buf[(x, y)].symbol());
            }
            lines.push(line);
        }
        lines.join("\n")
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let columns = vec![Column::new("id", "ID"), Column::new("id", "Again")];
        assert!(DataTable::<Person>::new(columns, Arc::new(KeyResolver::default())).is_err());
    }

    #[test]
    fn test_sort_scenario() {
        let mut table = table();
        assert_eq!(visible_names(&mut table), ["C", "A", "B"]);

        assert!(table.toggle_sort("name"));
        assert_eq!(visible_names(&mut table), ["A", "B", "C"]);
        assert!(table.toggle_sort("name"));
        assert_eq!(visible_names(&mut table), ["C", "B", "A"]);
        assert_eq!(table.display_order(), [0, 2, 1]);
        assert_eq!(table.records()[0].name, "C");
    }

    #[test]
    fn test_non_sortable_and_unknown_columns_are_ignored() {
        let mut table = table();
        assert!(!table.toggle_sort("note"));
        assert!(!table.toggle_sort("missing"));
        assert_eq!(table.sort_state(), &SortState::default());
    }

    #[test]
    fn test_headers_show_indicators_for_sortable_columns() {
        let mut table = table();
        table.toggle_sort("id");
        let headers = table.headers();
        assert_eq!(headers[0].indicator, Some(SortIndicator::Ascending));
        assert_eq!(headers[1].indicator, Some(SortIndicator::Unsorted));
        assert_eq!(headers[2].indicator, None);
        assert!(headers[0].focused);
    }

    #[test]
    fn test_selection_survives_sorting() {
        let mut table = table().selectable(true);
        let first = Arc::clone(&table.records()[0]);
        table.toggle_row(&first);

        table.toggle_sort("name");
        table.toggle_sort("name");
        assert!(table.is_selected(&first));
        let TableBody::Rows(rows) = table.body() else {
            panic!("expected rows");
        };
        let selected: Vec<_> = rows.iter().filter(|r| r.selected).map(|r| r.record.name).collect();
        assert_eq!(selected, ["C"]);
    }

    #[test]
    fn test_listener_sees_every_change() {
        let calls = Rc::new(StdCell::new(0));
        let counter = Rc::clone(&calls);
        let mut table = table()
            .selectable(true)
            .on_select(move |_| counter.set(counter.get() + 1));

        let record = Arc::clone(&table.records()[0]);
        table.toggle_row(&record);
        assert!(table.toggle_row(&record).is_empty());
        assert_eq!(table.select_all().len(), 3);
        assert!(table.all_selected());
        assert!(table.select_all().is_empty());
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn test_loading_takes_precedence() {
        let mut table = table().loading(true);
        assert!(matches!(table.body(), TableBody::Loading));
        table.set_records(Vec::new());
        assert!(matches!(table.body(), TableBody::Loading));
        table.set_loading(false);
        assert!(matches!(table.body(), TableBody::Empty));
        table.set_records(people());
        assert!(matches!(table.body(), TableBody::Rows(_)));
    }

    #[test]
    fn test_select_all_on_empty_collection() {
        let mut table = DataTable::<Person>::new(columns(), Arc::new(KeyResolver::default()))
            .unwrap()
            .selectable(true);
        assert!(table.all_selected());
        assert!(table.select_all().is_empty());
        assert!(table.selected().is_empty());
    }

    #[test]
    fn test_keyboard_selection() {
        let mut table = table().selectable(true);

        let event = table.handle_key(key(KeyCode::Char(' '))).unwrap().event();
        let Some(TableEvent::SelectionChanged(selected)) = event else {
            panic!("expected selection change");
        };
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "C");

        table.handle_key(key(KeyCode::Char('j'))).unwrap();
        table.handle_key(key(KeyCode::Char(' '))).unwrap();
        assert_eq!(table.selected().len(), 2);

        let event = table.handle_key(key(KeyCode::Char('a'))).unwrap().event();
        assert!(matches!(event, Some(TableEvent::SelectionChanged(ref s)) if s.len() == 3));

        let event = table.handle_key(key(KeyCode::Char('x'))).unwrap().event();
        assert!(matches!(event, Some(TableEvent::SelectionChanged(ref s)) if s.is_empty()));
    }

    #[test]
    fn test_selection_keys_need_selectable() {
        let mut table = table();
        let handled = table.handle_key(key(KeyCode::Char(' '))).unwrap();
        assert!(!handled.is_consumed());
        assert!(table.selected().is_empty());
    }

    #[test]
    fn test_keyboard_sorting_follows_column_focus() {
        let mut table = table();

        let event = table.handle_key(key(KeyCode::Char('s'))).unwrap().event();
        let Some(TableEvent::SortChanged(sort)) = event else {
            panic!("expected sort change");
        };
        assert_eq!(sort.field(), Some("id"));

        // Focus skips the non-sortable "note" column and wraps.
        table.handle_key(key(KeyCode::Char('l'))).unwrap();
        table.handle_key(key(KeyCode::Char('s'))).unwrap();
        assert_eq!(table.sort_state().field(), Some("name"));
        table.handle_key(key(KeyCode::Char('l'))).unwrap();
        assert!(table.headers()[0].focused);
        table.handle_key(key(KeyCode::Left)).unwrap();
        assert!(table.headers()[1].focused);
    }

    #[test]
    fn test_cursor_follows_record_across_sort() {
        let mut table = table();
        table.handle_key(key(KeyCode::Char('j'))).unwrap();
        assert_eq!(table.current_record().unwrap().name, "A");

        table.toggle_sort("name");
        table.toggle_sort("name");
        assert_eq!(table.current_record().unwrap().name, "A");
        assert_eq!(table.state.selected(), Some(2));

        let event = table.handle_key(key(KeyCode::Enter)).unwrap().event();
        assert!(matches!(event, Some(TableEvent::Activated(ref r)) if r.name == "A"));
    }

    #[test]
    fn test_reconcile_policies() {
        let mut keep = table().selectable(true);
        let record = Arc::clone(&keep.records()[0]);
        keep.toggle_row(&record);
        keep.set_records(vec![Arc::new(Person { id: 9, name: "Z" })]);
        assert_eq!(keep.selected().len(), 1);
        // The stale record still counts toward "all selected".
        assert!(keep.all_selected());

        let mut prune = table().selectable(true).with_reconcile(ReconcilePolicy::Prune);
        let kept = Arc::clone(&prune.records()[1]);
        let dropped = Arc::clone(&prune.records()[0]);
        prune.toggle_row(&kept);
        prune.toggle_row(&dropped);
        prune.set_records(vec![Arc::clone(&kept)]);
        assert_eq!(prune.selected().len(), 1);
        assert!(prune.is_selected(&kept));
        assert!(!prune.is_selected(&dropped));
    }

    #[test]
    fn test_render_loading_hides_rows() {
        let mut table = table().loading(true);
        let screen = render(&mut table);
        assert!(screen.contains("Loading..."));
        assert!(!screen.contains(EMPTY_MESSAGE));
        assert!(!screen.contains('▶'));
    }

    #[test]
    fn test_render_empty_and_rows() {
        let mut table = DataTable::<Person>::new(columns(), Arc::new(KeyResolver::default()))
            .unwrap()
            .selectable(true);
        let screen = render(&mut table);
        assert!(screen.contains(EMPTY_MESSAGE));
        assert!(screen.contains("[x]"));

        table.set_records(people());
        table.toggle_sort("name");
        let screen = render(&mut table);
        assert!(screen.contains("ID ↕"));
        assert!(screen.contains("Name ▲"));
        assert!(screen.contains("[ ]"));
        assert!(!screen.contains(EMPTY_MESSAGE));
    }
}
