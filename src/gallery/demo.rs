//! Both components on one page: a column of inputs beside the user table.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Theme;
use crate::config::{KeyResolver, StoryAction, TableConfig};
use crate::gallery::fixtures::{self, User};
use crate::gallery::input_stories::{FieldColumn, FieldSlot};
use crate::gallery::table_stories::{table_action, table_keybindings};
use crate::gallery::{LoggedAction, Story};
use crate::ui::{
    Appearance, Component, DataTable, Handled, InputField, InputKind, InputSize, InputVariant,
    Keybinding, Result,
};

const INPUT_COLUMN_WIDTH: u16 = 46;
const SELECTED_PANEL_HEIGHT: u16 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Inputs,
    Table,
}

pub struct DemoStory {
    inputs: FieldColumn,
    table: DataTable<User>,
    selected: Rc<RefCell<Vec<Arc<User>>>>,
    pane: Pane,
    resolver: Arc<KeyResolver>,
}

impl DemoStory {
    pub fn new(config: &TableConfig, resolver: &Arc<KeyResolver>) -> Result<Self> {
        let selected = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&selected);
        let mut table = DataTable::new(fixtures::user_columns(), Arc::clone(resolver))?
            .with_title("Data Table")
            .with_records(fixtures::demo_users())
            .with_reconcile(config.reconcile_selection)
            .with_page_size(config.page_size)
            .selectable(true)
            .on_select(move |rows: &[Arc<User>]| *sink.borrow_mut() = rows.to_vec());
        table.set_focused(false);

        let inputs = FieldColumn::new(demo_fields(), Arc::clone(resolver)).without_wrap();

        Ok(Self {
            inputs,
            table,
            selected,
            pane: Pane::Inputs,
            resolver: Arc::clone(resolver),
        })
    }

    fn focus_table(&mut self) {
        self.pane = Pane::Table;
        self.inputs.set_active(false);
        self.table.set_focused(true);
    }

    fn focus_inputs(&mut self, last: bool) {
        self.pane = Pane::Inputs;
        self.table.set_focused(false);
        self.inputs.focus_edge(last);
        self.inputs.set_active(true);
    }

    fn selected_panel(&self, theme: &Theme) -> Paragraph<'static> {
        let selected = self.selected.borrow();
        let lines: Vec<Line> = if selected.is_empty() {
            vec![Line::from(Span::styled(
                "No users selected",
                Style::default()
                    .fg(theme.overlay1())
                    .add_modifier(Modifier::ITALIC),
            ))]
        } else {
            selected
                .iter()
                .map(|user| {
                    Line::from(vec![
                        Span::styled(
                            user.name,
                            Style::default()
                                .fg(theme.text())
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            format!(" ({})", user.role),
                            Style::default().fg(theme.subtext0()),
                        ),
                    ])
                })
                .collect()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border()))
            .title(format!(" Selected Users ({}) ", selected.len()))
            .title_style(
                Style::default()
                    .fg(theme.green())
                    .add_modifier(Modifier::BOLD),
            );
        Paragraph::new(lines).block(block)
    }
}

fn demo_fields() -> Vec<FieldSlot> {
    let outlined = |placeholder: &str| InputField::new().with_placeholder(placeholder);
    vec![
        FieldSlot::new("Outlined Variant (Default)", outlined("Enter text..."))
            .heading("Variants and States"),
        FieldSlot::new(
            "Filled Variant",
            outlined("Filled input field").variant(InputVariant::Filled),
        ),
        FieldSlot::new(
            "Ghost Variant",
            outlined("Ghost input field").variant(InputVariant::Ghost),
        ),
        FieldSlot::new("Small Size", outlined("Small input").size(InputSize::Small)),
        FieldSlot::new("Large Size", outlined("Large input").size(InputSize::Large)),
        FieldSlot::new("Invalid State", outlined("Enter required field")).required(),
        FieldSlot::new(
            "Loading State",
            InputField::new()
                .with_value("Processing...")
                .loading(true)
                .disabled(true),
        )
        .heading("Special Features"),
        FieldSlot::new(
            "Password Field with Toggle",
            outlined("Enter password")
                .with_value("secret123")
                .kind(InputKind::Password)
                .password_toggle(true),
        ),
        FieldSlot::new(
            "Clearable Input",
            outlined("Type to see clear button").clearable(true),
        ),
        FieldSlot::new(
            "Disabled State",
            outlined("Disabled input")
                .with_value("Cannot edit this")
                .disabled(true),
        ),
        FieldSlot::new(
            "With Helper Text",
            outlined("Enter username")
                .with_helper_text("Username must be at least 3 characters long"),
        ),
        FieldSlot::new(
            "Dark Theme",
            outlined("Dark theme input").appearance(Appearance::Dark),
        ),
    ]
}

impl Story for DemoStory {
    fn title(&self) -> &'static str {
        "Components"
    }

    fn group(&self) -> &'static str {
        "Demo"
    }

    fn description(&self) -> &'static str {
        "Every input variant beside a selectable user table. Tab moves between the two."
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<LoggedAction>> {
        let forward = self.resolver.matches_story(&key, StoryAction::FocusNext);
        let backward = self.resolver.matches_story(&key, StoryAction::FocusPrev);

        match self.pane {
            Pane::Inputs => {
                let handled = self.inputs.handle_key(key)?;
                if handled.is_consumed() {
                    return Ok(handled);
                }
                if forward || backward {
                    self.focus_table();
                    return Ok(Handled::Consumed);
                }
                Ok(Handled::Ignored)
            }
            Pane::Table => {
                let handled = self.table.handle_key(key)?.map(table_action);
                if handled.is_consumed() {
                    return Ok(handled);
                }
                if forward || backward {
                    self.focus_inputs(backward);
                    return Ok(Handled::Consumed);
                }
                Ok(Handled::Ignored)
            }
        }
    }

    fn handle_paste(&mut self, text: &str) -> Handled<LoggedAction> {
        match self.pane {
            Pane::Inputs => self.inputs.paste(text),
            Pane::Table => Handled::Ignored,
        }
    }

    fn on_tick(&mut self) {
        self.inputs.on_tick();
        self.table.on_tick();
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [inputs_area, right_area] = Layout::horizontal([
            Constraint::Length(INPUT_COLUMN_WIDTH),
            Constraint::Min(20),
        ])
        .spacing(1)
        .areas(area);
        let [table_area, selected_area] = Layout::vertical([
            Constraint::Min(6),
            Constraint::Length(SELECTED_PANEL_HEIGHT),
        ])
        .areas(right_area);

        self.inputs.render(frame, inputs_area, theme);
        self.table.render(frame, table_area, theme);
        frame.render_widget(self.selected_panel(theme), selected_area);
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        match self.pane {
            Pane::Inputs => self.inputs.keybindings(),
            Pane::Table => table_keybindings(&self.resolver, true),
        }
    }
}
