use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;
use tracing::debug;

use crate::Theme;
use crate::config::{KeyResolver, StoryAction};
use crate::gallery::{LoggedAction, Story};
use crate::ui::{
    Appearance, Component, Handled, InputEvent, InputField, InputKind, InputSize, InputVariant,
    Keybinding, Result,
};

const GROUP: &str = "InputField";
const MAX_FIELD_WIDTH: u16 = 56;
const REQUIRED_MESSAGE: &str = "This field is required";

/// One field in a column, with the label used in the actions log.
pub struct FieldSlot {
    label: &'static str,
    heading: Option<&'static str>,
    field: InputField,
    /// Recompute `invalid` from emptiness on every change.
    required: bool,
}

impl FieldSlot {
    pub fn new(label: &'static str, field: InputField) -> Self {
        Self {
            label,
            heading: None,
            field: field.with_label(label),
            required: false,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self.field = self.field.with_error_message(REQUIRED_MESSAGE);
        self.field.set_invalid(self.field.value().is_empty());
        self
    }

    /// Section title drawn above this field.
    #[must_use]
    pub const fn heading(mut self, heading: &'static str) -> Self {
        self.heading = Some(heading);
        self
    }

    fn height(&self) -> u16 {
        self.field.height() + u16::from(self.heading.is_some())
    }

    fn record(&mut self, event: InputEvent) -> LoggedAction {
        match event {
            InputEvent::Changed(value) => {
                if self.required {
                    self.field.set_invalid(value.is_empty());
                }
                LoggedAction::new("value-changed", format!("{}: {value}", self.label))
            }
            InputEvent::Submitted(value) => {
                LoggedAction::new("submitted", format!("{}: {value}", self.label))
            }
        }
    }
}

/// Vertical stack of fields with a focus cursor and an edit mode.
pub struct FieldColumn {
    slots: Vec<FieldSlot>,
    focus: usize,
    editing: bool,
    active: bool,
    /// Whether focus wraps at the ends instead of leaving the column.
    wrap: bool,
    resolver: Arc<KeyResolver>,
}

impl FieldColumn {
    pub fn new(slots: Vec<FieldSlot>, resolver: Arc<KeyResolver>) -> Self {
        let mut column = Self {
            slots,
            focus: 0,
            editing: false,
            active: true,
            wrap: true,
            resolver,
        };
        column.sync_focus();
        column
    }

    /// Let focus movement past either end fall through to the owner.
    #[must_use]
    pub const fn without_wrap(mut self) -> Self {
        self.wrap = false;
        self
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.stop_editing();
        }
        self.sync_focus();
    }

    pub const fn is_editing(&self) -> bool {
        self.editing
    }

    /// Focus the first or last field.
    pub fn focus_edge(&mut self, last: bool) {
        self.focus = if last { self.slots.len().saturating_sub(1) } else { 0 };
        self.sync_focus();
    }

    fn sync_focus(&mut self) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            slot.field.set_focused(self.active && i == self.focus);
        }
    }

    fn stop_editing(&mut self) {
        self.editing = false;
        if let Some(slot) = self.slots.get_mut(self.focus) {
            slot.field.set_editing(false);
        }
    }

    fn move_focus(&mut self, forward: bool) -> Handled<LoggedAction> {
        let len = self.slots.len();
        if len == 0 {
            return Handled::Ignored;
        }
        let at_edge = if forward {
            self.focus + 1 == len
        } else {
            self.focus == 0
        };
        if at_edge && !self.wrap {
            return Handled::Ignored;
        }
        self.stop_editing();
        self.focus = if forward {
            (self.focus + 1) % len
        } else {
            (self.focus + len - 1) % len
        };
        self.sync_focus();
        Handled::Consumed
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<LoggedAction>> {
        if self.editing
            && let Some(slot) = self.slots.get_mut(self.focus)
        {
            match slot.field.handle_key(key)? {
                Handled::Consumed => return Ok(Handled::Consumed),
                Handled::Event(event) => return Ok(slot.record(event).into()),
                Handled::Ignored => {}
            }
            if self.resolver.matches_story(&key, StoryAction::StopEditing) {
                self.stop_editing();
                return Ok(Handled::Consumed);
            }
        }

        if self.resolver.matches_story(&key, StoryAction::FocusNext) {
            return Ok(self.move_focus(true));
        }
        if self.resolver.matches_story(&key, StoryAction::FocusPrev) {
            return Ok(self.move_focus(false));
        }
        if self.resolver.matches_story(&key, StoryAction::Edit)
            && let Some(slot) = self.slots.get_mut(self.focus)
        {
            slot.field.set_editing(true);
            self.editing = slot.field.is_editing();
            debug!("Editing {}: {}", slot.label, self.editing);
            return Ok(Handled::Consumed);
        }
        Ok(Handled::Ignored)
    }

    /// Paste into the field being edited.
    pub fn paste(&mut self, text: &str) -> Handled<LoggedAction> {
        if !self.editing {
            return Handled::Ignored;
        }
        let Some(slot) = self.slots.get_mut(self.focus) else {
            return Handled::Ignored;
        };
        match slot.field.paste(text) {
            Handled::Event(event) => slot.record(event).into(),
            Handled::Consumed => Handled::Consumed,
            Handled::Ignored => Handled::Ignored,
        }
    }

    pub fn on_tick(&mut self) {
        for slot in &mut self.slots {
            slot.field.on_tick();
        }
    }

    pub fn keybindings(&self) -> Vec<Keybinding> {
        let resolver = &self.resolver;
        if self.editing {
            return vec![
                Keybinding::new(resolver.display_story(StoryAction::StopEditing), "Stop editing"),
                Keybinding::new("Enter", "Submit"),
                Keybinding::new("ctrl+l", "Clear"),
                Keybinding::new("ctrl+r", "Reveal"),
            ];
        }
        vec![
            Keybinding::new(
                format!(
                    "{}/{}",
                    resolver.display_story(StoryAction::FocusPrev),
                    resolver.display_story(StoryAction::FocusNext)
                ),
                "Focus",
            ),
            Keybinding::new(resolver.display_story(StoryAction::Edit), "Edit"),
        ]
    }

    /// First slot to draw so that the focused one is fully visible.
    fn scroll_start(&self, height: u16) -> usize {
        let mut start = 0;
        while start < self.focus {
            let needed: u16 = self.slots[start..=self.focus]
                .iter()
                .map(|slot| slot.height() + 1)
                .sum();
            if needed <= height {
                break;
            }
            start += 1;
        }
        start
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let width = area.width.min(MAX_FIELD_WIDTH);
        let start = self.scroll_start(area.height);
        let mut y = area.y;

        for slot in &mut self.slots[start..] {
            let height = slot.height();
            if y + height > area.bottom() {
                break;
            }
            let mut field_area = Rect::new(area.x, y, width, height);
            if let Some(heading) = slot.heading {
                let [heading_area, rest] =
                    Layout::vertical([Constraint::Length(1), Constraint::Min(0)])
                        .areas(field_area);
                let style = Style::default()
                    .fg(theme.mauve())
                    .add_modifier(Modifier::BOLD);
                frame.render_widget(Paragraph::new(heading).style(style), heading_area);
                field_area = rest;
            }
            slot.field.render(frame, field_area, theme);
            y += height + 1;
        }
    }
}

/// A story made of one column of fields.
pub struct InputStory {
    title: &'static str,
    description: &'static str,
    column: FieldColumn,
}

impl Story for InputStory {
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
        self.column.handle_key(key)
    }

    fn handle_paste(&mut self, text: &str) -> Handled<LoggedAction> {
        self.column.paste(text)
    }

    fn on_tick(&mut self) {
        self.column.on_tick();
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.column.render(frame, area, theme);
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        self.column.keybindings()
    }
}

fn story(
    title: &'static str,
    description: &'static str,
    slots: Vec<FieldSlot>,
    resolver: &Arc<KeyResolver>,
) -> Box<dyn Story> {
    Box::new(InputStory {
        title,
        description,
        column: FieldColumn::new(slots, Arc::clone(resolver)),
    })
}

fn input(placeholder: &str) -> InputField {
    InputField::new().with_placeholder(placeholder)
}

/// Every input story, in sidebar order.
pub fn input_stories(resolver: &Arc<KeyResolver>) -> Vec<Box<dyn Story>> {
    vec![
        story(
            "Default",
            "A plain outlined, medium-sized text field.",
            vec![FieldSlot::new("Username", input("Enter your username"))],
            resolver,
        ),
        story(
            "Variants",
            "Different visual variants of the input field.",
            vec![
                FieldSlot::new(
                    "Outlined Variant",
                    input("Outlined input").variant(InputVariant::Outlined),
                ),
                FieldSlot::new(
                    "Filled Variant",
                    input("Filled input").variant(InputVariant::Filled),
                ),
                FieldSlot::new(
                    "Ghost Variant",
                    input("Ghost input").variant(InputVariant::Ghost),
                ),
            ],
            resolver,
        ),
        story(
            "Sizes",
            "Different sizes of the input field.",
            vec![
                FieldSlot::new("Small Size", input("Small input").size(InputSize::Small)),
                FieldSlot::new("Medium Size", input("Medium input").size(InputSize::Medium)),
                FieldSlot::new("Large Size", input("Large input").size(InputSize::Large)),
            ],
            resolver,
        ),
        story(
            "States",
            "Disabled, invalid and loading fields.",
            vec![
                FieldSlot::new("Default State", input("Normal input")),
                FieldSlot::new(
                    "Disabled State",
                    input("Disabled input")
                        .with_value("Cannot edit this")
                        .disabled(true),
                ),
                FieldSlot::new(
                    "Invalid State",
                    input("Enter required field")
                        .invalid(true)
                        .with_error_message(REQUIRED_MESSAGE),
                ),
                FieldSlot::new(
                    "Loading State",
                    input("Loading input")
                        .with_value("Processing...")
                        .loading(true)
                        .disabled(true),
                ),
            ],
            resolver,
        ),
        story(
            "With Helper Text",
            "Input field with helper text to guide users.",
            vec![FieldSlot::new(
                "Password",
                input("Enter password")
                    .with_helper_text("Password must be at least 8 characters long"),
            )],
            resolver,
        ),
        story(
            "With Clear Button",
            "Input field with a clear button to reset the value.",
            vec![FieldSlot::new(
                "Search",
                input("Type to see clear button")
                    .with_value("Some text")
                    .clearable(true),
            )],
            resolver,
        ),
        story(
            "Password Field",
            "Password input field with toggle visibility feature.",
            vec![FieldSlot::new(
                "Password",
                input("Enter your password")
                    .with_value("secret123")
                    .kind(InputKind::Password)
                    .password_toggle(true),
            )],
            resolver,
        ),
        story(
            "Dark Theme",
            "Input field with dark theme styling.",
            vec![FieldSlot::new(
                "Dark Theme Input",
                input("Dark theme placeholder").appearance(Appearance::Dark),
            )],
            resolver,
        ),
        story(
            "All Features",
            "Clear buttons and password toggles in both light and dark themes.",
            vec![
                FieldSlot::new(
                    "Clearable Input",
                    input("Type something...")
                        .with_value("Clear me!")
                        .clearable(true)
                        .appearance(Appearance::Light),
                )
                .heading("Light Theme Features"),
                FieldSlot::new(
                    "Password with Toggle",
                    input("Enter password")
                        .with_value("secret123")
                        .kind(InputKind::Password)
                        .password_toggle(true)
                        .variant(InputVariant::Filled)
                        .appearance(Appearance::Light),
                ),
                FieldSlot::new(
                    "Dark Clearable",
                    input("Dark theme with clear")
                        .with_value("Dark theme text")
                        .clearable(true)
                        .appearance(Appearance::Dark),
                )
                .heading("Dark Theme Features"),
                FieldSlot::new(
                    "Dark Password",
                    input("Dark password field")
                        .with_value("darksecret")
                        .kind(InputKind::Password)
                        .password_toggle(true)
                        .variant(InputVariant::Filled)
                        .appearance(Appearance::Dark),
                ),
            ],
            resolver,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn column(slots: Vec<FieldSlot>) -> FieldColumn {
        FieldColumn::new(slots, Arc::new(KeyResolver::default()))
    }

    fn two_fields() -> Vec<FieldSlot> {
        vec![
            FieldSlot::new("Name", InputField::new()),
            FieldSlot::new("Locked", InputField::new().disabled(true)),
        ]
    }

    #[test]
    fn test_paste_needs_edit_mode() {
        let mut column = column(two_fields());
        assert!(!column.paste("hello").is_consumed());

        column.handle_key(key(KeyCode::Enter)).unwrap();
        let action = column.paste("hello world").event();
        assert_eq!(
            action,
            Some(LoggedAction::new("value-changed", "Name: hello world"))
        );
        assert_eq!(column.slots[0].field.value(), "hello world");
    }

    #[test]
    fn test_edit_type_and_stop() {
        let mut column = column(two_fields());
        column.handle_key(key(KeyCode::Char('i'))).unwrap();
        assert!(column.is_editing());

        let action = column.handle_key(key(KeyCode::Char('q'))).unwrap().event();
        assert_eq!(action, Some(LoggedAction::new("value-changed", "Name: q")));

        // 'j' is text while editing, not focus movement.
        column.handle_key(key(KeyCode::Char('j'))).unwrap();
        assert_eq!(column.slots[0].field.value(), "qj");

        column.handle_key(key(KeyCode::Esc)).unwrap();
        assert!(!column.is_editing());
        assert!(!column.handle_key(key(KeyCode::Esc)).unwrap().is_consumed());
    }

    #[test]
    fn test_focus_wraps_and_disabled_fields_stay_read_only() {
        let mut column = column(two_fields());
        column.handle_key(key(KeyCode::Tab)).unwrap();
        assert_eq!(column.focus, 1);
        column.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(!column.is_editing());

        column.handle_key(key(KeyCode::Char('j'))).unwrap();
        assert_eq!(column.focus, 0);
        column.handle_key(key(KeyCode::BackTab)).unwrap();
        assert_eq!(column.focus, 1);
    }

    #[test]
    fn test_tab_leaves_edit_mode() {
        let mut column = column(two_fields());
        column.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(column.is_editing());
        column.handle_key(key(KeyCode::Tab)).unwrap();
        assert!(!column.is_editing());
        assert_eq!(column.focus, 1);
    }

    #[test]
    fn test_without_wrap_hands_focus_back() {
        let mut column = column(two_fields()).without_wrap();
        assert!(!column.handle_key(key(KeyCode::BackTab)).unwrap().is_consumed());
        column.handle_key(key(KeyCode::Tab)).unwrap();
        assert!(!column.handle_key(key(KeyCode::Tab)).unwrap().is_consumed());
        assert_eq!(column.focus, 1);
    }

    #[test]
    fn test_required_field_tracks_emptiness() {
        let mut column = column(vec![FieldSlot::new("Required", InputField::new()).required()]);
        assert!(column.slots[0].field.is_invalid());

        column.handle_key(key(KeyCode::Enter)).unwrap();
        column.handle_key(key(KeyCode::Char('x'))).unwrap();
        assert!(!column.slots[0].field.is_invalid());
        column.handle_key(key(KeyCode::Backspace)).unwrap();
        assert!(column.slots[0].field.is_invalid());
    }

    #[test]
    fn test_submit_is_logged() {
        let mut column = column(two_fields());
        column.handle_key(key(KeyCode::Enter)).unwrap();
        let action = column.handle_key(key(KeyCode::Enter)).unwrap().event();
        assert_eq!(action, Some(LoggedAction::new("submitted", "Name: ")));
    }

    #[test]
    fn test_scroll_keeps_focus_visible() {
        let slots = (0..6)
            .map(|_| FieldSlot::new("Field", InputField::new()))
            .collect();
        let mut column = column(slots);
        // Each slot is a label plus a 3-row box, plus one spacer row.
        assert_eq!(column.scroll_start(20), 0);
        column.focus_edge(true);
        assert_eq!(column.scroll_start(20), 2);
    }

    #[test]
    fn test_story_titles() {
        let stories = input_stories(&Arc::new(KeyResolver::default()));
        let titles: Vec<_> = stories.iter().map(|s| s.title()).collect();
        assert_eq!(
            titles,
            [
                "Default",
                "Variants",
                "Sizes",
                "States",
                "With Helper Text",
                "With Clear Button",
                "Password Field",
                "Dark Theme",
                "All Features"
            ]
        );
    }
}
