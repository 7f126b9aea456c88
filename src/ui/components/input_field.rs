use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::Theme;
use crate::ui::widgets::Spinner;
use crate::ui::{Component, Handled, Result};

const MASK: char = '•';
const CLEAR_GLYPH: &str = "✕";
const REVEALED_GLYPH: &str = "◉";
const HIDDEN_GLYPH: &str = "○";

pub enum InputEvent {
    Changed(String),
    Submitted(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputVariant {
    Filled,
    #[default]
    Outlined,
    Ghost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl InputSize {
    const fn padding(self) -> Padding {
        match self {
            Self::Small => Padding::ZERO,
            Self::Medium => Padding::horizontal(1),
            Self::Large => Padding::symmetric(2, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Text,
    Password,
}

/// Palette override that ignores the application theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Light,
    Dark,
}

impl Appearance {
    fn theme(self) -> Theme {
        match self {
            Self::Light => Theme::catppuccin_latte(),
            Self::Dark => Theme::catppuccin_mocha(),
        }
    }
}

/// The line shown under the input box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMessage<'a> {
    Helper(&'a str),
    Error(&'a str),
}

/// Single-line text input.
///
/// The field only edits its own value; validation is left to the owner, which
/// flips [`InputField::set_invalid`] and supplies the error message.
pub struct InputField {
    value: String,
    /// Cursor position in characters, not bytes.
    cursor: usize,
    label: Option<String>,
    placeholder: Option<String>,
    helper_text: Option<String>,
    error_message: Option<String>,
    disabled: bool,
    invalid: bool,
    loading: bool,
    variant: InputVariant,
    size: InputSize,
    kind: InputKind,
    clearable: bool,
    password_toggle: bool,
    revealed: bool,
    appearance: Option<Appearance>,
    focused: bool,
    editing: bool,
    spinner: Spinner,
}

impl InputField {
    pub fn new() -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            label: None,
            placeholder: None,
            helper_text: None,
            error_message: None,
            disabled: false,
            invalid: false,
            loading: false,
            variant: InputVariant::default(),
            size: InputSize::default(),
            kind: InputKind::default(),
            clearable: false,
            password_toggle: false,
            revealed: false,
            appearance: None,
            focused: false,
            editing: false,
            spinner: Spinner::new(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.cursor = self.char_count();
        self
    }

    #[must_use]
    pub fn with_helper_text(mut self, text: impl Into<String>) -> Self {
        self.helper_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub const fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    #[must_use]
    pub const fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    #[must_use]
    pub const fn variant(mut self, variant: InputVariant) -> Self {
        self.variant = variant;
        self
    }

    #[must_use]
    pub const fn size(mut self, size: InputSize) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub const fn kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub const fn clearable(mut self, clearable: bool) -> Self {
        self.clearable = clearable;
        self
    }

    #[must_use]
    pub const fn password_toggle(mut self, toggle: bool) -> Self {
        self.password_toggle = toggle;
        self
    }

    #[must_use]
    pub const fn appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = Some(appearance);
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub const fn set_invalid(&mut self, invalid: bool) {
        self.invalid = invalid;
    }

    pub const fn is_invalid(&self) -> bool {
        self.invalid
    }

    pub const fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Whether the field accepts keys at all.
    pub const fn is_interactive(&self) -> bool {
        !self.disabled && !self.loading
    }

    pub const fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub const fn set_editing(&mut self, editing: bool) {
        self.editing = editing && self.is_interactive();
    }

    pub const fn is_editing(&self) -> bool {
        self.editing
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn message(&self) -> Option<FieldMessage<'_>> {
        if self.invalid {
            self.error_message
                .as_deref()
                .filter(|m| !m.is_empty())
                .map(FieldMessage::Error)
        } else {
            self.helper_text.as_deref().map(FieldMessage::Helper)
        }
    }

    /// Rows needed to draw the label, box and message.
    pub fn height(&self) -> u16 {
        let padding = self.size.padding();
        let input = 3 + padding.top + padding.bottom;
        let label = u16::from(self.label.is_some());
        let message = u16::from(self.message().is_some());
        label + input + message
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.value
            .char_indices()
            .nth(cursor)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Insert pasted text at the cursor as a single edit.
    ///
    /// Line breaks become spaces and other control characters are dropped.
    pub fn paste(&mut self, text: &str) -> Handled<InputEvent> {
        if !self.is_interactive() {
            return Handled::Ignored;
        }
        let text: String = text
            .chars()
            .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
            .filter(|c| !c.is_control())
            .collect();
        if text.is_empty() {
            return Handled::Consumed;
        }
        let at = self.byte_index(self.cursor);
        self.value.insert_str(at, &text);
        self.cursor += text.chars().count();
        self.changed(true)
    }

    fn delete_char_before_cursor(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
        true
    }

    fn delete_char_at_cursor(&mut self) -> bool {
        if self.cursor >= self.char_count() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
        true
    }

    fn delete_word_before_cursor(&mut self) -> bool {
        let chars: Vec<char> = self.value.chars().collect();
        let mut pos = self.cursor;
        while pos > 0 && chars[pos - 1] == ' ' {
            pos -= 1;
        }
        while pos > 0 && chars[pos - 1] != ' ' {
            pos -= 1;
        }
        if pos == self.cursor {
            return false;
        }
        let (start, end) = (self.byte_index(pos), self.byte_index(self.cursor));
        self.value.drain(start..end);
        self.cursor = pos;
        true
    }

    fn clear(&mut self) -> bool {
        if self.value.is_empty() {
            return false;
        }
        self.value.clear();
        self.cursor = 0;
        true
    }

    fn changed(&self, changed: bool) -> Handled<InputEvent> {
        if changed {
            InputEvent::Changed(self.value.clone()).into()
        } else {
            Handled::Consumed
        }
    }

    fn masked(&self) -> bool {
        self.kind == InputKind::Password && !self.revealed
    }

    fn display_value(&self) -> String {
        if self.masked() {
            MASK.to_string().repeat(self.char_count())
        } else {
            self.value.clone()
        }
    }

    fn show_clear(&self) -> bool {
        self.clearable && !self.value.is_empty() && !self.disabled
    }

    fn show_reveal(&self) -> bool {
        self.kind == InputKind::Password && self.password_toggle
    }

    fn affordance_width(&self) -> u16 {
        let glyphs = [self.loading, self.show_clear(), self.show_reveal()];
        let count = u16::try_from(glyphs.iter().filter(|&&shown| shown).count()).unwrap_or(0);
        count * 2
    }

    fn border_color(&self, theme: &Theme) -> Color {
        if self.invalid {
            return theme.error();
        }
        if self.focused && !self.disabled {
            return theme.border_focused();
        }
        match self.variant {
            InputVariant::Outlined => theme.border(),
            InputVariant::Filled => theme.surface0(),
            InputVariant::Ghost => theme.base(),
        }
    }

    fn block(&self, theme: &Theme) -> Block<'static> {
        let background = match self.variant {
            InputVariant::Filled => theme.surface0(),
            InputVariant::Outlined | InputVariant::Ghost => theme.base(),
        };
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(self.border_color(theme)))
            .style(Style::default().bg(background))
            .padding(self.size.padding())
    }

    fn value_line(&self, theme: &Theme) -> Line<'static> {
        let mut text_style = Style::default().fg(theme.text());
        if self.disabled {
            text_style = text_style.fg(theme.overlay0()).add_modifier(Modifier::DIM);
        }

        if self.value.is_empty() && !self.editing {
            let placeholder = self.placeholder.clone().unwrap_or_default();
            return Line::from(Span::styled(
                placeholder,
                Style::default().fg(theme.overlay0()),
            ));
        }
        if !self.editing {
            return Line::from(Span::styled(self.display_value(), text_style));
        }

        let cursor_style = Style::default()
            .fg(theme.base())
            .bg(theme.text())
            .add_modifier(Modifier::BOLD);
        let chars: Vec<char> = self.display_value().chars().collect();
        let before: String = chars[..self.cursor].iter().collect();
        let at = chars.get(self.cursor).copied().unwrap_or(' ');
        let after: String = chars.iter().skip(self.cursor + 1).collect();
        Line::from(vec![
            Span::styled(before, text_style),
            Span::styled(at.to_string(), cursor_style),
            Span::styled(after, text_style),
        ])
    }

    fn render_affordances(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut spans = Vec::new();
        if self.show_clear() {
            spans.push(Span::styled(CLEAR_GLYPH, Style::default().fg(theme.overlay1())));
            spans.push(Span::raw(" "));
        }
        if self.show_reveal() {
            let glyph = if self.revealed {
                REVEALED_GLYPH
            } else {
                HIDDEN_GLYPH
            };
            spans.push(Span::styled(glyph, Style::default().fg(theme.overlay1())));
            spans.push(Span::raw(" "));
        }

        let [spinner_area, glyph_area] = Layout::horizontal([
            Constraint::Length(if self.loading { 2 } else { 0 }),
            Constraint::Fill(1),
        ])
        .areas(area);
        if self.loading {
            self.spinner.render(frame, spinner_area, theme);
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), glyph_area);
    }
}

impl Default for InputField {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for InputField {
    type Output = InputEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<Self::Output>> {
        if !self.is_interactive() {
            return Ok(Handled::Ignored);
        }

        Ok(match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => InputEvent::Submitted(self.value.clone()).into(),

            // Left to the owner, which uses them to leave the field.
            (KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab, _) => Handled::Ignored,

            (KeyCode::Char('l'), KeyModifiers::CONTROL) if self.clearable => {
                let cleared = self.clear();
                self.changed(cleared)
            }
            (KeyCode::Char('r'), KeyModifiers::CONTROL) if self.show_reveal() => {
                self.revealed = !self.revealed;
                Handled::Consumed
            }

            (KeyCode::Backspace, KeyModifiers::ALT) => {
                let deleted = self.delete_word_before_cursor();
                self.changed(deleted)
            }
            (KeyCode::Backspace, _) => {
                let deleted = self.delete_char_before_cursor();
                self.changed(deleted)
            }
            (KeyCode::Delete, _) => {
                let deleted = self.delete_char_at_cursor();
                self.changed(deleted)
            }

            (KeyCode::Left, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                Handled::Consumed
            }
            (KeyCode::Right, _) => {
                self.cursor = (self.cursor + 1).min(self.char_count());
                Handled::Consumed
            }
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor = 0;
                Handled::Consumed
            }
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = self.char_count();
                Handled::Consumed
            }

            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                let cleared = self.clear();
                self.changed(cleared)
            }

            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.insert_char(c);
                self.changed(true)
            }

            // Keep stray keys from reaching the owner while typing.
            _ => Handled::Consumed,
        })
    }

    fn on_tick(&mut self) {
        if self.loading {
            self.spinner.on_tick();
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let theme = self.appearance.map_or(*theme, Appearance::theme);
        if self.appearance.is_some() {
            frame.render_widget(Block::default().style(Style::default().bg(theme.base())), area);
        }
        let label_height = u16::from(self.label.is_some());
        let message_height = u16::from(self.message().is_some());
        let [label_area, input_area, message_area] = Layout::vertical([
            Constraint::Length(label_height),
            Constraint::Length(self.height() - label_height - message_height),
            Constraint::Length(message_height),
        ])
        .areas(area);

        if let Some(label) = &self.label {
            let style = Style::default()
                .fg(if self.disabled {
                    theme.overlay0()
                } else {
                    theme.subtext1()
                })
                .add_modifier(Modifier::BOLD);
            frame.render_widget(Paragraph::new(label.as_str()).style(style), label_area);
        }

        let block = self.block(&theme);
        let inner = block.inner(input_area);
        frame.render_widget(block, input_area);

        let [text_area, affordance_area] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(self.affordance_width()),
        ])
        .areas(inner);
        let visible = usize::from(text_area.width.max(1));
        let offset = u16::try_from(self.cursor.saturating_sub(visible - 1)).unwrap_or(0);
        let value = Paragraph::new(self.value_line(&theme)).scroll((0, offset));
        frame.render_widget(value, text_area);
        self.render_affordances(frame, affordance_area, &theme);

        if let Some(message) = self.message() {
            let (text, color) = match message {
                FieldMessage::Helper(text) => (text, theme.subtext0()),
                FieldMessage::Error(text) => (text, theme.error()),
            };
            let line = Paragraph::new(text.to_string()).style(Style::default().fg(color));
            frame.render_widget(line, message_area);
        }
    }
}
