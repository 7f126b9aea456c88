use std::sync::Arc;

use crossterm::event::KeyEvent;

use crate::config::actions::{GlobalAction, NavAction, StoryAction, TableAction};
use crate::config::keybindings::KeybindingsConfig;

pub struct KeyResolver {
    pub keybindings: Arc<KeybindingsConfig>,
}

impl Default for KeyResolver {
    fn default() -> Self {
        Self::new(Arc::new(KeybindingsConfig::default()))
    }
}

impl KeyResolver {
    pub const fn new(keybindings: Arc<KeybindingsConfig>) -> Self {
        Self { keybindings }
    }

    // Global actions
    pub fn matches_global(&self, event: &KeyEvent, action: GlobalAction) -> bool {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => kb.quit.matches(event),
            GlobalAction::Theme => kb.theme.matches(event),
            GlobalAction::NextStory => kb.next_story.matches(event),
            GlobalAction::PrevStory => kb.prev_story.matches(event),
        }
    }

    pub fn display_global(&self, action: GlobalAction) -> String {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => kb.quit.display(),
            GlobalAction::Theme => kb.theme.display(),
            GlobalAction::NextStory => kb.next_story.display(),
            GlobalAction::PrevStory => kb.prev_story.display(),
        }
    }

    // Navigation actions
    pub fn matches_nav(&self, event: &KeyEvent, action: NavAction) -> bool {
        let kb = &self.keybindings.navigation;
        match action {
            NavAction::Up => kb.up.matches(event),
            NavAction::Down => kb.down.matches(event),
            NavAction::PageUp => kb.page_up.matches(event),
            NavAction::PageDown => kb.page_down.matches(event),
            NavAction::Home => kb.home.matches(event),
            NavAction::End => kb.end.matches(event),
            NavAction::Select => kb.select.matches(event),
        }
    }

    pub fn display_nav(&self, action: NavAction) -> String {
        let kb = &self.keybindings.navigation;
        match action {
            NavAction::Up => kb.up.display(),
            NavAction::Down => kb.down.display(),
            NavAction::PageUp => kb.page_up.display(),
            NavAction::PageDown => kb.page_down.display(),
            NavAction::Home => kb.home.display(),
            NavAction::End => kb.end.display(),
            NavAction::Select => kb.select.display(),
        }
    }

    // Table actions
    pub fn matches_table(&self, event: &KeyEvent, action: TableAction) -> bool {
        let kb = &self.keybindings.table;
        match action {
            TableAction::ToggleRow => kb.toggle_row.matches(event),
            TableAction::SelectAll => kb.select_all.matches(event),
            TableAction::ClearSelection => kb.clear_selection.matches(event),
            TableAction::Sort => kb.sort.matches(event),
            TableAction::NextColumn => kb.next_column.matches(event),
            TableAction::PrevColumn => kb.prev_column.matches(event),
        }
    }

    pub fn display_table(&self, action: TableAction) -> String {
        let kb = &self.keybindings.table;
        match action {
            TableAction::ToggleRow => kb.toggle_row.display(),
            TableAction::SelectAll => kb.select_all.display(),
            TableAction::ClearSelection => kb.clear_selection.display(),
            TableAction::Sort => kb.sort.display(),
            TableAction::NextColumn => kb.next_column.display(),
            TableAction::PrevColumn => kb.prev_column.display(),
        }
    }

    // Story actions
    pub fn matches_story(&self, event: &KeyEvent, action: StoryAction) -> bool {
        let kb = &self.keybindings.story;
        match action {
            StoryAction::ToggleLoading => kb.toggle_loading.matches(event),
            StoryAction::ToggleSelectable => kb.toggle_selectable.matches(event),
            StoryAction::FocusNext => kb.focus_next.matches(event),
            StoryAction::FocusPrev => kb.focus_prev.matches(event),
            StoryAction::Edit => kb.edit.matches(event),
            StoryAction::StopEditing => kb.stop_editing.matches(event),
        }
    }

    pub fn display_story(&self, action: StoryAction) -> String {
        let kb = &self.keybindings.story;
        match action {
            StoryAction::ToggleLoading => kb.toggle_loading.display(),
            StoryAction::ToggleSelectable => kb.toggle_selectable.display(),
            StoryAction::FocusNext => kb.focus_next.display(),
            StoryAction::FocusPrev => kb.focus_prev.display(),
            StoryAction::Edit => kb.edit.display(),
            StoryAction::StopEditing => kb.stop_editing.display(),
        }
    }
}
