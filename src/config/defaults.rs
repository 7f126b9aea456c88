use crossterm::event::KeyCode;

use crate::config::key::{Key, KeyBinding};
use crate::config::keybindings::{
    GlobalKeybindings, NavigationKeybindings, StoryKeybindings, TableKeybindings,
};

impl Default for GlobalKeybindings {
    fn default() -> Self {
        Self {
            quit: Key::new(KeyCode::Char('q')).into(),
            theme: Key::new(KeyCode::Char('t')).into(),
            next_story: Key::new(KeyCode::Char(']')).into(),
            prev_story: Key::new(KeyCode::Char('[')).into(),
        }
    }
}

impl Default for NavigationKeybindings {
    fn default() -> Self {
        Self {
            up: KeyBinding::multiple(vec![Key::new(KeyCode::Char('k')), Key::new(KeyCode::Up)]),
            down: KeyBinding::multiple(vec![Key::new(KeyCode::Char('j')), Key::new(KeyCode::Down)]),
            page_up: Key::new(KeyCode::PageUp).into(),
            page_down: Key::new(KeyCode::PageDown).into(),
            home: KeyBinding::multiple(vec![Key::new(KeyCode::Char('g')), Key::new(KeyCode::Home)]),
            end: KeyBinding::multiple(vec![Key::new(KeyCode::Char('G')), Key::new(KeyCode::End)]),
            select: Key::new(KeyCode::Enter).into(),
        }
    }
}

impl Default for TableKeybindings {
    fn default() -> Self {
        Self {
            toggle_row: Key::new(KeyCode::Char(' ')).into(),
            select_all: Key::new(KeyCode::Char('a')).into(),
            clear_selection: Key::new(KeyCode::Char('x')).into(),
            sort: Key::new(KeyCode::Char('s')).into(),
            next_column: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('l')),
                Key::new(KeyCode::Right),
            ]),
            prev_column: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('h')),
                Key::new(KeyCode::Left),
            ]),
        }
    }
}

impl Default for StoryKeybindings {
    fn default() -> Self {
        Self {
            toggle_loading: Key::new(KeyCode::Char('L')).into(),
            toggle_selectable: Key::new(KeyCode::Char('S')).into(),
            focus_next: KeyBinding::multiple(vec![
                Key::new(KeyCode::Tab),
                Key::new(KeyCode::Char('j')),
                Key::new(KeyCode::Down),
            ]),
            focus_prev: KeyBinding::multiple(vec![
                Key::new(KeyCode::BackTab),
                Key::new(KeyCode::Char('k')),
                Key::new(KeyCode::Up),
            ]),
            edit: KeyBinding::multiple(vec![
                Key::new(KeyCode::Enter),
                Key::new(KeyCode::Char('i')),
            ]),
            stop_editing: Key::new(KeyCode::Esc).into(),
        }
    }
}
