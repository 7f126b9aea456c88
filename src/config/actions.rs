#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAction {
    Quit,
    Theme,
    NextStory,
    PrevStory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Select,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    ToggleRow,
    SelectAll,
    ClearSelection,
    Sort,
    NextColumn,
    PrevColumn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryAction {
    ToggleLoading,
    ToggleSelectable,
    FocusNext,
    FocusPrev,
    Edit,
    StopEditing,
}
