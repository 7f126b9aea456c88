//! UI trait hierarchy for the TUI.
//!
//! This module defines the core UI abstractions:
//! - [`Component`] - Reusable, interactive UI building blocks
//! - [`Handled`] - Result of handling an input event
//!
//! Stories (full-page gallery entries) live in [`crate::gallery`].

mod component;
pub mod components;
mod status_bar;
pub mod widgets;

pub use component::Component;
pub use components::{
    Appearance, Column, DataTable, InputEvent, InputField, InputKind, InputSize, InputVariant,
    List, ListRow, ReconcilePolicy, TableEvent, TableRecord, Value, infer_columns,
};
pub use status_bar::{Keybinding, StatusBar, StatusLine};

/// Result type alias for UI operations.
pub type Result<T> = std::result::Result<T, color_eyre::Report>;

/// Result of handling an input event.
///
/// This enum represents the three possible outcomes of handling a key event:
/// - `Ignored` - The handler didn't recognize or handle this input
/// - `Consumed` - The input was handled but produced no message
/// - `Event(E)` - The input was handled and produced a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handled<E> {
    /// Input was not handled, parent should process it.
    Ignored,
    /// Input was consumed but produced no event.
    Consumed,
    /// Input was consumed and produced an event.
    Event(E),
}

impl<E> Handled<E> {
    /// Returns true if the input was consumed (not ignored).
    pub const fn is_consumed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }

    /// Returns the event if present.
    pub fn event(self) -> Option<E> {
        match self {
            Self::Event(e) => Some(e),
            _ => None,
        }
    }

    /// Maps the event type using the provided function.
    pub fn map<F, U>(self, f: F) -> Handled<U>
    where
        F: FnOnce(E) -> U,
    {
        match self {
            Self::Ignored => Handled::Ignored,
            Self::Consumed => Handled::Consumed,
            Self::Event(e) => Handled::Event(f(e)),
        }
    }
}

impl<E> From<E> for Handled<E> {
    fn from(event: E) -> Self {
        Self::Event(event)
    }
}

/// Extension trait for processing `Result<Handled<E>>` in event handlers.
pub trait HandledResultExt<E> {
    /// Process the result, returning whether it was consumed and any event.
    ///
    /// Errors are treated as consumed (returns `(true, None)`).
    fn process(self) -> (bool, Option<E>);
}

impl<E> HandledResultExt<E> for Result<Handled<E>> {
    fn process(self) -> (bool, Option<E>) {
        match self {
            Ok(Handled::Event(e)) => (true, Some(e)),
            Ok(Handled::Consumed) => (true, None),
            Ok(Handled::Ignored) => (false, None),
            Err(error) => {
                tracing::error!("Error while handling key: {error:?}");
                (true, None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use color_eyre::eyre::eyre;

    use super::*;

    #[test]
    fn test_handled_map_and_event() {
        let handled: Handled<u8> = 3.into();
        assert!(handled.is_consumed());
        assert_eq!(handled.map(u16::from).event(), Some(3u16));
        assert!(!Handled::<u8>::Ignored.is_consumed());
        assert_eq!(Handled::<u8>::Consumed.event(), None);
    }

    #[test]
    fn test_process() {
        let ok: Result<Handled<&str>> = Ok("x".into());
        assert_eq!(ok.process(), (true, Some("x")));
        let ignored: Result<Handled<&str>> = Ok(Handled::Ignored);
        assert_eq!(ignored.process(), (false, None));
        let failed: Result<Handled<&str>> = Err(eyre!("boom"));
        assert_eq!(failed.process(), (true, None));
    }
}
