//! Terminal session for the gallery.
//!
//! [`Tui`] owns the ratatui terminal and a background feed that turns
//! crossterm input, tick and frame intervals into [`Event`]s for the app.

use std::io::Stdout;
use std::ops::{Deref, DerefMut};
use std::time::Duration;

use color_eyre::eyre::eyre;
use crossterm::cursor;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, Event as CrosstermEvent, EventStream, KeyCode,
    KeyEvent, KeyEventKind, KeyModifiers,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use futures::{FutureExt, StreamExt};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

use crate::config::TuiConfig;

const GRACEFUL_SHUTDOWN_TIMEOUT_MS: u64 = 500;
const FORCEFUL_SHUTDOWN_TIMEOUT_MS: u64 = 2000;

pub type Backend = CrosstermBackend<Stdout>;

/// What the app loop reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Quit,
    Suspend,
    Tick,
    Render,
    Key(KeyEvent),
    /// Text from a bracketed paste, delivered in one piece.
    Paste(String),
    Resize(u16, u16),
    Error(String),
}

/// Map a terminal event to an app event.
///
/// Key releases, mouse and focus events have no use here and map to `None`.
pub fn translate(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            Some(match key.code {
                KeyCode::Char('c') if ctrl => Event::Quit,
                KeyCode::Char('z') if ctrl => Event::Suspend,
                _ => Event::Key(key),
            })
        }
        CrosstermEvent::Paste(text) => Some(Event::Paste(text)),
        CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
        _ => None,
    }
}

/// Interval for a per-second rate. Rates below one are raised to one.
fn period(rate: f64) -> Duration {
    Duration::from_secs_f64(1.0 / rate.max(1.0))
}

/// Background task feeding the event channel until cancelled.
struct EventFeed {
    task: JoinHandle<()>,
    cancel: CancellationToken,
}

impl EventFeed {
    fn spawn(tx: UnboundedSender<Event>, tick: Duration, frame: Duration) -> Self {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(pump(tx, cancel.clone(), tick, frame));
        Self { task, cancel }
    }

    fn shutdown(self) -> color_eyre::Result<()> {
        self.cancel.cancel();
        let mut waited = 0;
        while !self.task.is_finished() {
            std::thread::sleep(Duration::from_millis(1));
            waited += 1;
            if waited >= GRACEFUL_SHUTDOWN_TIMEOUT_MS {
                self.task.abort();
            }
            if waited >= FORCEFUL_SHUTDOWN_TIMEOUT_MS {
                return Err(eyre!("Terminal event task did not stop"));
            }
        }
        Ok(())
    }
}

async fn pump(
    tx: UnboundedSender<Event>,
    cancel: CancellationToken,
    tick: Duration,
    frame: Duration,
) {
    let mut input = EventStream::new();
    let mut ticks = interval(tick);
    let mut frames = interval(frame);

    loop {
        let event = tokio::select! {
            () = cancel.cancelled() => break,
            _ = ticks.tick() => Event::Tick,
            _ = frames.tick() => Event::Render,
            next = input.next().fuse() => match next {
                Some(Ok(event)) => match translate(event) {
                    Some(event) => event,
                    None => continue,
                },
                Some(Err(e)) => Event::Error(e.to_string()),
                None => break,
            },
        };
        if tx.send(event).is_err() {
            break;
        }
    }
}

#[cfg(unix)]
fn quit_on_sigterm(tx: UnboundedSender<Event>) {
    use tokio::signal::unix::{SignalKind, signal};

    tokio::spawn(async move {
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                let _ = tx.send(Event::Quit);
            }
            Err(e) => warn!("Could not install SIGTERM handler: {e}"),
        }
    });
}

/// Raw-mode terminal plus the event feed.
pub struct Tui {
    terminal: Terminal<Backend>,
    feed: Option<EventFeed>,
    event_tx: UnboundedSender<Event>,
    event_rx: UnboundedReceiver<Event>,
    tick: Duration,
    frame: Duration,
}

impl Tui {
    pub fn new(config: &TuiConfig) -> color_eyre::Result<Self> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        #[cfg(unix)]
        quit_on_sigterm(event_tx.clone());
        Ok(Self {
            terminal: Terminal::new(Backend::new(std::io::stdout()))?,
            feed: None,
            event_tx,
            event_rx,
            tick: period(config.tick_rate),
            frame: period(config.frame_rate),
        })
    }

    /// Raw mode, alternate screen and bracketed paste, then start the feed.
    pub fn enter(&mut self) -> color_eyre::Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(
            std::io::stdout(),
            EnterAlternateScreen,
            EnableBracketedPaste,
            cursor::Hide
        )?;
        self.stop_feed()?;
        self.feed = Some(EventFeed::spawn(
            self.event_tx.clone(),
            self.tick,
            self.frame,
        ));
        Ok(())
    }

    /// Stop the feed and restore the terminal.
    pub fn exit(&mut self) -> color_eyre::Result<()> {
        self.stop_feed()?;
        if crossterm::terminal::is_raw_mode_enabled()? {
            self.flush()?;
            crossterm::execute!(
                std::io::stdout(),
                DisableBracketedPaste,
                LeaveAlternateScreen,
                cursor::Show
            )?;
            crossterm::terminal::disable_raw_mode()?;
        }
        Ok(())
    }

    fn stop_feed(&mut self) -> color_eyre::Result<()> {
        self.feed.take().map_or(Ok(()), EventFeed::shutdown)
    }

    /// Hand the terminal back to the shell until the process is resumed.
    pub fn suspend(&mut self) -> color_eyre::Result<()> {
        self.exit()?;
        #[cfg(not(windows))]
        signal_hook::low_level::raise(signal_hook::consts::SIGTSTP)?;
        Ok(())
    }

    pub fn resume(&mut self) -> color_eyre::Result<()> {
        self.enter()?;
        self.terminal.clear()?;
        Ok(())
    }

    pub async fn next_event(&mut self) -> Option<Event> {
        self.event_rx.recv().await
    }
}

impl Deref for Tui {
    type Target = Terminal<Backend>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for Tui {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            error!("Failed to restore terminal: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventState, MouseEvent, MouseEventKind};

    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_control_chords() {
        assert_eq!(
            translate(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Event::Quit)
        );
        assert_eq!(
            translate(press(KeyCode::Char('z'), KeyModifiers::CONTROL)),
            Some(Event::Suspend)
        );
        let plain = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE);
        assert_eq!(
            translate(CrosstermEvent::Key(plain)),
            Some(Event::Key(plain))
        );
    }

    #[test]
    fn test_paste_and_resize_pass_through() {
        assert_eq!(
            translate(CrosstermEvent::Paste("a b".to_string())),
            Some(Event::Paste("a b".to_string()))
        );
        assert_eq!(
            translate(CrosstermEvent::Resize(80, 24)),
            Some(Event::Resize(80, 24))
        );
    }

    #[test]
    fn test_unused_events_are_dropped() {
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(translate(CrosstermEvent::Key(release)), None);
        assert_eq!(translate(CrosstermEvent::FocusLost), None);
        let mouse = MouseEvent {
            kind: MouseEventKind::Moved,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(translate(CrosstermEvent::Mouse(mouse)), None);
    }

    #[test]
    fn test_period_guards_low_rates() {
        assert_eq!(period(4.0), Duration::from_millis(250));
        assert_eq!(period(0.0), Duration::from_secs(1));
    }
}
