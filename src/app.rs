use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::layout::{Constraint, Layout, Rect};
use tracing::{debug, error, info, warn};

use crate::Theme;
use crate::cli::Args;
use crate::config::{self, AppConfig, GlobalAction, KeyResolver};
use crate::gallery::Gallery;
use crate::theme::{next_theme, theme_from_name};
use crate::tui::{Event, Tui};
use crate::ui::{HandledResultExt, StatusBar, StatusLine};

const STATUS_BAR_HEIGHT: u16 = 3;

pub struct App {
    gallery: Gallery,
    status_bar: StatusBar,
    config: Arc<AppConfig>,
    resolver: Arc<KeyResolver>,
    theme: Theme,
    theme_name: String,
    should_quit: bool,
}

impl App {
    pub fn new(
        gallery: Gallery,
        config: Arc<AppConfig>,
        resolver: Arc<KeyResolver>,
    ) -> color_eyre::Result<Self> {
        let info = theme_from_name(&config.theme.name);
        let mut app = Self {
            gallery,
            status_bar: StatusBar::new(Arc::clone(&resolver)),
            theme: info.theme,
            theme_name: info.name.to_string(),
            config,
            resolver,
            should_quit: false,
        };
        if let Some(story) = app.config.last_story.clone()
            && !app.gallery.select_by_name(&story)
        {
            debug!("Saved story {story:?} no longer exists");
        }
        Ok(app)
    }

    /// Command line flags win over the saved config.
    pub fn apply_cli_args(&mut self, args: &Args) -> color_eyre::Result<()> {
        if let Some(name) = &args.theme {
            let info = theme_from_name(name);
            info!("Using theme {} from command line", info.name);
            self.theme = info.theme;
            self.theme_name = info.name.to_string();
        }
        if let Some(story) = &args.story
            && !self.gallery.select_by_name(story)
        {
            color_eyre::eyre::bail!("Unknown story: {story}");
        }
        Ok(())
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = Tui::new(&self.config.tui)?;
        tui.enter()?;

        while !self.should_quit {
            let Some(event) = tui.next_event().await else {
                break;
            };
            self.handle_event(&mut tui, event)?;
        }

        tui.exit()?;

        if let Err(e) = config::save_last_story(&self.gallery.current_id()) {
            warn!("Failed to save last story: {e}");
        }
        Ok(())
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) -> color_eyre::Result<()> {
        match event {
            Event::Quit => self.should_quit = true,
            Event::Suspend => {
                tui.suspend()?;
                tui.resume()?;
            }
            Event::Tick => self.gallery.on_tick(),
            Event::Render => self.render(tui)?,
            Event::Resize(width, height) => {
                tui.resize(Rect::new(0, 0, width, height))?;
                self.render(tui)?;
            }
            Event::Key(key) => self.handle_key(key),
            Event::Paste(text) => {
                if !self.gallery.handle_paste(&text).is_consumed() {
                    debug!("Dropped paste of {} chars", text.chars().count());
                }
            }
            Event::Error(message) => error!("Terminal event error: {message}"),
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let (consumed, _) = self.gallery.handle_key(key).process();
        if consumed {
            return;
        }

        if self.resolver.matches_global(&key, GlobalAction::Quit) {
            self.should_quit = true;
        } else if self.resolver.matches_global(&key, GlobalAction::NextStory) {
            self.gallery.next();
        } else if self.resolver.matches_global(&key, GlobalAction::PrevStory) {
            self.gallery.prev();
        } else if self.resolver.matches_global(&key, GlobalAction::Theme) {
            self.cycle_theme();
        }
    }

    fn cycle_theme(&mut self) {
        let info = next_theme(&self.theme_name);
        info!("Switching theme to {}", info.name);
        self.theme = info.theme;
        self.theme_name = info.name.to_string();
        if let Err(e) = config::save_theme(&self.theme_name) {
            warn!("Failed to save theme: {e}");
        }
    }

    fn render(&mut self, tui: &mut Tui) -> color_eyre::Result<()> {
        tui.draw(|frame| {
            let [main_area, status_area] =
                Layout::vertical([Constraint::Min(0), Constraint::Length(STATUS_BAR_HEIGHT)])
                    .areas(frame.area());

            self.gallery.render(frame, main_area, &self.theme);

            let status = StatusLine {
                position: self.gallery.position(),
                total: self.gallery.len(),
                theme_name: &self.theme_name,
            };
            self.status_bar.render_with_keybindings(
                frame,
                status_area,
                &self.theme,
                &status,
                &self.gallery.keybindings(),
            );
        })?;
        Ok(())
    }
}
