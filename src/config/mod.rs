pub mod actions;
mod defaults;
pub mod key;
pub mod keybindings;
pub mod loader;
pub mod resolver;

pub use actions::*;
use keybindings::KeybindingsConfig;
pub use loader::{load, save_last_story, save_theme};
pub use resolver::KeyResolver;
use serde::{Deserialize, Serialize};

use crate::ui::ReconcilePolicy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Catppuccin Mocha".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// What happens to selected rows when a story swaps its records.
    pub reconcile_selection: ReconcilePolicy,
    /// Rows moved by page up/down.
    pub page_size: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            reconcile_selection: ReconcilePolicy::Keep,
            page_size: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    pub frame_rate: f64,
    pub tick_rate: f64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            tick_rate: 8.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub tui: TuiConfig,
    #[serde(default)]
    pub last_story: Option<String>,
}
