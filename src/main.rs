use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, bail};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::config::KeyResolver;
use crate::gallery::Gallery;

mod app;
mod cli;
mod config;
mod gallery;
mod theme;
pub mod tui;
mod ui;

pub use theme::Theme;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _guard = initialize_logging()?;
    info!("Starting widgetbench");

    let args = cli::Args::parse();

    let config = Arc::new(config::load()?);
    let resolver = Arc::new(KeyResolver::new(Arc::new(config.keybindings.clone())));

    let custom = args.data.as_deref().map(load_records).transpose()?;
    let stories = gallery::all_stories(&config.table, &resolver, custom)?;
    let gallery = Gallery::new(stories)?;

    let mut app = App::new(gallery, config, resolver)?;
    app.apply_cli_args(&args)?;
    app.run().await?;

    Ok(())
}

/// Read a JSON array of objects for the custom data story.
fn load_records(path: &Path) -> Result<Vec<serde_json::Value>> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .wrap_err_with(|| format!("{} is not valid JSON", path.display()))?;
    let serde_json::Value::Array(records) = value else {
        bail!("{} must contain a JSON array", path.display());
    };
    if let Some(index) = records.iter().position(|r| !r.is_object()) {
        bail!("Entry {index} in {} is not an object", path.display());
    }
    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

fn initialize_logging() -> Result<WorkerGuard> {
    let directory = dirs::data_local_dir().map_or_else(
        || std::path::PathBuf::from("logs"),
        |path| path.join("widgetbench").join("logs"),
    );
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::daily(&directory, "widgetbench.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .init();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("widgetbench-{}-{name}", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_records() {
        let path = write_temp("ok.json", r#"[{"id": 1, "name": "Ada"}, {"id": 2}]"#);
        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_records_rejects_non_arrays() {
        let object = write_temp("object.json", r#"{"id": 1}"#);
        assert!(load_records(&object).is_err());
        let mixed = write_temp("mixed.json", r#"[{"id": 1}, 2]"#);
        assert!(load_records(&mixed).is_err());
        std::fs::remove_file(object).unwrap();
        std::fs::remove_file(mixed).unwrap();
    }
}
