// Re-export SDK modules so binary-internal modules can use crate::<module>::
pub(crate) use planner_sdk::{
    analytics, api, assistant, bulk, calendar, deadlines, error, labels, store,
};

mod app;
mod config;
mod edit_buffer;
mod keys;
mod logging;
mod ui;

use std::path::PathBuf;

use config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir().unwrap_or_else(|| PathBuf::from("."));
    let path = config_dir.join("config.toml");

    if !path.exists() {
        AppConfig::write_default(&path)?;
        eprintln!("Created default config at: {}", path.display());
    }

    let config = match AppConfig::load_from_path(&path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", path.display(), e);
            eprintln!("Fix the config file or delete it to regenerate defaults.");
            return Ok(());
        }
    };

    let log_path = config.logging.path(&config_dir);
    if let Err(e) = logging::init(&config.logging.level, &log_path) {
        eprintln!("Logging disabled: {}", e);
    }
    tracing::info!(config = %path.display(), log = %log_path.display(), "starting planner");

    let mut terminal = ratatui::init();

    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        hook(info);
    }));

    let result = app::run(&config, &mut terminal).await;
    ratatui::restore();

    if let Err(e) = result {
        tracing::error!(error = %e, "planner exited with an error");
        eprintln!("Error: {}", e);
    }

    Ok(())
}
