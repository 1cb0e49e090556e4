use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use ims::ImsError;
use ims::api::RestClient;
use ims::config::fetch_config;
use ims::tui::{App, restore_terminal, run, setup_terminal};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ImsError> {
    let app_config = fetch_config()?;

    // The terminal belongs to the UI, so logs only go to a file.
    if let Some(path) = &app_config.log_file {
        init_tracing(path)?;
    }

    let client = RestClient::new(app_config.api.clone())?;
    let mut app = App::new(client, app_config.api.base_url.as_str());

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut app).await;
    restore_terminal(&mut terminal)?;

    result
}

/// Initializes the tracing subscriber writing to `path`.
fn init_tracing(path: &Path) -> Result<(), ImsError> {
    let file = File::create(path)
        .map_err(|e| ImsError::Io(format!("failed to open log file {}: {e}", path.display())))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}
