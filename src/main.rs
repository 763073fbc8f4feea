//! Quality Console - Main Entry Point
//!
//! Native admin client for data-quality rule management.

use anyhow::Context;
use quality_console::api::{ApiClient, SessionStore};
use quality_console::app::application::run_app;
use quality_console::config::AppConfig;
use quality_console::helpers::get_or_create_data_dir;
use quality_console::logging;
use quality_console::state::session_state::SessionState;
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    // Keep the guard alive until exit so buffered log lines are flushed
    let _log_guard = match get_or_create_data_dir() {
        Ok(dir) => Some(logging::init(&dir.join("logs"))),
        Err(_) => {
            logging::init_stdout();
            None
        }
    };

    let config = AppConfig::try_load().context("loading configuration")?;
    info!(base_url = %config.api.base_url, "Starting Quality Console");

    let client = ApiClient::new(&config.api).context("building the HTTP client")?;
    let store = SessionStore::open_default()
        .inspect_err(|e| warn!(error = %e, "Session storage unavailable; sign-in will not persist"))
        .ok();
    let session = SessionState::restore(client, store);

    run_app(config, session);
    Ok(())
}
