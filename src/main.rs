//! Entry point and runtime setup.

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;

mod app;
mod bus;
mod config;
mod events;
mod focus;
mod hold;
mod layout;
mod library;
mod screens;
mod shortcuts;
mod ui;
mod worker;

/// Log to a file so the TUI stays clean. Keep the guard alive.
fn init_logging() -> Result<WorkerGuard> {
    let log_file = "hub_tui.log";
    let file_appender = tracing_appender::rolling::never(".", log_file);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to init logging: {e}"))?;
    tracing::info!("logging to {}", log_file);
    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = init_logging()?;
    tracing::info!("hub starting");
    let mut terminal = ui::init_terminal()?;
    let res = app::run_app(&mut terminal).await;
    // Restore even when the app failed.
    ui::restore_terminal()?;
    if let Err(ref e) = res {
        tracing::error!("app error: {e}");
    }
    tracing::info!("hub exiting");
    res
}
