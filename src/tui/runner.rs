//! Main TUI loop.

use tokio::sync::mpsc;
use tracing::info;

use crate::api::InventoryApi;
use crate::{ImsError, Result};

use super::app::App;
use super::event::{dispatch, spawn_event_reader, spawn_tick_timer, update};
use super::terminal::Tui;
use super::ui::render;

/// Tick interval for redraws while requests are pending.
const TICK_MS: u64 = 250;

/// Runs the UI until the user quits.
///
/// Every resource is loaded once on start-up. Requests run on background
/// tasks and their replies arrive as messages, so the screen keeps
/// redrawing while the API is slow.
///
/// # Errors
///
/// Returns an error if drawing to the terminal fails.
pub async fn run<A: InventoryApi>(terminal: &mut Tui, app: &mut App<A>) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_event_reader(tx.clone());
    spawn_tick_timer(tx.clone(), TICK_MS);

    for action in app.initial_loads() {
        dispatch(app, action, &tx);
    }

    info!(api = %app.api_url, "inventory admin started");

    while !app.should_quit {
        terminal
            .draw(|frame| render(frame, app))
            .map_err(|e| ImsError::Io(format!("failed to draw: {e}")))?;

        let Some(message) = rx.recv().await else {
            break;
        };
        if let Some(action) = update(app, message) {
            dispatch(app, action, &tx);
        }
        // Drain whatever else arrived before redrawing
        while let Ok(message) = rx.try_recv() {
            if let Some(action) = update(app, message) {
                dispatch(app, action, &tx);
            }
        }
    }

    info!("inventory admin stopped");
    Ok(())
}
