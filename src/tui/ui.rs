//! Main UI rendering coordinator.

use ratatui::Frame;

use super::app::App;
use super::tabs::resource;

/// Renders the entire application UI.
pub fn render<A>(frame: &mut Frame, app: &App<A>) {
    resource::render(frame, app);
}
