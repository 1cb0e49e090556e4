//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::{App, Tab};

/// Renders the status bar.
pub fn render<A>(frame: &mut Frame, area: Rect, app: &App<A>) {
    let screen = app.screen();

    let (label, status_color) = if screen.is_busy() {
        ("Saving", Color::Yellow)
    } else if screen.is_loading() {
        ("Loading", Color::Yellow)
    } else {
        ("Ready", Color::Green)
    };

    let edit_span = match screen.editing_label() {
        Some(id) => Span::styled(
            format!(" Editing #{id} "),
            Style::default().fg(Color::Cyan),
        ),
        None => Span::styled(" New ", Style::default().fg(Color::White)),
    };

    let tab_info = format!(" {}/{} ", app.active_tab + 1, Tab::ALL.len());

    let spans = vec![
        Span::styled(format!(" {label} "), Style::default().fg(status_color)),
        Span::raw("│"),
        Span::styled(
            format!(" {} ", app.api_url),
            Style::default().fg(Color::White),
        ),
        Span::raw("│"),
        edit_span,
        Span::raw("│"),
        Span::raw(format!(
            "{:>width$}",
            tab_info,
            width = area.width.saturating_sub(45) as usize
        )),
    ];

    let line = Line::from(spans);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
