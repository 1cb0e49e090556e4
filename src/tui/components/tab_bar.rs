//! Tab bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Tabs,
};

use crate::tui::app::{App, Tab};

/// Renders one title per resource with its row count.
///
/// Tabs whose last operation failed are marked with `!`.
pub fn render<A>(frame: &mut Frame, area: Rect, app: &App<A>) {
    let titles = Tab::ALL.iter().map(|tab| {
        let screen = app.screen_for(*tab);
        let mut spans = vec![Span::raw(format!("{} ({})", tab.title(), screen.row_count()))];
        if screen.last_error().is_some() {
            spans.push(Span::styled(" !", Style::default().fg(Color::Red)));
        }
        Line::from(spans)
    });

    let tabs = Tabs::new(titles)
        .select(app.active_tab)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" ");
    frame.render_widget(tabs, area);
}
