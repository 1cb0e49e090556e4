//! Resource tab layout and rendering.
//!
//! Every resource shares one layout: the entity table on top and the
//! create/edit form below it.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
};

use crate::tui::app::{App, Mode, Screen};
use crate::tui::components::{status_bar, tab_bar};

/// Renders the active resource tab.
pub fn render<A>(frame: &mut Frame, app: &App<A>) {
    let area = frame.area();
    let screen = app.screen();
    let form_height = u16::try_from(screen.fields().len()).unwrap_or(u16::MAX) + 2;

    // Main vertical layout
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // Tab bar
            Constraint::Length(1),           // Status bar
            Constraint::Length(1),           // Error banner
            Constraint::Min(5),              // Entity table
            Constraint::Length(form_height), // Form
            Constraint::Length(1),           // Keybindings help
        ])
        .split(area);

    tab_bar::render(frame, main_layout[0], app);
    status_bar::render(frame, main_layout[1], app);
    render_error(frame, main_layout[2], screen);
    render_table(frame, main_layout[3], app);
    render_form(frame, main_layout[4], app);
    render_keybindings(frame, main_layout[5], app);
}

/// Renders the last error, or nothing.
fn render_error(frame: &mut Frame, area: Rect, screen: &dyn Screen) {
    if let Some(error) = screen.last_error() {
        let para = Paragraph::new(format!(" {error} "))
            .style(Style::default().fg(Color::White).bg(Color::Red));
        frame.render_widget(para, area);
    }
}

/// Renders the entity table with the selected row highlighted.
fn render_table<A>(frame: &mut Frame, area: Rect, app: &App<A>) {
    let screen = app.screen();
    let is_focused = app.mode != Mode::Insert;
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title = if screen.is_loading() {
        format!(" {} [loading] ", screen.labels().title)
    } else {
        format!(" {} ", screen.labels().title)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let rows = screen.rows();
    if rows.is_empty() {
        let para = Paragraph::new(Line::from(Span::styled(
            format!("No {}", screen.labels().title.to_lowercase()),
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(para, area);
        return;
    }

    let columns = screen.columns();
    let widths = column_widths(columns, &rows);

    let header = Row::new(columns.iter().copied())
        .style(Style::default().add_modifier(Modifier::BOLD));
    let table = Table::new(rows.into_iter().map(Row::new), widths)
        .header(header)
        .block(block)
        .column_spacing(2)
        .row_highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default().with_selected(app.selected_row());
    frame.render_stateful_widget(table, area, &mut state);
}

/// Widest cell per column, header included.
fn column_widths(columns: &[&str], rows: &[Vec<String>]) -> Vec<Constraint> {
    columns
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let widest = rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| unicode_width::UnicodeWidthStr::width(cell.as_str()))
                .chain([header.len()])
                .max()
                .unwrap_or(0);
            Constraint::Length(u16::try_from(widest).unwrap_or(u16::MAX))
        })
        .collect()
}

/// Renders the create/edit form.
fn render_form<A>(frame: &mut Frame, area: Rect, app: &App<A>) {
    let screen = app.screen();
    let labels = screen.labels();
    let is_insert = app.mode == Mode::Insert;

    let border_style = if is_insert {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut title = match screen.editing_label() {
        Some(id) => format!(" {} #{id} ", labels.update_action),
        None => format!(" {} ", labels.create_action),
    };
    if is_insert {
        title.push_str("(INSERT) ");
    }

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let fields = screen.fields();
    let label_width = fields.iter().map(|f| f.len()).max().unwrap_or(0);

    let lines: Vec<Line> = fields
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let focused = is_insert && i == app.field_index;
            let label_style = if focused {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(vec![
                Span::styled(format!("{name:>label_width$}: "), label_style),
                Span::raw(screen.field(i).to_string()),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);

    // Show cursor in insert mode
    if is_insert {
        let prefix = u16::try_from(label_width + 2).unwrap_or(u16::MAX);
        let offset = app.cursor.display_offset(screen.field(app.field_index));
        let cursor_x = inner
            .x
            .saturating_add(prefix)
            .saturating_add(offset)
            .min(inner.right().saturating_sub(1));
        let cursor_y = inner.y + u16::try_from(app.field_index).unwrap_or(0);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

/// Renders the keybindings help line.
fn render_keybindings<A>(frame: &mut Frame, area: Rect, app: &App<A>) {
    let help = match app.mode {
        Mode::Insert => "[Esc]normal [Tab/↓]next field [↑]previous field [Enter]submit",
        Mode::Normal => {
            "[Tab]switch tab [j/k]select [i]form [e]edit [d]delete [s]submit [c]cancel edit [r]reload [q]quit"
        }
        Mode::Confirm => "Delete selected row? [y]yes [n]no",
    };

    let style = if app.mode == Mode::Confirm {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let para = Paragraph::new(help).style(style);
    frame.render_widget(para, area);
}
