//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{InventoryApi, ResourceApi};
use crate::controller::{Reply, Request};
use crate::models::{Order, Product, Resource, Stock, Supplier};

use super::app::{App, Mode};

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),
    /// Reply to a product request.
    Products(Reply<Product>),
    /// Reply to a supplier request.
    Suppliers(Reply<Supplier>),
    /// Reply to a stock request.
    Stock(Reply<Stock>),
    /// Reply to an order request.
    Orders(Reply<Order>),
}

/// Requests that must be sent to the API outside the update loop.
#[derive(Debug)]
pub enum Action {
    Products(Request<Product>),
    Suppliers(Request<Supplier>),
    Stock(Request<Stock>),
    Orders(Request<Order>),
}

/// Routes a resource's requests and replies through [`Action`] and [`Message`].
pub trait Routed: Resource {
    fn action(request: Request<Self>) -> Action;
    fn message(reply: Reply<Self>) -> Message;
}

impl Routed for Product {
    fn action(request: Request<Self>) -> Action {
        Action::Products(request)
    }

    fn message(reply: Reply<Self>) -> Message {
        Message::Products(reply)
    }
}

impl Routed for Supplier {
    fn action(request: Request<Self>) -> Action {
        Action::Suppliers(request)
    }

    fn message(reply: Reply<Self>) -> Message {
        Message::Suppliers(reply)
    }
}

impl Routed for Stock {
    fn action(request: Request<Self>) -> Action {
        Action::Stock(request)
    }

    fn message(reply: Reply<Self>) -> Message {
        Message::Stock(reply)
    }
}

impl Routed for Order {
    fn action(request: Request<Self>) -> Action {
        Action::Orders(request)
    }

    fn message(reply: Reply<Self>) -> Message {
        Message::Orders(reply)
    }
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            // Poll for events with a 50ms timeout
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Sends an action's request on a background task.
///
/// The reply comes back through `tx` as a [`Message`].
pub fn dispatch<A: InventoryApi>(app: &App<A>, action: Action, tx: &mpsc::UnboundedSender<Message>) {
    match action {
        Action::Products(request) => spawn_request(app.products.api().clone(), request, tx.clone()),
        Action::Suppliers(request) => {
            spawn_request(app.suppliers.api().clone(), request, tx.clone());
        }
        Action::Stock(request) => spawn_request(app.stock.api().clone(), request, tx.clone()),
        Action::Orders(request) => spawn_request(app.orders.api().clone(), request, tx.clone()),
    }
}

fn spawn_request<R, A>(api: A, request: Request<R>, tx: mpsc::UnboundedSender<Message>)
where
    R: Routed,
    A: ResourceApi<R>,
{
    tokio::spawn(async move {
        let reply = request.send(&api).await;
        // A closed channel means the UI is shutting down.
        let _ = tx.send(R::message(reply));
    });
}

/// Updates application state based on a message.
pub fn update<A>(app: &mut App<A>, message: Message) -> Option<Action> {
    let action = match message {
        Message::Input(event) => return handle_input(app, event),
        Message::Products(reply) => app.products.apply(reply).map(Action::Products),
        Message::Suppliers(reply) => app.suppliers.apply(reply).map(Action::Suppliers),
        Message::Stock(reply) => app.stock.apply(reply).map(Action::Stock),
        Message::Orders(reply) => app.orders.apply(reply).map(Action::Orders),
    };
    // A reply may have replaced the draft under the cursor.
    app.clamp_cursor();
    action
}

/// Handles input events and updates application state.
fn handle_input<A>(app: &mut App<A>, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(_, _) | Event::Tick => None,
    }
}

/// Handles key press events.
fn handle_key<A>(app: &mut App<A>, key: KeyEvent) -> Option<Action> {
    // Global keys (work in any mode)
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return None;
        }
        KeyCode::Char('q') if key.modifiers.is_empty() && app.mode == Mode::Normal => {
            app.should_quit = true;
            return None;
        }
        KeyCode::Esc => {
            app.mode = Mode::Normal;
            return None;
        }
        _ => {}
    }

    // Mode-specific handling
    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Insert => handle_insert_mode(app, key),
        Mode::Confirm => handle_confirm_mode(app, key),
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode<A>(app: &mut App<A>, key: KeyEvent) -> Option<Action> {
    match key.code {
        // Tab navigation
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.previous_tab();
            } else {
                app.next_tab();
            }
            None
        }
        KeyCode::BackTab => {
            app.previous_tab();
            None
        }

        // Row selection
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_previous();
            None
        }

        KeyCode::Char('r') => Some(app.screen_mut().reload()),

        // Edit the form; refused while a save is pending
        KeyCode::Char('i') | KeyCode::Char('a') => {
            if !app.screen().is_busy() {
                app.mode = Mode::Insert;
                app.focus_field(app.field_index);
            }
            None
        }

        // Load the selected row into the form
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(row) = app.selected_row()
                && app.screen_mut().begin_edit_at(row)
            {
                app.mode = Mode::Insert;
                app.focus_field(0);
            }
            None
        }

        KeyCode::Char('c') => {
            app.screen_mut().cancel_edit();
            app.focus_field(0);
            None
        }

        KeyCode::Char('s') => app.screen_mut().submit(),

        KeyCode::Char('d') => {
            if app.selected_row().is_some() && !app.screen().is_busy() {
                app.mode = Mode::Confirm;
            }
            None
        }

        _ => None,
    }
}

/// Handles keys in insert mode (form input).
fn handle_insert_mode<A>(app: &mut App<A>, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => {
            let action = app.screen_mut().submit();
            if action.is_some() {
                app.mode = Mode::Normal;
                app.focus_field(0);
            }
            action
        }
        KeyCode::Tab | KeyCode::Down => {
            app.next_field();
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.previous_field();
            None
        }
        KeyCode::Char(c)
            if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
        {
            app.edit_field(|cursor, text| cursor.insert(text, c));
            None
        }
        KeyCode::Backspace => {
            app.edit_field(|cursor, text| cursor.backspace(text));
            None
        }
        KeyCode::Delete => {
            app.edit_field(|cursor, text| cursor.delete(text));
            None
        }
        KeyCode::Left => {
            app.edit_field(|cursor, text| cursor.move_left(text));
            None
        }
        KeyCode::Right => {
            app.edit_field(|cursor, text| cursor.move_right(text));
            None
        }
        KeyCode::Home => {
            app.cursor.move_home();
            None
        }
        KeyCode::End => {
            app.edit_field(|cursor, text| cursor.move_end(text));
            None
        }
        _ => None,
    }
}

/// Handles keys in confirm mode (delete prompt).
fn handle_confirm_mode<A>(app: &mut App<A>, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.mode = Mode::Normal;
            let row = app.selected_row()?;
            debug!(tab = app.current_tab().title(), row, "delete confirmed");
            app.screen_mut().remove_at(row)
        }
        KeyCode::Char('n') => {
            app.mode = Mode::Normal;
            None
        }
        _ => None,
    }
}
