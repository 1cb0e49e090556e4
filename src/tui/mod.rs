//! Terminal User Interface for the inventory admin client.
//!
//! One tab per resource, each showing the entity table and the
//! create/edit form backed by a [`ResourceController`](crate::controller::ResourceController).

pub mod app;
pub mod components;
pub mod event;
pub mod input;
pub mod runner;
pub mod tabs;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use event::{Action, Event, Message};
pub use runner::run;
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
