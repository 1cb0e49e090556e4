//! Inventory management admin client.
//!
//! Provides typed models, a REST client and generic resource controllers
//! for the products, suppliers, stock and orders of an inventory service,
//! plus a terminal front end built on them.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod tui;

pub use error::{ImsError, Result};
