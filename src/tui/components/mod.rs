//! Widgets shared by every resource tab.

pub mod status_bar;
pub mod tab_bar;
