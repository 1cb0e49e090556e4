//! Tab layouts.

pub mod resource;
