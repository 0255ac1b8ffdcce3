//! TUI views

pub mod list;
