// ABOUTME: Library crate for tmux-nav exposing the session navigation core for testing and reuse

pub mod app;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod picker;
pub mod session;
pub mod tmux;
