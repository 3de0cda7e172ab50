// ABOUTME: Host tmux server control
// Wraps the tmux command-line client behind the Multiplexer trait

pub mod client;
pub mod error;

pub use client::{session_id, session_name, Multiplexer, TmuxClient};
pub use error::TmuxError;

#[cfg(test)]
pub use client::MockMultiplexer;
