// ABOUTME: Error types for tmux control operations
// Defines error conditions that can occur when driving the host tmux server

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmuxError {
    #[error("tmux not installed on host")]
    NotInstalled,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("failed to create session {name}: {reason}")]
    CreateFailed { name: String, reason: String },

    #[error("failed to attach to session {name}: {reason}")]
    AttachFailed { name: String, reason: String },

    #[error("failed to switch client to session {name}: {reason}")]
    SwitchFailed { name: String, reason: String },

    #[error("`tmux {command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TmuxError {
    /// True when tmux reported that no server is listening.
    pub fn is_no_server(&self) -> bool {
        match self {
            Self::CommandFailed { stderr, .. } => is_no_server_message(stderr),
            _ => false,
        }
    }
}

pub(crate) fn is_no_server_message(stderr: &str) -> bool {
    stderr.contains("no server running") || stderr.contains("error connecting to")
}
