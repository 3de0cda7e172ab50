// ABOUTME: Command-line surface of tmux-nav

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::session::SyncDirection;

/// Jump between tmux sessions named after project directories.
///
/// Every navigation is recorded in a visit history stored in the config
/// file, which `next`, `prev` and `sync` work from.
#[derive(Parser, Debug)]
#[command(name = "tmux-nav", author, version, about)]
pub struct Cli {
    /// Increase the verbosity level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default is $HOME/.tmux-nav.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Create a session from a directory picked among the project trees
    New,

    /// Go to the given session or pick one of the running sessions
    Go {
        /// Session name, usually a directory path
        session: Option<String>,
    },

    /// Display the running sessions and switch to the selected one
    Display {
        /// Only display, don't switch
        #[arg(long)]
        no_switch: bool,
    },

    /// Go to the next session in history
    Next,

    /// Go to the previous session in history
    Prev,

    /// List the session history; the current session is marked with `*`
    List,

    /// Add a session to history and switch to it
    Add { session: String },

    /// Kill a session and remove it from history
    Remove { session: String },

    /// Sync history from tmux, or tmux from history with --reverse
    Sync {
        /// Open and close tmux sessions until they match the history
        #[arg(long)]
        reverse: bool,
    },

    /// Print the current configuration
    Config,

    /// Replace the current session's windows with the configured set
    Layout,
}

impl Command {
    pub fn sync_direction(reverse: bool) -> SyncDirection {
        if reverse {
            SyncDirection::Reverse
        } else {
            SyncDirection::Adopt
        }
    }
}
