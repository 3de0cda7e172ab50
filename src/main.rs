// ABOUTME: Main entry point for the tmux-nav CLI

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use tmux_nav::app::App;
use tmux_nav::cli::{Cli, Command};
use tmux_nav::config::ConfigStore;
use tmux_nav::discovery;
use tmux_nav::picker::FzfPicker;
use tmux_nav::tmux::TmuxClient;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let store = match cli.config {
        Some(path) => ConfigStore::new(path),
        None => ConfigStore::default_location()?,
    };

    let mux = TmuxClient::new();
    let picker = FzfPicker::new();
    let mut app = App::load(&mux, &picker, store)?;

    match cli.command {
        Command::New => {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));
            let scans = discovery::default_scans(&home)?;
            app.new_session(scans).await
        }
        Command::Go { session } => app.go(session.as_deref()),
        Command::Display { no_switch } => app.display(no_switch),
        Command::Next => app.next(),
        Command::Prev => app.prev(),
        Command::List => app.list(&mut io::stdout().lock()),
        Command::Add { session } => app.add(&session),
        Command::Remove { session } => app.remove(&session),
        Command::Sync { reverse } => app.sync(Command::sync_direction(reverse)).map(|_| ()),
        Command::Config => app.show_config(&mut io::stdout().lock()),
        Command::Layout => {
            let cwd = std::env::current_dir().context("can't get current working directory")?;
            app.layout(&cwd.to_string_lossy())
        }
    }
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::prelude::*;

    let default_filter = if verbose {
        "tmux_nav=debug"
    } else {
        "tmux_nav=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}

/// Prints the top-level reason followed by the underlying causes.
fn report_error(err: &anyhow::Error) {
    error!("{err:#}");
    eprintln!("\nError: {err}\n");
    for cause in err.chain().skip(1) {
        eprintln!("  {cause}");
    }
    eprintln!();
}
