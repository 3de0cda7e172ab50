// ABOUTME: Navigation commands: new, go, display, next, prev, add, remove, list

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::{no_selection, App};
use crate::discovery::{self, ScanSpec};
use crate::picker::PickerPrompt;

const NEW_SESSION_HEADER: &str = "Select the directory where you want your session to be created.";
const DISPLAY_HEADER: &str = "Press CTRL-X to delete a session.";

impl App<'_> {
    /// Picks a directory from the scanned roots and opens it as a session.
    pub async fn new_session(&mut self, scans: Vec<ScanSpec>) -> Result<()> {
        let candidates = discovery::discover(scans)
            .await
            .context("can't evaluate the list of possible directories")?;

        let prompt = PickerPrompt::new(NEW_SESSION_HEADER).with_preview(
            "ls -lha --group-directories-first --color=always {}",
            "right:40%",
        );
        let Some(id) = self
            .picker
            .pick(&candidates, &prompt)
            .context("can't get the selected session")?
        else {
            no_selection("directory");
            return Ok(());
        };

        self.visit(&id)
    }

    /// Goes to `id`, or to a session picked from the running ones.
    pub fn go(&mut self, id: Option<&str>) -> Result<()> {
        let id = match id {
            Some(id) => super::parse_session_arg(id)?,
            None => match self.pick_running()? {
                Some(id) => id,
                None => {
                    no_selection("session");
                    return Ok(());
                }
            },
        };
        self.visit(&id)
    }

    /// Shows the running sessions and switches to the selection.
    ///
    /// The selection is not recorded in history.
    pub fn display(&mut self, no_switch: bool) -> Result<()> {
        let Some(id) = self.pick_running()? else {
            no_selection("session");
            return Ok(());
        };
        if no_switch {
            return Ok(());
        }
        self.switch(&id)?;
        Ok(())
    }

    pub fn prev(&mut self) -> Result<()> {
        let target = self.config.history_mut().rotate_prev()?;
        self.save()?;
        self.switch(&target)?;
        Ok(())
    }

    pub fn next(&mut self) -> Result<()> {
        let target = self.config.history_mut().rotate_next()?;
        self.save()?;
        self.switch(&target)?;
        Ok(())
    }

    pub fn add(&mut self, id: &str) -> Result<()> {
        let id = super::parse_session_arg(id)?;
        self.visit(&id)
    }

    /// Kills the session and forgets it.
    pub fn remove(&mut self, id: &str) -> Result<()> {
        let id = super::parse_session_arg(id)?;
        self.mux
            .kill_session(&id)
            .with_context(|| format!("can't kill session {id}"))?;
        self.config.history_mut().remove(&id);
        self.save()
    }

    /// Prints the history, marking the current (last) entry.
    pub fn list(&self, out: &mut dyn Write) -> Result<()> {
        let history = self.config.history();
        let width = history.iter().map(|s| s.chars().count()).max().unwrap_or(0);
        let last = history.len().saturating_sub(1);

        for (i, session) in history.iter().enumerate() {
            let marker = if i == last { "*" } else { "" };
            writeln!(out, "{:<3} {:<width$}\t{}", i + 1, session, marker)?;
        }
        Ok(())
    }

    /// Runs the picker over the live sessions.
    fn pick_running(&mut self) -> Result<Option<String>> {
        let mut sessions = self.mux.list_sessions().context("can't list tmux sessions")?;
        if sessions.is_empty() {
            info!("No running sessions");
            return Ok(None);
        }
        sessions.sort();

        let selection = self
            .picker
            .pick(&sessions, &display_prompt(self.store.path()))
            .context("can't display tmux sessions")?;
        // ctrl-x runs `remove` in a child process that rewrites the file.
        self.reload()?;
        selection.map(|s| super::parse_session_arg(&s)).transpose()
    }
}

/// The ctrl-x child must edit the same config file as this invocation.
fn display_prompt(config_path: &Path) -> PickerPrompt {
    let exe = std::env::current_exe()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| env!("CARGO_PKG_NAME").to_string());
    let config = config_path.display().to_string();
    PickerPrompt::new(DISPLAY_HEADER)
        .with_preview(
            "tmux capture-pane -ep -t \"=$(printf %s {} | sed 's/\\./·/g')\"",
            "right:70%",
        )
        .with_bind(format!(
            "ctrl-x:execute-silent({} --config {} remove {{}})+reload(tmux ls -F '#{{session_name}}')",
            shell_words::quote(&exe),
            shell_words::quote(&config),
        ))
}
