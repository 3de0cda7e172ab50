// ABOUTME: Window provisioning for the current session and config dumping

use std::io::Write;

use anyhow::{bail, Context, Result};
use tracing::warn;

use super::App;

impl App<'_> {
    /// Replaces the current session's windows with the configured ones and
    /// selects the last of them.
    pub fn layout(&self, cwd: &str) -> Result<()> {
        let windows = self.config.windows();
        let Some(last) = windows.last() else {
            bail!("no windows configured under tmux.windows");
        };

        let existing = self
            .mux
            .list_windows()
            .context("can't list existing windows")?;

        for window in &windows {
            self.mux
                .new_window(&window.name, &window.command, cwd)
                .with_context(|| format!("can't create window {}", window.name))?;
        }

        for window_id in &existing {
            if let Err(e) = self.mux.kill_window(window_id) {
                warn!("can't kill window {}: {}", window_id, e);
            }
        }

        self.mux
            .select_window(&last.name)
            .with_context(|| format!("can't select {} window", last.name))
    }

    /// Writes the loaded configuration as YAML.
    pub fn show_config(&self, out: &mut dyn Write) -> Result<()> {
        let yaml = self.config.to_yaml().context("can't marshal the config")?;
        out.write_all(yaml.as_bytes())?;
        Ok(())
    }
}
