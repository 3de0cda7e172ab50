// ABOUTME: The `sync` command, reconciling history with live tmux sessions

use anyhow::{Context, Result};
use tracing::info;

use super::App;
use crate::session::{HistorySyncEngine, SyncDirection, SyncReport};

impl App<'_> {
    /// Reconciles history and tmux, then switches to the last reconciled session.
    pub fn sync(&mut self, direction: SyncDirection) -> Result<SyncReport> {
        let engine = HistorySyncEngine::new(self.mux);
        let report = engine
            .sync(self.config.history_mut(), direction)
            .context("can't sync sessions")?;
        info!(
            "Sync {:?}: {} created, {} killed, {} kept",
            direction,
            report.created.len(),
            report.killed.len(),
            report.kept.len()
        );

        if direction == SyncDirection::Adopt {
            self.save()?;
        }
        if let Some(target) = report.target() {
            self.switch(target)?;
        }
        Ok(report)
    }
}
