// ABOUTME: Command handlers for the session navigator
// Owns the loaded configuration for one invocation and writes it back explicitly

mod layout;
mod navigation;
mod reconcile;

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use crate::config::{Config, ConfigStore};
use crate::picker::Picker;
use crate::session::{SessionSwitcher, SwitchOutcome};
use crate::tmux::{session_id, Multiplexer};

pub struct App<'a> {
    mux: &'a dyn Multiplexer,
    picker: &'a dyn Picker,
    store: ConfigStore,
    config: Config,
}

impl<'a> App<'a> {
    pub fn new(
        mux: &'a dyn Multiplexer,
        picker: &'a dyn Picker,
        store: ConfigStore,
        config: Config,
    ) -> Self {
        Self {
            mux,
            picker,
            store,
            config,
        }
    }

    /// Loads the configuration from `store` and builds the app around it.
    pub fn load(
        mux: &'a dyn Multiplexer,
        picker: &'a dyn Picker,
        store: ConfigStore,
    ) -> Result<Self> {
        let config = store
            .load()
            .with_context(|| format!("can't load the config file {}", store.path().display()))?;
        Ok(Self::new(mux, picker, store, config))
    }

    fn save(&self) -> Result<()> {
        self.store.save(&self.config).context("can't save the config file")
    }

    /// Re-reads the file, picking up writes made by child invocations.
    fn reload(&mut self) -> Result<()> {
        self.config = self.store.load().context("can't reload the config file")?;
        Ok(())
    }

    fn switch(&self, id: &str) -> Result<SwitchOutcome> {
        let outcome = SessionSwitcher::new(self.mux)
            .switch_to(id)
            .with_context(|| format!("can't switch to session {id}"))?;
        debug!("Switch to {} finished: {:?}", id, outcome);
        Ok(outcome)
    }

    /// Records the visit, persists it, then activates the session.
    fn visit(&mut self, id: &str) -> Result<()> {
        info!("Updating config file with session: {}", id);
        self.config.history_mut().record_visit(id);
        self.save()?;
        self.switch(id)?;
        Ok(())
    }
}

/// Normalizes a user-supplied session name into an identifier.
///
/// Every `·` is read back as `.`, so arguments copied from tmux server names
/// resolve to their paths. A path that really contains `·` can't be named
/// from the command line.
pub fn parse_session_arg(raw: &str) -> Result<String> {
    let id = session_id(raw.trim());
    if id.is_empty() {
        bail!("session name can't be empty");
    }
    Ok(id)
}

fn no_selection(what: &str) {
    info!("No {} selected", what);
    eprintln!("No {what} selected.");
}
