// ABOUTME: Reconciles the visit history with the live tmux session list
// Adopt copies live state into history; reverse makes tmux match history

use std::collections::HashSet;

use thiserror::Error;
use tracing::{info, warn};

use crate::session::History;
use crate::tmux::{Multiplexer, TmuxError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncDirection {
    /// History becomes the live session list.
    #[default]
    Adopt,
    /// Sessions are created and killed until tmux matches history.
    Reverse,
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("can't list tmux sessions")]
    List(#[source] TmuxError),

    #[error("can't create session {id}")]
    Create {
        id: String,
        #[source]
        source: TmuxError,
    },

    #[error("can't kill session {id}")]
    Kill {
        id: String,
        #[source]
        source: TmuxError,
    },
}

/// What a reconciliation did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created: Vec<String>,
    pub killed: Vec<String>,
    pub kept: Vec<String>,
    /// Reconciled ordering: live sessions first, then history-only ones.
    pub sessions: Vec<String>,
}

impl SyncReport {
    /// Session to switch to once reconciliation is done.
    pub fn target(&self) -> Option<&str> {
        self.sessions.last().map(String::as_str)
    }
}

pub struct HistorySyncEngine<'a, M: Multiplexer + ?Sized> {
    mux: &'a M,
}

impl<'a, M: Multiplexer + ?Sized> HistorySyncEngine<'a, M> {
    pub fn new(mux: &'a M) -> Self {
        Self { mux }
    }

    pub fn sync(
        &self,
        history: &mut History,
        direction: SyncDirection,
    ) -> Result<SyncReport, SyncError> {
        match direction {
            SyncDirection::Adopt => self.adopt(history),
            SyncDirection::Reverse => self.reverse(history),
        }
    }

    /// Replaces history with the live sessions, in server order.
    pub fn adopt(&self, history: &mut History) -> Result<SyncReport, SyncError> {
        let live = self.mux.list_sessions().map_err(SyncError::List)?;
        info!("Adopting {} live sessions into history", live.len());
        *history = History::from(live);
        Ok(SyncReport {
            kept: history.as_slice().to_vec(),
            sessions: history.as_slice().to_vec(),
            ..SyncReport::default()
        })
    }

    /// Creates history-only sessions and kills live-only ones.
    ///
    /// Stops at the first failure; changes already applied stay applied.
    pub fn reverse(&self, history: &History) -> Result<SyncReport, SyncError> {
        let live = self.mux.list_sessions().map_err(SyncError::List)?;
        let running: HashSet<&str> = live.iter().map(String::as_str).collect();

        let mut seen = HashSet::new();
        let union: Vec<&str> = live
            .iter()
            .chain(history.iter())
            .map(String::as_str)
            .filter(|id| !id.is_empty() && seen.insert(*id))
            .collect();

        let mut report = SyncReport::default();
        for id in union {
            match (history.contains(id), running.contains(id)) {
                (true, true) => report.kept.push(id.to_string()),
                (true, false) => {
                    info!("Creating session {} from history", id);
                    self.mux
                        .new_session(id, id)
                        .map_err(|source| SyncError::Create {
                            id: id.to_string(),
                            source,
                        })?;
                    report.created.push(id.to_string());
                }
                (false, _) => {
                    warn!("Killing session {} missing from history", id);
                    self.mux
                        .kill_session(id)
                        .map_err(|source| SyncError::Kill {
                            id: id.to_string(),
                            source,
                        })?;
                    report.killed.push(id.to_string());
                    continue;
                }
            }
            report.sessions.push(id.to_string());
        }
        Ok(report)
    }
}
