// ABOUTME: Makes a named session exist and become the active one
// Drives resolve -> ensure -> activate with the attach/switch-client fallback

use thiserror::Error;
use tracing::{debug, info};

use crate::tmux::{Multiplexer, TmuxError};

/// Phases of a single [`SessionSwitcher::switch_to`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchState {
    Idle,
    Resolving,
    Ensuring,
    Activating,
    Done,
    Failed,
}

/// How the target session became active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The invoking process already runs inside the target session.
    AlreadyCurrent,
    /// The invoking terminal attached to the session.
    Attached,
    /// An existing client was retargeted after attach failed.
    SwitchedClient,
}

#[derive(Debug, Error)]
pub enum SwitchError {
    #[error("can't inspect tmux state for session {id}")]
    Inspect {
        id: String,
        #[source]
        source: TmuxError,
    },

    #[error("can't create session {id}")]
    Create {
        id: String,
        #[source]
        source: TmuxError,
    },

    #[error("can't activate session {id}: attach: {attach}; switch-client: {switch}")]
    Activate {
        id: String,
        attach: TmuxError,
        switch: TmuxError,
    },
}

pub struct SessionSwitcher<'a, M: Multiplexer + ?Sized> {
    mux: &'a M,
    state: SwitchState,
}

impl<'a, M: Multiplexer + ?Sized> SessionSwitcher<'a, M> {
    pub fn new(mux: &'a M) -> Self {
        Self {
            mux,
            state: SwitchState::Idle,
        }
    }

    /// State reached by the last `switch_to` call.
    pub fn state(&self) -> SwitchState {
        self.state
    }

    /// Ensures `id` exists (rooted at `id` itself) and is the active session.
    pub fn switch_to(&mut self, id: &str) -> Result<SwitchOutcome, SwitchError> {
        let result = self.drive(id);
        self.enter(
            if result.is_ok() {
                SwitchState::Done
            } else {
                SwitchState::Failed
            },
            id,
        );
        result
    }

    fn drive(&mut self, id: &str) -> Result<SwitchOutcome, SwitchError> {
        self.enter(SwitchState::Resolving, id);
        let current = self.mux.current_session().map_err(|source| SwitchError::Inspect {
            id: id.to_string(),
            source,
        })?;
        if current.as_deref() == Some(id) {
            info!("Already in session {}", id);
            return Ok(SwitchOutcome::AlreadyCurrent);
        }

        self.enter(SwitchState::Ensuring, id);
        let exists = self.mux.has_session(id).map_err(|source| SwitchError::Inspect {
            id: id.to_string(),
            source,
        })?;
        if !exists {
            self.mux
                .new_session(id, id)
                .map_err(|source| SwitchError::Create {
                    id: id.to_string(),
                    source,
                })?;
        }

        self.enter(SwitchState::Activating, id);
        let attach = match self.mux.attach(id) {
            Ok(()) => return Ok(SwitchOutcome::Attached),
            Err(e) => e,
        };
        info!("Attach to {} failed ({}), falling back to switch-client", id, attach);
        match self.mux.switch_client(id) {
            Ok(()) => Ok(SwitchOutcome::SwitchedClient),
            Err(switch) => Err(SwitchError::Activate {
                id: id.to_string(),
                attach,
                switch,
            }),
        }
    }

    fn enter(&mut self, state: SwitchState, id: &str) {
        debug!("switch {}: {:?} -> {:?}", id, self.state, state);
        self.state = state;
    }
}
