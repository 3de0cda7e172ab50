// ABOUTME: Recording in-memory tmux stand-in shared by the integration tests
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use tmux_nav::tmux::{Multiplexer, TmuxError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    HasSession(String),
    NewSession(String, String),
    Attach(String),
    SwitchClient(String),
    KillSession(String),
    ListSessions,
    CurrentSession,
    ListWindows,
    NewWindow(String),
    KillWindow(String),
    SelectWindow(String),
}

/// Keeps a live session list and records every call made against it.
#[derive(Default)]
pub struct FakeTmux {
    pub sessions: RefCell<Vec<String>>,
    pub current: RefCell<Option<String>>,
    pub calls: RefCell<Vec<Call>>,
    pub attach_fails: Cell<bool>,
    pub failing_creates: RefCell<HashSet<String>>,
    pub failing_kills: RefCell<HashSet<String>>,
}

impl FakeTmux {
    pub fn with_sessions(sessions: &[&str]) -> Self {
        let fake = Self::default();
        *fake.sessions.borrow_mut() = sessions.iter().map(|s| s.to_string()).collect();
        fake
    }

    pub fn inside(self, session: &str) -> Self {
        *self.current.borrow_mut() = Some(session.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Calls that change server state or the attached client.
    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| {
                matches!(
                    c,
                    Call::NewSession(..)
                        | Call::Attach(_)
                        | Call::SwitchClient(_)
                        | Call::KillSession(_)
                )
            })
            .collect()
    }

    pub fn live(&self) -> Vec<String> {
        self.sessions.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl Multiplexer for FakeTmux {
    fn has_session(&self, id: &str) -> Result<bool, TmuxError> {
        self.record(Call::HasSession(id.to_string()));
        Ok(self.sessions.borrow().iter().any(|s| s == id))
    }

    fn new_session(&self, id: &str, work_dir: &str) -> Result<(), TmuxError> {
        self.record(Call::NewSession(id.to_string(), work_dir.to_string()));
        if self.failing_creates.borrow().contains(id) {
            return Err(TmuxError::CreateFailed {
                name: id.to_string(),
                reason: "directory does not exist".to_string(),
            });
        }
        self.sessions.borrow_mut().push(id.to_string());
        Ok(())
    }

    fn attach(&self, id: &str) -> Result<(), TmuxError> {
        self.record(Call::Attach(id.to_string()));
        if self.attach_fails.get() {
            return Err(TmuxError::AttachFailed {
                name: id.to_string(),
                reason: "sessions should be nested with care".to_string(),
            });
        }
        *self.current.borrow_mut() = Some(id.to_string());
        Ok(())
    }

    fn switch_client(&self, id: &str) -> Result<(), TmuxError> {
        self.record(Call::SwitchClient(id.to_string()));
        *self.current.borrow_mut() = Some(id.to_string());
        Ok(())
    }

    fn kill_session(&self, id: &str) -> Result<(), TmuxError> {
        self.record(Call::KillSession(id.to_string()));
        if self.failing_kills.borrow().contains(id) {
            return Err(TmuxError::CommandFailed {
                command: format!("kill-session -t ={id}"),
                stderr: "permission denied".to_string(),
            });
        }
        self.sessions.borrow_mut().retain(|s| s != id);
        Ok(())
    }

    fn list_sessions(&self) -> Result<Vec<String>, TmuxError> {
        self.record(Call::ListSessions);
        Ok(self.live())
    }

    fn current_session(&self) -> Result<Option<String>, TmuxError> {
        self.record(Call::CurrentSession);
        Ok(self.current.borrow().clone())
    }

    fn list_windows(&self) -> Result<Vec<String>, TmuxError> {
        self.record(Call::ListWindows);
        Ok(Vec::new())
    }

    fn new_window(&self, name: &str, _command: &str, _cwd: &str) -> Result<(), TmuxError> {
        self.record(Call::NewWindow(name.to_string()));
        Ok(())
    }

    fn kill_window(&self, window_id: &str) -> Result<(), TmuxError> {
        self.record(Call::KillWindow(window_id.to_string()));
        Ok(())
    }

    fn select_window(&self, name: &str) -> Result<(), TmuxError> {
        self.record(Call::SelectWindow(name.to_string()));
        Ok(())
    }
}
