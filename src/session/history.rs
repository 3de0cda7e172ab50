// ABOUTME: Ordered, duplicate-free record of visited session identifiers
// The last entry is the most recently visited session

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("no sessions found in history")]
    Empty,
}

/// Visit history persisted under `tmux.sessions.history`.
///
/// Entries are unique and never empty. Loading a hand-edited list keeps the
/// last occurrence of each repeated entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct History(Vec<String>);

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|entry| entry == id)
    }

    /// Most recently visited session.
    pub fn current(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Moves `id` to the end, dropping any earlier occurrence and blank entries.
    pub fn record_visit(&mut self, id: &str) {
        self.0.retain(|entry| !entry.is_empty() && entry != id);
        if !id.is_empty() {
            self.0.push(id.to_string());
        }
    }

    /// Drops every occurrence of `id`. Absent ids are ignored.
    pub fn remove(&mut self, id: &str) {
        self.0.retain(|entry| entry != id);
    }

    /// Moves the last entry to the front and returns the new last entry.
    pub fn rotate_prev(&mut self) -> Result<String, HistoryError> {
        if self.0.is_empty() {
            return Err(HistoryError::Empty);
        }
        self.0.rotate_right(1);
        self.target()
    }

    /// Moves the first entry to the end and returns the new last entry.
    pub fn rotate_next(&mut self) -> Result<String, HistoryError> {
        if self.0.is_empty() {
            return Err(HistoryError::Empty);
        }
        self.0.rotate_left(1);
        self.target()
    }

    fn target(&self) -> Result<String, HistoryError> {
        self.0.last().cloned().ok_or(HistoryError::Empty)
    }
}

impl From<Vec<String>> for History {
    fn from(entries: Vec<String>) -> Self {
        let mut history = Self::new();
        for entry in entries {
            history.record_visit(entry.trim());
        }
        history
    }
}

impl From<History> for Vec<String> {
    fn from(history: History) -> Self {
        history.0
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
