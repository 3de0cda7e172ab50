// ABOUTME: Session navigation core
// Visit history, the switch state machine and history/tmux reconciliation

pub mod history;
pub mod switcher;
pub mod sync;

pub use history::{History, HistoryError};
pub use switcher::{SessionSwitcher, SwitchError, SwitchOutcome, SwitchState};
pub use sync::{HistorySyncEngine, SyncDirection, SyncError, SyncReport};
