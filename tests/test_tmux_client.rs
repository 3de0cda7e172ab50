// ABOUTME: Tests for the tmux command client against a scripted stand-in binary
// Verifies no-server tolerance and that killing a missing session issues no kill

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tmux_nav::tmux::{Multiplexer, TmuxClient};

/// Writes an executable `tmux` that appends its subcommand to `calls.log`,
/// reports no server for listings and no session for `has-session`.
fn no_server_tmux(dir: &Path) -> PathBuf {
    let log = dir.join("calls.log");
    let script = dir.join("tmux");
    let body = format!(
        r#"#!/bin/sh
echo "$1" >> '{log}'
case "$1" in
  has-session) echo "can't find session: $3" >&2; exit 1 ;;
  list-sessions) echo "no server running on /tmp/tmux-1000/default" >&2; exit 1 ;;
  *) exit 0 ;;
esac
"#,
        log = log.display()
    );
    fs::write(&script, body).unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    script
}

fn logged_calls(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("calls.log"))
        .unwrap_or_default()
        .lines()
        .map(String::from)
        .collect()
}

#[test]
fn test_list_sessions_without_server_is_empty() {
    let dir = TempDir::new().unwrap();
    let client = TmuxClient::with_program(no_server_tmux(dir.path()).display().to_string());

    assert!(client.list_sessions().unwrap().is_empty());
    assert_eq!(logged_calls(dir.path()), vec!["list-sessions"]);
}

#[test]
fn test_has_session_is_false_when_missing() {
    let dir = TempDir::new().unwrap();
    let client = TmuxClient::with_program(no_server_tmux(dir.path()).display().to_string());

    assert!(!client.has_session("/srv/site.io").unwrap());
}

#[test]
fn test_kill_missing_session_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let client = TmuxClient::with_program(no_server_tmux(dir.path()).display().to_string());

    client.kill_session("/x").unwrap();

    // BEHAVIOR: only the existence check reaches tmux
    assert_eq!(logged_calls(dir.path()), vec!["has-session"]);
}
