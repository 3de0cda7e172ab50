// ABOUTME: Thin synchronous client for the host tmux server
// Issues control commands (sessions and windows) and parses their plain-text output

use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use tracing::{debug, info};

use crate::tmux::error::{is_no_server_message, TmuxError};

/// Separator substituted for `.` in server-side session names.
pub const NAME_SEPARATOR: char = '·';

/// Server-side name for a session identifier.
///
/// tmux reads `.` in a target as a window/pane separator, so it is swapped
/// for a visually close character.
pub fn session_name(id: &str) -> String {
    id.replace('.', &NAME_SEPARATOR.to_string())
}

/// Identifier for a server-side session name. Inverse of [`session_name`].
pub fn session_id(name: &str) -> String {
    name.replace(NAME_SEPARATOR, ".")
}

/// Exact-match target for a session identifier.
fn target(id: &str) -> String {
    format!("={}", session_name(id))
}

/// Expands a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Splits tmux `-F` output into trimmed, non-empty lines.
pub fn parse_lines(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Control surface of a terminal multiplexer server.
///
/// All session arguments and results are session identifiers; encoding to
/// server-side names is the implementation's concern. Nothing here retries.
#[cfg_attr(test, mockall::automock)]
pub trait Multiplexer {
    /// Whether a session exists. Absence is `Ok(false)`.
    fn has_session(&self, id: &str) -> Result<bool, TmuxError>;

    /// Creates a detached session rooted at `work_dir`.
    fn new_session(&self, id: &str, work_dir: &str) -> Result<(), TmuxError>;

    /// Attaches the invoking terminal to the session. Blocks until detach.
    fn attach(&self, id: &str) -> Result<(), TmuxError>;

    /// Retargets the already attached client to the session.
    fn switch_client(&self, id: &str) -> Result<(), TmuxError>;

    /// Kills the session. Killing a missing session is a no-op.
    fn kill_session(&self, id: &str) -> Result<(), TmuxError>;

    /// Live sessions in server listing order.
    fn list_sessions(&self) -> Result<Vec<String>, TmuxError>;

    /// Session the invoking process runs inside, if any.
    fn current_session(&self) -> Result<Option<String>, TmuxError>;

    /// Window IDs of the current session.
    fn list_windows(&self) -> Result<Vec<String>, TmuxError>;

    /// Creates a named window in the current session.
    fn new_window(&self, name: &str, command: &str, cwd: &str) -> Result<(), TmuxError>;

    fn kill_window(&self, window_id: &str) -> Result<(), TmuxError>;

    fn select_window(&self, name: &str) -> Result<(), TmuxError>;
}

/// [`Multiplexer`] backed by the `tmux` executable.
#[derive(Debug, Clone)]
pub struct TmuxClient {
    program: String,
}

impl TmuxClient {
    pub fn new() -> Self {
        Self {
            program: "tmux".to_string(),
        }
    }

    /// Uses a specific tmux executable instead of the one on `PATH`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        debug!("{} {}", self.program, args.join(" "));
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        cmd
    }

    fn output(&self, args: &[&str]) -> Result<Output, TmuxError> {
        self.command(args)
            .stdin(Stdio::null())
            .output()
            .map_err(spawn_error)
    }

    /// Runs a command and fails with its stderr on a non-zero exit.
    fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
        let output = self.output(args)?;
        if !output.status.success() {
            return Err(TmuxError::CommandFailed {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl Default for TmuxClient {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_error(err: std::io::Error) -> TmuxError {
    if err.kind() == std::io::ErrorKind::NotFound {
        TmuxError::NotInstalled
    } else {
        TmuxError::Io(err)
    }
}

impl Multiplexer for TmuxClient {
    fn has_session(&self, id: &str) -> Result<bool, TmuxError> {
        info!("Checking if session {} exists", id);
        let output = self.output(&["has-session", "-t", &target(id)])?;
        Ok(output.status.success())
    }

    fn new_session(&self, id: &str, work_dir: &str) -> Result<(), TmuxError> {
        info!("Creating new session {}", id);
        let name = session_name(id);
        let dir = expand_home(work_dir);
        let dir = dir.to_string_lossy();
        self.run(&["new-session", "-d", "-s", &name, "-c", &dir])
            .map(|_| ())
            .map_err(|e| match e {
                TmuxError::CommandFailed { stderr, .. } => TmuxError::CreateFailed {
                    name: id.to_string(),
                    reason: stderr,
                },
                other => other,
            })
    }

    fn attach(&self, id: &str) -> Result<(), TmuxError> {
        info!("Attaching to session {}", id);
        // tmux takes over the terminal, so the streams are passed through.
        let status = self
            .command(&["attach-session", "-d", "-t", &target(id)])
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(spawn_error)?;

        if status.success() {
            Ok(())
        } else {
            Err(TmuxError::AttachFailed {
                name: id.to_string(),
                reason: format!("tmux exited with {status}"),
            })
        }
    }

    fn switch_client(&self, id: &str) -> Result<(), TmuxError> {
        info!("Switching to session {}", id);
        self.run(&["switch-client", "-t", &target(id)])
            .map(|_| ())
            .map_err(|e| match e {
                TmuxError::CommandFailed { stderr, .. } => TmuxError::SwitchFailed {
                    name: id.to_string(),
                    reason: stderr,
                },
                other => other,
            })
    }

    fn kill_session(&self, id: &str) -> Result<(), TmuxError> {
        info!("Killing session {}", id);
        if !self.has_session(id)? {
            debug!("Session {} is not running, nothing to kill", id);
            return Ok(());
        }
        self.run(&["kill-session", "-t", &target(id)]).map(|_| ())
    }

    fn list_sessions(&self) -> Result<Vec<String>, TmuxError> {
        info!("Listing all tmux sessions");
        match self.run(&["list-sessions", "-F", "#{session_name}"]) {
            Ok(stdout) => Ok(parse_lines(&stdout).iter().map(|n| session_id(n)).collect()),
            Err(e) if e.is_no_server() => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    fn current_session(&self) -> Result<Option<String>, TmuxError> {
        if std::env::var_os("TMUX").is_none() {
            return Ok(None);
        }
        let output = self.output(&["display-message", "-p", "#S"])?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if is_no_server_message(&stderr) || stderr.contains("no current client") {
                return Ok(None);
            }
            return Err(TmuxError::CommandFailed {
                command: "display-message -p #S".to_string(),
                stderr: stderr.trim().to_string(),
            });
        }
        let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok((!name.is_empty()).then(|| session_id(&name)))
    }

    fn list_windows(&self) -> Result<Vec<String>, TmuxError> {
        let stdout = self.run(&["list-windows", "-F", "#{window_id}"])?;
        Ok(parse_lines(&stdout))
    }

    fn new_window(&self, name: &str, command: &str, cwd: &str) -> Result<(), TmuxError> {
        info!("Creating window {}", name);
        self.run(&["new-window", "-n", name, "-c", cwd, command])
            .map(|_| ())
    }

    fn kill_window(&self, window_id: &str) -> Result<(), TmuxError> {
        info!("Killing window {}", window_id);
        match self.run(&["kill-window", "-t", window_id]) {
            Ok(_) => Ok(()),
            Err(TmuxError::CommandFailed { stderr, .. }) if stderr.contains("can't find window") => {
                Err(TmuxError::NotFound(window_id.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    fn select_window(&self, name: &str) -> Result<(), TmuxError> {
        self.run(&["select-window", "-t", name]).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_name_replaces_dots() {
        assert_eq!(session_name("/home/me/.config"), "/home/me/·config");
        assert_eq!(session_name("/srv/app"), "/srv/app");
    }

    #[test]
    fn test_session_id_reverses_session_name() {
        let id = "/home/me/Projects/acme/site.io/branches/v1.2";
        assert_eq!(session_id(&session_name(id)), id);
    }

    #[test]
    fn test_target_is_exact_match() {
        assert_eq!(target("/tmp/a.b"), "=/tmp/a·b");
    }

    #[test]
    fn test_parse_lines_drops_blank_entries() {
        let parsed = parse_lines("alpha\n\n  beta  \n\n");
        assert_eq!(parsed, vec!["alpha".to_string(), "beta".to_string()]);
        assert!(parse_lines("").is_empty());
        assert!(parse_lines("\n\n").is_empty());
    }

    #[test]
    fn test_expand_home_leaves_absolute_paths() {
        assert_eq!(expand_home("/srv/app"), PathBuf::from("/srv/app"));
    }

    #[test]
    fn test_expand_home_expands_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/code"), home.join("code"));
            assert_eq!(expand_home("~"), home);
        }
    }

    #[test]
    fn test_missing_binary_is_not_installed() {
        let client = TmuxClient::with_program("tmux-nav-definitely-missing-binary");
        assert!(matches!(client.list_sessions(), Err(TmuxError::NotInstalled)));
        assert!(matches!(client.has_session("x"), Err(TmuxError::NotInstalled)));
    }

    #[test]
    fn test_no_server_detection() {
        let err = TmuxError::CommandFailed {
            command: "list-sessions".to_string(),
            stderr: "no server running on /tmp/tmux-1000/default".to_string(),
        };
        assert!(err.is_no_server());
        assert!(!TmuxError::NotInstalled.is_no_server());
    }
}
