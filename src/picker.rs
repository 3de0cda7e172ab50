// ABOUTME: Interactive fuzzy picker run as a subprocess
// Feeds newline-delimited candidates to fzf and returns the chosen line

use std::io::Write;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PickerError {
    #[error("fzf not installed on host")]
    NotInstalled,

    #[error("picker exited with {0}")]
    Failed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Presentation options for one picker run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickerPrompt {
    pub header: String,
    pub preview: Option<String>,
    pub preview_window: Option<String>,
    pub binds: Vec<String>,
}

impl PickerPrompt {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            ..Self::default()
        }
    }

    pub fn with_preview(mut self, command: impl Into<String>, window: impl Into<String>) -> Self {
        self.preview = Some(command.into());
        self.preview_window = Some(window.into());
        self
    }

    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.binds.push(bind.into());
        self
    }
}

/// Synchronous filter: candidates in, at most one selection out.
#[cfg_attr(test, mockall::automock)]
pub trait Picker {
    /// `Ok(None)` when the user selected nothing.
    fn pick(&self, candidates: &[String], prompt: &PickerPrompt)
        -> Result<Option<String>, PickerError>;
}

#[derive(Debug, Clone)]
pub struct FzfPicker {
    program: String,
}

impl FzfPicker {
    pub fn new() -> Self {
        Self {
            program: "fzf".to_string(),
        }
    }

    fn args(prompt: &PickerPrompt) -> Vec<String> {
        let mut args = vec![
            "--header".to_string(),
            prompt.header.clone(),
            "--height=100%".to_string(),
        ];
        if let Some(preview) = &prompt.preview {
            args.push("--preview".to_string());
            args.push(preview.clone());
        }
        if let Some(window) = &prompt.preview_window {
            args.push(format!("--preview-window={window}"));
        }
        for bind in &prompt.binds {
            args.push("--bind".to_string());
            args.push(bind.clone());
        }
        args
    }
}

impl Default for FzfPicker {
    fn default() -> Self {
        Self::new()
    }
}

/// Trimmed selection, `None` when blank.
pub fn parse_selection(stdout: &str) -> Option<String> {
    let selection = stdout.trim();
    (!selection.is_empty()).then(|| selection.to_string())
}

impl Picker for FzfPicker {
    fn pick(
        &self,
        candidates: &[String],
        prompt: &PickerPrompt,
    ) -> Result<Option<String>, PickerError> {
        let args = Self::args(prompt);
        debug!("{} {:?} ({} candidates)", self.program, args, candidates.len());

        // fzf draws on the tty itself, stdout only carries the selection.
        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    PickerError::NotInstalled
                } else {
                    PickerError::Io(e)
                }
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            let input = candidates.join("\n");
            // fzf may exit before reading everything; a broken pipe is not fatal.
            if let Err(e) = stdin.write_all(input.as_bytes()) {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
        }

        let output = child.wait_with_output()?;
        match output.status.code() {
            Some(0) => Ok(parse_selection(&String::from_utf8_lossy(&output.stdout))),
            // 1: no match, 130: aborted with ctrl-c or esc
            Some(1 | 130) => Ok(None),
            _ => Err(PickerError::Failed(output.status.to_string())),
        }
    }
}
