// ABOUTME: Persisted tool configuration holding the session visit history
// Loaded once per invocation and written back whole after each mutation

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::session::History;

/// Default file name, relative to the home directory.
pub const CONFIG_FILE_NAME: &str = ".tmux-nav.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("can't read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("can't parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("can't serialize config")]
    Serialize(#[source] serde_yaml::Error),

    #[error("can't write config file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("can't locate the home directory")]
    NoHomeDirectory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tmux: TmuxConfig,

    /// Keys owned by other tools; written back untouched.
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TmuxConfig {
    #[serde(default)]
    pub sessions: SessionsConfig,

    /// Windows provisioned by `layout`. Defaults apply when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windows: Option<Vec<WindowSpec>>,

    #[serde(flatten)]
    pub other: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionsConfig {
    #[serde(default)]
    pub history: History,

    #[serde(flatten)]
    pub other: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSpec {
    pub name: String,
    pub command: String,
}

impl WindowSpec {
    pub fn new(name: &str, command: &str) -> Self {
        Self {
            name: name.to_string(),
            command: command.to_string(),
        }
    }
}

impl Config {
    pub fn history(&self) -> &History {
        &self.tmux.sessions.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.tmux.sessions.history
    }

    /// Configured windows, or the assistant/editor/shell trio.
    pub fn windows(&self) -> Vec<WindowSpec> {
        self.tmux.windows.clone().unwrap_or_else(|| {
            vec![
                WindowSpec::new("claude", "zsh -i -c claude"),
                WindowSpec::new("nvim", "zsh -i -c nvim"),
                WindowSpec::new("zsh", "zsh"),
            ]
        })
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(ConfigError::Serialize)
    }
}

/// Location of the configuration file and its load/save logic.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.tmux-nav.yaml`
    pub fn default_location() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
        Ok(Self::new(home.join(CONFIG_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole file. A missing or blank file yields the default config.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.path.exists() {
            info!("No config file at {}, starting empty", self.path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: self.path.clone(),
                source,
            })?;
        debug!(
            "Loaded {} history entries from {}",
            config.history().len(),
            self.path.display()
        );
        Ok(config)
    }

    /// Overwrites the file via a temporary sibling and an atomic rename.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let yaml = config.to_yaml()?;
        let write_error = |source| ConfigError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(write_error)?;

        let mut file = tempfile::NamedTempFile::new_in(&dir).map_err(write_error)?;
        file.write_all(yaml.as_bytes()).map_err(write_error)?;
        file.as_file().sync_all().map_err(write_error)?;
        file.persist(&self.path).map_err(|e| write_error(e.error))?;

        debug!(
            "Saved {} history entries to {}",
            config.history().len(),
            self.path.display()
        );
        Ok(())
    }
}
