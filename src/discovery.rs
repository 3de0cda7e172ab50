// ABOUTME: Concurrent directory scans producing session candidates
// One `find` per scan specification; the first failing scan discards every result

use std::path::{Path, PathBuf};
use std::sync::Arc;

use regex::Regex;
use thiserror::Error;
use tokio::process::Command;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, info};

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("invalid pattern {pattern:?}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("can't run find on {root}")]
    Spawn {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("find on {root} failed ({status}): {stderr}")]
    ScanFailed {
        root: PathBuf,
        status: String,
        stderr: String,
    },

    #[error("scan worker panicked")]
    Join(#[from] tokio::task::JoinError),
}

/// A bounded-depth directory scan filtered by a path pattern.
#[derive(Debug, Clone)]
pub struct ScanSpec {
    pub root: PathBuf,
    pub min_depth: u32,
    pub max_depth: u32,
    pub pattern: Regex,
}

impl ScanSpec {
    pub fn new(
        root: impl Into<PathBuf>,
        min_depth: u32,
        max_depth: u32,
        pattern: &str,
    ) -> Result<Self, DiscoveryError> {
        let pattern = Regex::new(pattern).map_err(|source| DiscoveryError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            root: root.into(),
            min_depth,
            max_depth,
            pattern,
        })
    }

    /// Runs `find` for this spec and keeps the matching directories.
    pub async fn run(&self) -> Result<Vec<String>, DiscoveryError> {
        let min = self.min_depth.to_string();
        let max = self.max_depth.to_string();
        debug!(
            "find {} -mindepth {} -maxdepth {} -type d",
            self.root.display(),
            min,
            max
        );

        let output = Command::new("find")
            .arg(&self.root)
            .args(["-mindepth", min.as_str(), "-maxdepth", max.as_str(), "-type", "d"])
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| DiscoveryError::Spawn {
                root: self.root.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(DiscoveryError::ScanFailed {
                root: self.root.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && self.pattern.is_match(line))
            .map(String::from)
            .collect())
    }
}

/// Home directory entries, project trees and checkout branch trees.
pub fn default_scans(home: &Path) -> Result<Vec<ScanSpec>, DiscoveryError> {
    let projects = home.join("Projects");
    Ok(vec![
        ScanSpec::new(home, 1, 1, ".*")?,
        ScanSpec::new(&projects, 3, 4, ".*/Projects/[^/]*/[^/]*/branches/[^/]*")?,
        ScanSpec::new(&projects, 2, 4, ".*/Projects/[^/]*/[^/]*$")?,
        ScanSpec::new(&projects, 1, 1, ".*")?,
    ])
}

/// Runs every scan concurrently and merges the results, deduplicated and
/// sorted in descending order.
pub async fn discover(scans: Vec<ScanSpec>) -> Result<Vec<String>, DiscoveryError> {
    info!("Scanning {} directory roots", scans.len());
    let found = Arc::new(Mutex::new(Vec::new()));
    let (err_tx, mut err_rx) = mpsc::channel(scans.len().max(1));

    let mut workers = Vec::with_capacity(scans.len());
    for spec in scans {
        let found = Arc::clone(&found);
        let err_tx = err_tx.clone();
        workers.push(tokio::spawn(async move {
            match spec.run().await {
                Ok(dirs) => found.lock().await.extend(dirs),
                Err(e) => {
                    error!("{}", e);
                    let _ = err_tx.send(e).await;
                }
            }
        }));
    }
    // The channel closes once every worker has dropped its sender.
    drop(err_tx);

    if let Some(e) = err_rx.recv().await {
        return Err(e);
    }
    for worker in workers {
        worker.await?;
    }

    let mut candidates = std::mem::take(&mut *found.lock().await);
    candidates.sort_unstable_by(|a, b| b.cmp(a));
    candidates.dedup();
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = ScanSpec::new("/tmp", 1, 1, "([").unwrap_err();
        assert!(matches!(err, DiscoveryError::InvalidPattern { .. }));
    }

    #[test]
    fn test_default_scans_cover_home_and_projects() {
        let scans = default_scans(Path::new("/home/me")).unwrap();
        assert_eq!(scans.len(), 4);
        assert_eq!(scans[0].root, PathBuf::from("/home/me"));
        assert!(scans[1..]
            .iter()
            .all(|s| s.root == PathBuf::from("/home/me/Projects")));
        assert!(scans[1]
            .pattern
            .is_match("/home/me/Projects/acme/api/branches/main"));
        assert!(scans[2].pattern.is_match("/home/me/Projects/acme/api"));
        assert!(!scans[2].pattern.is_match("/home/me/Projects/acme/api/branches"));
    }
}
