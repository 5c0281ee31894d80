//! Puzzle file watcher.
//!
//! Polls the puzzle file's modification time on a tokio task and sends a
//! fresh clue snapshot to the UI loop whenever it changes. The UI loop is the
//! only place carousels are touched; this task never sees them.

use crate::data::SharedClues;
use crate::puzzle::Puzzle;
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::sync::mpsc;

/// How often the file's modification time is checked
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub enum WatchMessage {
    /// File changed and parsed
    Loaded(SharedClues),
    /// File changed but could not be read or parsed
    Failed(String),
}

#[derive(Debug)]
pub struct PuzzleWatcher {
    path: PathBuf,
    last_modified: Option<SystemTime>,
}

async fn modified(path: &Path) -> Option<SystemTime> {
    tokio::fs::metadata(path).await.and_then(|m| m.modified()).ok()
}

impl PuzzleWatcher {
    /// Start watching; the file's current state counts as already loaded
    pub async fn start(path: PathBuf) -> Self {
        let last_modified = modified(&path).await;
        Self {
            path,
            last_modified,
        }
    }

    /// Check once. `None` when nothing changed or the file is missing.
    pub async fn poll(&mut self) -> Option<WatchMessage> {
        let current = modified(&self.path).await;
        if current.is_none() || current == self.last_modified {
            return None;
        }
        self.last_modified = current;

        let loaded = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read puzzle file {:?}", self.path))
            .and_then(|contents| Puzzle::from_json(&contents))
            .and_then(|puzzle| puzzle.to_clues());
        Some(match loaded {
            Ok(clues) => {
                tracing::info!(path = ?self.path, clues = clues.total(), "Puzzle file changed");
                WatchMessage::Loaded(clues.into_shared())
            }
            Err(e) => WatchMessage::Failed(format!("{:#}", e)),
        })
    }

    /// Poll forever, stopping once the receiver is dropped
    pub async fn run(mut self, interval: Duration, tx: mpsc::UnboundedSender<WatchMessage>) {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            if let Some(message) = self.poll().await {
                if tx.send(message).is_err() {
                    tracing::debug!("Watcher receiver dropped, stopping");
                    break;
                }
            }
        }
    }
}
