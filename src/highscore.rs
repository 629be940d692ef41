//! High score persistence
//!
//! A single scalar stored as a small JSON document. Read once at startup,
//! rewritten every time the score passes it. Failures are logged and never
//! reach the game loop.

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::events::{EventSink, GameEvent};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// Backing storage for the high score
pub trait HighScoreStore {
    /// Stored high score, `None` when nothing has been saved yet
    fn load(&self) -> Result<Option<u32>>;
    fn save(&mut self, high_score: u32) -> Result<()>;
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Result<Option<u32>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)
            .wrap_err_with(|| format!("reading {}", self.path.display()))?;
        let record: HighScoreRecord = serde_json::from_str(&json)
            .wrap_err_with(|| format!("parsing {}", self.path.display()))?;
        Ok(Some(record.high_score))
    }

    fn save(&mut self, high_score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string(&HighScoreRecord { high_score })?;
        fs::write(&self.path, json).wrap_err_with(|| format!("writing {}", self.path.display()))
    }
}

/// In-memory store for sessions without a writable disk
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    high_score: Option<u32>,
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u32>> {
        Ok(self.high_score)
    }

    fn save(&mut self, high_score: u32) -> Result<()> {
        self.high_score = Some(high_score);
        Ok(())
    }
}

/// Read the stored high score, treating any failure as "no prior score"
pub fn load_high_score(store: &dyn HighScoreStore) -> u32 {
    match store.load() {
        Ok(Some(score)) => {
            log::info!("Loaded high score {score}");
            score
        }
        Ok(None) => {
            log::info!("No high score found, starting fresh");
            0
        }
        Err(err) => {
            log::warn!("Could not load high score: {err:#}");
            0
        }
    }
}

/// Event sink that persists every new high score
pub struct HighScoreRecorder<S> {
    store: S,
}

impl<S: HighScoreStore> HighScoreRecorder<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: HighScoreStore> EventSink for HighScoreRecorder<S> {
    fn handle(&mut self, event: &GameEvent) {
        if let GameEvent::HighScoreChanged(score) = event {
            match self.store.save(*score) {
                Ok(()) => log::debug!("High score {score} saved"),
                Err(err) => log::warn!("Dropped high score write: {err:#}"),
            }
        }
    }
}
