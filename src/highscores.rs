//! High score store
//!
//! A single non-negative integer in a plain-text file. Loading never fails:
//! a missing, empty or unreadable file just means nobody has scored yet.

use std::path::PathBuf;

use crate::persistence::{self, StoreError};

/// The persisted best score
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
    best: u32,
}

impl HighScoreStore {
    /// Load the stored score, falling back to 0
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = match persistence::read_text(&path) {
            Ok(Some(text)) if text.is_empty() => 0,
            Ok(Some(text)) => match text.parse::<u32>() {
                Ok(score) => score,
                Err(_) => {
                    log::warn!("Ignoring unreadable high score {:?} in {}", text, path.display());
                    0
                }
            },
            Ok(None) => {
                log::info!("No high score at {}, starting fresh", path.display());
                0
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                0
            }
        };
        log::info!("Loaded high score {}", best);
        Self { path, best }
    }

    /// Best score known to the store
    pub fn best(&self) -> u32 {
        self.best
    }

    /// Persist `score` if it beats the stored value
    ///
    /// Returns whether anything was written. The stored value never goes down.
    pub fn record(&mut self, score: u32) -> Result<bool, StoreError> {
        if score <= self.best {
            return Ok(false);
        }
        persistence::write_text(&self.path, &score.to_string())?;
        self.best = score;
        log::info!("High score saved ({})", score);
        Ok(true)
    }
}
