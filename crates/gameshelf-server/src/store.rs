use std::path::PathBuf;

use gameshelf_core::game::Game;

/// Error raised when persisting the collection fails.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "store I/O failed: {e}"),
            Self::Serialize(e) => write!(f, "store serialization failed: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// JSON-file-backed persistence for the full game collection.
///
/// The file holds one ordered array of games and is rewritten whole on every
/// save. Writes go straight to the target path, so a crash mid-write can
/// leave a truncated file behind; the next load then reads an empty catalog.
pub struct GameStore {
    path: PathBuf,
}

impl GameStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the full collection in stored order. A missing or unparseable
    /// file is an empty catalog, never an error.
    pub async fn load(&self) -> Vec<Game> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), "store file not readable: {e}");
                return Vec::new();
            },
        };
        match serde_json::from_str::<Vec<Game>>(&raw) {
            Ok(games) => {
                tracing::debug!(count = games.len(), "loaded catalog");
                games
            },
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "store file contains invalid JSON, treating catalog as empty: {e}"
                );
                Vec::new()
            },
        }
    }

    /// Overwrite the file with the given collection.
    pub async fn save(&self, games: &[Game]) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(games).map_err(StoreError::Serialize)?;
        tokio::fs::write(&self.path, body)
            .await
            .map_err(StoreError::Io)?;
        tracing::debug!(count = games.len(), path = %self.path.display(), "saved catalog");
        Ok(())
    }
}
