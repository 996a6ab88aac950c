use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fpl_shared::{PinAction, PinnedSet};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode pinned players: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Authoritative pinned-player set, persisted as a JSON array file.
#[derive(Debug)]
pub struct PinStore {
    path: PathBuf,
    pinned: PinnedSet,
    updated_at: Option<DateTime<Utc>>,
}

impl PinStore {
    /// Load the store from `path`. A missing file is an empty set; an
    /// unreadable or corrupt one is logged and also treated as empty.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let pinned = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<PinnedSet>(&bytes) {
                Ok(pinned) => {
                    info!(count = pinned.len(), path = %path.display(), "loaded pinned players");
                    pinned
                }
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "pinned players file is corrupt, starting empty");
                    PinnedSet::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => PinnedSet::new(),
            Err(e) => {
                warn!(error = %e, path = %path.display(), "failed to read pinned players, starting empty");
                PinnedSet::new()
            }
        };

        Self {
            path,
            pinned,
            updated_at: None,
        }
    }

    pub fn pinned(&self) -> &PinnedSet {
        &self.pinned
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `action` for `name` and persist the result.
    ///
    /// The in-memory set only changes once the write succeeded. Repeating an
    /// action that is already in effect does not touch the file.
    pub async fn apply(&mut self, action: PinAction, name: &str) -> Result<&PinnedSet, StoreError> {
        let mut next = self.pinned.clone();
        if next.apply(action, name) {
            self.persist(&next).await?;
            self.pinned = next;
            self.updated_at = Some(Utc::now());
        }
        Ok(&self.pinned)
    }

    async fn persist(&self, pinned: &PinnedSet) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(pinned)?;
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
        }
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &body).await.map_err(write_err)?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(write_err)?;
        Ok(())
    }
}
