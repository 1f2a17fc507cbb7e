//! Local user identity for the CLI.
//!
//! The identity is an opaque token kept in a file under the platform data
//! directory. If the file disappears a new token is generated and earlier
//! history is no longer reachable from this machine. An externally issued
//! identity can be passed in instead (`--user` or `VIBE_JOURNAL_USER`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use uuid::Uuid;

use crate::models::UserIdentity;

#[derive(Debug, Clone)]
pub struct IdentityStore {
    path: PathBuf,
}

impl IdentityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "vibe-journal")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(Self::new(dirs.data_dir().join("user_id")))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Read the stored token, generating and persisting one if absent.
    pub fn load_or_create(&self) -> Result<UserIdentity> {
        if self.path.exists() {
            let stored = std::fs::read_to_string(&self.path)
                .with_context(|| format!("Failed to read {}", self.path.display()))?;
            if let Some(identity) = UserIdentity::new(stored) {
                return Ok(identity);
            }
            tracing::warn!(path = %self.path.display(), "Identity file is empty, regenerating");
        }

        let token = Uuid::new_v4().simple().to_string();
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, &token)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        tracing::info!(path = %self.path.display(), "Generated new user identity");

        UserIdentity::new(token).ok_or_else(|| anyhow::anyhow!("Generated an empty identity"))
    }
}

/// Where the identity in use came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentitySource {
    /// `--user` or `VIBE_JOURNAL_USER`. The identity file is not touched.
    Override,
    /// The token file at this path.
    Stored(PathBuf),
}

/// Prefer an explicitly supplied identity over the stored one.
pub fn resolve(
    explicit: Option<String>,
    store: &IdentityStore,
) -> Result<(UserIdentity, IdentitySource)> {
    match explicit.and_then(UserIdentity::new) {
        Some(identity) => Ok((identity, IdentitySource::Override)),
        None => Ok((
            store.load_or_create()?,
            IdentitySource::Stored(store.path().clone()),
        )),
    }
}
