use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::IgdbError;

/// Tokens this close to expiry are treated as expired.
pub const EXPIRY_BUFFER_MS: i64 = 5 * 60 * 1000;

/// A cached bearer credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    /// Expiry as epoch milliseconds
    pub expires_at: i64,
    pub token_type: String,
}

impl Credential {
    /// Build a credential from a token lifetime in seconds, starting at `now_ms`.
    pub fn from_lifetime(
        access_token: String,
        token_type: String,
        expires_in_secs: u64,
        now_ms: i64,
    ) -> Self {
        let lifetime_ms = i64::try_from(expires_in_secs)
            .unwrap_or(i64::MAX / 1000)
            .saturating_mul(1000);
        Self {
            access_token,
            expires_at: now_ms.saturating_add(lifetime_ms),
            token_type,
        }
    }

    /// True while the token is usable with the safety buffer applied.
    pub fn is_valid_at(&self, now_ms: i64) -> bool {
        now_ms < self.expires_at.saturating_sub(EXPIRY_BUFFER_MS)
    }
}

/// Persistence for the single cached credential.
pub trait CredentialStore {
    /// Return the stored credential, or `None` if absent or unreadable.
    fn load(&self) -> Option<Credential>;

    /// Persist a credential, replacing any previous one.
    fn save(&self, credential: &Credential) -> Result<(), IgdbError>;
}

/// Stores the credential as a JSON file.
///
/// Two processes sharing one file are not coordinated: run a single instance
/// per token path.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<Credential> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&content) {
            Ok(credential) => Some(credential),
            Err(e) => {
                log::debug!(
                    "Ignoring unparsable credential file {}: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    fn save(&self, credential: &Credential) -> Result<(), IgdbError> {
        let write = || -> Result<(), Box<dyn std::error::Error>> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string_pretty(credential)?;
            std::fs::write(&self.path, json)?;
            Ok(())
        };
        write().map_err(|e| {
            IgdbError::CredentialStore(format!(
                "Failed to write {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

/// Keeps the credential in memory and counts saves.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credential: Mutex<Option<Credential>>,
    saves: AtomicUsize,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential: Mutex::new(Some(credential)),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<Credential> {
        self.credential
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn save(&self, credential: &Credential) -> Result<(), IgdbError> {
        *self
            .credential
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(credential.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/credentials_tests.rs"]
mod tests;
