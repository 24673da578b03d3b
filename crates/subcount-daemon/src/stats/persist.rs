//! Durable storage of credentials and the displayed snapshot.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{MetricSnapshot, PersistError};

/// Largest state file accepted at load.
pub const MAX_STATE_SIZE: u64 = 1024;

/// Everything kept across restarts: the provisioned credentials and the
/// snapshot last shown on the panel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    /// API key supplied by provisioning.
    #[serde(rename = "apiKey")]
    pub api_key: String,
    /// Channel whose counts are displayed.
    #[serde(rename = "channelId")]
    pub channel_id: String,
    /// Displayed snapshot, stored as four top-level count fields.
    #[serde(flatten)]
    pub snapshot: MetricSnapshot,
}

impl PersistedState {
    /// Returns true if provisioning has supplied an API key.
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// Sink for the displayed snapshot after every promotion.
pub trait Persistence {
    /// Durably stores `state`, replacing what was stored before.
    fn persist(&mut self, state: &PersistedState) -> Result<(), PersistError>;
}

/// JSON state file on local storage.
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    /// Creates a handle for the state file at `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the state file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the state file.
    ///
    /// Returns `None` if the file is missing, larger than
    /// [`MAX_STATE_SIZE`], or not valid JSON. Missing fields default to
    /// empty strings and zero counts.
    pub fn load(&self) -> Option<PersistedState> {
        let metadata = match fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Failed to open state file {:?}: {}", self.path, e);
                return None;
            }
        };

        if metadata.len() > MAX_STATE_SIZE {
            warn!(
                "State file {:?} is too large ({} bytes, limit {})",
                self.path,
                metadata.len(),
                MAX_STATE_SIZE
            );
            return None;
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read state file {:?}: {}", self.path, e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!("Failed to parse state file {:?}: {}", self.path, e);
                None
            }
        }
    }
}

impl Persistence for StateFile {
    fn persist(&mut self, state: &PersistedState) -> Result<(), PersistError> {
        let content = serde_json::to_string(state)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Readers never see a half-written file
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;

        debug!("State saved to {:?}", self.path);
        Ok(())
    }
}
