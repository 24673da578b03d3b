//! Channel statistics module.
//!
//! Holds the four-count snapshot type, the store that decides when a fetched
//! snapshot replaces the displayed one, and the seams to the external fetch
//! and persistence collaborators.

#![allow(dead_code, unused_imports)]

mod persist;
mod source;
mod store;

pub use persist::{PersistedState, Persistence, StateFile, MAX_STATE_SIZE};
pub use source::{FileSource, MetricSource};
pub use store::{Reconciliation, SnapshotStore};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One reading of the channel counters.
///
/// Replaced as a whole value, never patched field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricSnapshot {
    /// Subscriber count (the value shown on the panel).
    #[serde(rename = "subscriberCount")]
    pub subscribers: u64,
    /// Total view count.
    #[serde(rename = "viewCount")]
    pub views: u64,
    /// Comment count.
    #[serde(rename = "commentCount")]
    pub comments: u64,
    /// Uploaded video count.
    #[serde(rename = "videoCount")]
    pub videos: u64,
}

impl MetricSnapshot {
    pub const fn new(subscribers: u64, views: u64, comments: u64, videos: u64) -> Self {
        Self {
            subscribers,
            views,
            comments,
            videos,
        }
    }
}

impl std::fmt::Display for MetricSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "subscribers={} views={} comments={} videos={}",
            self.subscribers, self.views, self.comments, self.videos
        )
    }
}

/// Failure to obtain a snapshot from the metric source. The cycle is skipped.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The source could not be read.
    #[error("Failed to read stats: {0}")]
    Io(#[from] std::io::Error),

    /// The source held something other than a stats document.
    #[error("Failed to parse stats: {0}")]
    Parse(#[from] serde_json::Error),

    /// The source reported stats for a different channel.
    #[error("Stats are for channel {actual}, expected {expected}")]
    ChannelMismatch { expected: String, actual: String },
}

/// Failure to store the displayed snapshot. Logged, never retried.
#[derive(Error, Debug)]
pub enum PersistError {
    /// The state file could not be written.
    #[error("Failed to write state file: {0}")]
    Io(#[from] std::io::Error),

    /// The state could not be encoded.
    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}
