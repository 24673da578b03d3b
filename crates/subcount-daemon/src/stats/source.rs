//! Metric sources.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::{FetchError, MetricSnapshot};

/// Trait for anything that can produce a fresh snapshot for a channel.
pub trait MetricSource {
    /// Returns the source name.
    fn name(&self) -> &str;

    /// Fetches the current counts for `channel_id`.
    fn fetch(&mut self, channel_id: &str) -> Result<MetricSnapshot, FetchError>;
}

/// Stats document maintained by an external fetcher.
#[derive(Debug, Deserialize)]
struct StatsDocument {
    #[serde(rename = "channelId", default)]
    channel_id: Option<String>,
    #[serde(flatten)]
    snapshot: MetricSnapshot,
}

/// Reads counts from a JSON file that another process keeps current.
///
/// The file uses the same count keys as the state file, optionally with a
/// `channelId` that must match the configured channel.
pub struct FileSource {
    name: String,
    path: PathBuf,
}

impl FileSource {
    /// Creates a source reading `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            name: format!("file:{}", path.display()),
            path,
        }
    }

    fn parse(content: &str, channel_id: &str) -> Result<MetricSnapshot, FetchError> {
        let document: StatsDocument = serde_json::from_str(content)?;
        match document.channel_id {
            Some(actual) if !channel_id.is_empty() && actual != channel_id => {
                Err(FetchError::ChannelMismatch {
                    expected: channel_id.to_string(),
                    actual,
                })
            }
            _ => Ok(document.snapshot),
        }
    }
}

impl MetricSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&mut self, channel_id: &str) -> Result<MetricSnapshot, FetchError> {
        let content = fs::read_to_string(&self.path)?;
        Self::parse(&content, channel_id)
    }
}
