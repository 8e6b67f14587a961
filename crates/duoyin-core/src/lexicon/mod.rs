//! Reference-data storage: logogram readings and syllable shards.
//!
//! `ReadingTable` holds the one whole-table document mapping logograms to
//! their pronunciations. `ShardCache` holds per-syllable shard documents
//! mapping keys to homophone logograms. Both are fed by a `LexiconSource`,
//! which is a live HTTP host in production, an offline `Snapshot` in tooling,
//! or an in-memory table in tests.

mod http;
mod readings;
mod shard;
mod snapshot;

pub use http::HttpLexicon;
pub use readings::ReadingTable;
pub use shard::{Shard, ShardCache};
pub use snapshot::{Snapshot, SnapshotLexicon};

use std::collections::HashMap;
use std::io;

use serde::{Deserialize, Serialize};

/// One pronunciation of one logogram, as served by the reference host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    /// Romanized syllable without tone marks ("hao").
    #[serde(rename = "sound")]
    pub syllable: String,
    /// Tone digit 1..=5; absent when the source does not mark one. Always
    /// serialized, even as null: bincode cannot round-trip skipped fields.
    #[serde(default)]
    pub tone: Option<u8>,
    /// Diacritic display form ("hǎo").
    #[serde(rename = "pretty", default)]
    pub display: String,
}

impl Reading {
    pub fn new(syllable: &str, tone: Option<u8>, display: &str) -> Self {
        Self {
            syllable: syllable.to_string(),
            tone,
            display: display.to_string(),
        }
    }
}

/// Parsed reading-table document: logogram to its readings, in source order.
pub type ReadingTableDoc = HashMap<char, Vec<Reading>>;

/// Parsed shard document: bare or tone-qualified key to member logograms.
pub type ShardDoc = HashMap<String, Vec<String>>;

/// Unified error type for reference-data fetching and snapshot I/O.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("no document for {0}")]
    Missing(String),

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected DYSN)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),
}

/// Where reference documents come from.
pub trait LexiconSource: Send + Sync {
    /// Fetch the whole logogram reading table.
    fn reading_table(&self) -> Result<ReadingTableDoc, LexiconError>;

    /// Fetch the shard document for one base syllable.
    fn shard(&self, base: &str) -> Result<ShardDoc, LexiconError>;
}

/// Fixed in-memory source for tests, benchmarks, and embedded data.
#[derive(Debug, Default)]
pub struct StaticLexicon {
    readings: ReadingTableDoc,
    shards: HashMap<String, ShardDoc>,
}

impl StaticLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reading(mut self, logogram: char, readings: Vec<Reading>) -> Self {
        self.readings.insert(logogram, readings);
        self
    }

    pub fn with_shard(mut self, base: &str, entries: &[(&str, &[&str])]) -> Self {
        let doc = entries
            .iter()
            .map(|&(key, members)| {
                let members = members.iter().map(|m| m.to_string()).collect();
                (key.to_string(), members)
            })
            .collect();
        self.shards.insert(base.to_string(), doc);
        self
    }
}

impl LexiconSource for StaticLexicon {
    fn reading_table(&self) -> Result<ReadingTableDoc, LexiconError> {
        Ok(self.readings.clone())
    }

    fn shard(&self, base: &str) -> Result<ShardDoc, LexiconError> {
        self.shards
            .get(base)
            .cloned()
            .ok_or_else(|| LexiconError::Missing(format!("shard {base}")))
    }
}
