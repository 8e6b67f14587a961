//! Offline snapshots of reference data.
//!
//! A snapshot bundles the reading table and a chosen set of shards into one
//! file so tooling and tests can run without the live host. File layout:
//! 4-byte magic "DYSN", 1-byte version, 4-byte little-endian CRC32 of the
//! body, bincode body.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{LexiconError, LexiconSource, ReadingTableDoc, ShardDoc};

const MAGIC: &[u8; 4] = b"DYSN";
const VERSION: u8 = 1;
const HEADER_LEN: usize = 9;

/// Bundled reference data.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub readings: ReadingTableDoc,
    pub shards: HashMap<String, ShardDoc>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, LexiconError> {
        let body = bincode::serialize(self).map_err(LexiconError::Serialize)?;
        let crc = crc32fast::hash(&body);
        let mut buf = Vec::with_capacity(HEADER_LEN + body.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&crc.to_le_bytes());
        buf.extend_from_slice(&body);
        Ok(buf)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LexiconError> {
        if bytes.len() < HEADER_LEN {
            return Err(LexiconError::InvalidHeader);
        }
        if &bytes[..4] != MAGIC {
            return Err(LexiconError::InvalidMagic);
        }
        if bytes[4] != VERSION {
            return Err(LexiconError::UnsupportedVersion(bytes[4]));
        }
        let expected = u32::from_le_bytes([bytes[5], bytes[6], bytes[7], bytes[8]]);
        let body = &bytes[HEADER_LEN..];
        if crc32fast::hash(body) != expected {
            return Err(LexiconError::ChecksumMismatch);
        }
        bincode::deserialize(body).map_err(LexiconError::Deserialize)
    }

    pub fn open(path: &Path) -> Result<Self, LexiconError> {
        Self::from_bytes(&fs::read(path)?)
    }

    /// Write atomically: serialize to `<path>.tmp`, then rename over `path`.
    pub fn save(&self, path: &Path) -> Result<(), LexiconError> {
        let bytes = self.to_bytes()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

/// `LexiconSource` over an opened snapshot. Lookups never leave memory.
pub struct SnapshotLexicon {
    snapshot: Snapshot,
}

impl SnapshotLexicon {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    pub fn open(path: &Path) -> Result<Self, LexiconError> {
        Ok(Self::new(Snapshot::open(path)?))
    }
}

impl LexiconSource for SnapshotLexicon {
    fn reading_table(&self) -> Result<ReadingTableDoc, LexiconError> {
        Ok(self.snapshot.readings.clone())
    }

    fn shard(&self, base: &str) -> Result<ShardDoc, LexiconError> {
        self.snapshot
            .shards
            .get(base)
            .cloned()
            .ok_or_else(|| LexiconError::Missing(format!("snapshot shard {base}")))
    }
}
