//! Live reference-data fetching.

use std::collections::HashMap;

use tracing::debug;

use super::{LexiconError, LexiconSource, Reading, ReadingTableDoc, ShardDoc};
use crate::settings::settings;

/// Read-only client for the static reference-data host.
///
/// `{base_url}/readings.json` serves the whole reading table;
/// `{base_url}/shards/{base}.json` serves one shard document. Both are plain
/// JSON. Response bodies are capped at `max_doc_bytes`.
pub struct HttpLexicon {
    base_url: String,
    max_doc_bytes: u64,
}

impl HttpLexicon {
    pub fn new(base_url: impl Into<String>, max_doc_bytes: u64) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            max_doc_bytes,
        }
    }

    /// Client pointed at the `[services]` reference host.
    pub fn from_settings() -> Self {
        let s = settings();
        Self::new(s.services.reference_url.clone(), s.services.max_doc_bytes)
    }

    fn get(&self, url: &str) -> Result<String, LexiconError> {
        debug!(url, "fetching reference document");
        ureq::get(url)
            .call()
            .map_err(|e| LexiconError::Http(format!("{url}: {e}")))?
            .into_body()
            .with_config()
            .limit(self.max_doc_bytes)
            .read_to_string()
            .map_err(|e| LexiconError::Http(format!("{url}: {e}")))
    }
}

impl LexiconSource for HttpLexicon {
    fn reading_table(&self) -> Result<ReadingTableDoc, LexiconError> {
        let url = format!("{}/readings.json", self.base_url);
        parse_reading_table(&self.get(&url)?)
    }

    fn shard(&self, base: &str) -> Result<ShardDoc, LexiconError> {
        let url = format!("{}/shards/{base}.json", self.base_url);
        serde_json::from_str(&self.get(&url)?)
            .map_err(|e| LexiconError::Parse(format!("shard {base}: {e}")))
    }
}

/// Parse the wire reading table. Wire keys are strings; a key that is not
/// exactly one character is skipped rather than failing the document.
pub(crate) fn parse_reading_table(json: &str) -> Result<ReadingTableDoc, LexiconError> {
    let raw: HashMap<String, Vec<Reading>> =
        serde_json::from_str(json).map_err(|e| LexiconError::Parse(format!("reading table: {e}")))?;
    let mut doc = ReadingTableDoc::new();
    for (key, readings) in raw {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(logogram), None) => {
                doc.insert(logogram, readings);
            }
            _ => debug!(key, "skipping reading-table key that is not one logogram"),
        }
    }
    Ok(doc)
}
