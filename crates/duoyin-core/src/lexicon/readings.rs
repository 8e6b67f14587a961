//! The logogram reading table, loaded whole and exactly once.

use std::sync::{Arc, OnceLock};

use tracing::debug;

use super::{LexiconSource, Reading, ReadingTableDoc};

/// Engine-owned view of the reading-table document.
///
/// The document loads on the first `readings_of` call and is immutable after
/// that. A failed load is recorded as an empty table rather than retried:
/// "no known readings" is an answer the resolver handles, and a flapping
/// collaborator should not turn every lookup into a fetch attempt.
pub struct ReadingTable {
    source: Arc<dyn LexiconSource>,
    table: OnceLock<ReadingTableDoc>,
}

impl ReadingTable {
    pub fn new(source: Arc<dyn LexiconSource>) -> Self {
        Self {
            source,
            table: OnceLock::new(),
        }
    }

    /// All readings of `logogram` in document order. Empty for unknown
    /// logograms and when the table could not be loaded.
    pub fn readings_of(&self, logogram: char) -> &[Reading] {
        self.table()
            .get(&logogram)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn table(&self) -> &ReadingTableDoc {
        self.table.get_or_init(|| match self.source.reading_table() {
            Ok(doc) => sanitize(doc),
            Err(e) => {
                debug!(error = %e, "reading table load failed, continuing with empty table");
                ReadingTableDoc::new()
            }
        })
    }
}

/// Drop tone digits outside 1..=5; the wire format does not rule them out.
fn sanitize(mut doc: ReadingTableDoc) -> ReadingTableDoc {
    for readings in doc.values_mut() {
        for reading in readings.iter_mut() {
            if reading.tone.is_some_and(|t| !(1..=5).contains(&t)) {
                reading.tone = None;
            }
        }
    }
    doc
}
