//! The engine boundary: owns the caches, exposes one call.

use std::sync::Arc;

use crate::language::Language;
use crate::lexicon::{HttpLexicon, LexiconSource, ReadingTable, ShardCache};
use crate::pipeline::{self, PipelineResponse};
use crate::words::{HttpWordService, WordService};

/// Homophone resolution engine.
///
/// Owns the reading table and shard cache, both lazily populated from the
/// given `LexiconSource` and kept for the life of the engine, plus the
/// homophone-word client. Everything inside is `Send + Sync`; share one
/// engine behind an `Arc` across request threads.
pub struct Engine {
    readings: ReadingTable,
    shards: ShardCache,
    words: Arc<dyn WordService>,
}

impl Engine {
    pub fn new(source: Arc<dyn LexiconSource>, words: Arc<dyn WordService>) -> Self {
        Self {
            readings: ReadingTable::new(Arc::clone(&source)),
            shards: ShardCache::new(source),
            words,
        }
    }

    /// Engine wired to the live collaborators named in `[services]`.
    pub fn from_settings() -> Self {
        Self::new(
            Arc::new(HttpLexicon::from_settings()),
            Arc::new(HttpWordService::from_settings()),
        )
    }

    /// Process one recognition result. Never fails: degraded data shows up
    /// as fewer candidates or an absent augmentation, not as an error.
    pub fn process(&self, raw_candidates: &[String], language_tag: &str) -> PipelineResponse {
        let language = Language::from_tag(language_tag);
        pipeline::process(
            raw_candidates,
            language,
            &self.readings,
            &self.shards,
            self.words.as_ref(),
        )
    }
}
