//! Per-syllable shard documents and their process-lifetime cache.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use tracing::debug;

use super::{LexiconSource, ShardDoc};

/// One base syllable's homophone sets.
///
/// Entries are keyed by bare base ("hao") or tone-qualified key ("hao3").
/// The bare-base entry, when present, is the tone-agnostic union of the
/// whole shard.
#[derive(Debug, Default, Clone)]
pub struct Shard {
    entries: ShardDoc,
}

impl Shard {
    pub fn new(entries: ShardDoc) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Members under the tone-qualified key, falling back to the bare-base
    /// entry. The fallback widens to the whole base rather than returning
    /// nothing for a tone the document does not split out.
    pub fn members(&self, key: &str, base: &str) -> &[String] {
        self.entries
            .get(key)
            .or_else(|| self.entries.get(base))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every member for `base`. Prefers the bare-base entry, which is the
    /// exhaustive list; a document without one gets its entries unioned in
    /// sorted key order so the result is deterministic.
    pub fn all_members(&self, base: &str) -> Vec<String> {
        if let Some(members) = self.entries.get(base) {
            return members.clone();
        }
        let mut keys: Vec<&String> = self.entries.keys().collect();
        keys.sort();
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for key in keys {
            for member in &self.entries[key] {
                if seen.insert(member.clone()) {
                    out.push(member.clone());
                }
            }
        }
        out
    }
}

/// Base syllable to loaded shard, populated on demand, never evicted.
pub struct ShardCache {
    source: Arc<dyn LexiconSource>,
    shards: RwLock<HashMap<String, Arc<Shard>>>,
}

impl ShardCache {
    pub fn new(source: Arc<dyn LexiconSource>) -> Self {
        Self {
            source,
            shards: RwLock::new(HashMap::new()),
        }
    }

    /// The shard for `base`, fetching on first request.
    ///
    /// The read lock is released before fetching, so concurrent misses on
    /// the same base each fetch; the first insert wins and both callers see
    /// the same document either way. A failed fetch caches an empty shard,
    /// so one unreachable document costs one fetch, not one per lookup.
    pub fn load(&self, base: &str) -> Arc<Shard> {
        if let Some(shard) = self.shards.read().unwrap().get(base) {
            return Arc::clone(shard);
        }
        let shard = Arc::new(match self.source.shard(base) {
            Ok(doc) => Shard::new(doc),
            Err(e) => {
                debug!(base, error = %e, "shard fetch failed, caching empty shard");
                Shard::default()
            }
        });
        let mut map = self.shards.write().unwrap();
        Arc::clone(map.entry(base.to_string()).or_insert(shard))
    }
}
