//! The candidate pipeline: normalize, filter, resolve, cap.

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::language::Language;
use crate::lexicon::{ReadingTable, ShardCache};
use crate::normalize::normalize;
use crate::resolver::{self, Resolution};
use crate::settings::settings;
use crate::unicode;
use crate::words::WordService;

/// What the engine hands back for one recognition result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResponse {
    /// Normalized candidates in provider rank order, capped at
    /// `pipeline.max_candidates`.
    pub candidates: Vec<String>,
    /// Homophone resolution of the top candidate, when one applied.
    pub augmentation: Option<Resolution>,
}

/// Run the pipeline over raw provider candidates.
///
/// Empty-after-normalization candidates drop out. For logographic target
/// languages, candidates carrying Latin letters but none of the family's
/// script drop out too; if that filter would empty a non-empty list, the top
/// normalized candidate is kept instead, since returning nothing helps
/// nobody. Only the top survivor is resolved.
pub fn process(
    raw_candidates: &[String],
    language: Language,
    readings: &ReadingTable,
    shards: &ShardCache,
    words: &dyn WordService,
) -> PipelineResponse {
    let _span = debug_span!("process_candidates", count = raw_candidates.len(), ?language).entered();

    let normalized: Vec<String> = raw_candidates
        .iter()
        .map(|raw| normalize(raw))
        .filter(|c| !c.is_empty())
        .collect();

    let mut candidates: Vec<String> = if language.is_logographic() {
        let filtered: Vec<String> = normalized
            .iter()
            .filter(|c| !is_stray_transliteration(c, language))
            .cloned()
            .collect();
        if filtered.is_empty() {
            normalized.into_iter().take(1).collect()
        } else {
            filtered
        }
    } else {
        normalized
    };

    let augmentation = candidates
        .first()
        .and_then(|top| resolver::resolve(top, language, readings, shards, words));

    candidates.truncate(settings().pipeline.max_candidates);
    debug!(
        candidate_count = candidates.len(),
        augmented = augmentation.is_some()
    );

    PipelineResponse {
        candidates,
        augmentation,
    }
}

/// A candidate the recognizer romanized instead of writing in the target
/// script: Latin letters present, family script absent.
fn is_stray_transliteration(candidate: &str, language: Language) -> bool {
    unicode::contains_latin(candidate) && !candidate.chars().any(|c| in_family_script(c, language))
}

fn in_family_script(c: char, language: Language) -> bool {
    match language {
        Language::Chinese => unicode::is_han(c),
        Language::Japanese => unicode::is_han(c) || unicode::is_kana(c),
        Language::Korean => unicode::is_hangul(c) || unicode::is_han(c),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stray_transliteration() {
        assert!(is_stray_transliteration("hello", Language::Chinese));
        assert!(!is_stray_transliteration("好", Language::Chinese));
        assert!(!is_stray_transliteration("好k", Language::Chinese));
        assert!(!is_stray_transliteration("３５０", Language::Chinese));
        assert!(!is_stray_transliteration("ラーメン", Language::Japanese));
        assert!(is_stray_transliteration("ramen", Language::Japanese));
        assert!(!is_stray_transliteration("한국", Language::Korean));
        assert!(is_stray_transliteration("hanguk", Language::Korean));
    }
}
