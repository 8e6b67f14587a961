//! Homophone resolution for the top candidate.
//!
//! Three classifications, tried in order per language family. Chinese: a
//! candidate whose logographic content is exactly one character resolves
//! through its readings; otherwise a pinyin-syllable-shaped candidate
//! resolves through one shard key. English: a digit string or a spelled-out
//! number resolves against the homophone-word service. Anything else yields
//! no resolution, which the caller reports as a null augmentation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::language::Language;
use crate::lexicon::{ReadingTable, ShardCache};
use crate::numword;
use crate::pinyin;
use crate::unicode;
use crate::words::WordService;

/// How the top candidate was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolveMode {
    SingleChar,
    SinglePinyin,
    NumberWord,
}

impl ResolveMode {
    /// The wire name of the mode, as serialized into responses.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SingleChar => "singleChar",
            Self::SinglePinyin => "singlePinyin",
            Self::NumberWord => "numberWord",
        }
    }
}

/// The assembled homophone set for one resolved unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub mode: ResolveMode,
    /// The unit that was resolved: one logogram for `SingleChar`, the whole
    /// candidate otherwise.
    pub input: String,
    /// Distinct syllable bases that contributed homophones, in reading
    /// order. Empty for `NumberWord`.
    pub bases: Vec<String>,
    /// Alternates for the unit, deduplicated, first occurrence wins.
    pub homophones: Vec<String>,
    /// Distinct tone digits joined with "/", or None without tone data.
    pub tone_label: Option<String>,
}

/// Resolve the top candidate, or None when no classification applies.
pub fn resolve(
    candidate: &str,
    language: Language,
    readings: &ReadingTable,
    shards: &ShardCache,
    words: &dyn WordService,
) -> Option<Resolution> {
    let _span = debug_span!("resolve", candidate, ?language).entered();
    let resolution = match language {
        Language::Chinese => resolve_chinese(candidate, readings, shards),
        Language::English => resolve_number_word(candidate, words),
        _ => None,
    };
    match &resolution {
        Some(r) => debug!(mode = r.mode.as_str(), homophone_count = r.homophones.len()),
        None => debug!("no classification matched"),
    }
    resolution
}

fn resolve_chinese(
    candidate: &str,
    readings: &ReadingTable,
    shards: &ShardCache,
) -> Option<Resolution> {
    if let Some(logogram) = unicode::single_han_char(candidate) {
        return Some(resolve_single_char(logogram, readings, shards));
    }
    if pinyin::is_syllable_shaped(candidate) {
        return Some(resolve_single_pinyin(candidate, shards));
    }
    None
}

/// Resolve one logogram through its readings.
///
/// A polyphonic character contributes every reading: the homophone set is
/// the union over all bases, so 重 offers both the zhong and the chong
/// alternates. A logogram with no known readings still resolves, to an
/// empty set; the caller can tell "nothing to offer" from "not applicable".
fn resolve_single_char(
    logogram: char,
    readings: &ReadingTable,
    shards: &ShardCache,
) -> Resolution {
    let readings = readings.readings_of(logogram);

    let mut bases: Vec<String> = Vec::new();
    let mut tones: Vec<char> = Vec::new();
    for reading in readings {
        let base = pinyin::base_of(&reading.syllable).to_string();
        if !bases.contains(&base) {
            bases.push(base);
        }
        if let Some(tone) = reading.tone {
            let digit = char::from(b'0' + tone);
            if !tones.contains(&digit) {
                tones.push(digit);
            }
        }
    }

    let mut seen = HashSet::new();
    let mut homophones = Vec::new();
    for base in &bases {
        let shard = shards.load(base);
        for member in shard.all_members(base) {
            if seen.insert(member.clone()) {
                homophones.push(member);
            }
        }
    }

    let tone_label = if tones.is_empty() {
        None
    } else {
        let mut label = String::new();
        for (i, digit) in tones.iter().enumerate() {
            if i > 0 {
                label.push('/');
            }
            label.push(*digit);
        }
        Some(label)
    };

    Resolution {
        mode: ResolveMode::SingleChar,
        input: logogram.to_string(),
        bases,
        homophones,
        tone_label,
    }
}

/// Resolve a pinyin-shaped candidate through one shard lookup.
fn resolve_single_pinyin(candidate: &str, shards: &ShardCache) -> Resolution {
    let key = pinyin::to_key(candidate);
    let base = pinyin::base_of(&key).to_string();
    let shard = shards.load(&base);

    let mut seen = HashSet::new();
    let mut homophones = Vec::new();
    for member in shard.members(&key, &base) {
        if seen.insert(member.clone()) {
            homophones.push(member.clone());
        }
    }

    let tone_label = pinyin::tone_of(&key).map(String::from);

    Resolution {
        mode: ResolveMode::SinglePinyin,
        input: candidate.to_string(),
        bases: vec![base],
        homophones,
        tone_label,
    }
}

/// Resolve an English candidate that denotes a number.
///
/// Both written forms are derived first: "2" gains wordForm "two", "Two"
/// gains digitForm "2". The homophone-word service is queried with the word
/// form, and the alternate set is service words plus both forms, minus the
/// candidate itself (compared case-insensitively, so "Two" does not offer
/// "two" back).
fn resolve_number_word(candidate: &str, words: &dyn WordService) -> Option<Resolution> {
    let all_digits = !candidate.is_empty() && candidate.chars().all(|c| c.is_ascii_digit());

    let (digit_form, word_form) = if all_digits {
        let word = candidate.parse::<u64>().ok().and_then(numword::number_to_word);
        (candidate.to_string(), word)
    } else {
        let value = numword::parse_number_word(candidate)?;
        (value.to_string(), numword::number_to_word(value))
    };

    let query = match &word_form {
        Some(word) => Some(word.clone()),
        None if !candidate.is_empty() && candidate.chars().all(|c| c.is_ascii_alphabetic()) => {
            Some(candidate.to_string())
        }
        None => None,
    };

    let service_words = match query {
        Some(q) => words.homophones(&q).unwrap_or_else(|e| {
            debug!(error = %e, "homophone-word query failed, using empty list");
            Vec::new()
        }),
        None => Vec::new(),
    };

    let excluded = candidate.to_ascii_lowercase();
    let mut seen = HashSet::new();
    let mut homophones = Vec::new();
    for word in service_words
        .into_iter()
        .chain(word_form)
        .chain(Some(digit_form))
    {
        if word.to_ascii_lowercase() == excluded {
            continue;
        }
        if seen.insert(word.clone()) {
            homophones.push(word);
        }
    }

    Some(Resolution {
        mode: ResolveMode::NumberWord,
        input: candidate.to_string(),
        bases: Vec::new(),
        homophones,
        tone_label: None,
    })
}
