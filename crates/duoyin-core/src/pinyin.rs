//! Pinyin key codec: diacritic romanizations to ASCII shard keys.
//!
//! Shard keys use the numbered-pinyin form: lowercase ASCII letters plus an
//! optional trailing tone digit 1-5, so "hǎo" keys as "hao3" and "hào" as
//! "hao4". The ü vowel folds to "v" per the usual input-method convention.

/// Tone-marked vowels and their folding: plain vowel plus tone digit 1-4.
/// Uppercase forms are handled by lowercasing before the table lookup.
const TONED_VOWELS: &[(char, char, u8)] = &[
    ('ā', 'a', 1),
    ('á', 'a', 2),
    ('ǎ', 'a', 3),
    ('à', 'a', 4),
    ('ē', 'e', 1),
    ('é', 'e', 2),
    ('ě', 'e', 3),
    ('è', 'e', 4),
    ('ī', 'i', 1),
    ('í', 'i', 2),
    ('ǐ', 'i', 3),
    ('ì', 'i', 4),
    ('ō', 'o', 1),
    ('ó', 'o', 2),
    ('ǒ', 'o', 3),
    ('ò', 'o', 4),
    ('ū', 'u', 1),
    ('ú', 'u', 2),
    ('ǔ', 'u', 3),
    ('ù', 'u', 4),
    ('ǖ', 'v', 1),
    ('ǘ', 'v', 2),
    ('ǚ', 'v', 3),
    ('ǜ', 'v', 4),
];

/// Bound on a whole folded key, tone digit included ("zhuang" is six
/// letters). Anything longer cannot be a single syllable.
const MAX_SYLLABLE_LEN: usize = 6;

/// Lowercase and fold tone diacritics to ASCII. A recognized tone digit is
/// appended at the end of the token, after all letters.
fn fold(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut tone = None;
    for c in input.to_lowercase().chars() {
        if c == 'ü' {
            out.push('v');
        } else if let Some(&(_, plain, digit)) = TONED_VOWELS.iter().find(|&&(mark, _, _)| mark == c) {
            out.push(plain);
            tone = Some(digit);
        } else {
            out.push(c);
        }
    }
    if let Some(digit) = tone {
        out.push(char::from(b'0' + digit));
    }
    out
}

/// Split a key into its letter part and trailing tone digit, if any.
fn split_tone(key: &str) -> (&str, Option<char>) {
    match key.as_bytes() {
        [.., digit @ b'1'..=b'5'] => (&key[..key.len() - 1], Some(char::from(*digit))),
        _ => (key, None),
    }
}

/// Whether `s` already has key shape: one or more lowercase ASCII letters
/// with at most one trailing tone digit 1-5.
fn is_key_shaped(s: &str) -> bool {
    let (letters, _) = split_tone(s);
    !letters.is_empty() && letters.bytes().all(|b| b.is_ascii_lowercase())
}

/// Canonical shard key for a candidate: "hǎo" and "hao3" both key to "hao3".
///
/// Input that does not fold into key shape degrades to its ASCII letters
/// only. The tone digit goes with the rest, so "hǎo!" keys to the bare base
/// "hao"; losing the tone on malformed input beats inventing a key that no
/// shard document contains.
pub fn to_key(input: &str) -> String {
    let folded = fold(input);
    if is_key_shaped(&folded) {
        return folded;
    }
    folded.chars().filter(char::is_ascii_alphabetic).collect()
}

/// Whether a candidate looks like exactly one pinyin syllable: no internal
/// whitespace, key shape after folding, and short enough to be one syllable.
///
/// The length bound counts the whole folded token, digit included, so a
/// six-letter syllable passes bare ("zhuang") but not tone-qualified
/// ("zhuang1"). All shorter syllables carry their tone through.
pub fn is_syllable_shaped(input: &str) -> bool {
    let folded = fold(input);
    !folded.contains(char::is_whitespace)
        && is_key_shaped(&folded)
        && folded.len() <= MAX_SYLLABLE_LEN
}

/// The key with any trailing tone digit removed: "hao3" and "hao" both give
/// "hao".
pub fn base_of(key: &str) -> &str {
    split_tone(key).0
}

/// The trailing tone digit of a key, if present.
pub fn tone_of(key: &str) -> Option<char> {
    split_tone(key).1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_key_folds_diacritics() {
        assert_eq!(to_key("hǎo"), "hao3");
        assert_eq!(to_key("hào"), "hao4");
        assert_eq!(to_key("mā"), "ma1");
        assert_eq!(to_key("lǜ"), "lv4");
        assert_eq!(to_key("nü"), "nv");
        assert_eq!(to_key("zhōng"), "zhong1");
    }

    #[test]
    fn test_to_key_lowercases() {
        assert_eq!(to_key("HǍO"), "hao3");
        assert_eq!(to_key("Ma"), "ma");
    }

    #[test]
    fn test_to_key_is_fixed_point_on_keys() {
        for key in ["hao", "hao3", "zhuang1", "lv4", "ma"] {
            assert_eq!(to_key(key), key);
        }
    }

    #[test]
    fn test_to_key_degrades_malformed_input() {
        // Stray punctuation drops the tone along with everything non-letter.
        assert_eq!(to_key("hǎo!"), "hao");
        assert_eq!(to_key("nǐ hǎo"), "nihao");
        assert_eq!(to_key("hao33"), "hao");
        assert_eq!(to_key("好"), "");
        assert_eq!(to_key(""), "");
    }

    #[test]
    fn test_is_syllable_shaped() {
        assert!(is_syllable_shaped("hǎo"));
        assert!(is_syllable_shaped("hao3"));
        assert!(is_syllable_shaped("ma"));
        assert!(is_syllable_shaped("lǜ"));
        assert!(is_syllable_shaped("zhuang"));
        assert!(!is_syllable_shaped("zhuang1"));
        assert!(!is_syllable_shaped("ni hao"));
        assert!(!is_syllable_shaped("hǎo!"));
        assert!(!is_syllable_shaped("好"));
        assert!(!is_syllable_shaped(""));
    }

    #[test]
    fn test_base_and_tone() {
        assert_eq!(base_of("hao3"), "hao");
        assert_eq!(base_of("hao"), "hao");
        assert_eq!(base_of(""), "");
        assert_eq!(tone_of("hao3"), Some('3'));
        assert_eq!(tone_of("ma5"), Some('5'));
        assert_eq!(tone_of("hao"), None);
        assert_eq!(tone_of(""), None);
    }
}
