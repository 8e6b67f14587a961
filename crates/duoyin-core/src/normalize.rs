//! Candidate text normalization.
//!
//! Recognizers return display text: "好。", "\"Two.\"", "「好」。". The
//! surrounding quotes and sentence punctuation must come off before the
//! candidate can be classified, while inner content stays untouched.

/// Quote-like characters stripped as one bounding layer: ASCII quotes, curly
/// quotes, CJK corner brackets, and their fullwidth forms.
const QUOTE_CHARS: &[char] = &[
    '"', '\'', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}', '「', '」', '『', '』', '＂', '＇',
];

/// Sentence-terminating punctuation stripped as one trailing run, in both
/// ASCII and fullwidth/CJK forms.
const TERMINATOR_CHARS: &[char] = &[
    '.', '!', '?', ',', ';', ':', '。', '！', '？', '，', '、', '；', '：',
];

/// Normalize one raw candidate.
///
/// Trims surrounding whitespace, strips one layer of bounding quotes, then
/// strips one trailing terminator run. Single tokens get a second strip pass:
/// removing punctuation can expose another quote layer ("「好」。" leaves a
/// trailing bracket after the first pass). Never fails; empty input yields
/// the empty string.
pub fn normalize(raw: &str) -> String {
    let mut s = strip_once(raw.trim());
    // The first pass can bare trailing whitespace; whether the candidate
    // is a single token is judged on the trimmed remainder.
    let token = s.trim();
    if !token.contains(char::is_whitespace) {
        s = strip_once(token);
    }
    s.trim().to_string()
}

fn strip_once(s: &str) -> &str {
    let s = s.strip_prefix(QUOTE_CHARS).unwrap_or(s);
    let s = s.strip_suffix(QUOTE_CHARS).unwrap_or(s);
    s.trim_end_matches(TERMINATOR_CHARS)
}
