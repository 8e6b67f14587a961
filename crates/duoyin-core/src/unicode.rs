//! Character-level Unicode classification for mixed CJK and Latin text.

/// Check the CJK Unified Ideographs blocks: the base block (U+4E00..U+9FFF)
/// plus Extensions A (U+3400..U+4DBF) and B (U+20000..U+2A6DF). Later
/// extensions hold characters that never show up in recognizer output, so the
/// three-block check is preferred over an exhaustive list.
pub fn is_han(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{20000}'..='\u{2A6DF}').contains(&c)
}

/// Check the Hiragana and Katakana blocks (U+3040..U+30FF). The two blocks
/// are contiguous, and the handful of unassigned codepoints inside them never
/// appear in recognizer output.
pub fn is_kana(c: char) -> bool {
    ('\u{3040}'..='\u{30FF}').contains(&c)
}

/// Check Hangul syllables (U+AC00..U+D7A3) and the conjoining jamo block
/// (U+1100..U+11FF).
pub fn is_hangul(c: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&c) || ('\u{1100}'..='\u{11FF}').contains(&c)
}

pub fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic()
}

pub fn contains_latin(s: &str) -> bool {
    s.chars().any(is_latin)
}

/// The single Han character of `s`, if there is exactly one. Non-Han
/// characters do not count toward the total, so "好。" and "a好" both yield
/// Some('好') while "你好" yields None.
pub fn single_han_char(s: &str) -> Option<char> {
    let mut han = s.chars().filter(|&c| is_han(c));
    let first = han.next()?;
    if han.next().is_some() {
        None
    } else {
        Some(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_classification() {
        assert!(is_han('好'));
        assert!(is_han('㐀'));
        assert!(!is_han('あ'));
        assert!(!is_han('a'));
        assert!(is_kana('あ'));
        assert!(is_kana('ア'));
        assert!(!is_kana('好'));
        assert!(is_hangul('한'));
        assert!(!is_hangul('好'));
        assert!(is_latin('a'));
        assert!(!is_latin('好'));
        assert!(!is_latin('é'));
    }

    #[test]
    fn test_single_han_char() {
        assert_eq!(single_han_char("好"), Some('好'));
        assert_eq!(single_han_char("好。"), Some('好'));
        assert_eq!(single_han_char("a好b"), Some('好'));
        assert_eq!(single_han_char("你好"), None);
        assert_eq!(single_han_char("hao"), None);
        assert_eq!(single_han_char(""), None);
    }

    #[test]
    fn test_contains_latin() {
        assert!(contains_latin("hao"));
        assert!(contains_latin("好a"));
        assert!(!contains_latin("好。"));
        assert!(!contains_latin(""));
    }
}
