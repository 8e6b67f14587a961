//! English number words for the closed range 0..=9999.
//!
//! "twenty-five" parses to 25 and 25 formats back to "twenty-five". The
//! range covers the spoken numbers worth disambiguating; anything larger is
//! rejected rather than guessed at.

/// Largest value the codec handles, in either direction.
const MAX_NUMBER: u64 = 9999;

/// Words for 0..=19, indexed by value.
const ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

/// Words for 20, 30, .. 90, indexed by tens digit minus two.
const TENS: [&str; 8] = [
    "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

fn ones_value(token: &str) -> Option<u64> {
    ONES.iter().position(|&w| w == token).map(|i| i as u64)
}

fn tens_value(token: &str) -> Option<u64> {
    TENS.iter().position(|&w| w == token).map(|i| (i as u64 + 2) * 10)
}

/// Parse an English number word, case-insensitively.
///
/// A single interior hyphen joining a tens word and a units word resolves
/// directly ("forty-two"). Everything else goes through a left-to-right
/// accumulator: small words add to a running value, "hundred" scales it,
/// "thousand" banks it, "and" is filler. Unknown tokens and totals past
/// 9999 fail the parse.
pub fn parse_number_word(word: &str) -> Option<u64> {
    let lower = word.to_lowercase();

    if let Some((tens, ones)) = lower.split_once('-') {
        if !ones.contains('-') {
            if let (Some(t), Some(o)) = (tens_value(tens), ones_value(ones)) {
                if (1..=9).contains(&o) {
                    return Some(t + o);
                }
            }
        }
    }

    let spaced = lower.replace('-', " ");
    let mut total: u64 = 0;
    let mut current: u64 = 0;
    let mut any_number_word = false;
    for token in spaced.split_whitespace() {
        if token == "and" {
            continue;
        }
        if let Some(v) = ones_value(token).or_else(|| tens_value(token)) {
            current += v;
            any_number_word = true;
        } else if token == "hundred" {
            if current == 0 {
                return None;
            }
            current *= 100;
        } else if token == "thousand" {
            if current == 0 {
                return None;
            }
            total += current * 1000;
            current = 0;
        } else {
            return None;
        }
        // Values only grow; once past the cap the parse cannot recover.
        if current > MAX_NUMBER || total > MAX_NUMBER {
            return None;
        }
    }
    if !any_number_word {
        return None;
    }
    Some(total + current)
}

/// Format a value as an English number word. None outside 0..=9999.
pub fn number_to_word(n: u64) -> Option<String> {
    if n > MAX_NUMBER {
        return None;
    }
    Some(compose(n))
}

fn compose(n: u64) -> String {
    match n {
        0..=19 => ONES[n as usize].to_string(),
        20..=99 => {
            let tens = TENS[(n / 10 - 2) as usize];
            match n % 10 {
                0 => tens.to_string(),
                ones => format!("{tens}-{}", ONES[ones as usize]),
            }
        }
        100..=999 => {
            let head = format!("{} hundred", ONES[(n / 100) as usize]);
            match n % 100 {
                0 => head,
                rest => format!("{head} {}", compose(rest)),
            }
        }
        _ => {
            let head = format!("{} thousand", ONES[(n / 1000) as usize]);
            match n % 1000 {
                0 => head,
                rest => format!("{head} {}", compose(rest)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_small_words() {
        assert_eq!(parse_number_word("zero"), Some(0));
        assert_eq!(parse_number_word("seven"), Some(7));
        assert_eq!(parse_number_word("fifteen"), Some(15));
        assert_eq!(parse_number_word("ninety"), Some(90));
    }

    #[test]
    fn test_parse_hyphenated_pair() {
        assert_eq!(parse_number_word("twenty-five"), Some(25));
        assert_eq!(parse_number_word("forty-two"), Some(42));
        assert_eq!(parse_number_word("ninety-nine"), Some(99));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(parse_number_word("Twenty-Five"), Some(25));
        assert_eq!(parse_number_word("TWO"), Some(2));
    }

    #[test]
    fn test_parse_compound_numbers() {
        assert_eq!(parse_number_word("one hundred"), Some(100));
        assert_eq!(parse_number_word("one hundred and five"), Some(105));
        assert_eq!(parse_number_word("three hundred twenty-one"), Some(321));
        assert_eq!(parse_number_word("one thousand"), Some(1000));
        assert_eq!(parse_number_word("two thousand fifteen"), Some(2015));
        assert_eq!(
            parse_number_word("nine thousand nine hundred ninety-nine"),
            Some(9999)
        );
    }

    #[test]
    fn test_parse_rejects_bare_scale_words() {
        assert_eq!(parse_number_word("hundred"), None);
        assert_eq!(parse_number_word("thousand"), None);
        assert_eq!(parse_number_word("hundred five"), None);
    }

    #[test]
    fn test_parse_rejects_junk() {
        assert_eq!(parse_number_word(""), None);
        assert_eq!(parse_number_word("and"), None);
        assert_eq!(parse_number_word("banana"), None);
        assert_eq!(parse_number_word("two bananas"), None);
        assert_eq!(parse_number_word("--"), None);
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert_eq!(parse_number_word("ten thousand"), None);
        assert_eq!(parse_number_word("ninety-nine thousand"), None);
    }

    #[test]
    fn test_format_basics() {
        assert_eq!(number_to_word(0).as_deref(), Some("zero"));
        assert_eq!(number_to_word(13).as_deref(), Some("thirteen"));
        assert_eq!(number_to_word(20).as_deref(), Some("twenty"));
        assert_eq!(number_to_word(42).as_deref(), Some("forty-two"));
        assert_eq!(number_to_word(100).as_deref(), Some("one hundred"));
        assert_eq!(number_to_word(105).as_deref(), Some("one hundred five"));
        assert_eq!(number_to_word(1000).as_deref(), Some("one thousand"));
        assert_eq!(number_to_word(2015).as_deref(), Some("two thousand fifteen"));
        assert_eq!(
            number_to_word(9999).as_deref(),
            Some("nine thousand nine hundred ninety-nine")
        );
        assert_eq!(number_to_word(10000), None);
    }

    #[test]
    fn test_round_trip_full_range() {
        for n in 0..=MAX_NUMBER {
            let word = number_to_word(n).unwrap();
            assert_eq!(parse_number_word(&word), Some(n), "round trip of {n} via {word:?}");
        }
    }
}
