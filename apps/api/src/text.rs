//! Shared text patterns and matching helpers used by every heuristic.

use once_cell::sync::Lazy;
use regex::Regex;

// Compiled once, reused.
pub static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());
pub static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap()
});
/// A line opening with a bullet glyph.
pub static BULLET_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*[-•·▪*]").unwrap());
/// `Mon YYYY - Mon YYYY|Present` or `YYYY - YYYY|Present`.
pub static DATE_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?\s?\d{4}\s*(?:-|–|—|to)\s*(?:present|current|(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?\s?\d{4})|\b(?:19|20)\d{2}\s*(?:-|–|—|to)\s*(?:present|current|(?:19|20)\d{2}\b)",
    )
    .unwrap()
});
/// Numbers, percentages and `10k`/`3x` style metrics.
pub static METRIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b\d+(?:[.,]\d+)?(?:%|[kmx]\b)?").unwrap());

const BULLET_GLYPHS: &[char] = &['-', '•', '·', '▪', '*'];

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn starts_with_bullet(line: &str) -> bool {
    line.trim_start().starts_with(BULLET_GLYPHS)
}

/// Removes a leading bullet glyph and surrounding whitespace.
pub fn strip_bullet(line: &str) -> &str {
    line.trim_start()
        .trim_start_matches(BULLET_GLYPHS)
        .trim()
}

pub fn first_email(text: &str) -> Option<&str> {
    EMAIL_RE.find(text).map(|m| m.as_str())
}

pub fn first_phone(text: &str) -> Option<&str> {
    PHONE_RE.find(text).map(|m| m.as_str().trim())
}

/// Truncates to at most `max_chars` characters, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Counts occurrences of `term` in `haystack`, both already lowercased.
///
/// Word boundaries are enforced on each edge of the term that is itself a word
/// character, so `java` does not hit `javascript` while `.net` still hits
/// `asp.net`. A trailing `*` turns the term into a prefix (`engineer*` hits
/// `engineering`).
pub fn count_term(haystack: &str, term: &str) -> usize {
    let (needle, prefix) = match term.strip_suffix('*') {
        Some(stem) => (stem, true),
        None => (term, false),
    };
    if needle.is_empty() {
        return 0;
    }

    let check_start = needle.starts_with(is_word_char);
    let check_end = !prefix && needle.ends_with(is_word_char);

    let mut count = 0;
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(needle) {
        let start = from + pos;
        let end = start + needle.len();

        let start_ok = !check_start
            || haystack[..start]
                .chars()
                .next_back()
                .map_or(true, |c| !is_word_char(c));
        let end_ok = !check_end
            || haystack[end..]
                .chars()
                .next()
                .map_or(true, |c| !is_word_char(c));

        if start_ok && end_ok {
            count += 1;
            from = end;
        } else {
            from = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
        }
    }
    count
}

pub fn contains_term(haystack: &str, term: &str) -> bool {
    count_term(haystack, term) > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_term_respects_word_boundaries() {
        assert_eq!(count_term("java and javascript", "java"), 1);
        assert_eq!(count_term("led the team, enabled", "led"), 1);
        assert_eq!(count_term("skilled", "led"), 0);
    }

    #[test]
    fn test_count_term_prefix_mode() {
        assert_eq!(count_term("engineering engineers engineer", "engineer*"), 3);
        assert_eq!(count_term("reengineer", "engineer*"), 0);
    }

    #[test]
    fn test_count_term_symbol_edges() {
        assert!(contains_term("asp.net core", ".net"));
        assert!(contains_term("c++ and rust", "c++"));
        assert!(contains_term("we use c#.", "c#"));
        assert!(contains_term("node.js, aws", "node.js"));
    }

    #[test]
    fn test_count_term_empty_term_never_matches() {
        assert_eq!(count_term("anything", ""), 0);
        assert_eq!(count_term("anything", "*"), 0);
    }

    #[test]
    fn test_count_term_handles_multibyte_text() {
        assert_eq!(count_term("résumé • café résumé", "résumé"), 2);
    }

    #[test]
    fn test_truncate_chars_on_char_boundary() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_strip_bullet() {
        assert_eq!(strip_bullet("  • Shipped v2"), "Shipped v2");
        assert_eq!(strip_bullet("- Led team"), "Led team");
        assert_eq!(strip_bullet("Plain"), "Plain");
    }

    #[test]
    fn test_phone_and_email_patterns() {
        assert_eq!(first_email("mail john@x.com now"), Some("john@x.com"));
        assert_eq!(first_phone("call 555-123-4567\nEXPERIENCE"), Some("555-123-4567"));
        assert_eq!(first_phone("(555) 987-6543"), Some("(555) 987-6543"));
        assert_eq!(first_phone("2018 - 2020"), None);
    }

    #[test]
    fn test_date_range_pattern() {
        assert!(DATE_RANGE_RE.is_match("Jan 2020 - Present"));
        assert!(DATE_RANGE_RE.is_match("2018 – 2021"));
        assert!(DATE_RANGE_RE.is_match("sept. 2019 to mar 2022"));
        assert!(!DATE_RANGE_RE.is_match("version 2.0 - final"));
    }

    #[test]
    fn test_bullet_line_pattern_counts_each_line() {
        let text = "- one\n• two\nplain\n  · three";
        assert_eq!(BULLET_LINE_RE.find_iter(text).count(), 3);
    }
}
