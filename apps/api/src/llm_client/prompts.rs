// Shared prompt fragments. Each feature module keeps its own prompts.rs next to
// the code that uses it; only cross-cutting pieces live here.

use crate::text::truncate_chars;

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to prompts that carry user documents.
pub const NO_INVENTION_INSTRUCTION: &str = "\
    Use only information present in the document. Leave a field empty rather \
    than guessing. Every array field must be present, even when empty.";

/// Bounds a user document embedded in a prompt.
pub fn excerpt(text: &str, max_chars: usize) -> &str {
    truncate_chars(text.trim(), max_chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_trims_and_bounds() {
        assert_eq!(excerpt("  abcdef  ", 3), "abc");
        assert_eq!(excerpt("ab", 10), "ab");
    }
}
