//! Mixed-script tokenizer: separates maximal ASCII tokens from CJK runs
//! within a sentence so the segmenter is never asked to partition mixed
//! runs.
//!
//! A sentence is split on ASCII whitespace into parts. Each part is scanned
//! for the maximal ASCII token `[A-Za-z0-9\-_']+`; matches are emitted
//! lowercased with a leading `E`, and the non-English runs between/around
//! them are emitted as-is. A residue chunk carrying no non-ASCII content
//! (stray ASCII punctuation with no letters, digits, `-`, `_` or `'` to
//! anchor a token — e.g. the lone `?` in `"...block ?"`) is neither an
//! English token nor Chinese text, so it is dropped rather than forwarded
//! to the segmenter.

use once_cell::sync::Lazy;
use regex::Regex;

fn has_non_ascii(s: &str) -> bool {
    s.chars().any(|c| !c.is_ascii())
}

fn eng_token_re() -> &'static Regex {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9\-_']+").unwrap());
    &RE
}

/// Tokenize a single whitespace-free-or-not sentence into mixed-script
/// fragments. English fragments are prefixed with `E` and lowercased;
/// Chinese fragments are emitted verbatim.
pub fn iter_mix_terms(sentence: &str) -> Vec<String> {
    let mut out = Vec::new();
    for part in sentence.split_whitespace() {
        let mut last_end = 0;
        let mut any_match = false;
        for m in eng_token_re().find_iter(part) {
            any_match = true;
            let before = &part[last_end..m.start()];
            if has_non_ascii(before) {
                out.push(before.to_string());
            }
            out.push(format!("E{}", m.as_str().to_lowercase()));
            last_end = m.end();
        }
        let trailing = &part[last_end..];
        if !trailing.is_empty() && (any_match || has_non_ascii(trailing)) {
            out.push(trailing.to_string());
        }
    }
    out
}

/// Extract only the English fragments (stripped of their `E` prefix),
/// preserving order. Used for diagnostics (`Service::split_mix_terms`
/// callers that only want the English side).
pub fn iter_english_terms(sentence: &str) -> Vec<String> {
    iter_mix_terms(sentence)
        .into_iter()
        .filter_map(|frag| frag.strip_prefix('E').map(str::to_string))
        .collect()
}
