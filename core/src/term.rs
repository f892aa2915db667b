//! Term emitter (`iterTerms`): n-grams of each sentence in a text, with
//! optional synthetic head/tail markers.
//!
//! All emitted terms are lowercased — ASCII only, so Chinese code points are
//! unaffected. When `head_tail` is enabled, a synthetic term equal to `B` +
//! the first n-gram of a sentence is emitted right after it, and one equal
//! to `E` + the last n-gram is emitted right after that. A sentence shorter
//! than `n` produces no n-grams and therefore no head/tail markers either.

use crate::ngram::char_ngrams;
use crate::splitter::split_sentence_default;

fn ascii_lower(term: &str) -> String {
    term.chars().map(|c| c.to_ascii_lowercase()).collect()
}

/// Emit the n-grams (and, optionally, head/tail markers) of a single
/// sentence that has already been split off by the caller.
pub fn iter_terms_in_sentence(n: usize, sentence: &[char], head_tail: bool) -> Vec<String> {
    let mut out = Vec::new();
    let mut first = true;
    let mut last_term: Option<String> = None;
    for gram in char_ngrams(n, sentence) {
        let term = ascii_lower(&gram);
        out.push(term.clone());
        if first {
            if head_tail {
                out.push(format!("B{term}"));
            }
            first = false;
        }
        last_term = Some(term);
    }
    if head_tail {
        if let Some(term) = last_term {
            out.push(format!("E{term}"));
        }
    }
    out
}

/// Emit n-grams (and markers) for every sentence in `text`, splitting on the
/// default delimiter set first.
pub fn iter_terms(n: usize, text: &str, head_tail: bool) -> Vec<String> {
    let mut out = Vec::new();
    for sentence in split_sentence_default(text) {
        let chars: Vec<char> = sentence.chars().collect();
        out.extend(iter_terms_in_sentence(n, &chars, head_tail));
    }
    out
}

/// Like [`iter_terms_in_sentence`] but keeps plain n-grams and head/tail
/// markers in separate streams, so a caller (the builder) can fold them
/// into different aggregates — markers are written for the disabled
/// head/tail scoring addon and must not perturb `sum(n)`/`variety(n)`.
pub fn iter_terms_in_sentence_split(n: usize, sentence: &[char]) -> (Vec<String>, Vec<String>) {
    let mut plain = Vec::new();
    let mut markers = Vec::new();
    let mut first = true;
    let mut last_term: Option<String> = None;
    for gram in char_ngrams(n, sentence) {
        let term = ascii_lower(&gram);
        plain.push(term.clone());
        if first {
            markers.push(format!("B{term}"));
            first = false;
        }
        last_term = Some(term);
    }
    if let Some(term) = last_term {
        markers.push(format!("E{term}"));
    }
    (plain, markers)
}

/// [`iter_terms_in_sentence_split`] over every sentence in `text`.
pub fn iter_terms_split(n: usize, text: &str) -> (Vec<String>, Vec<String>) {
    let mut plain_all = Vec::new();
    let mut marker_all = Vec::new();
    for sentence in split_sentence_default(text) {
        let chars: Vec<char> = sentence.chars().collect();
        let (plain, markers) = iter_terms_in_sentence_split(n, &chars);
        plain_all.extend(plain);
        marker_all.extend(markers);
    }
    (plain_all, marker_all)
}
