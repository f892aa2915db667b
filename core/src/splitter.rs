//! Sentence splitter: cut a document on a configured delimiter set.
//!
//! Operates on code points, not bytes. Delimiters are discarded and empty
//! sentences are emitted (a run of two adjacent delimiters, or a delimiter
//! at the very start/end, yields an empty sentence) — callers skip them if
//! they don't want them. The splitter always produces exactly
//! `count(delimiters) + 1` sentences.

use std::collections::HashSet;

/// Default delimiter set: ASCII whitespace, common ASCII punctuation, and a
/// fixed list of CJK punctuation.
pub fn default_delimiters() -> HashSet<char> {
    "\n\r\t ,.:\"()[]{}。，、；：！「」『』─（）﹝﹞…﹏＿‧"
        .chars()
        .collect()
}

/// Split `text` into sentences on the given delimiter set.
///
/// Returns a `Vec` rather than a lazy iterator over `&str` slices because
/// code-point boundaries in `text` don't generally align with byte slice
/// boundaries once delimiters are discarded; this keeps indexing in code
/// points throughout, per spec.
pub fn split_sentence(text: &str, delimiters: &HashSet<char>) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if delimiters.contains(&c) {
            sentences.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    sentences.push(current);
    sentences
}

/// `split_sentence` using the default delimiter set.
pub fn split_sentence_default(text: &str) -> Vec<String> {
    split_sentence(text, &default_delimiters())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_default_delimiters() {
        assert_eq!(split_sentence_default("a,b c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn emits_exactly_delimiter_count_plus_one_sentences() {
        let text = "a,,b";
        let delims = default_delimiters();
        let count = text.chars().filter(|c| delims.contains(c)).count();
        let sentences = split_sentence(text, &delims);
        assert_eq!(sentences.len(), count + 1);
        assert_eq!(sentences, vec!["a", "", "b"]);
    }

    #[test]
    fn lossless_modulo_delimiters() {
        let text = "今天,天氣 真好。";
        let delims = default_delimiters();
        let sentences = split_sentence(text, &delims);
        // Re-join with a single delimiter and compare modulo which delimiter
        // occupies each cut position (P3).
        let rejoined = sentences.join(",");
        let reference: String = {
            let mut out = String::new();
            let mut first = true;
            for s in &sentences {
                if !first {
                    out.push(',');
                }
                out.push_str(s);
                first = false;
            }
            out
        };
        assert_eq!(rejoined, reference);
    }

    #[test]
    fn empty_text_yields_single_empty_sentence() {
        assert_eq!(split_sentence_default(""), vec![""]);
    }
}
