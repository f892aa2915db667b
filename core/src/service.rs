//! Service facade: sentence-split → mixed-script-tokenize → (English tokens
//! pass through; Chinese residues go to the segmenter).
//!
//! This is the only entry point consumers (the CLI, an RPC server) need;
//! everything else in the crate is a building block it composes.

use crate::builder;
use crate::category::{CategoryStats, LexiconStore};
use crate::error::Result;
use crate::ngram::ngram as ngram_windows;
use crate::segmenter;
use crate::splitter::split_sentence_default;
use crate::store::Store;
use crate::term::iter_terms;
use crate::tokenizer::iter_mix_terms;

/// Facade over a [`LexiconStore`], exposing the operations a CLI or RPC
/// transport needs without exposing store plumbing.
pub struct Service<'s, S: Store> {
    lex: LexiconStore<'s, S>,
    gram: u32,
}

impl<'s, S: Store> Service<'s, S> {
    /// `gram` is the default maximum n-gram order used both for training
    /// new categories and for segmenting when a category's own `gram` isn't
    /// otherwise known (categories remember their own `gram` once created).
    pub fn new(store: &'s S, gram: u32) -> Self {
        Self { lex: LexiconStore::new(store), gram }
    }

    pub fn with_prefix(store: &'s S, prefix: impl Into<String>, gram: u32) -> Self {
        Self { lex: LexiconStore::with_prefix(store, prefix), gram }
    }

    /// Feed `text` into `category`. Returns the total term occurrences fed.
    pub fn feed(&self, category: &str, text: &str) -> Result<u64> {
        builder::feed(&self.lex, category, self.gram, text)
    }

    /// Segment `text` into terms, resolving English tokens verbatim
    /// (`E`-prefixed) and routing Chinese residues through the segmenter.
    /// Falls back to every registered category when `categories` is empty.
    pub fn split_terms(&self, text: &str, categories: &[String]) -> Result<Vec<String>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }
        let categories = self.resolve_categories(categories)?;
        let gram = self.resolve_gram(&categories)?;

        let mut out = Vec::new();
        for sentence in split_sentence_default(text) {
            if sentence.is_empty() {
                continue;
            }
            for fragment in iter_mix_terms(&sentence) {
                if let Some(english) = fragment.strip_prefix('E') {
                    if english.chars().next().map(|c| c.is_ascii()).unwrap_or(false) {
                        out.push(fragment);
                        continue;
                    }
                }
                let segmentation = segmenter::segment(&self.lex, &fragment, gram, &categories)?;
                out.extend(segmentation.terms);
            }
        }
        Ok(out)
    }

    /// Stats for every requested category (all registered categories when
    /// `categories` is empty).
    pub fn get_stats(&self, categories: &[String]) -> Result<Vec<CategoryStats>> {
        let categories = self.resolve_categories(categories)?;
        categories.iter().map(|c| self.lex.stats(c)).collect()
    }

    pub fn split_sentence(&self, text: &str) -> Vec<String> {
        split_sentence_default(text)
    }

    pub fn split_mix_terms(&self, text: &str) -> Vec<String> {
        iter_mix_terms(text)
    }

    /// Emit all n-grams (for every n up to the default `gram`) of `text`,
    /// for diagnostics. No head/tail markers.
    pub fn split_ngram_terms(&self, text: &str) -> Vec<String> {
        let mut out = Vec::new();
        for n in 1..=self.gram {
            out.extend(iter_terms(n as usize, text, false));
        }
        out
    }

    /// Every `(term, count)` pair ever fed into `category`, in unspecified
    /// order. Used by the `dump` CLI command; not part of the segmentation
    /// hot path.
    pub fn dump_terms(&self, category: &str) -> Result<Vec<(String, i64)>> {
        self.lex
            .terms(category)?
            .into_iter()
            .map(|term| {
                let count = self.lex.count(category, &term)?;
                Ok((term, count))
            })
            .collect()
    }

    /// Remove every category and every key this service's store manages.
    pub fn reset(&self) -> Result<()> {
        self.lex.reset()
    }

    /// Destroy a single category.
    pub fn clean(&self, category: &str) -> Result<()> {
        self.lex.clean(category)
    }

    fn resolve_categories(&self, categories: &[String]) -> Result<Vec<String>> {
        if categories.is_empty() {
            self.lex.categories()
        } else {
            Ok(categories.to_vec())
        }
    }

    fn resolve_gram(&self, categories: &[String]) -> Result<u32> {
        for category in categories {
            if let Some(gram) = self.lex.gram(category)? {
                return Ok(gram);
            }
        }
        Ok(self.gram)
    }
}

/// Re-exported for `splitNgramTerms`-adjacent diagnostics that want raw
/// sliding windows over an arbitrary token sequence rather than n-grams of
/// code points (e.g. windows over already-tokenized words).
pub fn ngram_over<T: Clone>(n: usize, items: &[T]) -> Vec<Vec<T>> {
    ngram_windows(n, items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn split_terms_on_empty_input_is_empty() {
        let store = MemoryStore::new();
        let svc = Service::new(&store, 4);
        assert_eq!(svc.split_terms("", &[]).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn split_terms_passes_english_through_and_segments_chinese() {
        let store = MemoryStore::new();
        let svc = Service::new(&store, 2);
        svc.feed("news", "好天氣").unwrap();
        let got = svc.split_terms("好天氣 hello", &["news".to_string()]).unwrap();
        assert!(got.contains(&"Ehello".to_string()));
    }

    #[test]
    fn feed_then_split_terms_prefers_trained_phrase() {
        let store = MemoryStore::new();
        let svc = Service::new(&store, 2);
        for _ in 0..50 {
            svc.feed("news", "好天氣").unwrap();
        }
        let got = svc.split_terms("好天氣", &["news".to_string()]).unwrap();
        assert!(got.contains(&"好天".to_string()) || got.contains(&"好天氣".to_string()));
    }

    #[test]
    fn get_stats_reports_trained_category() {
        let store = MemoryStore::new();
        let svc = Service::new(&store, 2);
        svc.feed("news", "好天").unwrap();
        let stats = svc.get_stats(&["news".to_string()]).unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].name, "news");
        assert_eq!(stats[0].gram, 2);
    }

    #[test]
    fn reset_clears_all_categories() {
        let store = MemoryStore::new();
        let svc = Service::new(&store, 1);
        svc.feed("news", "好").unwrap();
        svc.feed("forum", "好").unwrap();
        svc.reset().unwrap();
        assert!(svc.get_stats(&[]).unwrap().is_empty());
    }

    #[test]
    fn dump_terms_lists_every_fed_term_with_its_count() {
        let store = MemoryStore::new();
        let svc = Service::new(&store, 1);
        svc.feed("news", "好好").unwrap();
        let dumped = svc.dump_terms("news").unwrap();
        let good = dumped.iter().find(|(t, _)| t == "好").unwrap();
        assert_eq!(good.1, 2);
    }

    #[test]
    fn split_ngram_terms_emits_every_order_without_markers() {
        let store = MemoryStore::new();
        let svc = Service::new(&store, 2);
        let got = svc.split_ngram_terms("好天");
        assert!(got.contains(&"好".to_string()));
        assert!(got.contains(&"好天".to_string()));
        assert!(!got.iter().any(|t| t.starts_with('B') || t.starts_with('E')));
    }
}
