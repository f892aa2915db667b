//! Builder: feeds training text into a category for every n in `[1, N]`.
//!
//! For each n, plain n-grams and head/tail markers are tallied separately
//! (see [`crate::term::iter_terms_split`]): plain terms feed `sum(n)` /
//! `variety(n)` and the `terms` set, while markers only bump their own
//! counter — they exist solely for the disabled-by-default head/tail
//! scoring addon and must never perturb the aggregates other scoring reads.

use ahash::AHashMap;
use tracing::info;

use crate::category::LexiconStore;
use crate::error::Result;
use crate::store::Store;
use crate::term::iter_terms_split;

fn tally(terms: Vec<String>) -> AHashMap<String, i64> {
    let mut counts = AHashMap::new();
    for term in terms {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}

/// Feed `text` into `category` (creating it with the given `gram` order on
/// first use) for every n in `1..=gram`. Returns the total number of term
/// occurrences fed across all n, plain terms and markers alike.
pub fn feed<S: Store>(
    lex: &LexiconStore<'_, S>,
    category: &str,
    gram: u32,
    text: &str,
) -> Result<u64> {
    lex.ensure_category(category, gram)?;
    let mut total = 0u64;

    for n in 1..=gram {
        let (plain_terms, marker_terms) = iter_terms_split(n as usize, text);

        for (term, delta) in tally(plain_terms) {
            lex.increase(category, &term, n, delta)?;
            total += delta as u64;
        }
        for (term, delta) in tally(marker_terms) {
            lex.increase_marker(category, &term, delta)?;
            total += delta as u64;
        }
    }

    info!(category, total, "fed terms");
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn feed_creates_category_and_accumulates_counts() {
        let store = MemoryStore::new();
        let lex = LexiconStore::new(&store);
        feed(&lex, "news", 2, "好天氣").unwrap();
        assert_eq!(lex.gram("news").unwrap(), Some(2));
        assert!(lex.count("news", "好").unwrap() > 0);
        assert!(lex.count("news", "好天").unwrap() > 0);
    }

    #[test]
    fn feed_writes_head_and_tail_markers() {
        let store = MemoryStore::new();
        let lex = LexiconStore::new(&store);
        feed(&lex, "news", 1, "好天氣").unwrap();
        assert_eq!(lex.count("news", "B好").unwrap(), 1);
        assert_eq!(lex.count("news", "E氣").unwrap(), 1);
    }

    #[test]
    fn markers_do_not_inflate_sum_or_variety() {
        let store = MemoryStore::new();
        let lex = LexiconStore::new(&store);
        // "好天氣真好" has 5 code points; only "好" repeats.
        feed(&lex, "news", 1, "好天氣真好").unwrap();
        assert_eq!(lex.sum("news", 1).unwrap(), 5);
        assert_eq!(lex.variety("news", 1).unwrap(), 4);
    }

    #[test]
    fn refeeding_identical_text_double_counts() {
        let store = MemoryStore::new();
        let lex = LexiconStore::new(&store);
        feed(&lex, "news", 1, "好").unwrap();
        feed(&lex, "news", 1, "好").unwrap();
        assert_eq!(lex.count("news", "好").unwrap(), 2);
    }

    #[test]
    fn feed_returns_total_terms_fed_including_markers() {
        let store = MemoryStore::new();
        let lex = LexiconStore::new(&store);
        // n=1: "好","天","氣" plain, plus B好 and E氣 markers -> 5.
        let total = feed(&lex, "news", 1, "好天氣").unwrap();
        assert_eq!(total, 5);
    }

    #[test]
    fn ten_feedings_match_the_worked_scenario() {
        let store = MemoryStore::new();
        let lex = LexiconStore::new(&store);
        for _ in 0..10 {
            feed(&lex, "news", 1, "今天天氣真好").unwrap();
        }
        assert_eq!(lex.sum("news", 1).unwrap(), 60);
        assert_eq!(lex.variety("news", 1).unwrap(), 5);
    }

    #[test]
    fn aggregates_match_sum_of_plain_term_counts_after_feed() {
        let store = MemoryStore::new();
        let lex = LexiconStore::new(&store);
        feed(&lex, "news", 2, "好天氣真好").unwrap();
        for n in 1..=2 {
            let unprefixed_len = |t: &str| -> usize {
                let stripped = t.strip_prefix(['B', 'E']).unwrap_or(t);
                stripped.chars().count()
            };
            let counted: i64 = lex
                .terms("news")
                .unwrap()
                .iter()
                .filter(|t| unprefixed_len(t) == n as usize)
                .map(|t| lex.count("news", t).unwrap())
                .sum();
            assert_eq!(counted, lex.sum("news", n).unwrap());
        }
    }
}
