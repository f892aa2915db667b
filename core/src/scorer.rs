//! Scorer: turns raw per-category counts into a single positive score for a
//! candidate term.
//!
//! `score(t, C) = ε + Σ_c count_c(t) / v_c(n)`, where `v_c(n)` is the square
//! of the category's mean count per distinct n-gram term
//! (`sum_c(n)/variety_c(n)`), or 1 when the category has never seen any
//! n-grams of that length. The ε floor keeps every score strictly positive
//! so the segmenter's multiplicative combine never degenerates to zero from
//! an unseen term alone.
//!
//! An optional head/tail boost (off by default, per the earlier
//! single-category variant in `lexicon.py`) adds `(head+tail)/v` when both
//! marker counts exceed 3 and the term is at least a bigram.

use tracing::debug;

use crate::category::LexiconStore;
use crate::error::Result;
use crate::store::Store;

/// Floor added to every score so it stays strictly positive even when a
/// term is unknown to every supplied category.
pub const EPSILON: f64 = 1e-8;

/// Score a term of code-point length `n` against the union of `categories`.
pub fn score<S: Store>(
    lex: &LexiconStore<'_, S>,
    term: &str,
    n: u32,
    categories: &[String],
) -> Result<f64> {
    score_with_options(lex, term, n, categories, false)
}

/// Like [`score`], with the disabled-by-default head/tail boost switched on
/// by `head_tail_boost`.
pub fn score_with_options<S: Store>(
    lex: &LexiconStore<'_, S>,
    term: &str,
    n: u32,
    categories: &[String],
    head_tail_boost: bool,
) -> Result<f64> {
    let mut total = EPSILON;
    for category in categories {
        let variety = lex.variety(category, n)?;
        let v = if variety > 0 {
            let sum = lex.sum(category, n)? as f64;
            (sum / variety as f64).powi(2)
        } else {
            1.0
        };
        let count = lex.count(category, term)? as f64;
        debug!(category, term, count, v, "scored term");
        total += count / v;

        if head_tail_boost && n >= 2 {
            let (head, tail) = lex.head_tail(category, term)?;
            if head > 3 && tail > 3 {
                total += (head + tail) as f64 / v;
            }
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn unknown_term_scores_to_epsilon_floor() {
        let store = MemoryStore::new();
        let lex = LexiconStore::new(&store);
        lex.ensure_category("news", 2).unwrap();
        let got = score(&lex, "好天", 2, &["news".to_string()]).unwrap();
        assert_eq!(got, EPSILON);
    }

    #[test]
    fn known_term_scores_above_floor() {
        let store = MemoryStore::new();
        let lex = LexiconStore::new(&store);
        lex.ensure_category("news", 1).unwrap();
        lex.increase("news", "好", 1, 10).unwrap();
        lex.increase("news", "天", 1, 2).unwrap();
        // variety=2, sum=12, v = (12/2)^2 = 36; score("好") = eps + 10/36.
        let got = score(&lex, "好", 1, &["news".to_string()]).unwrap();
        assert!((got - (EPSILON + 10.0 / 36.0)).abs() < 1e-12);
    }

    #[test]
    fn head_tail_boost_is_off_by_default() {
        let store = MemoryStore::new();
        let lex = LexiconStore::new(&store);
        lex.ensure_category("news", 2).unwrap();
        lex.increase("news", "好天", 2, 5).unwrap();
        lex.increase("news", "B好天", 2, 10).unwrap();
        lex.increase("news", "E好天", 2, 10).unwrap();
        let without = score(&lex, "好天", 2, &["news".to_string()]).unwrap();
        let with = score_with_options(&lex, "好天", 2, &["news".to_string()], true).unwrap();
        assert!(with > without);
    }

    #[test]
    fn head_tail_boost_requires_both_markers_above_three() {
        let store = MemoryStore::new();
        let lex = LexiconStore::new(&store);
        lex.ensure_category("news", 2).unwrap();
        lex.increase("news", "好天", 2, 5).unwrap();
        lex.increase("news", "B好天", 2, 2).unwrap();
        lex.increase("news", "E好天", 2, 10).unwrap();
        let without = score(&lex, "好天", 2, &["news".to_string()]).unwrap();
        let with = score_with_options(&lex, "好天", 2, &["news".to_string()], true).unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn scores_sum_across_categories() {
        let store = MemoryStore::new();
        let lex = LexiconStore::new(&store);
        lex.ensure_category("news", 1).unwrap();
        lex.ensure_category("forum", 1).unwrap();
        lex.increase("news", "好", 1, 4).unwrap();
        lex.increase("forum", "好", 1, 4).unwrap();
        let one = score(&lex, "好", 1, &["news".to_string()]).unwrap();
        let both = score(&lex, "好", 1, &["news".to_string(), "forum".to_string()]).unwrap();
        assert!(both > one);
    }
}
