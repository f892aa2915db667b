//! Category registry: the persistent multi-category lexicon, backed by a
//! [`Store`].
//!
//! A category is identified by name and owns its own `gram` order plus the
//! per-n `(sum, variety)` aggregates, a `terms` set and per-term counters —
//! all addressed through the key schema in [`keys`]. Nothing here is cached
//! across calls; every read goes to the store, matching the "no caches live
//! across calls" rule for the lexicon model (the segmenter's per-call memo is
//! a separate, unrelated cache).

use serde::{Deserialize, Serialize};

use crate::error::{LosoError, Result};
use crate::store::Store;

/// Default key prefix, matching the original `loso:` default.
pub const DEFAULT_PREFIX: &str = "loso:";

/// Store key layout for the lexicon schema. All keys are plain strings under
/// a configurable prefix.
pub mod keys {
    pub fn category_set(prefix: &str) -> String {
        format!("{prefix}category")
    }

    pub fn meta_gram(prefix: &str, category: &str) -> String {
        format!("{prefix}cat:{category}:meta:gram")
    }

    pub fn meta_sum(prefix: &str, category: &str, n: u32) -> String {
        format!("{prefix}cat:{category}:meta:{n}-gram-sum")
    }

    pub fn meta_variety(prefix: &str, category: &str, n: u32) -> String {
        format!("{prefix}cat:{category}:meta:{n}-gram-variety")
    }

    pub fn terms_set(prefix: &str, category: &str) -> String {
        format!("{prefix}cat:{category}:terms")
    }

    pub fn lex_term(prefix: &str, category: &str, term: &str) -> String {
        format!("{prefix}cat:{category}:lex:{term}")
    }
}

/// Per-category, per-gram-length aggregate snapshot, as returned by
/// `getStats`/`info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GramStats {
    pub n: u32,
    pub sum: i64,
    pub variety: i64,
}

/// A category's full stats snapshot: its `gram` order and one [`GramStats`]
/// per n in `1..=gram`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub name: String,
    pub gram: u32,
    pub grams: Vec<GramStats>,
}

/// Reject category names carrying the reserved `:` schema separator.
pub fn validate_category_name(name: &str) -> Result<()> {
    if name.contains(':') {
        return Err(LosoError::InvariantViolation(name.to_string()));
    }
    Ok(())
}

/// Registry of categories over a [`Store`], addressed by a configurable key
/// prefix.
pub struct LexiconStore<'s, S: Store> {
    store: &'s S,
    prefix: String,
}

impl<'s, S: Store> LexiconStore<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store, prefix: DEFAULT_PREFIX.to_string() }
    }

    pub fn with_prefix(store: &'s S, prefix: impl Into<String>) -> Self {
        Self { store, prefix: prefix.into() }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Names of every registered category, in unspecified order.
    pub fn categories(&self) -> Result<Vec<String>> {
        self.store.set_members(&keys::category_set(&self.prefix))
    }

    /// Look up a category's configured gram order, if it has been created.
    pub fn gram(&self, category: &str) -> Result<Option<u32>> {
        let v = self.store.get(&keys::meta_gram(&self.prefix, category))?;
        Ok(v.map(|v| v as u32))
    }

    /// Ensure `category` exists with the given `gram` order, creating it
    /// (and registering it) if this is the first time it's been fed. If the
    /// category already exists its `gram` is left untouched (immutable after
    /// creation), regardless of the `gram` passed here.
    pub fn ensure_category(&self, category: &str, gram: u32) -> Result<u32> {
        validate_category_name(category)?;
        if let Some(existing) = self.gram(category)? {
            return Ok(existing);
        }
        self.store.incr(&keys::meta_gram(&self.prefix, category), gram as i64)?;
        self.store.set_add(&keys::category_set(&self.prefix), category)?;
        Ok(gram)
    }

    /// Add `delta` to the counter for `(category, term)` of length `n`,
    /// updating the `terms` set and the per-n aggregates. Returns the new
    /// per-term count.
    pub fn increase(&self, category: &str, term: &str, n: u32, delta: i64) -> Result<i64> {
        let newly_present = self.store.set_add(&keys::terms_set(&self.prefix, category), term)?;
        let new_count = self.store.incr(&keys::lex_term(&self.prefix, category, term), delta)?;
        self.store.incr(&keys::meta_sum(&self.prefix, category, n), delta)?;
        if newly_present {
            self.store.incr(&keys::meta_variety(&self.prefix, category, n), 1)?;
        }
        Ok(new_count)
    }

    /// Add `delta` to a head/tail marker's own counter only. Markers are
    /// written during training for the disabled-by-default scoring addon
    /// (§9) and must not perturb `sum(n)`/`variety(n)` or the `terms` set —
    /// see the worked `sum(1)`/`variety(1)` scenario in the testable
    /// properties, which only accounts for plain n-gram occurrences.
    pub fn increase_marker(&self, category: &str, marker_term: &str, delta: i64) -> Result<i64> {
        self.store.incr(&keys::lex_term(&self.prefix, category, marker_term), delta)
    }

    /// The raw count for `(category, term)`, or 0 if never incremented.
    pub fn count(&self, category: &str, term: &str) -> Result<i64> {
        Ok(self.store.get(&keys::lex_term(&self.prefix, category, term))?.unwrap_or(0))
    }

    pub fn sum(&self, category: &str, n: u32) -> Result<i64> {
        Ok(self.store.get(&keys::meta_sum(&self.prefix, category, n))?.unwrap_or(0))
    }

    pub fn variety(&self, category: &str, n: u32) -> Result<i64> {
        Ok(self.store.get(&keys::meta_variety(&self.prefix, category, n))?.unwrap_or(0))
    }

    /// All terms ever incremented in `category`, in unspecified order.
    pub fn terms(&self, category: &str) -> Result<Vec<String>> {
        self.store.set_members(&keys::terms_set(&self.prefix, category))
    }

    /// `(head_count, tail_count)` for `term`: the counts of its `B`/`E`
    /// marker variants written during training (§4.4, §4.5). Consulted only
    /// by the disabled-by-default head/tail scoring boost (§9).
    pub fn head_tail(&self, category: &str, term: &str) -> Result<(i64, i64)> {
        let head = self.count(category, &format!("B{term}"))?;
        let tail = self.count(category, &format!("E{term}"))?;
        Ok((head, tail))
    }

    /// Full stats snapshot for `category`. `NotFound` if it has never been
    /// created.
    pub fn stats(&self, category: &str) -> Result<CategoryStats> {
        let gram = self.gram(category)?.ok_or_else(|| LosoError::NotFound(category.to_string()))?;
        let mut grams = Vec::with_capacity(gram as usize);
        for n in 1..=gram {
            grams.push(GramStats { n, sum: self.sum(category, n)?, variety: self.variety(category, n)? });
        }
        Ok(CategoryStats { name: category.to_string(), gram, grams })
    }

    /// Destroy a category and every key under it. Idempotent.
    ///
    /// The `Store` capability interface has no native set-member removal
    /// (§9 lists only `incr`/`get`/`set_add`/`set_members`/`delete`), so the
    /// registry set is rebuilt: deleted wholesale, then re-added member by
    /// member for every surviving category.
    pub fn clean(&self, category: &str) -> Result<()> {
        let mut doomed = vec![
            keys::meta_gram(&self.prefix, category),
            keys::terms_set(&self.prefix, category),
        ];
        if let Some(gram) = self.gram(category)? {
            for n in 1..=gram {
                doomed.push(keys::meta_sum(&self.prefix, category, n));
                doomed.push(keys::meta_variety(&self.prefix, category, n));
            }
        }
        for term in self.terms(category)? {
            doomed.push(keys::lex_term(&self.prefix, category, &term));
        }
        self.store.delete(&doomed)?;

        let remaining: Vec<String> =
            self.categories()?.into_iter().filter(|c| c != category).collect();
        self.store.delete(&[keys::category_set(&self.prefix)])?;
        for c in remaining {
            self.store.set_add(&keys::category_set(&self.prefix), &c)?;
        }
        Ok(())
    }

    /// Remove every category and every key this store manages under its
    /// prefix. Used by the CLI's `reset` command.
    pub fn reset(&self) -> Result<()> {
        for category in self.categories()? {
            self.clean(&category)?;
        }
        Ok(())
    }
}
