//! The DP segmentation core (`findBestSegment`): given per-position n-gram
//! score tables, choose the highest-scoring partition of a sentence into
//! contiguous terms of length in `[1, N]`.
//!
//! Enumeration order matters: candidates from binary partitions are
//! considered before the atomic (unsplit) candidate, and for each partition
//! size `(left, right)` with `left != right` the mirrored `(right, left)` is
//! considered too, since the combining operator need not be commutative.
//! Selection is a stable sort by score descending, so ties resolve to the
//! first-enumerated candidate — partitions before atomic, smaller `left`
//! before larger.

use crate::category::LexiconStore;
use crate::error::Result;
use crate::scorer;
use crate::store::Store;

/// A scored segmentation: the chosen terms, in order, and the combined
/// score of the whole span.
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    pub terms: Vec<String>,
    pub score: f64,
}

/// Combine two adjacent sub-segmentations' scores. The default (and only
/// option wired into [`segment`]) is multiplication; exposed as a parameter
/// so alternative combiners can be substituted in tests or future variants.
pub fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

/// Per-n table of `(term, score)` for every starting position, built once
/// per call and consulted by the DP. `rows[n-1][i]` is the scored n-gram
/// starting at code-point index `i`, absent once `i + n > L`.
fn build_gram_rows<S: Store>(
    lex: &LexiconStore<'_, S>,
    chars: &[char],
    max_n: u32,
    categories: &[String],
) -> Result<Vec<Vec<(String, f64)>>> {
    let l = chars.len();
    let mut rows = Vec::with_capacity(max_n as usize);
    for n in 1..=max_n {
        let mut row = Vec::new();
        let n_usize = n as usize;
        if n_usize <= l {
            for i in 0..=(l - n_usize) {
                let term: String = chars[i..i + n_usize].iter().collect();
                let s = scorer::score(lex, &term, n, categories)?;
                row.push((term, s));
            }
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Run the partition DP over a single delimiter-free, already mixed-script
/// resolved sentence (Chinese residue only — the caller routes English
/// fragments around this).
pub fn segment<S: Store>(
    lex: &LexiconStore<'_, S>,
    sentence: &str,
    max_n: u32,
    categories: &[String],
) -> Result<Segmentation> {
    let chars: Vec<char> = sentence.chars().collect();
    let l = chars.len();
    if l == 0 {
        return Ok(Segmentation { terms: Vec::new(), score: 0.0 });
    }

    let rows = build_gram_rows(lex, &chars, max_n, categories)?;

    // table[i][j] holds the best segmentation of chars[i..=j].
    let mut table: Vec<Vec<Option<Segmentation>>> = vec![vec![None; l]; l];
    for i in 0..l {
        let (term, s) = rows[0][i].clone();
        table[i][i] = Some(Segmentation { terms: vec![term], score: s });
    }

    for current_size in 2..=l {
        let max_n_usize = max_n as usize;
        for i in 0..=(l - current_size) {
            let j = i + current_size - 1;
            let mut candidates: Vec<Segmentation> = Vec::new();

            for count in 1..=(current_size / 2) {
                let splits: Vec<(usize, usize)> = if count == current_size - count {
                    vec![(count, current_size - count)]
                } else {
                    vec![(count, current_size - count), (current_size - count, count)]
                };

                for (left, right) in splits {
                    let left_end = i + left - 1;
                    let right_start = i + left;
                    let left_seg = table[i][left_end].as_ref().expect("left sub-span computed");
                    let right_seg =
                        table[right_start][j].as_ref().expect("right sub-span computed");
                    let mut terms = left_seg.terms.clone();
                    terms.extend(right_seg.terms.clone());
                    let score = multiply(left_seg.score, right_seg.score);
                    candidates.push(Segmentation { terms, score });
                }
            }

            if current_size <= max_n_usize {
                let (term, s) = rows[current_size - 1][i].clone();
                candidates.push(Segmentation { terms: vec![term], score: s });
            }

            candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());
            table[i][j] = Some(candidates.into_iter().next().expect("at least one candidate"));
        }
    }

    Ok(table[0][l - 1].take().expect("full span computed"))
}
