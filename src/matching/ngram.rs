//! N-gram fingerprint matching
//!
//! Position-independent partial matching: fixed-length contiguous interval
//! subsequences of the query are looked up in a fuzzy n-gram set built
//! from the target. Catches users who start a few notes into the hook,
//! where both prefix matching and an opening-window alignment miss.

use std::collections::HashSet;

/// Trigram score weight when a tetragram score is also available
const TRIGRAM_WEIGHT: f32 = 0.4;

/// Tetragram score weight (the longer n-gram is more specific)
const TETRAGRAM_WEIGHT: f32 = 0.6;

/// Score the query's n-gram coverage of the target, 0-100
///
/// Exact n-grams of the query (n = 3, plus n = 4 when the query has at
/// least 4 intervals) are looked up in the target's fuzzy n-gram set; the
/// per-size score is the fraction found, and the sizes blend as
/// `trigram * 0.4 + tetragram * 0.6` when both exist.
///
/// `tolerance` is the single-position semitone shift used when expanding
/// target n-grams (see `EngineConfig::ngram_tolerance_semitones`); only
/// one position per n-gram is varied at a time, deliberately not the
/// combinatorial product.
pub fn ngram_score(query: &[i32], target: &[i32], tolerance: i32) -> f32 {
    let trigram = match coverage(query, target, 3, tolerance) {
        Some(score) => score,
        None => return 0.0,
    };

    match coverage(query, target, 4, tolerance) {
        Some(tetragram) => trigram * TRIGRAM_WEIGHT + tetragram * TETRAGRAM_WEIGHT,
        None => trigram,
    }
}

/// Fraction of the query's n-grams present in the target's fuzzy set,
/// scaled to 0-100; `None` when either side has no n-gram of this size
fn coverage(query: &[i32], target: &[i32], n: usize, tolerance: i32) -> Option<f32> {
    if query.len() < n || target.len() < n {
        return None;
    }

    let fuzzy = fuzzy_gram_set(target, n, tolerance);
    let total = query.len() - n + 1;
    let hits = query
        .windows(n)
        .filter(|gram| fuzzy.contains(*gram))
        .count();

    Some(hits as f32 / total as f32 * 100.0)
}

/// Build the target's fuzzy n-gram set: each exact n-gram plus, for every
/// position within it, the two variants with that single position shifted
/// by ±`tolerance` semitones
fn fuzzy_gram_set(target: &[i32], n: usize, tolerance: i32) -> HashSet<Vec<i32>> {
    let mut set = HashSet::new();

    for gram in target.windows(n) {
        set.insert(gram.to_vec());

        for position in 0..n {
            for shift in [-tolerance, tolerance] {
                let mut variant = gram.to_vec();
                variant[position] += shift;
                set.insert(variant);
            }
        }
    }

    set
}
