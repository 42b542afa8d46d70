//! Score combination and ranking
//!
//! Fuses the three strategy scores per catalog entry into one 0-99
//! confidence, then filters and ranks across the whole catalog. Also
//! provides the merge reducer that fuses the keyboard-path and
//! humming-path result lists for display.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::matching::{alignment, ngram, prefix, StrategyScores};

/// The floor all three strategies must clear for the agreement bonus
const AGREEMENT_FLOOR: f32 = 70.0;

/// Prefix score that counts as a perfect opening
const PERFECT_PREFIX: f32 = 99.0;

/// Minimum hook length for the perfect-opening bonus
const PERFECT_PREFIX_MIN_HOOK: usize = 5;

/// Leader confidence at which the result list tightens to two entries
const DOMINANT_LEADER: u8 = 80;

/// One ranked recognition candidate
///
/// Produced fresh on every re-evaluation, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Stable song identifier
    pub song_id: String,

    /// Song title
    pub title: String,

    /// Performing artist
    pub artist: String,

    /// Match confidence, 0-99 (certainty is never asserted, so 100 is
    /// never produced)
    pub confidence: u8,
}

/// Run all three strategies for one catalog fingerprint
pub fn score_entry(hook: &[i32], target: &[i32], config: &EngineConfig) -> StrategyScores {
    StrategyScores {
        prefix: prefix::prefix_score(hook, target),
        alignment: alignment::alignment_score(hook, target),
        ngram: ngram::ngram_score(hook, target, config.ngram_tolerance_semitones),
    }
}

/// Fuse strategy scores into a 0-99 confidence
///
/// Weighted combination plus two bonuses: +5 when all three strategies
/// independently exceed 70 (corroborating signals beat any one alone),
/// and +5 for a near-perfect prefix on a hook of at least 5 intervals
/// (a clean, long opening).
pub fn combine_scores(scores: &StrategyScores, hook_len: usize, config: &EngineConfig) -> u8 {
    let mut combined = scores.prefix * config.prefix_weight
        + scores.alignment * config.alignment_weight
        + scores.ngram * config.ngram_weight;

    if scores.prefix > AGREEMENT_FLOOR
        && scores.alignment > AGREEMENT_FLOOR
        && scores.ngram > AGREEMENT_FLOOR
    {
        combined += config.agreement_bonus;
    }

    if scores.prefix >= PERFECT_PREFIX && hook_len >= PERFECT_PREFIX_MIN_HOOK {
        combined += config.clean_opening_bonus;
    }

    (combined.round().max(0.0) as u32).min(99) as u8
}

/// Score the hook against every catalog fingerprint and rank the results
///
/// Entries below the confidence floor are discarded. The survivors are
/// sorted descending; a dominant leader (>= 80) keeps only the top 2,
/// otherwise the top 3 survive, and everything more than 12 points below
/// the leader is dropped either way.
pub fn rank_matches(hook: &[i32], catalog: &Catalog, config: &EngineConfig) -> Vec<MatchResult> {
    let mut results: Vec<MatchResult> = Vec::new();

    for fingerprint in catalog.fingerprints() {
        // Insufficient signal on the catalog side: skip, not an error
        if fingerprint.intervals.len() < config.min_target_intervals {
            continue;
        }

        let scores = score_entry(hook, &fingerprint.intervals, config);
        let confidence = combine_scores(&scores, hook.len(), config);

        log::debug!(
            "'{}': prefix={:.1} alignment={:.1} ngram={:.1} -> {}",
            fingerprint.song_id,
            scores.prefix,
            scores.alignment,
            scores.ngram,
            confidence
        );

        if confidence >= config.confidence_floor {
            results.push(MatchResult {
                song_id: fingerprint.song_id.clone(),
                title: fingerprint.title.clone(),
                artist: fingerprint.artist.clone(),
                confidence,
            });
        }
    }

    results.sort_by(|a, b| b.confidence.cmp(&a.confidence));

    if let Some(leader) = results.first().map(|r| r.confidence) {
        let keep = if leader >= DOMINANT_LEADER { 2 } else { 3 };
        results.truncate(keep);
        results.retain(|r| leader - r.confidence <= config.spread_window);
    }

    results
}

/// Merge the keyboard-path and humming-path result lists for display
///
/// Keeps the higher confidence per song id, re-sorts, and caps the list
/// at `limit` entries.
pub fn merge_matches(a: &[MatchResult], b: &[MatchResult], limit: usize) -> Vec<MatchResult> {
    let mut by_song: HashMap<&str, &MatchResult> = HashMap::new();

    for result in a.iter().chain(b.iter()) {
        by_song
            .entry(result.song_id.as_str())
            .and_modify(|kept| {
                if result.confidence > kept.confidence {
                    *kept = result;
                }
            })
            .or_insert(result);
    }

    let mut merged: Vec<MatchResult> = by_song.into_values().cloned().collect();
    merged.sort_by(|a, b| {
        b.confidence
            .cmp(&a.confidence)
            .then_with(|| a.song_id.cmp(&b.song_id))
    });
    merged.truncate(limit);
    merged
}
