//! Matching strategies and score fusion
//!
//! Three independent strategies score a performance hook against each
//! catalog fingerprint, and a combiner fuses them into one confidence:
//! - Prefix matching (position-wise, rewards a clean opening)
//! - Local alignment (Smith-Waterman style, tolerates insertions/deletions)
//! - N-gram fingerprinting (position-independent partial matches)

pub mod alignment;
pub mod combine;
pub mod intervals;
pub mod ngram;
pub mod prefix;

/// Per-strategy scores for one catalog entry, each on a 0-100 scale
#[derive(Debug, Clone, Copy)]
pub struct StrategyScores {
    /// Prefix matcher score
    pub prefix: f32,

    /// Local-alignment matcher score
    pub alignment: f32,

    /// N-gram fingerprint matcher score
    pub ngram: f32,
}
