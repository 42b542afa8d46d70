//! Local-alignment matching (Smith-Waterman style)
//!
//! Robust to a user inserting an extra note, dropping one, or starting a
//! beat off: the best-scoring matching subsequence anywhere in the
//! compared window dominates, and a bad start never permanently sinks the
//! score because every cell may reset to zero.

/// Score for an exact interval match
const MATCH_SCORE: f32 = 3.0;

/// Score for a near match (off by one semitone)
const NEAR_SCORE: f32 = 2.0;

/// Penalty for a mismatched interval
const MISMATCH_PENALTY: f32 = -2.0;

/// Penalty for a gap (skipped or extra note)
const GAP_PENALTY: f32 = -1.0;

/// How many intervals beyond the query length of the target participate,
/// bounding the alignment cost per catalog entry
const TARGET_SLACK: usize = 4;

/// Score the best local alignment of the query within the target's
/// opening, 0-100
///
/// Only the target's first `query.len() + 4` intervals are compared. The
/// maximum cell of the Smith-Waterman matrix is normalized by the
/// theoretical perfect score (`query.len() * 3`) and capped at 100.
pub fn alignment_score(query: &[i32], target: &[i32]) -> f32 {
    if query.is_empty() || target.is_empty() {
        return 0.0;
    }

    let window = target.len().min(query.len() + TARGET_SLACK);
    let target = &target[..window];

    let rows = query.len() + 1;
    let cols = target.len() + 1;
    let mut matrix = vec![0.0f32; rows * cols];
    let mut best = 0.0f32;

    for i in 1..rows {
        for j in 1..cols {
            let similarity = {
                let diff = (query[i - 1] - target[j - 1]).abs();
                if diff == 0 {
                    MATCH_SCORE
                } else if diff == 1 {
                    NEAR_SCORE
                } else {
                    MISMATCH_PENALTY
                }
            };

            let diagonal = matrix[(i - 1) * cols + (j - 1)] + similarity;
            let up = matrix[(i - 1) * cols + j] + GAP_PENALTY;
            let left = matrix[i * cols + (j - 1)] + GAP_PENALTY;

            let cell = diagonal.max(up).max(left).max(0.0);
            matrix[i * cols + j] = cell;
            best = best.max(cell);
        }
    }

    let perfect = query.len() as f32 * MATCH_SCORE;
    (best / perfect * 100.0).min(100.0)
}
