//! Prefix matching
//!
//! The cheapest and most decisive strategy for users who play the correct
//! opening from the very first note: walk the query and target intervals
//! in lockstep from position 0 and reward position-wise agreement, with a
//! bonus for a long unbroken opening run.

/// Credit for an exact interval match at a position
const EXACT_CREDIT: f32 = 1.0;

/// Credit for a near match (off by one semitone), tolerating minor pitch
/// inaccuracy
const NEAR_CREDIT: f32 = 0.7;

/// Shortest unbroken run of (exact or near) matches that earns a bonus
const RUN_BONUS_THRESHOLD: usize = 4;

/// Percentage points added per run element beyond the threshold base
const RUN_BONUS_PER_STEP: f32 = 3.0;

/// Score how well the query matches the target's opening, 0-100
///
/// Per compared position: an exact interval match contributes 1.0, a
/// ±1 semitone near match 0.7, anything else 0 and breaks the consecutive
/// run. The base score is the mean contribution scaled to 100; a longest
/// run of at least 4 adds `(run - 3) * 3` points. Capped at 100.
pub fn prefix_score(query: &[i32], target: &[i32]) -> f32 {
    let compared = query.len().min(target.len());
    if compared == 0 {
        return 0.0;
    }

    let mut sum = 0.0f32;
    let mut run = 0usize;
    let mut longest_run = 0usize;

    for i in 0..compared {
        let diff = (query[i] - target[i]).abs();
        if diff == 0 {
            sum += EXACT_CREDIT;
            run += 1;
        } else if diff == 1 {
            sum += NEAR_CREDIT;
            run += 1;
        } else {
            run = 0;
        }
        longest_run = longest_run.max(run);
    }

    let mut score = sum / compared as f32 * 100.0;
    if longest_run >= RUN_BONUS_THRESHOLD {
        score += (longest_run - (RUN_BONUS_THRESHOLD - 1)) as f32 * RUN_BONUS_PER_STEP;
    }

    score.min(100.0)
}
