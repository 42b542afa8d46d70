//! Interval transformation
//!
//! Matching runs on signed semitone deltas between consecutive notes, not
//! on absolute pitches, which makes it invariant to octave and
//! transposition differences between the performance and the catalog.

/// Compute signed semitone intervals between consecutive pitches
///
/// The result has one element fewer than the input; fewer than two pitches
/// yield an empty sequence.
pub fn intervals_from_pitches(pitches: &[u8]) -> Vec<i32> {
    pitches
        .windows(2)
        .map(|pair| pair[1] as i32 - pair[0] as i32)
        .collect()
}

/// Derive the matching hook from a performance's pitch sequence
///
/// Returns `None` when fewer than `min_notes` pitches have accumulated
/// (too little signal for matching to be meaningful); otherwise the
/// interval sequence truncated to the first `hook_length` values.
pub fn hook_from_pitches(pitches: &[u8], min_notes: usize, hook_length: usize) -> Option<Vec<i32>> {
    if pitches.len() < min_notes {
        return None;
    }

    let mut hook = intervals_from_pitches(pitches);
    hook.truncate(hook_length);
    Some(hook)
}
