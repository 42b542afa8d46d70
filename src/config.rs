//! Configuration parameters for melody recognition

/// Recognition configuration parameters
#[derive(Debug, Clone)]
pub struct EngineConfig {
    // Pitch estimation
    /// Minimum RMS amplitude for a block to be considered voiced (default: 0.01)
    /// Blocks below this threshold are treated as silence and produce no pitch
    pub rms_gate: f32,

    /// Normalized autocorrelation threshold for a high-confidence lag (default: 0.9)
    /// The first local maximum above this threshold is selected, which avoids
    /// octave errors from later, weaker peaks
    pub correlation_threshold: f32,

    /// Lowest frequency accepted as a melodic pitch in Hz (default: 80.0)
    pub min_frequency_hz: f32,

    /// Highest frequency accepted as a melodic pitch in Hz (default: 1000.0)
    pub max_frequency_hz: f32,

    // Note stabilization (humming path)
    /// Consecutive identical per-frame estimates required before a note is
    /// emitted (default: 5, roughly 100 ms at typical frame rates)
    pub stability_frames: u32,

    // Session windowing
    /// Maximum notes kept in one performance attempt (default: 30)
    /// Once full, later notes are dropped so the hook-defining opening survives
    pub session_capacity: usize,

    /// Gap between notes that signals a restarted attempt in ms (default: 3000)
    pub reset_gap_ms: u64,

    /// Idle time after the last note that clears the session in ms (default: 5000)
    pub idle_clear_ms: u64,

    // Matching
    /// Number of leading intervals used as the matching hook (default: 12)
    pub hook_length: usize,

    /// Minimum accumulated notes before matching runs (default: 4)
    /// A deliberate precision/recall trade-off, not a theoretical minimum
    pub min_session_notes: usize,

    /// Minimum intervals a catalog fingerprint needs to participate (default: 3)
    pub min_target_intervals: usize,

    /// Single-position semitone shift applied when building the fuzzy n-gram
    /// set for a target (default: 1)
    /// Only one position per n-gram is varied at a time; this is a recall/cost
    /// knob, not an exhaustive tolerance expansion
    pub ngram_tolerance_semitones: i32,

    // Score combination
    /// Prefix matcher weight in the combined score (default: 0.40)
    pub prefix_weight: f32,

    /// Local-alignment matcher weight in the combined score (default: 0.35)
    pub alignment_weight: f32,

    /// N-gram matcher weight in the combined score (default: 0.25)
    pub ngram_weight: f32,

    /// Bonus added when all three strategy scores exceed 70 (default: 5.0)
    pub agreement_bonus: f32,

    /// Bonus added for a prefix score of at least 99 on a hook of at least
    /// 5 intervals (default: 5.0)
    pub clean_opening_bonus: f32,

    /// Minimum confidence a match needs to be reported (default: 55)
    pub confidence_floor: u8,

    /// Maximum distance from the leading confidence that survives the final
    /// filter (default: 12)
    pub spread_window: u8,

    /// Maximum entries in the merged two-path display list (default: 5)
    pub display_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rms_gate: 0.01,
            correlation_threshold: 0.9,
            min_frequency_hz: 80.0,
            max_frequency_hz: 1000.0,
            stability_frames: 5,
            session_capacity: 30,
            reset_gap_ms: 3000,
            idle_clear_ms: 5000,
            hook_length: 12,
            min_session_notes: 4,
            min_target_intervals: 3,
            ngram_tolerance_semitones: 1,
            prefix_weight: 0.40,
            alignment_weight: 0.35,
            ngram_weight: 0.25,
            agreement_bonus: 5.0,
            clean_opening_bonus: 5.0,
            confidence_floor: 55,
            spread_window: 12,
            display_limit: 5,
        }
    }
}
