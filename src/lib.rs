//! # Hookmatch
//!
//! A melody recognition engine for music-learning apps: identifies which
//! catalog song a user is performing from a short, noisy, partial stream
//! of pitch observations (discrete key presses or pitch estimates from a
//! live microphone signal) within a few notes, without waiting for the
//! performance to finish.
//!
//! ## Features
//!
//! - **Pitch estimation**: autocorrelation-based fundamental frequency per
//!   sample block, with an RMS noise gate and octave-error avoidance
//! - **Note stabilization**: debounces noisy per-frame estimates into
//!   discrete note events
//! - **Session windowing**: bounded performance attempts with restart and
//!   idle-clear policies
//! - **Three matching strategies**: prefix walk, Smith-Waterman local
//!   alignment, and fuzzy n-gram fingerprints, fused into one 0-99
//!   confidence per catalog song
//!
//! Matching runs on signed semitone intervals, so it is invariant to
//! octave and transposition differences, and tolerates wrong notes,
//! insertions, and deletions relative to the canonical melody.
//!
//! ## Quick Start
//!
//! ```
//! use hookmatch::{Catalog, CatalogEntry, EngineConfig, NoteEvent, RecognitionEngine};
//!
//! let entries = vec![CatalogEntry {
//!     song_id: "ode-to-joy".to_string(),
//!     title: "Ode to Joy".to_string(),
//!     artist: "Beethoven".to_string(),
//!     intervals: None,
//!     notes: Some(vec![64, 64, 65, 67, 67, 65, 64, 62, 60, 60, 62, 64]),
//! }];
//!
//! let config = EngineConfig::default();
//! let catalog = Catalog::from_entries(entries, config.min_target_intervals);
//! let mut engine = RecognitionEngine::new(catalog, config);
//!
//! for (i, pitch) in [64u8, 64, 65, 67].iter().enumerate() {
//!     engine.on_note(NoteEvent {
//!         pitch: *pitch,
//!         observed_at_ms: i as u64 * 400,
//!     });
//! }
//!
//! let matches = engine.current_matches();
//! assert_eq!(matches[0].song_id, "ode-to-joy");
//! ```
//!
//! ## Architecture
//!
//! The recognition pipeline follows this flow:
//!
//! ```text
//! Audio blocks -> Pitch Estimator -> Note Stabilizer \
//!                                                     Session Window ->
//! Key presses  ------------------------------------- /
//!   -> Interval Transformer -> 3 Matching Strategies -> Combiner/Ranker
//! ```
//!
//! The whole pipeline is single-threaded and synchronous: matching re-runs
//! to completion on the arrival thread for every admitted note, which is
//! inexpensive at catalog sizes of tens to low hundreds of songs.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod matching;
pub mod pitch;
pub mod session;

// Re-export main types
pub use catalog::{Catalog, CatalogEntry, SongFingerprint};
pub use config::EngineConfig;
pub use engine::{EngineState, HummingFrontend, RecognitionEngine};
pub use error::RecognitionError;
pub use matching::combine::{merge_matches, MatchResult};
pub use session::{NoteEvent, Session, SessionUpdate};

/// Rank a performance hook against a catalog in one call
///
/// Stateless convenience entry for callers that manage their own session
/// windowing: scores `hook` (signed semitone intervals, at most the
/// configured hook length is meaningful) against every catalog
/// fingerprint and returns the filtered, ranked result list.
///
/// # Arguments
///
/// * `hook` - Signed semitone intervals of the performance opening
/// * `catalog` - Loaded song catalog
/// * `config` - Recognition configuration
///
/// # Example
///
/// ```
/// use hookmatch::{rank_hook, Catalog, CatalogEntry, EngineConfig};
///
/// let catalog = Catalog::from_entries(
///     vec![CatalogEntry {
///         song_id: "riff".to_string(),
///         title: "Riff".to_string(),
///         artist: "Band".to_string(),
///         intervals: Some(vec![2, 2, 1, -2, 2, 2, 1, -2]),
///         notes: None,
///     }],
///     3,
/// );
///
/// let matches = rank_hook(&[2, 2, 1, -2], &catalog, &EngineConfig::default());
/// assert_eq!(matches[0].song_id, "riff");
/// ```
pub fn rank_hook(hook: &[i32], catalog: &Catalog, config: &EngineConfig) -> Vec<MatchResult> {
    log::debug!(
        "Ranking {}-interval hook against {} fingerprints",
        hook.len(),
        catalog.len()
    );
    matching::combine::rank_matches(hook, catalog, config)
}
