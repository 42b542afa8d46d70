//! Recognition engine: session lifecycle and match re-evaluation
//!
//! Owns the accumulating session, the cached ranked list, and the state
//! machine `Idle -> Accumulating -> Matching`. Matching re-runs
//! synchronously on every admitted note; there is no locked terminal
//! state; the ranking keeps updating until the session ends.
//!
//! One engine instance serves one input path. The keyboard path feeds
//! `on_note` directly; the humming path wraps an engine in a
//! [`HummingFrontend`] that performs pitch estimation and note
//! stabilization first. The two paths' result lists merge for display via
//! [`crate::matching::combine::merge_matches`].

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::error::RecognitionError;
use crate::matching::combine::{rank_matches, MatchResult};
use crate::matching::intervals::hook_from_pitches;
use crate::pitch::estimator::PitchEstimator;
use crate::pitch::note::midi_from_frequency;
use crate::pitch::stabilizer::NoteStabilizer;
use crate::session::{NoteEvent, Session, SessionUpdate};

/// Engine lifecycle state for the active session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No notes accumulated
    Idle,

    /// Notes accumulating, not yet enough signal to match
    Accumulating,

    /// Matching runs on every new note
    Matching,
}

/// Melody recognition engine for one input path
#[derive(Debug, Clone)]
pub struct RecognitionEngine {
    config: EngineConfig,
    catalog: Catalog,
    session: Session,
    matches: Vec<MatchResult>,
}

impl RecognitionEngine {
    /// Create an engine over a loaded catalog
    pub fn new(catalog: Catalog, config: EngineConfig) -> Self {
        let session = Session::new(&config);
        Self {
            config,
            catalog,
            session,
            matches: Vec::new(),
        }
    }

    /// Admit one note event and re-evaluate the ranking
    ///
    /// A gap larger than the reset threshold discards the previous attempt
    /// (including its matches) before the note is admitted. Notes beyond
    /// the session capacity are dropped and leave the ranking untouched.
    /// Returns the current ranked list, which is empty until enough notes
    /// have accumulated.
    pub fn on_note(&mut self, event: NoteEvent) -> &[MatchResult] {
        let update = self.session.observe(event);
        log::debug!(
            "Note {} at {} ms -> {:?} ({} in session)",
            event.pitch,
            event.observed_at_ms,
            update,
            self.session.len()
        );

        match update {
            SessionUpdate::Restarted => self.matches.clear(),
            SessionUpdate::Saturated => return &self.matches,
            SessionUpdate::Started | SessionUpdate::Appended => {}
        }

        self.reevaluate();
        &self.matches
    }

    /// Clear the session after sustained inactivity
    ///
    /// Driven by the caller's frame loop with the current wall-clock time.
    /// Returns `true` when the idle threshold elapsed and the session plus
    /// its matches were cleared; the user is considered to have stopped,
    /// so no new session is implied.
    pub fn on_idle_tick(&mut self, now_ms: u64) -> bool {
        if !self.session.idle_elapsed(now_ms) {
            return false;
        }

        log::debug!(
            "Idle threshold elapsed, clearing session ({} notes)",
            self.session.len()
        );
        self.session.clear();
        self.matches.clear();
        true
    }

    /// Explicit stop: synchronously clear the session and the ranking
    pub fn reset(&mut self) {
        self.session.clear();
        self.matches.clear();
    }

    /// The current ranked list (empty when not matching)
    pub fn current_matches(&self) -> &[MatchResult] {
        &self.matches
    }

    /// Current lifecycle state
    pub fn state(&self) -> EngineState {
        if self.session.is_empty() {
            EngineState::Idle
        } else if self.session.len() < self.config.min_session_notes {
            EngineState::Accumulating
        } else {
            EngineState::Matching
        }
    }

    /// Notes accumulated in the active session
    pub fn session_notes(&self) -> &[NoteEvent] {
        self.session.notes()
    }

    fn reevaluate(&mut self) {
        let pitches = self.session.pitches();
        let hook = hook_from_pitches(
            &pitches,
            self.config.min_session_notes,
            self.config.hook_length,
        );

        self.matches = match hook {
            Some(hook) => rank_matches(&hook, &self.catalog, &self.config),
            None => Vec::new(),
        };
    }
}

/// Microphone-path frontend: pitch estimation + stabilization + engine
///
/// Feeds one engine from raw sample blocks. Capture setup and permission
/// handling live with the caller; a failure there is reported as
/// [`RecognitionError::CaptureUnavailable`] before any block reaches this
/// type.
#[derive(Debug, Clone)]
pub struct HummingFrontend {
    estimator: PitchEstimator,
    stabilizer: NoteStabilizer,
    engine: RecognitionEngine,
}

impl HummingFrontend {
    /// Create a humming frontend over a loaded catalog
    pub fn new(catalog: Catalog, config: EngineConfig) -> Self {
        Self {
            estimator: PitchEstimator::new(&config),
            stabilizer: NoteStabilizer::new(&config),
            engine: RecognitionEngine::new(catalog, config),
        }
    }

    /// Process one captured sample block
    ///
    /// Runs pitch estimation on the block; if the debounced estimate
    /// stabilizes into a new note, it enters the engine timestamped with
    /// `now_ms`. Returns the current ranked list.
    ///
    /// # Errors
    ///
    /// Returns `RecognitionError::InvalidInput` for an empty block or zero
    /// sample rate.
    pub fn on_block(
        &mut self,
        samples: &[f32],
        sample_rate: u32,
        now_ms: u64,
    ) -> Result<&[MatchResult], RecognitionError> {
        let frequency = self.estimator.estimate(samples, sample_rate)?;
        let estimate = frequency.and_then(midi_from_frequency);

        if let Some(pitch) = self.stabilizer.observe(estimate) {
            self.engine.on_note(NoteEvent {
                pitch,
                observed_at_ms: now_ms,
            });
        }

        Ok(self.engine.current_matches())
    }

    /// Clear the session after sustained inactivity (see
    /// [`RecognitionEngine::on_idle_tick`]); also forgets the stabilizer's
    /// last emitted note so a fresh attempt can reuse it
    pub fn on_idle_tick(&mut self, now_ms: u64) -> bool {
        let cleared = self.engine.on_idle_tick(now_ms);
        if cleared {
            self.stabilizer.reset();
        }
        cleared
    }

    /// Explicit stop: clears engine state and pitch tracking
    pub fn reset(&mut self) {
        self.stabilizer.reset();
        self.engine.reset();
    }

    /// The wrapped engine
    pub fn engine(&self) -> &RecognitionEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;

    fn catalog() -> Catalog {
        Catalog::from_entries(
            vec![
                CatalogEntry {
                    song_id: "ode-to-joy".to_string(),
                    title: "Ode to Joy".to_string(),
                    artist: "Beethoven".to_string(),
                    intervals: None,
                    notes: Some(vec![64, 64, 65, 67, 67, 65, 64, 62, 60, 60, 62, 64]),
                },
                CatalogEntry {
                    song_id: "scale-run".to_string(),
                    title: "Scale Run".to_string(),
                    artist: "Traditional".to_string(),
                    notes: Some(vec![60, 62, 64, 65, 67, 65, 64, 62, 60]),
                    intervals: None,
                },
                CatalogEntry {
                    song_id: "unrelated".to_string(),
                    title: "Unrelated".to_string(),
                    artist: "Nobody".to_string(),
                    intervals: Some(vec![-7, 9, -7, 9, -7, 9, -7, 9]),
                    notes: None,
                },
            ],
            3,
        )
    }

    fn engine() -> RecognitionEngine {
        RecognitionEngine::new(catalog(), EngineConfig::default())
    }

    fn note(pitch: u8, at_ms: u64) -> NoteEvent {
        NoteEvent {
            pitch,
            observed_at_ms: at_ms,
        }
    }

    #[test]
    fn test_state_machine_progression() {
        let mut e = engine();
        assert_eq!(e.state(), EngineState::Idle);

        e.on_note(note(64, 0));
        assert_eq!(e.state(), EngineState::Accumulating);
        e.on_note(note(64, 400));
        e.on_note(note(65, 800));
        assert_eq!(e.state(), EngineState::Accumulating);

        e.on_note(note(67, 1200));
        assert_eq!(e.state(), EngineState::Matching);
    }

    #[test]
    fn test_matches_appear_with_enough_notes() {
        let mut e = engine();
        for (i, pitch) in [64u8, 64, 65].iter().enumerate() {
            let matches = e.on_note(note(*pitch, i as u64 * 400));
            assert!(matches.is_empty(), "No matches before 4 notes");
        }

        let matches = e.on_note(note(67, 1200));
        assert_eq!(matches[0].song_id, "ode-to-joy");
        assert!(matches[0].confidence >= 90);
    }

    #[test]
    fn test_reevaluated_on_every_note() {
        let mut e = engine();
        for (i, pitch) in [64u8, 64, 65, 67].iter().enumerate() {
            e.on_note(note(*pitch, i as u64 * 400));
        }
        let first = e.current_matches().to_vec();

        // Next correct note keeps the match and the engine stays in
        // Matching; results are produced fresh
        e.on_note(note(67, 1600));
        assert_eq!(e.state(), EngineState::Matching);
        assert_eq!(e.current_matches()[0].song_id, first[0].song_id);
    }

    #[test]
    fn test_reset_gap_discards_previous_attempt() {
        let mut e = engine();
        for (i, pitch) in [64u8, 64, 65, 67].iter().enumerate() {
            e.on_note(note(*pitch, i as u64 * 400));
        }
        assert!(!e.current_matches().is_empty());

        // 3100 ms after the last note: new attempt, old notes and matches gone
        let matches = e.on_note(note(60, 1200 + 3100));
        assert!(matches.is_empty());
        assert_eq!(e.state(), EngineState::Accumulating);
        assert_eq!(e.session_notes().len(), 1);
    }

    #[test]
    fn test_idle_tick_clears_session_and_matches() {
        let mut e = engine();
        for (i, pitch) in [64u8, 64, 65, 67].iter().enumerate() {
            e.on_note(note(*pitch, i as u64 * 400));
        }
        assert!(!e.current_matches().is_empty());

        assert!(!e.on_idle_tick(1200 + 4999));
        assert!(!e.current_matches().is_empty());

        assert!(e.on_idle_tick(1200 + 5000));
        assert!(e.current_matches().is_empty());
        assert_eq!(e.state(), EngineState::Idle);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut e = engine();
        for (i, pitch) in [64u8, 64, 65, 67].iter().enumerate() {
            e.on_note(note(*pitch, i as u64 * 400));
        }

        e.reset();
        assert_eq!(e.state(), EngineState::Idle);
        assert!(e.current_matches().is_empty());
    }

    #[test]
    fn test_saturated_note_leaves_ranking_untouched() {
        let mut e = engine();
        let pitches = [64u8, 64, 65, 67, 67, 65, 64, 62, 60, 60, 62, 64];
        let mut t = 0u64;
        // Fill the session to capacity with the melody cycled
        for i in 0..30 {
            e.on_note(note(pitches[i % pitches.len()], t));
            t += 100;
        }
        let before = e.current_matches().to_vec();

        let after = e.on_note(note(99, t)).to_vec();
        assert_eq!(before, after);
        assert_eq!(e.session_notes().len(), 30);
    }

    #[test]
    fn test_steady_playing_past_capacity_keeps_matches() {
        let mut e = engine();
        let pitches = [64u8, 64, 65, 67, 67, 65, 64, 62, 60, 60, 62, 64];
        let mut t = 0u64;
        for i in 0..30 {
            e.on_note(note(pitches[i % pitches.len()], t));
            t += 400;
        }
        let before = e.current_matches().to_vec();
        assert!(!before.is_empty());

        // Ten more notes at the same steady pace: time since the last
        // stored note exceeds the reset threshold, but the performance
        // never paused, so the session and its matches must survive
        for i in 0..10 {
            e.on_note(note(pitches[i % pitches.len()], t));
            t += 400;
        }
        assert_eq!(e.session_notes().len(), 30);
        assert_eq!(e.current_matches(), before.as_slice());
    }

    #[test]
    fn test_humming_frontend_stabilizes_and_matches() {
        use crate::pitch::note::frequency_from_midi;

        let mut frontend = HummingFrontend::new(catalog(), EngineConfig::default());
        let sample_rate = 44100;

        let block = |midi: u8| -> Vec<f32> {
            let f = frequency_from_midi(midi);
            (0..4096)
                .map(|i| {
                    (2.0 * std::f32::consts::PI * f * i as f32 / sample_rate as f32).sin() * 0.4
                })
                .collect()
        };

        // Hum the scale-run opening: C D E F G, six frames per note so each
        // estimate stabilizes into exactly one event
        let mut now = 0u64;
        for midi in [60u8, 62, 64, 65, 67] {
            for _ in 0..6 {
                frontend.on_block(&block(midi), sample_rate, now).unwrap();
                now += 50;
            }
        }

        let matches = frontend.engine().current_matches();
        assert!(!matches.is_empty(), "Hummed opening should match");
        assert_eq!(matches[0].song_id, "scale-run");
    }

    #[test]
    fn test_humming_frontend_rejects_empty_block() {
        let mut frontend = HummingFrontend::new(catalog(), EngineConfig::default());
        assert!(frontend.on_block(&[], 44100, 0).is_err());
    }
}
