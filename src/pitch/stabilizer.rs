//! Note stabilization for the humming input path
//!
//! Per-frame pitch estimates are noisy: a sustained hum wobbles across
//! frames and transitions smear. The stabilizer debounces the estimate
//! stream into discrete note events by requiring a run of consecutive
//! identical MIDI estimates before emitting, and never re-emitting the
//! note that was emitted last.

use crate::config::EngineConfig;

/// Debounces per-frame MIDI estimates into discrete note events
#[derive(Debug, Clone)]
pub struct NoteStabilizer {
    /// Consecutive identical frames required before emission
    stability_frames: u32,

    /// MIDI note currently being tracked
    tracked: Option<u8>,

    /// Consecutive frames the tracked note has been observed
    streak: u32,

    /// Most recently emitted note (suppresses re-emission of a sustained
    /// pitch every time the threshold is re-crossed)
    last_emitted: Option<u8>,
}

impl NoteStabilizer {
    /// Create a stabilizer from the engine configuration
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            stability_frames: config.stability_frames,
            tracked: None,
            streak: 0,
            last_emitted: None,
        }
    }

    /// Feed one per-frame estimate; returns a note to emit, if any
    ///
    /// * An estimate equal to the tracked note extends its streak; reaching
    ///   the stability threshold emits the note once, unless it equals the
    ///   previously emitted one.
    /// * A different estimate starts tracking the new value from a streak
    ///   of one.
    /// * `None` (no pitch) resets the streak without emitting.
    pub fn observe(&mut self, estimate: Option<u8>) -> Option<u8> {
        let pitch = match estimate {
            Some(pitch) => pitch,
            None => {
                self.tracked = None;
                self.streak = 0;
                return None;
            }
        };

        if self.tracked == Some(pitch) {
            self.streak += 1;
        } else {
            self.tracked = Some(pitch);
            self.streak = 1;
        }

        if self.streak >= self.stability_frames && self.last_emitted != Some(pitch) {
            self.last_emitted = Some(pitch);
            log::debug!("Stabilized note: {}", pitch);
            return Some(pitch);
        }

        None
    }

    /// Forget all tracking state, including the last emitted note
    ///
    /// Called when the recognition session is cleared, so a fresh attempt
    /// can start on the same pitch it ended on.
    pub fn reset(&mut self) {
        self.tracked = None;
        self.streak = 0;
        self.last_emitted = None;
    }
}
