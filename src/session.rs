//! Session windowing: one bounded, resettable buffer of note events
//!
//! A session represents a single performance attempt. The window enforces
//! the three policies from the recognition design:
//! - capacity is capped, and overflow drops *new* notes so the
//!   hook-defining opening survives
//! - a long gap before a note replaces the session wholesale (the user
//!   restarted; this is a signal, not an error)
//! - a longer stretch of idleness clears the session entirely (the user
//!   stopped)
//!
//! Both thresholds are evaluated against caller-supplied timestamps, so
//! there are no wall-clock timers to arm or cancel. Every arrival rearms
//! them, including notes dropped at capacity: a saturated session under
//! steady playing must neither restart nor idle out.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

/// One discrete pitch observation, from either input path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// MIDI note number
    pub pitch: u8,

    /// Wall-clock arrival time in milliseconds
    pub observed_at_ms: u64,
}

/// Outcome of admitting one note into the session window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionUpdate {
    /// First note of a fresh session
    Started,

    /// Note appended to the current session
    Appended,

    /// Gap exceeded the reset threshold: the previous attempt was discarded
    /// and a new session started with this note
    Restarted,

    /// Session is at capacity; the note was dropped
    Saturated,
}

/// Bounded, resettable buffer of note events
#[derive(Debug, Clone)]
pub struct Session {
    notes: Vec<NoteEvent>,
    /// Arrival time of the most recent observation, stored or dropped
    last_arrival_ms: Option<u64>,
    capacity: usize,
    reset_gap_ms: u64,
    idle_clear_ms: u64,
}

impl Session {
    /// Create an empty session window from the engine configuration
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            notes: Vec::with_capacity(config.session_capacity),
            last_arrival_ms: None,
            capacity: config.session_capacity,
            reset_gap_ms: config.reset_gap_ms,
            idle_clear_ms: config.idle_clear_ms,
        }
    }

    /// Admit one note event
    ///
    /// The event's own timestamp drives the reset policy: a gap larger than
    /// the reset threshold since the previous *arrival* (stored or dropped)
    /// discards everything accumulated so far before admitting the new
    /// note. Every arrival rearms both thresholds, so steady playing into a
    /// saturated session never restarts it.
    pub fn observe(&mut self, event: NoteEvent) -> SessionUpdate {
        let previous_arrival = self.last_arrival_ms.replace(event.observed_at_ms);

        let previous_ms = match previous_arrival {
            Some(at) if !self.notes.is_empty() => at,
            _ => {
                self.notes.push(event);
                return SessionUpdate::Started;
            }
        };

        let gap_ms = event.observed_at_ms.saturating_sub(previous_ms);
        if gap_ms > self.reset_gap_ms {
            log::debug!(
                "Session restarted after {} ms gap ({} notes discarded)",
                gap_ms,
                self.notes.len()
            );
            self.notes.clear();
            self.notes.push(event);
            return SessionUpdate::Restarted;
        }

        if self.notes.len() >= self.capacity {
            return SessionUpdate::Saturated;
        }

        self.notes.push(event);
        SessionUpdate::Appended
    }

    /// True if the idle-clear threshold has elapsed since the last arrival
    /// (stored or dropped)
    pub fn idle_elapsed(&self, now_ms: u64) -> bool {
        match self.last_arrival_ms {
            Some(at) => now_ms.saturating_sub(at) >= self.idle_clear_ms,
            None => false,
        }
    }

    /// Discard all accumulated notes and arrival tracking
    pub fn clear(&mut self) {
        self.notes.clear();
        self.last_arrival_ms = None;
    }

    /// Accumulated note events, oldest first
    pub fn notes(&self) -> &[NoteEvent] {
        &self.notes
    }

    /// Accumulated pitches, oldest first
    pub fn pitches(&self) -> Vec<u8> {
        self.notes.iter().map(|n| n.pitch).collect()
    }

    /// Number of accumulated notes
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// True if no notes are accumulated
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
