//! Pitch extraction for the humming input path
//!
//! This module turns raw microphone sample blocks into discrete note events:
//! - Autocorrelation pitch estimation (fundamental frequency per block)
//! - Frequency to MIDI conversion
//! - Debouncing of per-frame estimates into stable notes

pub mod estimator;
pub mod note;
pub mod stabilizer;
