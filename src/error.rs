//! Error types for the melody recognition engine

use std::fmt;

/// Errors that can occur during recognition
///
/// The engine is advisory by design: matching degrades to an empty result
/// list rather than failing, so errors are reserved for genuinely invalid
/// inputs and the capture boundary.
#[derive(Debug, Clone)]
pub enum RecognitionError {
    /// Invalid input parameters
    InvalidInput(String),

    /// Microphone permission denied or no capture device available
    CaptureUnavailable(String),
}

impl fmt::Display for RecognitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecognitionError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            RecognitionError::CaptureUnavailable(msg) => write!(f, "Capture unavailable: {}", msg),
        }
    }
}

impl std::error::Error for RecognitionError {}
