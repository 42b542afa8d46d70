//! Frequency and MIDI note conversions

/// Convert a frequency in Hz to the nearest MIDI note number
///
/// Uses the equal-temperament mapping `round(12 * log2(f / 440) + 69)`.
/// Returns `None` for non-positive frequencies or results outside the MIDI
/// range 0-127.
///
/// # Example
///
/// ```
/// use hookmatch::pitch::note::midi_from_frequency;
///
/// assert_eq!(midi_from_frequency(440.0), Some(69)); // A4
/// assert_eq!(midi_from_frequency(261.63), Some(60)); // C4
/// assert_eq!(midi_from_frequency(0.0), None);
/// ```
pub fn midi_from_frequency(frequency: f32) -> Option<u8> {
    if frequency <= 0.0 {
        return None;
    }

    let midi = (12.0 * (frequency / 440.0).log2() + 69.0).round();
    if (0.0..=127.0).contains(&midi) {
        Some(midi as u8)
    } else {
        None
    }
}

/// Convert a MIDI note number to its frequency in Hz
///
/// # Example
///
/// ```
/// use hookmatch::pitch::note::frequency_from_midi;
///
/// assert!((frequency_from_midi(69) - 440.0).abs() < 0.01);
/// ```
pub fn frequency_from_midi(midi: u8) -> f32 {
    440.0 * 2.0f32.powf((midi as f32 - 69.0) / 12.0)
}

/// Get a MIDI note's name in scientific pitch notation (e.g., "A4", "C#5")
pub fn note_name(midi: u8) -> String {
    let note_names = [
        "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
    ];
    let octave = midi as i32 / 12 - 1;
    format!("{}{}", note_names[midi as usize % 12], octave)
}
