//! Song catalog types and loading
//!
//! The catalog is supplied by an external collaborator as an array of
//! records, fetched once per app session and treated as read-only here.
//! Each record carries either a precomputed interval sequence or an
//! absolute note list from which intervals are derived on load.

use serde::{Deserialize, Serialize};

use crate::matching::intervals::intervals_from_pitches;

/// Raw catalog record as delivered by the catalog source
///
/// Exactly one of `intervals` / `notes` is expected; when both are present
/// the precomputed intervals win.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stable song identifier
    pub song_id: String,

    /// Song title
    pub title: String,

    /// Performing artist
    pub artist: String,

    /// Precomputed signed semitone intervals
    #[serde(default)]
    pub intervals: Option<Vec<i32>>,

    /// Absolute MIDI note list (intervals derived on load)
    #[serde(default)]
    pub notes: Option<Vec<u8>>,
}

/// A catalog song's matching target: its interval fingerprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongFingerprint {
    /// Stable song identifier
    pub song_id: String,

    /// Song title
    pub title: String,

    /// Performing artist
    pub artist: String,

    /// Signed semitone intervals between consecutive melody notes
    pub intervals: Vec<i32>,
}

/// Loaded, matching-ready song catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    fingerprints: Vec<SongFingerprint>,
}

impl Catalog {
    /// Build a catalog from raw entries
    ///
    /// Entries without derivable intervals, or with fewer than
    /// `min_intervals` of them, are excluded with a warning rather than
    /// failing the whole load; a malformed record must not take down the
    /// catalog.
    ///
    /// # Arguments
    ///
    /// * `entries` - Raw records from the catalog source
    /// * `min_intervals` - Minimum intervals a fingerprint needs
    ///   (see `EngineConfig::min_target_intervals`)
    pub fn from_entries(entries: Vec<CatalogEntry>, min_intervals: usize) -> Self {
        let mut fingerprints = Vec::with_capacity(entries.len());

        for entry in entries {
            let intervals = match (entry.intervals, entry.notes) {
                (Some(intervals), _) => intervals,
                (None, Some(notes)) => intervals_from_pitches(&notes),
                (None, None) => {
                    log::warn!(
                        "Excluding catalog entry '{}': no intervals or notes",
                        entry.song_id
                    );
                    continue;
                }
            };

            if intervals.len() < min_intervals {
                log::warn!(
                    "Excluding catalog entry '{}': {} intervals, need at least {}",
                    entry.song_id,
                    intervals.len(),
                    min_intervals
                );
                continue;
            }

            fingerprints.push(SongFingerprint {
                song_id: entry.song_id,
                title: entry.title,
                artist: entry.artist,
                intervals,
            });
        }

        log::debug!("Loaded catalog with {} fingerprints", fingerprints.len());

        Self { fingerprints }
    }

    /// Matching-ready fingerprints
    pub fn fingerprints(&self) -> &[SongFingerprint] {
        &self.fingerprints
    }

    /// Number of fingerprints in the catalog
    pub fn len(&self) -> usize {
        self.fingerprints.len()
    }

    /// True if the catalog holds no fingerprints
    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }
}
