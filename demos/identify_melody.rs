//! Example: Identify a song from a few played notes
//!
//! Usage:
//!   cargo run --example identify_melody
//!
//! Simulates a user picking out a melody on a keyboard, one wrong note
//! included, and prints the ranked candidates after every note once
//! matching begins. Set RUST_LOG=debug to watch the per-strategy scores.

use hookmatch::pitch::note::note_name;
use hookmatch::{Catalog, CatalogEntry, EngineConfig, NoteEvent, RecognitionEngine};

fn main() {
    env_logger::init();

    let entries = vec![
        CatalogEntry {
            song_id: "ode-to-joy".to_string(),
            title: "Ode to Joy".to_string(),
            artist: "Ludwig van Beethoven".to_string(),
            intervals: None,
            notes: Some(vec![64, 64, 65, 67, 67, 65, 64, 62, 60, 60, 62, 64]),
        },
        CatalogEntry {
            song_id: "fuer-elise".to_string(),
            title: "Für Elise".to_string(),
            artist: "Ludwig van Beethoven".to_string(),
            intervals: None,
            notes: Some(vec![76, 75, 76, 75, 76, 71, 74, 72, 69]),
        },
        CatalogEntry {
            song_id: "greensleeves".to_string(),
            title: "Greensleeves".to_string(),
            artist: "Traditional".to_string(),
            intervals: None,
            notes: Some(vec![57, 60, 62, 64, 65, 64, 62, 59, 55, 57, 59, 60]),
        },
    ];

    let config = EngineConfig::default();
    let catalog = Catalog::from_entries(entries, config.min_target_intervals);
    println!("Loaded catalog: {} songs\n", catalog.len());

    let mut engine = RecognitionEngine::new(catalog, config);

    // The Ode to Joy opening, with one slip (F# instead of F at note 6)
    let performance: [u8; 8] = [64, 64, 65, 67, 67, 66, 64, 62];

    for (i, &pitch) in performance.iter().enumerate() {
        let at_ms = i as u64 * 450;
        let matches = engine.on_note(NoteEvent {
            pitch,
            observed_at_ms: at_ms,
        });

        println!("Note {} ({}) at {} ms:", i + 1, note_name(pitch), at_ms);
        if matches.is_empty() {
            println!("  (accumulating, no candidates yet)");
        } else {
            for m in matches {
                println!("  {:>2}  {} by {}", m.confidence, m.title, m.artist);
            }
        }
        println!();
    }

    match engine.current_matches().first() {
        Some(best) => println!("Best guess: {} ({}% confident)", best.title, best.confidence),
        None => println!("No confident match."),
    }
}
