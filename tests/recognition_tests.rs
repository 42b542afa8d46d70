//! Integration tests for the melody recognition engine

use hookmatch::{
    merge_matches, rank_hook, Catalog, CatalogEntry, EngineConfig, EngineState, MatchResult,
    NoteEvent, RecognitionEngine,
};

fn entry(song_id: &str, title: &str, artist: &str, intervals: Vec<i32>) -> CatalogEntry {
    CatalogEntry {
        song_id: song_id.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        intervals: Some(intervals),
        notes: None,
    }
}

/// A catalog with one known hook and a handful of unrelated fingerprints
fn test_catalog(target_intervals: Vec<i32>) -> Catalog {
    Catalog::from_entries(
        vec![
            entry("target", "Target Song", "Target Artist", target_intervals),
            entry("leaps", "Leaps", "A", vec![-7, 9, -7, 9, -7, 9, -7, 9]),
            entry("drone", "Drone", "B", vec![0, 0, 0, 0, 0, 0, 0, 0, 0]),
            entry("fall", "Fall", "C", vec![-5, -4, -5, -4, -5, -4, -5]),
            entry("jumps", "Jumps", "D", vec![12, -12, 12, -12, 12, -12]),
        ],
        EngineConfig::default().min_target_intervals,
    )
}

/// Turn an interval sequence into an absolute pitch sequence starting at C4
fn pitches_from_intervals(intervals: &[i32]) -> Vec<u8> {
    let mut pitches = vec![60u8];
    for &interval in intervals {
        let next = pitches.last().unwrap().wrapping_add_signed(interval as i8);
        pitches.push(next);
    }
    pitches
}

fn play(engine: &mut RecognitionEngine, pitches: &[u8], start_ms: u64, gap_ms: u64) -> u64 {
    let mut at = start_ms;
    for &pitch in pitches {
        engine.on_note(NoteEvent {
            pitch,
            observed_at_ms: at,
        });
        at += gap_ms;
    }
    at - gap_ms
}

#[test]
fn test_identical_hook_ranks_first_with_high_confidence() {
    let hook = vec![2, 2, 1, -2, 2, 2, 1, -2, -1, -2];
    let catalog = test_catalog(hook.clone());

    let matches = rank_hook(&hook, &catalog, &EngineConfig::default());

    assert!(!matches.is_empty());
    assert_eq!(matches[0].song_id, "target");
    assert!(
        matches[0].confidence >= 95,
        "Expected a near-certain match, got {}",
        matches[0].confidence
    );
    // A dominant match suppresses weak, unrelated alternatives
    for m in &matches {
        assert!(matches[0].confidence - m.confidence <= 12);
    }
}

#[test]
fn test_end_to_end_keyboard_performance() {
    let hook = vec![2, 2, 1, -2, 2, 2, 1, -2, -1, -2];
    let catalog = test_catalog(hook.clone());
    let mut engine = RecognitionEngine::new(catalog, EngineConfig::default());

    let pitches = pitches_from_intervals(&hook);
    play(&mut engine, &pitches, 0, 400);

    assert_eq!(engine.state(), EngineState::Matching);
    let matches = engine.current_matches();
    assert_eq!(matches[0].song_id, "target");
    assert!(matches[0].confidence >= 95);
}

#[test]
fn test_transposed_performance_still_matches() {
    let hook = vec![2, 2, 1, -2, 2, 2, 1, -2, -1, -2];
    let catalog = test_catalog(hook.clone());
    let mut engine = RecognitionEngine::new(catalog, EngineConfig::default());

    // Same melody a fourth up: intervals are identical
    let mut pitches = pitches_from_intervals(&hook);
    for p in &mut pitches {
        *p += 5;
    }
    play(&mut engine, &pitches, 0, 400);

    assert_eq!(engine.current_matches()[0].song_id, "target");
}

#[test]
fn test_fewer_than_four_notes_yields_no_matches() {
    let hook = vec![2, 2, 1, -2, 2, 2, 1, -2, -1, -2];
    let catalog = test_catalog(hook.clone());
    let mut engine = RecognitionEngine::new(catalog, EngineConfig::default());

    let pitches = pitches_from_intervals(&hook);
    play(&mut engine, &pitches[..3], 0, 400);

    assert_eq!(engine.state(), EngineState::Accumulating);
    assert!(engine.current_matches().is_empty());
}

#[test]
fn test_no_match_is_distinct_from_not_enough_notes() {
    let catalog = test_catalog(vec![2, 2, 1, -2, 2, 2, 1, -2, -1, -2]);
    let mut engine = RecognitionEngine::new(catalog, EngineConfig::default());

    // Enough notes, but a melody unrelated to anything in the catalog
    play(&mut engine, &[60, 61, 67, 59, 70, 58], 0, 400);

    assert_eq!(engine.state(), EngineState::Matching);
    assert!(engine.current_matches().is_empty());
}

#[test]
fn test_session_reset_discards_notes_before_the_gap() {
    let hook = vec![2, 2, 1, -2, 2, 2, 1, -2, -1, -2];
    let catalog = test_catalog(hook.clone());
    let mut engine = RecognitionEngine::new(catalog, EngineConfig::default());

    let pitches = pitches_from_intervals(&hook);
    let last_at = play(&mut engine, &pitches, 0, 400);
    assert!(!engine.current_matches().is_empty());

    // 3100 ms later: a new attempt begins; matching must now see only the
    // post-gap notes
    let mut at = last_at + 3100;
    for &pitch in &[72u8, 71, 69, 67] {
        engine.on_note(NoteEvent {
            pitch,
            observed_at_ms: at,
        });
        at += 400;
    }

    assert_eq!(engine.session_notes().len(), 4);
    assert_eq!(engine.session_notes()[0].pitch, 72);
    // The post-gap notes are unrelated to the catalog, so the previously
    // displayed match must be gone
    assert!(engine.current_matches().is_empty());
}

#[test]
fn test_idle_timeout_clears_session_and_matches() {
    let hook = vec![2, 2, 1, -2, 2, 2, 1, -2, -1, -2];
    let catalog = test_catalog(hook.clone());
    let mut engine = RecognitionEngine::new(catalog, EngineConfig::default());

    let pitches = pitches_from_intervals(&hook);
    let last_at = play(&mut engine, &pitches, 0, 400);
    assert!(!engine.current_matches().is_empty());

    // No reset-sized gap ever occurred; the threshold is crossed purely by
    // elapsed idle time
    assert!(!engine.on_idle_tick(last_at + 4900));
    assert_eq!(engine.state(), EngineState::Matching);

    assert!(engine.on_idle_tick(last_at + 5000));
    assert_eq!(engine.state(), EngineState::Idle);
    assert!(engine.current_matches().is_empty());
}

#[test]
fn test_wrong_note_mid_hook_still_matches() {
    let hook = vec![2, 2, 1, -2, 2, 2, 1, -2, -1, -2];
    let catalog = test_catalog(hook.clone());
    let mut engine = RecognitionEngine::new(catalog, EngineConfig::default());

    // One wrong note in the middle of the performance
    let mut pitches = pitches_from_intervals(&hook);
    pitches[5] += 1;
    play(&mut engine, &pitches, 0, 400);

    let matches = engine.current_matches();
    assert!(!matches.is_empty(), "One slip should not lose the match");
    assert_eq!(matches[0].song_id, "target");
}

#[test]
fn test_extra_inserted_note_still_matches() {
    let hook = vec![2, 2, 1, -2, 2, 2, 1, -2, -1, -2];
    let catalog = test_catalog(hook.clone());
    let mut engine = RecognitionEngine::new(catalog, EngineConfig::default());

    // An extra note slipped in after the fourth
    let mut pitches = pitches_from_intervals(&hook);
    pitches.insert(4, 72);
    play(&mut engine, &pitches, 0, 400);

    let matches = engine.current_matches();
    assert!(!matches.is_empty(), "One insertion should not lose the match");
    assert_eq!(matches[0].song_id, "target");
}

#[test]
fn test_two_input_paths_merge_by_song() {
    let hook = vec![2, 2, 1, -2, 2, 2, 1, -2, -1, -2];
    let config = EngineConfig::default();

    let mut keyboard = RecognitionEngine::new(test_catalog(hook.clone()), config.clone());
    let mut humming = RecognitionEngine::new(test_catalog(hook.clone()), config.clone());

    // The keyboard performance is exact; the hummed one has a slip
    let pitches = pitches_from_intervals(&hook);
    play(&mut keyboard, &pitches, 0, 400);

    let mut slipped = pitches.clone();
    slipped[5] += 1;
    play(&mut humming, &slipped, 0, 400);

    let merged = merge_matches(
        keyboard.current_matches(),
        humming.current_matches(),
        config.display_limit,
    );

    assert!(!merged.is_empty());
    assert!(merged.len() <= config.display_limit);
    // The exact (keyboard) confidence wins for the shared song
    let target: &MatchResult = merged.iter().find(|m| m.song_id == "target").unwrap();
    assert_eq!(target.confidence, keyboard.current_matches()[0].confidence);
}

#[test]
fn test_catalog_with_malformed_entries_still_loads() {
    let config = EngineConfig::default();
    let catalog = Catalog::from_entries(
        vec![
            entry("good", "Good", "A", vec![2, 2, 1, -2, 2, 2, 1, -2]),
            entry("too-short", "Too Short", "B", vec![2, 2]),
            CatalogEntry {
                song_id: "no-material".to_string(),
                title: "No Material".to_string(),
                artist: "C".to_string(),
                intervals: None,
                notes: None,
            },
        ],
        config.min_target_intervals,
    );

    assert_eq!(catalog.len(), 1);
    let matches = rank_hook(&[2, 2, 1, -2], &catalog, &config);
    assert_eq!(matches[0].song_id, "good");
}

#[test]
fn test_confidence_is_never_100() {
    // Perfect performance of a long hook: every bonus applies, and the
    // ceiling must still hold
    let hook = vec![2, 2, 1, -2, 2, 2, 1, -2, -1, -2];
    let catalog = test_catalog(hook.clone());

    let matches = rank_hook(&hook, &catalog, &EngineConfig::default());
    assert_eq!(matches[0].confidence, 99);
    for m in &matches {
        assert!(m.confidence <= 99);
    }
}
