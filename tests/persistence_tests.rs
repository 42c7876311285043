//! Model persistence tests
//!
//! Save/restore round-trips, the legacy counters-only layout, and failure handling.

use bytefreq::persistence::{self, PersistenceError};
use bytefreq::{Analyzer, PersistenceOptions, Preset};
use tempfile::TempDir;

fn trained(corpus: &[u8]) -> Analyzer {
    let analyzer = Analyzer::new();
    analyzer.feed(corpus);
    analyzer
}

#[test]
fn test_roundtrip_preserves_counts_and_size() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("model.bfq");

    let a = trained(b"It was a bright cold day in April, and the clocks were striking thirteen.");
    a.feed(&(0..=255u8).collect::<Vec<_>>());
    a.save(&path).expect("Failed to save model");

    let b = Analyzer::new();
    b.restore(&path).expect("Failed to restore model");

    assert_eq!(b.counts(), a.counts());
    assert_eq!(b.size(), a.size());
    assert_eq!(
        b.score(b"the clocks were striking"),
        a.score(b"the clocks were striking")
    );
}

#[test]
fn test_save_truncates_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("model.bfq");
    std::fs::write(&path, vec![0xAB; 64 * 1024]).unwrap();

    let a = trained(b"small");
    a.save(&path).unwrap();
    assert!(std::fs::metadata(&path).unwrap().len() < 64 * 1024);

    let b = Analyzer::new();
    b.restore(&path).unwrap();
    assert_eq!(b.size(), 5);
}

#[test]
fn test_restore_replaces_previous_state() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("model.bfq");
    trained(b"xyz").save(&path).unwrap();

    let target = trained(b"aaaaaaaaaaaaaaaaaaaa");
    target.restore(&path).unwrap();

    assert_eq!(target.size(), 3);
    assert_eq!(target.counts()[b'a' as usize], 0);
    assert_eq!(target.score(b"xyz"), 1.0);
}

#[test]
fn test_restored_model_keeps_training() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("model.bfq");
    trained(b"abc").save(&path).unwrap();

    let analyzer = Analyzer::new();
    analyzer.restore(&path).unwrap();
    analyzer.feed(b"abc");

    assert_eq!(analyzer.size(), 6);
    assert_eq!(analyzer.counts()[b'b' as usize], 2);
}

#[test]
fn test_legacy_layout_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("legacy.bfq");

    let a = trained(b"legacy layout");
    a.save_with(&path, &PersistenceOptions::new().with_legacy_layout(true))
        .unwrap();

    let b = Analyzer::new();
    b.restore(&path).unwrap();
    assert_eq!(b.counts(), a.counts());
    assert_eq!(b.size(), 13);
    assert!(persistence::read_metadata(&path).unwrap().is_none());
}

#[test]
fn test_hand_written_legacy_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("external.bfq");

    let mut counts = vec![0i64; 256];
    counts[b'a' as usize] = 3;
    counts[b'b' as usize] = 3;
    counts[b'c' as usize] = 3;
    std::fs::write(&path, rmp_serde::to_vec(&counts).unwrap()).unwrap();

    let analyzer = Analyzer::new();
    analyzer.restore(&path).unwrap();
    assert_eq!(analyzer.size(), 9);
    assert_eq!(analyzer.score(b"cccbbbaaa"), 1.0);
}

#[test]
fn test_near_saturated_model_can_be_restored_and_fed() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("saturated.bfq");

    let mut counts = vec![0u64; 256];
    counts[b'b' as usize] = persistence::MAX_TOTAL - 10;
    std::fs::write(&path, rmp_serde::to_vec(&counts).unwrap()).unwrap();

    let analyzer = Analyzer::new();
    analyzer.restore(&path).unwrap();
    analyzer.feed(b"abbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");

    let snapshot = analyzer.snapshot();
    assert_eq!(snapshot.count(b'a'), 1);
    assert_eq!(snapshot.count(b'b'), persistence::MAX_TOTAL - 10 + 40);
    assert_eq!(snapshot.total(), snapshot.counts().iter().sum::<u64>());
}

#[test]
fn test_counters_past_signed_range_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("overflow.bfq");

    let mut counts = vec![0u64; 256];
    counts[b'a' as usize] = u64::MAX;
    std::fs::write(&path, rmp_serde::to_vec(&counts).unwrap()).unwrap();

    let analyzer = trained(b"untouched");
    assert!(matches!(
        analyzer.restore(&path),
        Err(PersistenceError::CountOverflow)
    ));
    analyzer.feed(b"a");
    assert_eq!(analyzer.size(), 10);
}

#[test]
fn test_metadata_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("model.bfq");

    let a = trained(b"metadata");
    a.save_with(&path, &PersistenceOptions::new().with_description("unit corpus"))
        .unwrap();

    let metadata = persistence::read_metadata(&path).unwrap().unwrap();
    assert_eq!(metadata.total_bytes, 8);
    assert_eq!(metadata.description.as_deref(), Some("unit corpus"));
    assert_eq!(metadata.bytefreq_version, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_preset_can_be_saved() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("english.bfq");

    let english = Preset::English.analyzer();
    english.save(&path).unwrap();

    let restored = Analyzer::new();
    restored.restore(&path).unwrap();
    assert_eq!(restored.snapshot(), Preset::English.histogram());
}

#[test]
fn test_restore_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let analyzer = trained(b"untouched");

    match analyzer.restore(temp_dir.path().join("missing.bfq")) {
        Err(PersistenceError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("Expected Io error, got {:?}", other),
    }
    assert_eq!(analyzer.size(), 9);
}

#[test]
fn test_save_to_missing_directory_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("no").join("such").join("dir").join("model.bfq");
    assert!(matches!(
        trained(b"x").save(&path),
        Err(PersistenceError::Io(_))
    ));
}

#[test]
fn test_corrupt_file_leaves_state_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let good = temp_dir.path().join("good.bfq");
    let corrupt = temp_dir.path().join("corrupt.bfq");

    trained(b"a complete model").save(&good).unwrap();
    let bytes = std::fs::read(&good).unwrap();
    std::fs::write(&corrupt, &bytes[..bytes.len() - 7]).unwrap();

    let analyzer = trained(b"in-memory state");
    let before = analyzer.snapshot();
    assert!(analyzer.restore(&corrupt).is_err());
    assert_eq!(analyzer.snapshot(), before);
}

#[test]
fn test_wrong_length_legacy_file_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("short.bfq");
    std::fs::write(&path, rmp_serde::to_vec(&vec![1u64; 128]).unwrap()).unwrap();

    let analyzer = Analyzer::new();
    assert!(matches!(
        analyzer.restore(&path),
        Err(PersistenceError::InvalidLength { expected: 256, found: 128 })
    ));
    assert!(!analyzer.is_trained());
}

#[test]
fn test_empty_file_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("empty.bfq");
    std::fs::write(&path, b"").unwrap();

    assert!(matches!(
        Analyzer::new().restore(&path),
        Err(PersistenceError::Decode(_))
    ));
}
