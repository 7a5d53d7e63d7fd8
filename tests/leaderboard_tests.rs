//! Leaderboard persistence tests

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use blockfall::leaderboard::Leaderboard;

fn temp_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("blockfall_{tag}_{nanos}"))
}

#[test]
fn missing_file_is_empty_board() {
    let dir = temp_dir("missing");
    let board = Leaderboard::load(&dir.join("leaderboard.json")).unwrap();
    assert!(board.is_empty());
    assert_eq!(board.last_username(), None);
}

#[test]
fn save_then_load_preserves_entries() {
    let dir = temp_dir("roundtrip");
    let path = dir.join("nested").join("leaderboard.json");

    let mut board = Leaderboard::new();
    board.record("alice", 120);
    board.record("bob", 360);
    board.save(&path).unwrap();

    let loaded = Leaderboard::load(&path).unwrap();
    assert_eq!(loaded, board);
    assert_eq!(loaded.entries()[0].username, "bob");
    assert_eq!(loaded.last_username(), Some("bob"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn corrupt_file_is_an_error() {
    let dir = temp_dir("corrupt");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("leaderboard.json");
    fs::write(&path, "{ not json").unwrap();

    let err = Leaderboard::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("parsing"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn oversized_file_is_trimmed_on_load() {
    let dir = temp_dir("oversized");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("leaderboard.json");

    let entries: Vec<String> = (0..12)
        .map(|i| format!(r#"{{"username":"p{i}","score":{}}}"#, i * 5))
        .collect();
    fs::write(&path, format!(r#"{{"entries":[{}]}}"#, entries.join(","))).unwrap();

    let board = Leaderboard::load(&path).unwrap();
    assert_eq!(board.entries().len(), 10);
    assert_eq!(board.entries()[0].username, "p11");
    assert_eq!(board.rank("p0"), None);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn record_and_save_across_sessions() {
    let dir = temp_dir("sessions");
    let path = dir.join("leaderboard.json");

    for (name, score) in [("ann", 40), ("ann", 10), ("cy", 110)] {
        let mut board = Leaderboard::load(&path).unwrap();
        board.record(name, score);
        board.save(&path).unwrap();
    }

    let board = Leaderboard::load(&path).unwrap();
    assert_eq!(board.best("ann"), Some(40));
    assert_eq!(board.rank("cy"), Some(1));
    assert_eq!(board.last_username(), Some("cy"));

    fs::remove_dir_all(&dir).unwrap();
}
