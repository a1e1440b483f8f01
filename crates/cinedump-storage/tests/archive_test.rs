//! ArchiveStore behavior against a real directory.

use cinedump_core::config::StorageConfig;
use cinedump_core::errors::{CinedumpErrorCode, StorageError};
use cinedump_parse::{read_genres, read_ratings, AnyPayload, RatingPayload, Record};
use cinedump_storage::ArchiveStore;

const GENRES: &str = "\
THE GENRES LIST
===============

Matrix, The (1999)\tAction
Matrix, The (1999)\tSci-Fi
Other Movie (2001)\tDrama
";

fn store(dir: &std::path::Path) -> ArchiveStore {
    ArchiveStore::new(dir, &StorageConfig::default())
}

#[test]
fn test_roundtrip_records() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());
    let records: Vec<Record<Vec<String>>> = read_genres(GENRES.as_bytes())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    let path = store.save("genres", &records).unwrap();
    assert!(path.ends_with("genres.json.zst"));
    assert!(store.exists("genres").unwrap());

    let back: Vec<Record<Vec<String>>> = store.load("genres").unwrap();
    assert_eq!(back, records);
}

#[test]
fn test_roundtrip_empty_collection() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());
    let empty: Vec<Record<RatingPayload>> = Vec::new();
    store.save("nothing", &empty).unwrap();
    let back: Vec<Record<RatingPayload>> = store.load("nothing").unwrap();
    assert!(back.is_empty());
}

#[test]
fn test_roundtrip_mixed_payloads() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());
    let text = "MOVIE RATINGS REPORT\n\nNew  Distribution  Votes  Rank  Title\n      0000000125  1500   8.1  Heat (1995)\n";
    let records: Vec<Record<AnyPayload>> = read_ratings(text.as_bytes())
        .unwrap()
        .map(|r| r.map(Record::into_any))
        .collect::<Result<_, _>>()
        .unwrap();
    store.save("any", &records).unwrap();
    let back: Vec<Record<AnyPayload>> = store.load("any").unwrap();
    assert_eq!(back, records);
}

#[test]
fn test_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(&dir.path().join("absent"));
    let err = store.save("x", &vec![1, 2, 3]).unwrap_err();
    assert!(matches!(err, StorageError::DirectoryMissing { .. }));
    assert_eq!(err.error_code(), "DIRECTORY_MISSING");
    assert!(matches!(
        store.load::<Vec<u8>>("x"),
        Err(StorageError::DirectoryMissing { .. })
    ));
    assert!(!dir.path().join("absent").exists());
}

#[test]
fn test_load_missing_archive() {
    let dir = tempfile::tempdir().unwrap();
    let err = store(dir.path()).load::<Vec<u8>>("ghost").unwrap_err();
    assert_eq!(err.error_code(), "FILE_MISSING");
}

#[test]
fn test_save_refuses_overwrite_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());
    store.save("genres", &vec!["a"]).unwrap();
    let err = store.save("genres", &vec!["b"]).unwrap_err();
    assert!(matches!(err, StorageError::FileAlreadyExists { .. }));

    let back: Vec<String> = store.load("genres").unwrap();
    assert_eq!(back, vec!["a".to_string()]);
}

#[test]
fn test_save_overwrites_when_enabled() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        overwrite: Some(true),
        compression_level: Some(19),
        ..Default::default()
    };
    let store = ArchiveStore::new(dir.path(), &config);
    store.save("genres", &vec!["a"]).unwrap();
    store.save("genres", &vec!["b"]).unwrap();
    let back: Vec<String> = store.load("genres").unwrap();
    assert_eq!(back, vec!["b".to_string()]);
}

#[test]
fn test_failed_serialization_leaves_no_staging_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());
    // JSON object keys must be strings
    let mut bad = std::collections::BTreeMap::new();
    bad.insert(vec![1u8, 2], 3u8);

    let err = store.save("bad", &bad).unwrap_err();
    assert!(matches!(err, StorageError::Serialization { .. }), "{err}");
    assert!(!dir.path().join("bad.json.zst.partial").exists());
    assert!(!dir.path().join("bad.json.zst").exists());
}

#[test]
fn test_failed_rename_leaves_no_staging_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        overwrite: Some(true),
        ..Default::default()
    };
    let store = ArchiveStore::new(dir.path(), &config);
    // a non-empty directory where the archive should go
    let blocker = dir.path().join("genres.json.zst");
    std::fs::create_dir(&blocker).unwrap();
    std::fs::write(blocker.join("keep"), b"x").unwrap();

    let err = store.save("genres", &vec!["a"]).unwrap_err();
    assert!(matches!(err, StorageError::Io { .. }), "{err}");
    assert!(!dir.path().join("genres.json.zst.partial").exists());
    assert!(blocker.join("keep").exists());
}

#[test]
fn test_list_and_remove() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
    store.save("ratings", &vec![1]).unwrap();
    store.save("genres", &vec![2]).unwrap();
    assert_eq!(store.list().unwrap(), vec!["genres".to_string(), "ratings".to_string()]);

    store.remove("genres").unwrap();
    assert_eq!(store.list().unwrap(), vec!["ratings".to_string()]);
    assert!(matches!(
        store.remove("genres"),
        Err(StorageError::FileMissing { .. })
    ));
}

#[test]
fn test_invalid_name_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = store(dir.path()).save("../outside", &vec![1]).unwrap_err();
    assert!(matches!(err, StorageError::InvalidName { .. }));
}
