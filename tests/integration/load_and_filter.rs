//! Integration tests for loading annotation JSON and filtering by category

use super::test_utils::{sample_annotations, write_json};
use annostat::{filter_annotations_by_category, load_annotations_json, AnnotationError};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_groups_by_video() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_json(temp_dir.path(), "annotations.json", &sample_annotations());

    let store = load_annotations_json(&path, None).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.num_annotations(), 4);
    assert_eq!(store.get("video_validation_0000051").unwrap().len(), 3);
    assert_eq!(store.categories(), vec!["CliffDiving", "Diving"]);
}

#[test]
fn test_load_with_category_filter() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_json(temp_dir.path(), "annotations.json", &sample_annotations());

    let store = load_annotations_json(&path, Some("Diving")).unwrap();
    assert_eq!(store.filenames().collect::<Vec<_>>(), vec!["video_validation_0000051"]);
    assert!(store.annotations().all(|a| a.category == "Diving"));
}

#[test]
fn test_load_with_unmatched_filter_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_json(temp_dir.path(), "annotations.json", &sample_annotations());

    let err = load_annotations_json(&path, Some("Shotput")).unwrap_err();
    assert!(matches!(err, AnnotationError::EmptyResult { .. }));
    assert!(err.to_string().contains("Shotput"));
}

#[test]
fn test_load_rejects_extra_field() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("annotations.json");
    fs::write(
        &path,
        r#"[{"filename": "v", "start_frame": 0, "end_frame": 3, "start_seconds": 0.0,
             "end_seconds": 0.1, "frames_per_second": 30.0, "category": "a",
             "confidence": 1.0}]"#,
    )
    .unwrap();

    let err = load_annotations_json(&path, None).unwrap_err();
    assert!(matches!(err, AnnotationError::Json(_)));
}

#[test]
fn test_load_rejects_non_array() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("annotations.json");
    fs::write(&path, r#"{"v": []}"#).unwrap();

    assert!(load_annotations_json(&path, None).is_err());
}

#[test]
fn test_filter_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_json(temp_dir.path(), "annotations.json", &sample_annotations());
    let store = load_annotations_json(&path, None).unwrap();

    let once = filter_annotations_by_category(&store, "CliffDiving");
    let twice = filter_annotations_by_category(&once, "CliffDiving");
    assert_eq!(once, twice);
    assert_eq!(once.len(), 2);
}

#[test]
fn test_written_store_loads_back() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_json(temp_dir.path(), "annotations.json", &sample_annotations());
    let store = load_annotations_json(&path, None).unwrap();

    let export = temp_dir.path().join("export.json");
    store.write_annotations_json(&export).unwrap();
    assert_eq!(load_annotations_json(&export, None).unwrap(), store);
}
