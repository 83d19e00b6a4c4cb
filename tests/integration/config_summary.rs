//! Integration tests for loading a dataset from its config file and summarizing it

use super::test_utils::{sample_annotations, write_json};
use annostat::config::ConfigLoader;
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_summarize_configured_dataset() {
    let temp_dir = TempDir::new().unwrap();
    write_json(temp_dir.path(), "train.json", &sample_annotations());
    write_json(
        temp_dir.path(),
        "frames.json",
        &HashMap::from([
            ("video_validation_0000051", 20usize),
            ("video_validation_0000052", 20usize),
        ]),
    );
    let config_file = temp_dir.path().join("dataset.toml");
    fs::write(
        &config_file,
        r#"
annotations = "train.json"
frame_counts = "frames.json"
class_list = ["CliffDiving", "Diving"]
"#,
    )
    .unwrap();

    let config = ConfigLoader::load(&config_file).unwrap();
    let summary = config.summarize().unwrap();

    assert_eq!(summary.num_files, 2);
    assert_eq!(summary.num_annotations, 4);
    assert_eq!(summary.min_background_duration, Some(-1));
    let priors = summary.priors.as_ref().unwrap();
    assert!((priors["Diving"] - 0.325).abs() < 1e-12);
    assert_eq!(summary.overlap_count(&["CliffDiving", "Diving"]), Some(2));

    let json: serde_json::Value = serde_json::from_str(&summary.to_json_string().unwrap()).unwrap();
    assert_eq!(json["category_counts"]["Diving"], 2);
}

#[test]
fn test_configured_filter_category() {
    let temp_dir = TempDir::new().unwrap();
    write_json(temp_dir.path(), "train.json", &sample_annotations());
    let config_file = temp_dir.path().join("dataset.toml");
    fs::write(
        &config_file,
        "annotations = \"train.json\"\nfilter_category = \"CliffDiving\"\n",
    )
    .unwrap();

    let config = ConfigLoader::load(&config_file).unwrap();
    let store = config.load_store().unwrap();
    assert_eq!(store.num_annotations(), 2);
    assert!(config.load_frame_counts().unwrap().is_none());

    let summary = config.summarize().unwrap();
    assert!(summary.priors.is_none());
    assert_eq!(summary.category_counts.len(), 1);
}
