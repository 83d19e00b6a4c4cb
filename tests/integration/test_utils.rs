//! Shared fixtures for integration tests

use annostat::Annotation;
use std::fs;
use std::path::{Path, PathBuf};

pub fn annotation(filename: &str, start: i64, end: i64, category: &str) -> Annotation {
    Annotation {
        filename: filename.to_string(),
        start_frame: start,
        end_frame: end,
        start_seconds: start as f64 / 30.0,
        end_seconds: end as f64 / 30.0,
        frames_per_second: 30.0,
        category: category.to_string(),
    }
}

/// Small two-video dataset with overlapping categories
pub fn sample_annotations() -> Vec<Annotation> {
    vec![
        annotation("video_validation_0000051", 0, 2, "CliffDiving"),
        annotation("video_validation_0000051", 1, 3, "Diving"),
        annotation("video_validation_0000051", 10, 19, "Diving"),
        annotation("video_validation_0000052", 4, 8, "CliffDiving"),
    ]
}

pub fn write_json(dir: &Path, name: &str, value: &impl serde::Serialize) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
    path
}
