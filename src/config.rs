//! Configuration System
//!
//! Describes one annotated dataset: where its annotation, frame-rate and
//! frame-count files live, the ordered class list, and logging settings.
//! Annotations come either from one JSON file or from raw per-category text
//! files converted to frames through the frame-rate table.
//! Layered with the `config` crate: defaults, then the dataset TOML file, then
//! `ANNOSTAT_*` environment variables.

use crate::error::{AnnotationError, Result};
use crate::logging::LoggingConfig;
use crate::parsing;
use crate::store::{load_annotations_json, AnnotationStore};
use crate::summary::DatasetSummary;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;

mod merge;
mod sources;

pub use sources::environment::ENV_PREFIX;

/// One raw annotation text file and the category its lines belong to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnnotationSource {
    pub category: String,
    pub path: PathBuf,
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// JSON annotation file
    #[serde(default)]
    pub annotations: Option<PathBuf>,

    /// Raw text annotation files, used instead of `annotations`
    #[serde(default)]
    pub text_annotations: Vec<TextAnnotationSource>,

    /// Frame-rate CSV, `<filename>,<fps>,...`. Required with `text_annotations`.
    #[serde(default)]
    pub fps_table: Option<PathBuf>,

    /// JSON object mapping filename to total frame count
    #[serde(default)]
    pub frame_counts: Option<PathBuf>,

    /// Ordered category names
    #[serde(default)]
    pub class_list: Vec<String>,

    /// Restrict loading to one category
    #[serde(default)]
    pub filter_category: Option<String>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Annotations(String),
    TextAnnotations(String),
    FpsTable(String),
    ClassList(String),
    FilterCategory(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Annotations(msg) => write!(f, "annotations: {}", msg),
            ValidationError::TextAnnotations(msg) => write!(f, "text_annotations: {}", msg),
            ValidationError::FpsTable(msg) => write!(f, "fps_table: {}", msg),
            ValidationError::ClassList(msg) => write!(f, "class_list: {}", msg),
            ValidationError::FilterCategory(msg) => write!(f, "filter_category: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl DatasetConfig {
    /// Validate the entire configuration, collecting every problem
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        match (&self.annotations, self.text_annotations.is_empty()) {
            (None, true) => errors.push(ValidationError::Annotations(
                "either annotations or text_annotations must be set".to_string(),
            )),
            (Some(_), false) => errors.push(ValidationError::Annotations(
                "cannot be combined with text_annotations".to_string(),
            )),
            (Some(path), true) if path.as_os_str().is_empty() => errors.push(
                ValidationError::Annotations("path cannot be empty".to_string()),
            ),
            _ => {}
        }

        let mut text_categories = HashSet::new();
        for source in &self.text_annotations {
            if source.category.is_empty() {
                errors.push(ValidationError::TextAnnotations(
                    "category cannot be empty".to_string(),
                ));
            } else if !text_categories.insert(source.category.as_str()) {
                errors.push(ValidationError::TextAnnotations(format!(
                    "duplicate category '{}'",
                    source.category
                )));
            }
            if source.path.as_os_str().is_empty() {
                errors.push(ValidationError::TextAnnotations(
                    "path cannot be empty".to_string(),
                ));
            }
        }
        if !self.text_annotations.is_empty() && self.fps_table.is_none() {
            errors.push(ValidationError::FpsTable(
                "required to convert text_annotations to frames".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for class in &self.class_list {
            if class.is_empty() {
                errors.push(ValidationError::ClassList(
                    "class names cannot be empty".to_string(),
                ));
            } else if !seen.insert(class.as_str()) {
                errors.push(ValidationError::ClassList(format!(
                    "duplicate class '{}'",
                    class
                )));
            }
        }

        if let Some(category) = &self.filter_category {
            if !self.class_list.is_empty() && !self.class_list.contains(category) {
                errors.push(ValidationError::FilterCategory(format!(
                    "'{}' is not in class_list",
                    category
                )));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Resolve relative paths against `base`
    pub fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        if let Some(path) = self.annotations.as_mut() {
            resolve(path);
        }
        for source in &mut self.text_annotations {
            resolve(&mut source.path);
        }
        if let Some(path) = self.fps_table.as_mut() {
            resolve(path);
        }
        if let Some(path) = self.frame_counts.as_mut() {
            resolve(path);
        }
    }

    /// Load the annotation store, applying `filter_category`
    ///
    /// Reads the JSON annotation file when set, otherwise parses every text
    /// source with the frame-rate table.
    pub fn load_store(&self) -> Result<AnnotationStore> {
        if let Some(path) = &self.annotations {
            return load_annotations_json(path, self.filter_category.as_deref());
        }

        let video_fps = self.load_fps_table()?.ok_or_else(|| {
            AnnotationError::Config("text_annotations require fps_table".to_string())
        })?;
        let files: Vec<(String, PathBuf)> = self
            .text_annotations
            .iter()
            .map(|source| (source.category.clone(), source.path.clone()))
            .collect();
        let store = parsing::load_text_annotations(&files, &video_fps)?;
        match &self.filter_category {
            Some(category) => store.require_category(category),
            None => Ok(store),
        }
    }

    pub fn load_fps_table(&self) -> Result<Option<HashMap<String, f64>>> {
        self.fps_table
            .as_deref()
            .map(parsing::parse_video_fps_file)
            .transpose()
    }

    pub fn load_frame_counts(&self) -> Result<Option<HashMap<String, usize>>> {
        self.frame_counts
            .as_deref()
            .map(parsing::load_frame_counts)
            .transpose()
    }

    /// Load the dataset and compute its summary
    pub fn summarize(&self) -> Result<DatasetSummary> {
        let store = self.load_store()?;
        let frame_counts = self.load_frame_counts()?;
        DatasetSummary::compute(&store, &self.class_list, frame_counts.as_ref())
    }
}

/// Loads a [`DatasetConfig`] from its layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load, resolve relative paths against the config file's directory, and validate
    pub fn load(config_path: &Path) -> Result<DatasetConfig> {
        let builder = merge::builder_with_defaults()?;
        let builder = sources::dataset_file::add_to_builder(builder, config_path)?;
        let builder = sources::environment::add_to_builder(builder);
        let mut config: DatasetConfig = builder.build()?.try_deserialize()?;

        if let Some(base) = config_path.parent() {
            config.resolve_paths(base);
        }

        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            AnnotationError::Config(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;

        debug!(
            config_path = %config_path.display(),
            annotations = ?config.annotations,
            text_sources = config.text_annotations.len(),
            classes = config.class_list.len(),
            "Loaded dataset config"
        );
        Ok(config)
    }
}
