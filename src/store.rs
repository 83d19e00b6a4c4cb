//! Annotation Store
//!
//! Groups annotations by source filename. A store is built once by a load
//! operation and treated as read-only afterwards; filtering produces a new store.

use crate::annotation::Annotation;
use crate::error::{AnnotationError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Mapping from filename to the annotations of that file
///
/// Files iterate in sorted filename order. Within a file, annotations keep
/// their insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationStore {
    files: BTreeMap<String, Vec<Annotation>>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group a flat sequence of annotations by filename
    pub fn from_annotations<I>(annotations: I) -> Self
    where
        I: IntoIterator<Item = Annotation>,
    {
        let mut files: BTreeMap<String, Vec<Annotation>> = BTreeMap::new();
        for annotation in annotations {
            files
                .entry(annotation.filename.clone())
                .or_default()
                .push(annotation);
        }
        AnnotationStore { files }
    }

    /// Parse a JSON array of annotation objects
    ///
    /// When `filter_category` is given, only annotations of that category are
    /// kept, and an empty result is an error.
    pub fn from_json_str(json: &str, filter_category: Option<&str>) -> Result<Self> {
        let annotations: Vec<Annotation> = serde_json::from_str(json)?;
        Self::from_loaded(annotations, filter_category)
    }

    /// Same as [`AnnotationStore::from_json_str`], reading from `reader`
    pub fn from_reader<R: Read>(reader: R, filter_category: Option<&str>) -> Result<Self> {
        let annotations: Vec<Annotation> = serde_json::from_reader(reader)?;
        Self::from_loaded(annotations, filter_category)
    }

    fn from_loaded(annotations: Vec<Annotation>, filter_category: Option<&str>) -> Result<Self> {
        let num_loaded = annotations.len();
        let store = Self::from_annotations(annotations);
        debug!(
            annotations = num_loaded,
            files = store.len(),
            "Grouped annotations by filename"
        );

        match filter_category {
            None => Ok(store),
            Some(category) => store.require_category(category),
        }
    }

    /// Like [`AnnotationStore::filter_by_category`], but an empty result is
    /// [`AnnotationError::EmptyResult`]
    pub fn require_category(&self, category: &str) -> Result<AnnotationStore> {
        let filtered = self.filter_by_category(category);
        if filtered.is_empty() {
            return Err(AnnotationError::EmptyResult {
                category: category.to_string(),
            });
        }
        Ok(filtered)
    }

    /// Keep only annotations whose category equals `category`
    ///
    /// Files left without annotations are dropped rather than kept as empty lists.
    pub fn filter_by_category(&self, category: &str) -> AnnotationStore {
        let files = self
            .files
            .iter()
            .filter_map(|(filename, annotations)| {
                let filtered: Vec<Annotation> = annotations
                    .iter()
                    .filter(|a| a.category == category)
                    .cloned()
                    .collect();
                if filtered.is_empty() {
                    None
                } else {
                    Some((filename.clone(), filtered))
                }
            })
            .collect();
        AnnotationStore { files }
    }

    /// Annotations for one file, in insertion order
    pub fn get(&self, filename: &str) -> Option<&[Annotation]> {
        self.files.get(filename).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Annotation])> {
        self.files
            .iter()
            .map(|(filename, annotations)| (filename.as_str(), annotations.as_slice()))
    }

    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// All annotations, file-then-annotation order
    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.files.values().flatten()
    }

    /// Number of files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn num_annotations(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    /// Distinct categories, sorted
    pub fn categories(&self) -> Vec<String> {
        let categories: BTreeSet<&str> =
            self.annotations().map(|a| a.category.as_str()).collect();
        categories.into_iter().map(str::to_string).collect()
    }

    /// Serialize as a flat JSON array, the format [`load_annotations_json`] reads
    pub fn to_json_string(&self) -> Result<String> {
        let flat: Vec<&Annotation> = self.annotations().collect();
        Ok(serde_json::to_string_pretty(&flat)?)
    }

    pub fn write_annotations_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json_string()?;
        fs::write(path, json).map_err(|e| AnnotationError::io(path, e))?;
        info!(
            path = %path.display(),
            files = self.len(),
            annotations = self.num_annotations(),
            "Wrote annotations"
        );
        Ok(())
    }
}

/// Load annotations from a JSON file into a store
///
/// The file holds a JSON array of objects with exactly the seven annotation
/// fields. With `filter_category`, fails with [`AnnotationError::EmptyResult`]
/// if no file has an annotation of that category.
pub fn load_annotations_json(
    path: &Path,
    filter_category: Option<&str>,
) -> Result<AnnotationStore> {
    let file = fs::File::open(path).map_err(|e| AnnotationError::io(path, e))?;
    let store = AnnotationStore::from_reader(std::io::BufReader::new(file), filter_category)?;
    info!(
        path = %path.display(),
        files = store.len(),
        annotations = store.num_annotations(),
        filter_category = filter_category.unwrap_or("-"),
        "Loaded annotations"
    );
    Ok(store)
}

/// Restrict a store to one category. See [`AnnotationStore::filter_by_category`].
pub fn filter_annotations_by_category(store: &AnnotationStore, category: &str) -> AnnotationStore {
    store.filter_by_category(category)
}
