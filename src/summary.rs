//! Dataset Summary
//!
//! Collects the statistics of a store into one serializable report.

use crate::annotation::FrameIndex;
use crate::error::Result;
use crate::overlap::compute_overlap_counts;
use crate::priors::compute_priors;
use crate::stats::{compute_duration_mean_std, compute_min_background_duration};
use crate::store::AnnotationStore;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::info;

/// Duration mean and population standard deviation, in frames
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationSummary {
    pub mean: f64,
    pub std: f64,
}

/// Recorded overlap instances for one category set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlapCount {
    /// Sorted category names
    pub categories: Vec<String>,
    pub count: usize,
}

/// Summary statistics for one annotation store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub num_files: usize,
    pub num_annotations: usize,
    /// Annotation count per category
    pub category_counts: BTreeMap<String, usize>,
    /// `None` when the store has no annotations
    pub durations: Option<DurationSummary>,
    pub min_background_duration: Option<FrameIndex>,
    /// Category to prior, present when frame counts were given
    pub priors: Option<BTreeMap<String, f64>>,
    /// Overlap counts, sorted by category set
    pub overlap_counts: Vec<OverlapCount>,
}

impl DatasetSummary {
    /// Compute every statistic over `store`
    ///
    /// Priors are computed over `class_list` when `frame_counts` is given; an
    /// empty `class_list` falls back to the categories present in the store.
    pub fn compute(
        store: &AnnotationStore,
        class_list: &[String],
        frame_counts: Option<&HashMap<String, usize>>,
    ) -> Result<Self> {
        let mut category_counts = BTreeMap::new();
        for annotation in store.annotations() {
            *category_counts
                .entry(annotation.category.clone())
                .or_insert(0) += 1;
        }

        let durations = if store.num_annotations() == 0 {
            None
        } else {
            let (mean, std) = compute_duration_mean_std(store)?;
            Some(DurationSummary { mean, std })
        };

        let priors = match frame_counts {
            Some(frame_counts) => {
                let classes = if class_list.is_empty() {
                    store.categories()
                } else {
                    class_list.to_vec()
                };
                let values = compute_priors(store, &classes, frame_counts)?;
                Some(classes.into_iter().zip(values).collect())
            }
            None => None,
        };

        let overlap_counts = compute_overlap_counts(store)
            .into_iter()
            .map(|(categories, count)| OverlapCount {
                categories: categories.into_iter().collect(),
                count,
            })
            .collect();

        let summary = DatasetSummary {
            num_files: store.len(),
            num_annotations: store.num_annotations(),
            category_counts,
            durations,
            min_background_duration: compute_min_background_duration(store),
            priors,
            overlap_counts,
        };
        info!(
            files = summary.num_files,
            annotations = summary.num_annotations,
            categories = summary.category_counts.len(),
            "Computed dataset summary"
        );
        Ok(summary)
    }

    /// Overlap count for exactly the given categories, in any order
    pub fn overlap_count(&self, categories: &[&str]) -> Option<usize> {
        let mut wanted: Vec<&str> = categories.to_vec();
        wanted.sort_unstable();
        wanted.dedup();
        self.overlap_counts
            .iter()
            .find(|entry| entry.categories.iter().map(String::as_str).eq(wanted.iter().copied()))
            .map(|entry| entry.count)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
