//! Category Prior Estimator
//!
//! P(category) as the fraction of all dataset frames covered by an annotation
//! of that category.

use crate::error::{AnnotationError, Result};
use crate::labels::annotations_to_frame_labels;
use crate::store::AnnotationStore;
use std::collections::HashMap;
use tracing::debug;

/// Compute the prior for each category in `class_list`, positionally aligned
///
/// `frame_counts` maps every filename to its total frame count and is the
/// authoritative video length. The denominator is the sum over all entries of
/// `frame_counts`, not only the files that contain the category. A category
/// with no annotations gets a prior of 0.
pub fn compute_priors(
    store: &AnnotationStore,
    class_list: &[String],
    frame_counts: &HashMap<String, usize>,
) -> Result<Vec<f64>> {
    let num_total_frames: usize = frame_counts.values().sum();
    if num_total_frames == 0 {
        return Err(AnnotationError::NoFrames);
    }

    let mut priors = Vec::with_capacity(class_list.len());
    for category in class_list {
        let category_store = store.filter_by_category(category);
        let mut num_category_frames = 0usize;
        for (filename, annotations) in category_store.iter() {
            let num_frames = frame_counts.get(filename).copied().ok_or_else(|| {
                AnnotationError::UnknownFilename {
                    filename: filename.to_string(),
                    table: "frame counts",
                }
            })?;
            let labels = annotations_to_frame_labels(annotations, num_frames)?;
            num_category_frames += labels.iter().map(|&l| l as usize).sum::<usize>();
        }

        let prior = num_category_frames as f64 / num_total_frames as f64;
        debug!(
            category = category.as_str(),
            frames = num_category_frames,
            prior,
            "Computed category prior"
        );
        priors.push(prior);
    }
    Ok(priors)
}
