//! Duration and background-gap statistics over an annotation store.

use crate::annotation::{Annotation, FrameIndex};
use crate::error::{AnnotationError, Result};
use crate::store::AnnotationStore;
use tracing::debug;

/// Durations (in frames) of every annotation, file-then-annotation order
///
/// No category filtering happens here; filter the store first if needed.
pub fn get_durations(store: &AnnotationStore) -> Vec<FrameIndex> {
    store.annotations().map(Annotation::duration).collect()
}

/// Mean and population standard deviation of annotation durations
pub fn compute_duration_mean_std(store: &AnnotationStore) -> Result<(f64, f64)> {
    let durations = get_durations(store);
    if durations.is_empty() {
        return Err(AnnotationError::EmptyStore);
    }

    let n = durations.len() as f64;
    let mean = durations.iter().map(|&d| d as f64).sum::<f64>() / n;
    let variance = durations
        .iter()
        .map(|&d| {
            let delta = d as f64 - mean;
            delta * delta
        })
        .sum::<f64>()
        / n;
    Ok((mean, variance.sqrt()))
}

/// Minimum background duration (in frames) between annotations
///
/// Per file, annotations are sorted by `(start_frame, end_frame)`. Candidates
/// are the leading gap (the first annotation's `start_frame`) and
/// `next.start_frame - previous.end_frame` for every adjacent pair; the latter
/// goes to zero or below when annotations touch or overlap and is not clamped.
///
/// NOTE: (Boundary effects) the background after the last annotation of a file
/// is not considered, since annotations do not carry the video length.
///
/// Returns `None` for an empty store.
pub fn compute_min_background_duration(store: &AnnotationStore) -> Option<FrameIndex> {
    store
        .iter()
        .filter_map(|(filename, annotations)| {
            let file_min = file_min_background_duration(annotations);
            debug!(filename, min_background = ?file_min, "Computed file background gap");
            file_min
        })
        .min()
}

fn file_min_background_duration(annotations: &[Annotation]) -> Option<FrameIndex> {
    let mut sorted: Vec<&Annotation> = annotations.iter().collect();
    sorted.sort_by_key(|a| (a.start_frame, a.end_frame));

    let leading = sorted.first()?.start_frame;
    let min = sorted
        .windows(2)
        .map(|pair| pair[1].start_frame.saturating_sub(pair[0].end_frame))
        .fold(leading, FrameIndex::min);
    Some(min)
}
