//! Frame-Label Rasterizer
//!
//! Converts the annotations of one file and one category into a dense binary
//! indicator vector over frame indices.

use crate::annotation::Annotation;
use crate::error::{AnnotationError, Result};

/// Binary per-frame labels: `labels[i]` is 1 if frame `i` is inside any annotation
///
/// All annotations must share one filename and one category, otherwise this
/// fails with [`AnnotationError::MixedFilename`] or
/// [`AnnotationError::MixedCategory`]. Overlapping annotations OR together.
/// Frame ranges are clamped to `[0, num_frames)`.
pub fn annotations_to_frame_labels(
    annotations: &[Annotation],
    num_frames: usize,
) -> Result<Vec<u8>> {
    if let Some(first) = annotations.first() {
        if annotations.iter().any(|a| a.filename != first.filename) {
            return Err(AnnotationError::MixedFilename);
        }
        if annotations.iter().any(|a| a.category != first.category) {
            return Err(AnnotationError::MixedCategory);
        }
    }

    let mut labels = vec![0u8; num_frames];
    for annotation in annotations {
        let start = clamp_frame(annotation.start_frame, num_frames);
        let end = clamp_frame(annotation.end_frame.saturating_add(1), num_frames);
        if start < end {
            labels[start..end].fill(1);
        }
    }
    Ok(labels)
}

fn clamp_frame(frame: i64, num_frames: usize) -> usize {
    usize::try_from(frame.max(0)).map_or(num_frames, |f| f.min(num_frames))
}
