//! Annostat: Temporal Action Annotation Statistics
//!
//! Loads temporal action annotations for video datasets ("action X occurs from
//! frame 10 to frame 50 in video V"), groups them by video, and computes the
//! statistics used to prepare training data and evaluation baselines:
//! durations, background gaps, per-frame labels, category priors and
//! category overlap counts. Everything operates on an in-memory store.

pub mod annotation;
pub mod config;
pub mod error;
pub mod labels;
pub mod logging;
pub mod overlap;
pub mod parsing;
pub mod priors;
pub mod stats;
pub mod store;
pub mod summary;

pub use annotation::{Annotation, FrameIndex};
pub use error::{AnnotationError, Result};
pub use labels::annotations_to_frame_labels;
pub use overlap::{compute_overlap_counts, CategorySet, OverlapInstance};
pub use priors::compute_priors;
pub use stats::{compute_duration_mean_std, compute_min_background_duration, get_durations};
pub use store::{filter_annotations_by_category, load_annotations_json, AnnotationStore};
pub use summary::{DatasetSummary, OverlapCount};
