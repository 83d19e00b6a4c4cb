//! Overlap-Instance Counter
//!
//! Counts, per category combination, how often annotations of those categories
//! are simultaneously active.
//!
//! For each file the active set is sampled only at frames where some annotation
//! starts or ends, since composition can only change at those frames. An
//! instance is the set of `(category, start_frame, end_frame)` triples active at
//! a sampled frame and is recorded under its set of categories. Recordings are
//! not deduplicated: if the active set is unchanged between two sampled frames,
//! the same instance is counted twice.

use crate::annotation::{Annotation, FrameIndex};
use crate::store::AnnotationStore;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Unordered set of category names
pub type CategorySet = BTreeSet<String>;

/// Annotations active at one sampled frame, as `(category, start, end)` triples
pub type OverlapInstance = BTreeSet<(String, FrameIndex, FrameIndex)>;

/// Sorted, deduplicated start and end frames of the given annotations
pub fn candidate_frames(annotations: &[Annotation]) -> Vec<FrameIndex> {
    let frames: BTreeSet<FrameIndex> = annotations
        .iter()
        .flat_map(|a| [a.start_frame, a.end_frame])
        .collect();
    frames.into_iter().collect()
}

/// Instances recorded for one file, in sampled-frame order
pub fn file_overlap_instances(annotations: &[Annotation]) -> Vec<(CategorySet, OverlapInstance)> {
    let mut by_start: Vec<&Annotation> = annotations.iter().collect();
    by_start.sort_by_key(|a| (a.start_frame, a.end_frame));

    let mut next = 0;
    let mut active: Vec<&Annotation> = Vec::new();
    let mut recorded = Vec::new();

    for frame in candidate_frames(annotations) {
        while next < by_start.len() && by_start[next].start_frame <= frame {
            active.push(by_start[next]);
            next += 1;
        }
        active.retain(|a| a.end_frame >= frame);

        let category_set: CategorySet = active.iter().map(|a| a.category.clone()).collect();
        let instance: OverlapInstance = active
            .iter()
            .map(|a| (a.category.clone(), a.start_frame, a.end_frame))
            .collect();
        recorded.push((category_set, instance));
    }
    recorded
}

/// Every instance recorded across the store, grouped by category set
pub fn compute_overlap_instances(
    store: &AnnotationStore,
) -> BTreeMap<CategorySet, Vec<OverlapInstance>> {
    let mut instances: BTreeMap<CategorySet, Vec<OverlapInstance>> = BTreeMap::new();
    for (filename, annotations) in store.iter() {
        let recorded = file_overlap_instances(annotations);
        debug!(filename, recorded = recorded.len(), "Swept file for overlaps");
        for (category_set, instance) in recorded {
            instances.entry(category_set).or_default().push(instance);
        }
    }
    instances
}

/// Number of recorded instances per category set
pub fn compute_overlap_counts(store: &AnnotationStore) -> BTreeMap<CategorySet, usize> {
    compute_overlap_instances(store)
        .into_iter()
        .map(|(categories, instances)| (categories, instances.len()))
        .collect()
}
