//! Property-based tests for filtering, rasterizing and overlap counting

use annostat::overlap::{candidate_frames, file_overlap_instances};
use annostat::{
    annotations_to_frame_labels, compute_min_background_duration, compute_overlap_counts,
    filter_annotations_by_category, get_durations, Annotation, AnnotationStore, CategorySet,
};
use proptest::prelude::*;

const FILES: [&str; 3] = ["v1", "v2", "v3"];
const CATEGORIES: [&str; 3] = ["a", "b", "c"];

fn arb_annotation() -> impl Strategy<Value = Annotation> {
    (0..FILES.len(), 0i64..60, 0i64..20, 0..CATEGORIES.len()).prop_map(
        |(file, start, len, category)| Annotation {
            filename: FILES[file].to_string(),
            start_frame: start,
            end_frame: start + len,
            start_seconds: start as f64,
            end_seconds: (start + len) as f64,
            frames_per_second: 1.0,
            category: CATEGORIES[category].to_string(),
        },
    )
}

fn arb_store() -> impl Strategy<Value = AnnotationStore> {
    prop::collection::vec(arb_annotation(), 0..30).prop_map(AnnotationStore::from_annotations::<Vec<Annotation>>)
}

/// Durations are always at least one frame
#[test]
fn test_durations_positive_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&arb_store(), |store| {
            let durations = get_durations(&store);
            assert_eq!(durations.len(), store.num_annotations());
            assert!(durations.iter().all(|&d| d >= 1));
            Ok(())
        })
        .unwrap();
}

proptest! {
    #[test]
    fn filter_never_keeps_empty_files(store in arb_store(), category in 0..CATEGORIES.len()) {
        let filtered = filter_annotations_by_category(&store, CATEGORIES[category]);
        for (_, annotations) in filtered.iter() {
            prop_assert!(!annotations.is_empty());
            prop_assert!(annotations.iter().all(|a| a.category == CATEGORIES[category]));
        }
    }

    #[test]
    fn filter_is_idempotent(store in arb_store(), category in 0..CATEGORIES.len()) {
        let once = filter_annotations_by_category(&store, CATEGORIES[category]);
        let twice = filter_annotations_by_category(&once, CATEGORIES[category]);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn filters_over_all_categories_reconstruct_store(store in arb_store()) {
        let mut rebuilt: Vec<Annotation> = store
            .categories()
            .iter()
            .flat_map(|c| store.filter_by_category(c).annotations().cloned().collect::<Vec<_>>())
            .collect();
        let mut original: Vec<Annotation> = store.annotations().cloned().collect();
        let key = |a: &Annotation| (a.filename.clone(), a.start_frame, a.end_frame, a.category.clone());
        rebuilt.sort_by_key(key);
        original.sort_by_key(key);
        prop_assert_eq!(rebuilt, original);
    }

    #[test]
    fn frame_labels_match_union_of_intervals(
        store in arb_store(),
        category in 0..CATEGORIES.len(),
        num_frames in 0usize..100,
    ) {
        let filtered = store.filter_by_category(CATEGORIES[category]);
        for (_, annotations) in filtered.iter() {
            let labels = annotations_to_frame_labels(annotations, num_frames).unwrap();
            prop_assert_eq!(labels.len(), num_frames);
            for (frame, &label) in labels.iter().enumerate() {
                let covered = annotations.iter().any(|a| a.contains_frame(frame as i64));
                prop_assert_eq!(label == 1, covered);
            }
        }
    }

    #[test]
    fn min_background_bounded_by_leading_gaps(store in arb_store()) {
        let min = compute_min_background_duration(&store);
        prop_assert_eq!(min.is_none(), store.is_empty());
        if let Some(min) = min {
            for (_, annotations) in store.iter() {
                let first_start = annotations.iter().map(|a| a.start_frame).min().unwrap();
                prop_assert!(min <= first_start);
            }
        }
    }

    #[test]
    fn overlap_counts_total_candidate_frames(store in arb_store()) {
        let counts = compute_overlap_counts(&store);
        let total: usize = counts.values().sum();
        let candidates: usize = store.iter().map(|(_, a)| candidate_frames(a).len()).sum();
        prop_assert_eq!(total, candidates);
        prop_assert!(counts.keys().all(|categories| !categories.is_empty()));
    }

    #[test]
    fn overlap_instances_match_brute_force(store in arb_store()) {
        for (_, annotations) in store.iter() {
            let recorded = file_overlap_instances(annotations);
            for ((categories, instance), frame) in recorded.iter().zip(candidate_frames(annotations)) {
                let active: Vec<&Annotation> =
                    annotations.iter().filter(|a| a.contains_frame(frame)).collect();
                prop_assert_eq!(instance.len(), {
                    let mut triples: Vec<_> = active
                        .iter()
                        .map(|a| (a.category.clone(), a.start_frame, a.end_frame))
                        .collect();
                    triples.sort();
                    triples.dedup();
                    triples.len()
                });
                let active_categories: CategorySet =
                    active.iter().map(|a| a.category.clone()).collect();
                prop_assert_eq!(categories, &active_categories);
                prop_assert!(active.iter().all(|a| instance.contains(&(a.category.clone(), a.start_frame, a.end_frame))));
            }
        }
    }
}
