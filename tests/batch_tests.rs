//! Batch planning tests

use ish_metadata_sdk::{BatchError, BatchPlanner, chunk};
use std::num::NonZeroUsize;

mod chunk_tests {
    use super::*;

    fn ids(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("GUID-{i:04}")).collect()
    }

    #[test]
    fn test_250_items_in_batches_of_100() {
        let items = ids(250);
        let chunks = chunk(&items, NonZeroUsize::new(100).unwrap());

        let sizes: Vec<usize> = chunks.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![100, 100, 50]);
        assert_eq!(chunks.concat(), items);
    }

    #[test]
    fn test_chunks_cover_input_for_every_size() {
        let items = ids(37);
        for size in 1..=40 {
            let planner = BatchPlanner::new(size).unwrap();
            let chunks = planner.plan(&items);

            assert_eq!(chunks.len(), planner.chunk_count(items.len()));
            assert!(chunks.iter().all(|c| !c.is_empty() && c.len() <= size));
            assert_eq!(chunks.concat(), items);
        }
    }

    #[test]
    fn test_single_item_batches() {
        let chunks = chunk(&["a", "b"], NonZeroUsize::new(1).unwrap());
        assert_eq!(chunks, vec![vec!["a"], vec!["b"]]);
    }
}

mod planner_tests {
    use super::*;

    #[test]
    fn test_invalid_batch_size() {
        let err = BatchPlanner::new(0).unwrap_err();
        assert_eq!(err, BatchError::InvalidBatchSize(0));
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn test_dispatch_reassembles_in_order() {
        let planner = BatchPlanner::new(100).unwrap();
        let items: Vec<u32> = (0..250).collect();
        let mut calls = Vec::new();

        let results: Result<Vec<u32>, String> = planner.dispatch(&items, |index, batch| {
            calls.push((index, batch.len()));
            Ok(batch.iter().map(|n| n * 2).collect())
        });

        assert_eq!(calls, vec![(0, 100), (1, 100), (2, 50)]);
        let expected: Vec<u32> = items.iter().map(|n| n * 2).collect();
        assert_eq!(results.unwrap(), expected);
    }

    #[test]
    fn test_dispatch_empty_input_makes_no_calls() {
        let planner = BatchPlanner::new(10).unwrap();
        let mut called = false;
        let results: Result<Vec<()>, String> = planner.dispatch(&[] as &[u8], |_, _| {
            called = true;
            Ok(Vec::new())
        });

        assert_eq!(results, Ok(Vec::new()));
        assert!(!called);
    }
}
