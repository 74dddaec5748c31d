//! Quick sort with a Lomuto partition around the last element.
//!
//! Each partition leaves the pivot at its final index and marks it sorted.
//! Ranges that shrink to one slot (or to nothing) are marked directly when
//! their low index is inside the array.

use crate::animation::{Renderer, Scheduler, StepKind};
use crate::bars::{Bar, SlotColor};

use super::Stage;

/// Sort the stage's bars in place.
pub async fn sort<T: Bar, R: Renderer, S: Scheduler>(stage: &mut Stage<'_, T, R, S>) {
    let last = stage.len() as isize - 1;
    sort_range(stage, 0, last).await;
}

async fn sort_range<T: Bar, R: Renderer, S: Scheduler>(
    stage: &mut Stage<'_, T, R, S>,
    low: isize,
    high: isize,
) {
    if low < high {
        let pivot = partition(stage, low as usize, high as usize).await as isize;
        Box::pin(sort_range(stage, low, pivot - 1)).await;
        Box::pin(sort_range(stage, pivot + 1, high)).await;
    } else {
        stage.mark_sorted_at(low);
    }
}

/// Partition `low..=high`, returning the pivot's final index.
async fn partition<T: Bar, R: Renderer, S: Scheduler>(
    stage: &mut Stage<'_, T, R, S>,
    low: usize,
    high: usize,
) -> usize {
    let pivot = stage.at(high);
    stage.paint(StepKind::Mark, &[high], SlotColor::Pivot);

    // Next slot to receive an element smaller than the pivot.
    let mut boundary = low;
    for j in low..high {
        stage.paint(StepKind::Compare, &[j], SlotColor::Comparing);
        stage.pause().await;

        if stage.at(j) < pivot {
            stage.exchange(boundary, j, Some(SlotColor::Exchanged), None);
            stage.pause().await;
            stage.paint(StepKind::Mark, &[boundary], SlotColor::Default);
            boundary += 1;
        }
        stage.paint(StepKind::Mark, &[j], SlotColor::Default);
    }

    stage.exchange(
        boundary,
        high,
        Some(SlotColor::Sorted),
        Some(SlotColor::Default),
    );
    stage.pause().await;
    boundary
}

#[cfg(test)]
mod tests {
    use super::super::testing::{run_engine, run_u32, tagged};
    use super::super::Algorithm;
    use crate::animation::StepKind;
    use crate::bars::SlotColor;

    #[test]
    fn single_element_has_no_partition_side_effects() {
        let run = run_u32(Algorithm::Quick, &[1]);
        assert_eq!(run.steps.len(), 1);
        assert!(run.steps[0].is_finalize());
        assert_eq!(run.stats.compares, 0);
        assert_eq!(run.stats.suspensions, 0);
        assert_eq!(run.values, vec![1]);
    }

    #[test]
    fn sorts_and_places_every_pivot() {
        let run = run_u32(Algorithm::Quick, &[10, 80, 30, 90, 40, 50, 70]);
        assert_eq!(run.values, vec![10, 30, 40, 50, 70, 80, 90]);
        assert!(run.slots.all_sorted());
    }

    #[test]
    fn first_partition_uses_last_element() {
        let run = run_u32(Algorithm::Quick, &[3, 1, 2]);
        let first = &run.steps[0];
        assert_eq!(first.kind, StepKind::Mark);
        assert_eq!(first.changes[0].index, 2);
        assert_eq!(first.changes[0].color, SlotColor::Pivot);
        assert_eq!(run.values, vec![1, 2, 3]);
    }

    #[test]
    fn sorted_distinct_input_never_swaps() {
        let run = run_u32(Algorithm::Quick, &[1, 2, 3, 4, 5, 6]);
        assert_eq!(run.stats.swaps, 0);
        assert_eq!(run.values, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn sorted_input_with_duplicates_never_swaps() {
        let run = run_u32(Algorithm::Quick, &[1, 2, 2]);
        assert_eq!(run.values, vec![1, 2, 2]);
        assert_eq!(run.stats.swaps, 0);
        assert_eq!(run.stats.overwrites, 1);
    }

    #[test]
    fn equal_pivot_exchange_still_moves_bars() {
        // The pivot (tag 2) trades places with its equal neighbor (tag 1).
        let run = run_engine(Algorithm::Quick, tagged(&[1, 2, 2]));
        let tags: Vec<usize> = run.values.iter().map(|t| t.tag).collect();
        assert_eq!(tags, vec![0, 2, 1]);
        let last = run.steps.iter().rfind(|s| s.kind == StepKind::Overwrite);
        let heights: Vec<Option<u32>> =
            last.unwrap().changes.iter().map(|c| c.height).collect();
        assert_eq!(heights, vec![Some(2), Some(2)]);
        assert_eq!(run.stats.swaps, 0);
    }

    #[test]
    fn empty_subranges_are_guarded() {
        // The first pivot is the maximum, so the right recursion is (3, 2).
        let run = run_u32(Algorithm::Quick, &[2, 1, 3]);
        assert_eq!(run.values, vec![1, 2, 3]);
        assert!(run.stats.skipped > 0);
    }
}
