//! Selection sort: scan the unsorted suffix for its minimum, swap it to the
//! front of the suffix.

use crate::animation::{Renderer, Scheduler, StepKind};
use crate::bars::{Bar, SlotColor};

use super::Stage;

/// Sort the stage's bars in place.
pub async fn sort<T: Bar, R: Renderer, S: Scheduler>(stage: &mut Stage<'_, T, R, S>) {
    let n = stage.len();
    for i in 0..n {
        let mut min = i;
        // With nothing left to scan the candidate color would be replaced
        // before the next pause.
        if i + 1 < n {
            stage.paint(StepKind::Mark, &[i], SlotColor::Minimum);
        }

        for j in i + 1..n {
            stage.paint(StepKind::Compare, &[j], SlotColor::Comparing);
            stage.pause().await;

            if stage.at(j) < stage.at(min) {
                if min != i {
                    stage.paint(StepKind::Mark, &[min], SlotColor::Default);
                }
                min = j;
                stage.paint(StepKind::Mark, &[min], SlotColor::Minimum);
            } else {
                stage.paint(StepKind::Mark, &[j], SlotColor::Default);
            }
        }

        stage.exchange(
            i,
            min,
            Some(SlotColor::Sorted),
            Some(SlotColor::Default),
        );
        stage.pause().await;
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{run_engine, run_u32, tagged};
    use super::super::Algorithm;
    use crate::animation::StepKind;
    use crate::bars::SlotColor;

    #[test]
    fn sorts_and_marks_prefix() {
        let run = run_u32(Algorithm::Selection, &[64, 25, 12, 22, 11]);
        assert_eq!(run.values, vec![11, 12, 22, 25, 64]);
        assert!(run.slots.all_sorted());
    }

    #[test]
    fn one_swap_at_most_per_position() {
        let run = run_u32(Algorithm::Selection, &[5, 4, 3, 2, 1]);
        assert_eq!(run.values, vec![1, 2, 3, 4, 5]);
        // 5<->1, 4<->2, then 3 is already in place.
        assert_eq!(run.stats.swaps, 2);
        assert_eq!(run.stats.compares, 10);
    }

    #[test]
    fn previous_minimum_is_cleared_on_improvement() {
        let run = run_u32(Algorithm::Selection, &[9, 5, 1]);
        // Pass 0: candidate 0, scan 1 (new min), scan 2 (new min).
        let first_pass: Vec<(StepKind, Vec<usize>, SlotColor)> = run.steps[..7]
            .iter()
            .map(|s| (s.kind, s.indices().collect(), s.changes[0].color))
            .collect();
        assert_eq!(
            first_pass,
            vec![
                (StepKind::Mark, vec![0], SlotColor::Minimum),
                (StepKind::Compare, vec![1], SlotColor::Comparing),
                (StepKind::Mark, vec![1], SlotColor::Minimum),
                (StepKind::Compare, vec![2], SlotColor::Comparing),
                (StepKind::Mark, vec![1], SlotColor::Default),
                (StepKind::Mark, vec![2], SlotColor::Minimum),
                (StepKind::Swap, vec![2, 0], SlotColor::Default),
            ]
        );
    }

    #[test]
    fn self_swap_is_not_a_swap() {
        let run = run_u32(Algorithm::Selection, &[1, 2, 3]);
        assert_eq!(run.stats.swaps, 0);
        assert_eq!(run.values, vec![1, 2, 3]);
        assert!(run.slots.all_sorted());
    }

    #[test]
    fn may_reorder_equal_values() {
        let run = run_engine(Algorithm::Selection, tagged(&[2, 2, 1]));
        let tags: Vec<usize> = run.values.iter().map(|t| t.tag).collect();
        // The first 2 is swapped past the second.
        assert_eq!(tags, vec![2, 1, 0]);
    }
}
