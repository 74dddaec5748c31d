//! Merge sort: halve recursively, then merge the sorted halves through
//! temporary left/right buffers.
//!
//! Ties take the left element first, which is what makes the sort stable.
//! Ranges are inclusive and signed so the empty array (`0..=-1`) falls into
//! the base case like any other single-slot range.

use crate::animation::{Renderer, Scheduler, StepKind};
use crate::bars::{Bar, SlotColor};

use super::{Edit, Stage};

/// Sort the stage's bars in place.
pub async fn sort<T: Bar, R: Renderer, S: Scheduler>(stage: &mut Stage<'_, T, R, S>) {
    let last = stage.len() as isize - 1;
    sort_range(stage, 0, last).await;
}

async fn sort_range<T: Bar, R: Renderer, S: Scheduler>(
    stage: &mut Stage<'_, T, R, S>,
    left: isize,
    right: isize,
) {
    if left >= right {
        stage.mark_sorted_at(left);
        return;
    }
    let mid = left + (right - left) / 2;
    Box::pin(sort_range(stage, left, mid)).await;
    Box::pin(sort_range(stage, mid + 1, right)).await;
    merge(stage, left as usize, mid as usize, right as usize).await;
}

async fn merge<T: Bar, R: Renderer, S: Scheduler>(
    stage: &mut Stage<'_, T, R, S>,
    left: usize,
    mid: usize,
    right: usize,
) {
    let lhs = stage.copy_range(left, mid);
    let rhs = stage.copy_range(mid + 1, right);

    let (mut i, mut j, mut k) = (0, 0, left);
    while i < lhs.len() && j < rhs.len() {
        stage.paint(
            StepKind::Compare,
            &[left + i, mid + 1 + j],
            SlotColor::Comparing,
        );
        stage.pause().await;

        let (value, released) = if lhs[i] <= rhs[j] {
            i += 1;
            (lhs[i - 1], left + i - 1)
        } else {
            j += 1;
            (rhs[j - 1], mid + j)
        };
        stage.apply(
            StepKind::Overwrite,
            &[
                Edit::Paint {
                    index: released,
                    color: SlotColor::Default,
                },
                Edit::Write {
                    index: k,
                    value,
                    color: Some(SlotColor::Active),
                },
            ],
        );
        stage.pause().await;
        stage.paint(StepKind::Mark, &[k], SlotColor::Sorted);
        k += 1;
    }

    // Leftovers are already in order; write them without pausing.
    for &value in lhs[i..].iter().chain(&rhs[j..]) {
        stage.apply(
            StepKind::Overwrite,
            &[Edit::Write {
                index: k,
                value,
                color: Some(SlotColor::Sorted),
            }],
        );
        k += 1;
    }
}
