//! Bubble sort: adjacent compare-and-swap passes.
//!
//! Pass `i` compares `(j, j + 1)` for `j` in `0..n - i - 1`, swapping on a
//! strict `>` so equal values never cross. After each pass the last
//! unsorted slot holds its final value and is marked; slot 0 is never
//! revisited as a singleton, so it is marked once all passes are done.

use crate::animation::{Renderer, Scheduler, StepKind};
use crate::bars::{Bar, SlotColor};

use super::Stage;

/// Sort the stage's bars in place.
pub async fn sort<T: Bar, R: Renderer, S: Scheduler>(stage: &mut Stage<'_, T, R, S>) {
    let n = stage.len();
    for i in 0..n.saturating_sub(1) {
        for j in 0..n - i - 1 {
            stage.paint(StepKind::Compare, &[j, j + 1], SlotColor::Comparing);
            stage.pause().await;

            if stage.at(j) > stage.at(j + 1) {
                stage.exchange(
                    j,
                    j + 1,
                    Some(SlotColor::Active),
                    Some(SlotColor::Active),
                );
                stage.pause().await;
            }

            stage.paint(StepKind::Mark, &[j, j + 1], SlotColor::Default);
        }
        stage.paint(StepKind::Mark, &[n - 1 - i], SlotColor::Sorted);
    }
    if n > 0 {
        stage.paint(StepKind::Mark, &[0], SlotColor::Sorted);
    }
}
