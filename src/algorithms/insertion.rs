//! Insertion sort: grow a sorted prefix by shifting greater elements right
//! and dropping each key into the gap.

use crate::animation::{Renderer, Scheduler, StepKind};
use crate::bars::{Bar, SlotColor};

use super::{Edit, Stage};

/// Sort the stage's bars in place.
pub async fn sort<T: Bar, R: Renderer, S: Scheduler>(stage: &mut Stage<'_, T, R, S>) {
    let n = stage.len();
    if n == 0 {
        return;
    }
    // A one-element prefix is already sorted.
    stage.paint(StepKind::Mark, &[0], SlotColor::Sorted);

    for i in 1..n {
        let key = stage.at(i);
        stage.paint(StepKind::Compare, &[i], SlotColor::Comparing);
        stage.pause().await;

        // `gap` is where the key would land if shifting stopped now.
        let mut gap = i;
        while gap > 0 && stage.at(gap - 1) > key {
            let shifted = stage.at(gap - 1);
            stage.apply(
                StepKind::Overwrite,
                &[
                    Edit::Write {
                        index: gap,
                        value: shifted,
                        color: Some(SlotColor::Sorted),
                    },
                    Edit::Paint {
                        index: gap - 1,
                        color: SlotColor::Active,
                    },
                ],
            );
            stage.pause().await;
            stage.paint(StepKind::Mark, &[gap - 1], SlotColor::Sorted);
            gap -= 1;
        }

        stage.apply(
            StepKind::Overwrite,
            &[Edit::Write {
                index: gap,
                value: key,
                color: Some(SlotColor::Sorted),
            }],
        );
        stage.pause().await;
    }
}
