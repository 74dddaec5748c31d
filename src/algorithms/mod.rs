//! Trace-producing sorting engines.
//!
//! Every engine is an async function over a [`Stage`]: the explicitly
//! passed bundle of array state, visual slots, renderer and scheduler for
//! one run. Engines mutate bars only through the stage, which turns each
//! mutation into a [`TraceStep`], applies it to the slots and the renderer
//! in one go, and counts it. Between steps engines await
//! [`Stage::pause`]; nothing is suspended mid-step.
//!
//! Merge and quick sort recurse with boxed futures, each call awaiting its
//! children before continuing.

pub mod bubble;
pub mod insertion;
pub mod merge;
pub mod quick;
pub mod selection;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::{
    Renderer, Scheduler, SlotChange, StepKind, TraceStats, TraceStep,
};
use crate::bars::{ArrayState, Bar, SlotColor, VisualSlots};
use crate::error::SortError;

/// The sorting engines.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Adjacent compare-and-swap passes.
    #[default]
    Bubble,
    /// Scan for the minimum, swap it to the front.
    Selection,
    /// Shift greater elements right, drop the key in.
    Insertion,
    /// Recursive halving with a two-pointer merge.
    Merge,
    /// Recursive Lomuto partition around the last element.
    Quick,
}

impl Algorithm {
    /// Every engine, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Bubble,
        Self::Selection,
        Self::Insertion,
        Self::Merge,
        Self::Quick,
    ];

    /// Stable identifier, as used in options files.
    pub fn id(self) -> &'static str {
        match self {
            Self::Bubble => "bubble",
            Self::Selection => "selection",
            Self::Insertion => "insertion",
            Self::Merge => "merge",
            Self::Quick => "quick",
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bubble => "Bubble Sort",
            Self::Selection => "Selection Sort",
            Self::Insertion => "Insertion Sort",
            Self::Merge => "Merge Sort",
            Self::Quick => "Quick Sort",
        }
    }

    /// Whether equal values keep their relative input order.
    pub fn is_stable(self) -> bool {
        matches!(self, Self::Bubble | Self::Insertion | Self::Merge)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.id() == id)
            .ok_or_else(|| SortError::UnknownAlgorithm(s.to_owned()))
    }
}

/// Run `algorithm` on the stage's bars to completion.
pub async fn sort<T: Bar, R: Renderer, S: Scheduler>(
    algorithm: Algorithm,
    stage: &mut Stage<'_, T, R, S>,
) {
    match algorithm {
        Algorithm::Bubble => bubble::sort(stage).await,
        Algorithm::Selection => selection::sort(stage).await,
        Algorithm::Insertion => insertion::sort(stage).await,
        Algorithm::Merge => merge::sort(stage).await,
        Algorithm::Quick => quick::sort(stage).await,
    }
}

/// One mutation inside a step.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Edit<T> {
    /// Recolor a bar.
    Paint { index: usize, color: SlotColor },
    /// Store a value; `None` keeps the slot's current color.
    Write {
        index: usize,
        value: T,
        color: Option<SlotColor>,
    },
}

/// Everything an engine may touch during one run.
///
/// Heights in emitted steps are read back from the array state after the
/// write, so the renderer can never show a value the array does not hold.
/// Out-of-range indices are skipped and counted rather than propagated.
pub struct Stage<'a, T, R, S> {
    values: &'a mut ArrayState<T>,
    slots: &'a mut VisualSlots,
    renderer: &'a mut R,
    scheduler: &'a mut S,
    delay: Duration,
    stats: TraceStats,
    next_seq: u64,
}

impl<'a, T: Bar, R: Renderer, S: Scheduler> Stage<'a, T, R, S> {
    /// Bundle the run state. `slots` must mirror `values` index for index.
    pub fn new(
        values: &'a mut ArrayState<T>,
        slots: &'a mut VisualSlots,
        renderer: &'a mut R,
        scheduler: &'a mut S,
        delay: Duration,
    ) -> Self {
        debug_assert_eq!(values.len(), slots.len());
        Self {
            values,
            slots,
            renderer,
            scheduler,
            delay,
            stats: TraceStats::default(),
            next_seq: 0,
        }
    }

    /// Number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no bars.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consume the stage, returning its counters.
    pub fn finish(self) -> TraceStats {
        self.stats
    }

    /// Hand the frame to the renderer and suspend for one delay.
    pub async fn pause(&mut self) {
        self.renderer.present();
        self.stats.suspensions += 1;
        self.scheduler.suspend(self.delay).await;
    }

    /// Paint every slot not yet showing the sorted indicator.
    ///
    /// Engines can leave slots under-marked at range boundaries; this closes
    /// the run regardless. Emits nothing when all slots are already sorted.
    pub fn finalize_remaining(&mut self) {
        let edits: Vec<Edit<T>> = self
            .slots
            .unsorted_indices()
            .into_iter()
            .map(|index| Edit::Paint {
                index,
                color: SlotColor::Sorted,
            })
            .collect();
        self.apply(StepKind::Mark, &edits);
    }

    /// Value at `index`. Engines only read indices inside the array.
    #[inline]
    pub(crate) fn at(&self, index: usize) -> T {
        self.values.as_slice()[index]
    }

    /// Copy of `start..=end`.
    pub(crate) fn copy_range(&self, start: usize, end: usize) -> Vec<T> {
        self.values.copy_range(start, end)
    }

    /// Recolor `indices` as one step.
    pub(crate) fn paint(
        &mut self,
        kind: StepKind,
        indices: &[usize],
        color: SlotColor,
    ) {
        let edits: Vec<Edit<T>> = indices
            .iter()
            .map(|&index| Edit::Paint { index, color })
            .collect();
        self.apply(kind, &edits);
    }

    /// Mark a recursion base case sorted. `index` may fall outside the
    /// array (an empty range on an empty array); that is a silent no-op.
    pub(crate) fn mark_sorted_at(&mut self, index: isize) {
        match usize::try_from(index) {
            Ok(index) => self.paint(StepKind::Mark, &[index], SlotColor::Sorted),
            Err(_) => self.skip(index),
        }
    }

    /// Exchange the values at `a` and `b`, recoloring both. The color of
    /// `a` is applied last.
    ///
    /// Exchanging an index with itself is a visual no-op apart from the
    /// color. Exchanging two equal values still moves both bars but leaves
    /// the picture unchanged, so it is recorded as an overwrite. Only a
    /// visible reordering counts as a swap.
    pub(crate) fn exchange(
        &mut self,
        a: usize,
        b: usize,
        color_a: Option<SlotColor>,
        color_b: Option<SlotColor>,
    ) {
        if a == b {
            if let Some(color) = color_a.or(color_b) {
                self.paint(StepKind::Mark, &[a], color);
            }
            return;
        }
        let (value_a, value_b) = (self.at(a), self.at(b));
        let kind = if value_a == value_b {
            StepKind::Overwrite
        } else {
            StepKind::Swap
        };
        self.apply(
            kind,
            &[
                Edit::Write {
                    index: b,
                    value: value_a,
                    color: color_b,
                },
                Edit::Write {
                    index: a,
                    value: value_b,
                    color: color_a,
                },
            ],
        );
    }

    /// Apply `edits` in order as one step of `kind`, then hand it to the
    /// renderer. Nothing is emitted if every edit was out of range.
    pub(crate) fn apply(&mut self, kind: StepKind, edits: &[Edit<T>]) {
        let mut changes = Vec::with_capacity(edits.len());
        for edit in edits {
            match *edit {
                Edit::Paint { index, color } => {
                    if index >= self.len() {
                        self.skip(index as isize);
                        continue;
                    }
                    self.slots.set_color(index, color);
                    changes.push(SlotChange {
                        index,
                        height: None,
                        color,
                    });
                }
                Edit::Write {
                    index,
                    value,
                    color,
                } => {
                    if !self.values.set(index, value) {
                        self.skip(index as isize);
                        continue;
                    }
                    let height = value.height();
                    self.slots.set_height(index, height);
                    let color = match (color, self.slots.get(index)) {
                        (Some(color), _) => color,
                        (None, Some(slot)) => slot.color,
                        (None, None) => SlotColor::Default,
                    };
                    self.slots.set_color(index, color);
                    changes.push(SlotChange {
                        index,
                        height: Some(height),
                        color,
                    });
                }
            }
        }
        if changes.is_empty() {
            return;
        }

        let step = TraceStep {
            seq: self.next_seq,
            kind,
            changes,
        };
        self.next_seq += 1;
        self.stats.record(kind);
        self.renderer.apply_step(&step);
    }

    fn skip(&mut self, index: isize) {
        self.stats.skipped += 1;
        log::trace!(
            "skipping visual update for out-of-range slot {index} (len {})",
            self.len()
        );
    }
}


#[cfg(test)]
mod tests {
    use super::testing::run_u32;
    use super::*;
    use crate::animation::{NullRenderer, VirtualClock};

    #[test]
    fn algorithm_ids_round_trip() {
        for alg in Algorithm::ALL {
            assert_eq!(alg.id().parse::<Algorithm>().unwrap(), alg);
        }
        assert_eq!(" Quick ".parse::<Algorithm>().unwrap(), Algorithm::Quick);
        assert!(matches!(
            "bogo".parse::<Algorithm>(),
            Err(SortError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn stability_table() {
        let stable: Vec<_> =
            Algorithm::ALL.into_iter().filter(|a| a.is_stable()).collect();
        assert_eq!(
            stable,
            vec![Algorithm::Bubble, Algorithm::Insertion, Algorithm::Merge]
        );
    }

    #[test]
    fn empty_array_emits_nothing() {
        for alg in Algorithm::ALL {
            let run = run_u32(alg, &[]);
            assert!(run.steps.is_empty(), "{alg} emitted steps on N=0");
            assert_eq!(run.stats.suspensions, 0);
        }
    }

    #[test]
    fn single_element_is_one_finalize_mark() {
        for alg in Algorithm::ALL {
            let run = run_u32(alg, &[42]);
            assert_eq!(run.steps.len(), 1, "{alg}");
            assert!(run.steps[0].is_finalize(), "{alg}");
            assert!(run.slots.all_sorted(), "{alg}");
            assert_eq!(run.values, vec![42]);
        }
    }

    #[test]
    fn renderer_mirror_matches_slots() {
        let input = [9, 4, 7, 1, 8, 2, 2, 6];
        for alg in Algorithm::ALL {
            let run = run_u32(alg, &input);
            let mirror: Vec<_> = run.recorder.mirror().to_vec();
            let slots: Vec<_> = run.slots.iter().copied().collect();
            assert_eq!(mirror, slots, "{alg}");
            let heights: Vec<u32> = slots.iter().map(|s| s.height).collect();
            assert_eq!(heights, run.values, "{alg}");
        }
    }

    #[test]
    fn sequence_numbers_are_contiguous() {
        let run = run_u32(Algorithm::Quick, &[3, 1, 2, 5, 4]);
        for (i, step) in run.steps.iter().enumerate() {
            assert_eq!(step.seq, i as u64);
        }
        assert_eq!(run.stats.steps, run.steps.len() as u64);
    }

    #[test]
    fn stage_skips_out_of_range_edits() {
        let mut values = ArrayState::new(vec![2u32, 1]);
        let mut slots = VisualSlots::from_heights([2, 1]);
        let mut renderer = NullRenderer;
        let mut clock = VirtualClock::new();
        let mut stage = Stage::new(
            &mut values,
            &mut slots,
            &mut renderer,
            &mut clock,
            Duration::ZERO,
        );
        stage.mark_sorted_at(-1);
        stage.mark_sorted_at(2);
        stage.apply(
            StepKind::Overwrite,
            &[Edit::Write {
                index: 7,
                value: 9,
                color: None,
            }],
        );
        let stats = stage.finish();
        assert_eq!(stats.steps, 0);
        assert_eq!(stats.skipped, 3);
        assert_eq!(values.as_slice(), &[2, 1]);
    }

    #[test]
    fn finalize_remaining_only_paints_unsorted() {
        let mut values = ArrayState::new(vec![1u32, 2, 3]);
        let mut slots = VisualSlots::from_heights([1, 2, 3]);
        let mut renderer = TraceRecorderLike::default();
        let mut clock = VirtualClock::new();
        let mut stage = Stage::new(
            &mut values,
            &mut slots,
            &mut renderer,
            &mut clock,
            Duration::ZERO,
        );
        stage.paint(StepKind::Mark, &[1], SlotColor::Sorted);
        stage.finalize_remaining();
        stage.finalize_remaining();
        let stats = stage.finish();
        assert_eq!(stats.marks, 2);
        assert_eq!(renderer.0, vec![vec![1], vec![0, 2]]);
        assert!(slots.all_sorted());
    }

    /// Records only the indices of each step.
    #[derive(Default)]
    struct TraceRecorderLike(Vec<Vec<usize>>);

    impl Renderer for TraceRecorderLike {
        fn apply_visual(&mut self, _: usize, _: Option<u32>, _: SlotColor) {}

        fn apply_step(&mut self, step: &TraceStep) {
            self.0.push(step.indices().collect());
        }
    }
}
