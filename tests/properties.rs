//! Property tests over every sorting engine, through the public API.

use std::cmp::Ordering;
use std::time::Duration;

use proptest::prelude::*;
use sortviz::animation::{StepKind, TraceRecorder, VirtualClock};
use sortviz::bars::{Bar, SlotColor};
use sortviz::options::RunOptions;
use sortviz::{record, Algorithm, RunOutcome, Visualizer};

/// Bar whose ordering ignores `tag`.
#[derive(Debug, Clone, Copy)]
struct Tagged {
    value: u32,
    tag: usize,
}

impl PartialEq for Tagged {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Tagged {}

impl PartialOrd for Tagged {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tagged {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Bar for Tagged {
    fn height(&self) -> u32 {
        self.value
    }
}

fn algorithm() -> impl Strategy<Value = Algorithm> {
    prop::sample::select(Algorithm::ALL.to_vec())
}

proptest! {
    #[test]
    fn output_is_a_sorted_permutation(
        algorithm in algorithm(),
        values in prop::collection::vec(1u32..60, 0..48),
    ) {
        let rec = record(algorithm, values.clone(), Duration::ZERO);
        let mut expected = values;
        expected.sort_unstable();
        prop_assert_eq!(&rec.values, &expected);
        prop_assert_eq!(rec.trace.final_heights(), expected);
    }

    #[test]
    fn every_slot_ends_sorted(
        algorithm in algorithm(),
        values in prop::collection::vec(1u32..60, 0..48),
    ) {
        let rec = record(algorithm, values, Duration::ZERO);
        let mut target = TraceRecorder::new();
        rec.replay(&mut target);
        prop_assert!(target.mirror().iter().all(|s| s.color == SlotColor::Sorted));
    }

    #[test]
    fn stable_engines_keep_equal_values_in_order(
        algorithm in prop::sample::select(vec![
            Algorithm::Bubble,
            Algorithm::Insertion,
            Algorithm::Merge,
        ]),
        values in prop::collection::vec(1u32..6, 0..40),
    ) {
        prop_assume!(algorithm.is_stable());
        let tagged: Vec<Tagged> = values
            .iter()
            .enumerate()
            .map(|(tag, &value)| Tagged { value, tag })
            .collect();
        let rec = record(algorithm, tagged, Duration::ZERO);
        for pair in rec.values.windows(2) {
            if pair[0].value == pair[1].value {
                prop_assert!(pair[0].tag < pair[1].tag);
            }
        }
    }

    #[test]
    fn sorted_input_is_left_alone(
        algorithm in algorithm(),
        values in prop::collection::vec(1u32..12, 0..48),
    ) {
        let mut values = values;
        values.sort_unstable();
        let rec = record(algorithm, values.clone(), Duration::ZERO);
        prop_assert_eq!(rec.stats.swaps, 0);
        prop_assert_eq!(rec.values, values);
    }

    #[test]
    fn steps_are_numbered_and_framed_in_order(
        algorithm in algorithm(),
        values in prop::collection::vec(1u32..60, 0..32),
    ) {
        let rec = record(algorithm, values, Duration::from_millis(3));
        for (i, step) in rec.trace.steps.iter().enumerate() {
            prop_assert_eq!(step.seq, i as u64);
            prop_assert!(!step.changes.is_empty());
        }
        prop_assert!(rec.trace.frames.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(rec
            .trace
            .frames
            .iter()
            .all(|&f| f <= rec.trace.steps.len()));
        prop_assert_eq!(
            rec.virtual_time,
            Duration::from_millis(3 * rec.stats.suspensions)
        );
    }

    #[test]
    fn visualizer_runs_leave_everything_sorted(
        algorithm in algorithm(),
        values in prop::collection::vec(1u32..400, 0..40),
    ) {
        let options = RunOptions { algorithm, ..RunOptions::default() };
        let mut rng = rand::rng();
        let vis = Visualizer::new(
            options,
            TraceRecorder::new(),
            VirtualClock::new(),
            &mut rng,
        )
        .unwrap();
        let _ = vis.load(values.clone()).unwrap();

        let outcome = pollster::block_on(vis.start_sort()).unwrap();
        prop_assert!(matches!(outcome, RunOutcome::Completed(_)));
        prop_assert!(!vis.is_running());

        let mut expected = values;
        expected.sort_unstable();
        prop_assert_eq!(vis.values().unwrap(), expected);
        prop_assert!(vis.slots().unwrap().all_sorted());
    }
}

#[test]
fn empty_array_emits_nothing() {
    for algorithm in Algorithm::ALL {
        let rec = record::<u32>(algorithm, Vec::new(), Duration::ZERO);
        assert!(rec.trace.steps.is_empty(), "{algorithm}");
        assert_eq!(rec.stats.suspensions, 0);
    }
}

#[test]
fn single_bar_gets_one_finalize_mark() {
    for algorithm in Algorithm::ALL {
        let rec = record(algorithm, vec![42u32], Duration::ZERO);
        assert_eq!(rec.trace.steps.len(), 1, "{algorithm}");
        let step = &rec.trace.steps[0];
        assert_eq!(step.kind, StepKind::Mark);
        assert!(step.is_finalize());
        assert_eq!(rec.values, vec![42]);
    }
}

#[test]
fn bubble_passes_swap_less_over_time() {
    let rec = record(Algorithm::Bubble, vec![5u32, 3, 1, 4, 2], Duration::ZERO);
    assert_eq!(rec.values, vec![1, 2, 3, 4, 5]);

    // A pass ends when its last slot is marked sorted.
    let mut per_pass = Vec::new();
    let mut swaps = 0;
    for step in &rec.trace.steps {
        match step.kind {
            StepKind::Swap => swaps += 1,
            StepKind::Mark if step.is_finalize() => {
                per_pass.push(swaps);
                swaps = 0;
            }
            _ => {}
        }
    }
    assert!(per_pass.windows(2).all(|w| w[0] >= w[1]), "{per_pass:?}");
}
