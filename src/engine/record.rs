//! Headless runs: sort without a UI, keep the full trace, replay it later.

use std::time::Duration;

use super::run_to_completion;
use crate::algorithms::Algorithm;
use crate::animation::{
    Renderer, Scheduler, Trace, TraceRecorder, TraceStats, VirtualClock,
};
use crate::bars::{ArrayState, Bar, VisualSlots};

/// Outcome of a headless run.
#[derive(Debug, Clone)]
pub struct Recording<T = u32> {
    /// Engine that produced the trace.
    pub algorithm: Algorithm,
    /// Values after the run.
    pub values: Vec<T>,
    /// Every step, with frame boundaries.
    pub trace: Trace,
    /// Step and suspension counts.
    pub stats: TraceStats,
    /// Total delay the run would have spent suspended.
    pub virtual_time: Duration,
}

/// Sort `values` with `algorithm` on a virtual clock, recording every step.
///
/// Runs to completion on the calling thread without sleeping.
pub fn record<T: Bar>(
    algorithm: Algorithm,
    values: Vec<T>,
    delay: Duration,
) -> Recording<T> {
    let initial: Vec<u32> = values.iter().map(Bar::height).collect();
    let mut values = ArrayState::new(values);
    let mut slots = VisualSlots::from_heights(initial.iter().copied());
    let mut recorder = TraceRecorder::new();
    recorder.rebuild(&slots);
    let mut clock = VirtualClock::new();

    let stats = pollster::block_on(run_to_completion(
        algorithm,
        &mut values,
        &mut slots,
        &mut recorder,
        &mut clock,
        delay,
    ));
    log::debug!(
        "recorded {algorithm}: {} steps over {:?}",
        stats.steps,
        clock.elapsed()
    );

    Recording {
        algorithm,
        values: values.into_vec(),
        trace: recorder.into_trace(initial),
        stats,
        virtual_time: clock.elapsed(),
    }
}

impl<T> Recording<T> {
    /// Redraw the initial bars on `renderer`, then apply every step in
    /// order, presenting at each recorded frame boundary. No delays.
    pub fn replay<R: Renderer>(&self, renderer: &mut R) {
        renderer.rebuild(&self.initial_slots());
        let mut frames = self.trace.frames.iter().peekable();
        for (i, step) in self.trace.steps.iter().enumerate() {
            while frames.next_if(|&&f| f == i).is_some() {
                renderer.present();
            }
            renderer.apply_step(step);
        }
        for _ in frames {
            renderer.present();
        }
        renderer.present();
    }

    /// Like [`replay`](Self::replay), but suspends on `scheduler` for
    /// `delay` at each recorded frame boundary, reproducing the recorded
    /// pacing at a new speed.
    pub async fn play<R: Renderer, S: Scheduler>(
        &self,
        renderer: &mut R,
        scheduler: &mut S,
        delay: Duration,
    ) {
        renderer.rebuild(&self.initial_slots());
        let mut frames = self.trace.frames.iter().peekable();
        for (i, step) in self.trace.steps.iter().enumerate() {
            while frames.next_if(|&&f| f == i).is_some() {
                renderer.present();
                scheduler.suspend(delay).await;
            }
            renderer.apply_step(step);
        }
        for _ in frames {
            renderer.present();
            scheduler.suspend(delay).await;
        }
        renderer.present();
    }

    fn initial_slots(&self) -> VisualSlots {
        VisualSlots::from_heights(self.trace.initial.iter().copied())
    }
}
