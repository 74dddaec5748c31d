//! Run orchestration: the [`Visualizer`] owns the bars between runs, gates
//! every external request, and drives one engine at a time to completion.
//!
//! During a run the array, slots, renderer and scheduler are moved out of
//! the visualizer and into the run future. Nothing else can reach them
//! until the run finishes (or its future is dropped), at which point a drop
//! guard puts them back and reopens the gate.

mod accessors;
mod controls;
mod record;

use std::cell::RefCell;
use std::time::Duration;

use rand::Rng;
pub use record::{record, Recording};

use crate::algorithms::{sort, Algorithm, Stage};
use crate::animation::{
    delay_for_speed, ControlGate, ControlSurface, Renderer, Scheduler,
    TraceStats,
};
use crate::bars::{ArrayState, Bar, VisualSlots};
use crate::error::SortError;
use crate::options::RunOptions;

/// Whether a gated request was carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The request ran.
    Accepted,
    /// A run was active; nothing changed.
    Ignored,
}

/// Result of [`Visualizer::start_sort`].
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The engine ran to completion.
    Completed(RunReport),
    /// Another run held the gate; nothing started.
    Ignored,
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Engine that ran.
    pub algorithm: Algorithm,
    /// Number of bars sorted.
    pub len: usize,
    /// Delay awaited at each suspension.
    pub delay: Duration,
    /// Step and suspension counts.
    pub stats: TraceStats,
}

/// State a run takes exclusive ownership of.
struct Canvas<R, S> {
    values: ArrayState,
    slots: VisualSlots,
    renderer: R,
    scheduler: S,
}

impl<R: Renderer, S> Canvas<R, S> {
    /// Swap in a fresh array and redraw it.
    fn replace(&mut self, values: ArrayState) {
        self.slots = VisualSlots::from_heights(values.as_slice().iter().copied());
        self.values = values;
        self.renderer.rebuild(&self.slots);
    }
}

/// Owns the bars, the renderer and the scheduler, and runs sorting engines
/// against them one at a time.
///
/// All methods take `&self`: a run future borrows the visualizer while the
/// UI shell keeps calling into it. Requests that would change the bars are
/// ignored while a run holds the gate.
pub struct Visualizer<R, S, C = ()> {
    gate: ControlGate,
    options: RefCell<RunOptions>,
    canvas: RefCell<Option<Canvas<R, S>>>,
    controls: RefCell<C>,
}

impl<R: Renderer, S: Scheduler> Visualizer<R, S> {
    /// Validate `options`, generate the first array and draw it.
    pub fn new<G: Rng + ?Sized>(
        options: RunOptions,
        renderer: R,
        scheduler: S,
        rng: &mut G,
    ) -> Result<Self, SortError> {
        options.validate()?;
        let values = ArrayState::random(
            options.array_len,
            options.min_height..=options.max_height,
            rng,
        )?;
        let mut canvas = Canvas {
            values: ArrayState::default(),
            slots: VisualSlots::default(),
            renderer,
            scheduler,
        };
        canvas.replace(values);
        log::debug!(
            "visualizer ready: {} bars, {}",
            options.array_len,
            options.algorithm
        );

        Ok(Self {
            gate: ControlGate::new(),
            options: RefCell::new(options),
            canvas: RefCell::new(Some(canvas)),
            controls: RefCell::new(()),
        })
    }
}

impl<R: Renderer, S: Scheduler, C: ControlSurface> Visualizer<R, S, C> {
    /// Attach a control surface notified at run start and end.
    pub fn with_controls<D: ControlSurface>(
        self,
        controls: D,
    ) -> Visualizer<R, S, D> {
        Visualizer {
            gate: self.gate,
            options: self.options,
            canvas: self.canvas,
            controls: RefCell::new(controls),
        }
    }

    /// Sort the current array with the selected algorithm.
    ///
    /// Returns [`RunOutcome::Ignored`] without touching anything if a run
    /// is already active, or if the caller still holds a borrow from
    /// [`renderer`](Self::renderer), [`renderer_mut`](Self::renderer_mut)
    /// or [`controls`](Self::controls). An invalid speed is rejected before
    /// the gate is locked. On completion every slot shows the sorted
    /// indicator.
    ///
    /// Dropping the returned future part way leaves the array partially
    /// sorted but restores it to the visualizer and reopens the gate.
    pub async fn start_sort(&self) -> Result<RunOutcome, SortError> {
        if self.gate.is_locked() {
            log::warn!("sort requested while a run is active; ignoring");
            return Ok(RunOutcome::Ignored);
        }
        let (algorithm, speed) = {
            let options = self.options.borrow();
            (options.algorithm, options.speed)
        };
        let delay = delay_for_speed(speed)?;

        let Ok(mut controls) = self.controls.try_borrow_mut() else {
            log::warn!("sort requested while controls are borrowed; ignoring");
            return Ok(RunOutcome::Ignored);
        };
        if !self.gate.try_lock() {
            return Ok(RunOutcome::Ignored);
        }
        let taken =
            self.canvas.try_borrow_mut().ok().and_then(|mut c| c.take());
        let Some(canvas) = taken else {
            self.gate.unlock();
            log::warn!("sort requested while the bars are borrowed; ignoring");
            return Ok(RunOutcome::Ignored);
        };
        controls.on_run_start();
        drop(controls);
        let mut guard = RunGuard {
            owner: self,
            canvas: Some(canvas),
        };

        let Some(canvas) = guard.canvas.as_mut() else {
            return Ok(RunOutcome::Ignored);
        };
        let len = canvas.values.len();
        log::info!("{algorithm}: sorting {len} bars, {delay:?} per step");

        let stats = run_to_completion(
            algorithm,
            &mut canvas.values,
            &mut canvas.slots,
            &mut canvas.renderer,
            &mut canvas.scheduler,
            delay,
        )
        .await;
        drop(guard);

        log::info!(
            "{algorithm}: done in {} steps ({} compares, {} swaps, {} \
             overwrites)",
            stats.steps,
            stats.compares,
            stats.swaps,
            stats.overwrites
        );
        Ok(RunOutcome::Completed(RunReport {
            algorithm,
            len,
            delay,
            stats,
        }))
    }
}

/// Returns the canvas and reopens the gate when a run ends, normally or
/// because its future was dropped.
struct RunGuard<'v, R: Renderer, S: Scheduler, C: ControlSurface> {
    owner: &'v Visualizer<R, S, C>,
    canvas: Option<Canvas<R, S>>,
}

impl<R: Renderer, S: Scheduler, C: ControlSurface> Drop
    for RunGuard<'_, R, S, C>
{
    fn drop(&mut self) {
        if let Some(canvas) = self.canvas.take() {
            match self.owner.canvas.try_borrow_mut() {
                Ok(mut slot) => *slot = Some(canvas),
                Err(_) => {
                    log::error!("bars borrowed at run end; dropping them")
                }
            }
        }
        self.owner.gate.unlock();
        match self.owner.controls.try_borrow_mut() {
            Ok(mut controls) => controls.on_run_end(),
            Err(_) => {
                log::warn!("controls borrowed at run end; skipping notice")
            }
        }
    }
}

/// Run `algorithm` over the given state, then paint anything the engine
/// left unmarked.
async fn run_to_completion<T: Bar, R: Renderer, S: Scheduler>(
    algorithm: Algorithm,
    values: &mut ArrayState<T>,
    slots: &mut VisualSlots,
    renderer: &mut R,
    scheduler: &mut S,
    delay: Duration,
) -> TraceStats {
    let mut stage = Stage::new(values, slots, renderer, scheduler, delay);
    sort(algorithm, &mut stage).await;
    stage.finalize_remaining();
    stage.finish()
}
