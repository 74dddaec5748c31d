//! External requests that change the bars, the algorithm or the speed.
//!
//! Everything except [`Visualizer::set_speed`] is gated: while a run holds
//! the gate the request is dropped and [`Admission::Ignored`] returned.
//! Requests that replace the bars are also ignored while the caller holds a
//! [`renderer`](Visualizer::renderer) or
//! [`renderer_mut`](Visualizer::renderer_mut) borrow. Validation errors are
//! only reported for requests that were admitted.

use rand::Rng;

use super::{Admission, Visualizer};
use crate::algorithms::Algorithm;
use crate::animation::{delay_for_speed, ControlSurface, Renderer, Scheduler};
use crate::bars::ArrayState;
use crate::error::SortError;
use crate::options::{validate_len, RunOptions};

impl<R: Renderer, S: Scheduler, C: ControlSurface> Visualizer<R, S, C> {
    /// Change the speed factor used by the next run.
    ///
    /// Allowed at any time; a run in progress keeps the delay it started
    /// with.
    pub fn set_speed(&self, speed: f64) -> Result<(), SortError> {
        let _ = delay_for_speed(speed)?;
        self.options.borrow_mut().speed = speed;
        log::debug!("speed set to {speed}");
        Ok(())
    }

    /// Choose the engine for the next run.
    pub fn select_algorithm(&self, algorithm: Algorithm) -> Admission {
        if self.refuse("algorithm change") {
            return Admission::Ignored;
        }
        self.options.borrow_mut().algorithm = algorithm;
        log::debug!("selected {algorithm}");
        Admission::Accepted
    }

    /// Replace the bars with a fresh random array of the configured size.
    pub fn regenerate<G: Rng + ?Sized>(
        &self,
        rng: &mut G,
    ) -> Result<Admission, SortError> {
        if self.refuse_bars("regenerate") {
            return Ok(Admission::Ignored);
        }
        let values = {
            let options = self.options.borrow();
            ArrayState::random(
                options.array_len,
                options.min_height..=options.max_height,
                rng,
            )?
        };
        log::debug!("regenerated {} bars", values.len());
        self.replace_values(values);
        Ok(Admission::Accepted)
    }

    /// Change the array size and regenerate.
    pub fn resize<G: Rng + ?Sized>(
        &self,
        len: usize,
        rng: &mut G,
    ) -> Result<Admission, SortError> {
        if self.refuse_bars("resize") {
            return Ok(Admission::Ignored);
        }
        validate_len(len)?;
        self.options.borrow_mut().array_len = len;
        self.regenerate(rng)
    }

    /// Replace the bars with caller-supplied heights.
    ///
    /// Heights must be positive. The configured size follows the new array.
    pub fn load(&self, values: Vec<u32>) -> Result<Admission, SortError> {
        if self.refuse_bars("load") {
            return Ok(Admission::Ignored);
        }
        validate_len(values.len())?;
        let values = ArrayState::from_heights(values)?;
        self.options.borrow_mut().array_len = values.len();
        log::debug!("loaded {} bars", values.len());
        self.replace_values(values);
        Ok(Admission::Accepted)
    }

    /// Replace the run options wholesale.
    pub fn apply_options<G: Rng + ?Sized>(
        &self,
        options: RunOptions,
        rng: &mut G,
    ) -> Result<Admission, SortError> {
        if self.refuse_bars("options change") {
            return Ok(Admission::Ignored);
        }
        options.validate()?;
        let regenerate = {
            let current = self.options.borrow();
            current.array_len != options.array_len
                || current.min_height != options.min_height
                || current.max_height != options.max_height
        };
        *self.options.borrow_mut() = options;
        if regenerate {
            return self.regenerate(rng);
        }
        Ok(Admission::Accepted)
    }

    fn refuse(&self, what: &str) -> bool {
        if self.gate.is_locked() {
            log::warn!("{what} requested while a run is active; ignoring");
            return true;
        }
        false
    }

    /// Like [`refuse`](Self::refuse), and also refuses while something
    /// outside borrows the bars.
    fn refuse_bars(&self, what: &str) -> bool {
        if self.refuse(what) {
            return true;
        }
        if self.canvas.try_borrow_mut().is_err() {
            log::warn!("{what} requested while bars are borrowed; ignoring");
            return true;
        }
        false
    }

    fn replace_values(&self, values: ArrayState) {
        match self.canvas.try_borrow_mut() {
            Ok(mut canvas) => {
                if let Some(canvas) = canvas.as_mut() {
                    canvas.replace(values);
                }
            }
            Err(_) => log::warn!("bars borrowed; new array discarded"),
        }
    }
}
