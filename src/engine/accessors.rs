//! Read-only views of a [`Visualizer`].
//!
//! While a run is active the bars and the renderer belong to the run, so
//! the views that need them return `None`. They also return `None` instead
//! of panicking when a [`renderer_mut`](Visualizer::renderer_mut) borrow is
//! still alive.

use std::cell::{Ref, RefMut};

use super::Visualizer;
use crate::animation::RunState;
use crate::bars::VisualSlots;
use crate::options::RunOptions;

// ── Run state ──

impl<R, S, C> Visualizer<R, S, C> {
    /// Whether a run currently holds the gate.
    pub fn is_running(&self) -> bool {
        self.gate.is_locked()
    }

    /// Current gate state.
    pub fn run_state(&self) -> RunState {
        self.gate.state()
    }

    /// Snapshot of the run options.
    pub fn options(&self) -> RunOptions {
        self.options.borrow().clone()
    }

    /// The attached control surface.
    pub fn controls(&self) -> Ref<'_, C> {
        self.controls.borrow()
    }
}

// ── Bars ──

impl<R, S, C> Visualizer<R, S, C> {
    /// Current bar values, or `None` during a run.
    pub fn values(&self) -> Option<Vec<u32>> {
        self.canvas
            .try_borrow()
            .ok()?
            .as_ref()
            .map(|c| c.values.as_slice().to_vec())
    }

    /// Current visual slots, or `None` during a run.
    pub fn slots(&self) -> Option<VisualSlots> {
        self.canvas.try_borrow().ok()?.as_ref().map(|c| c.slots.clone())
    }

    /// Borrow the renderer, or `None` during a run.
    pub fn renderer(&self) -> Option<Ref<'_, R>> {
        Ref::filter_map(self.canvas.try_borrow().ok()?, |c| {
            c.as_ref().map(|c| &c.renderer)
        })
        .ok()
    }

    /// Mutably borrow the renderer, or `None` during a run or while another
    /// view of the renderer is held.
    pub fn renderer_mut(&self) -> Option<RefMut<'_, R>> {
        RefMut::filter_map(self.canvas.try_borrow_mut().ok()?, |c| {
            c.as_mut().map(|c| &mut c.renderer)
        })
        .ok()
    }
}
