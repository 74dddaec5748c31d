//! The renderer contract and two in-process renderers.

use crate::bars::{SlotColor, VisualSlot, VisualSlots};

use super::trace::{Trace, TraceStep};

/// Applies visual changes to whatever draws the bars.
///
/// Steps arrive in emission order and must be applied before the engine's
/// next suspension elapses. The renderer only mirrors state; it never
/// mutates bars on its own.
pub trait Renderer {
    /// Set the color (and height, when `Some`) of the bar at `index`.
    fn apply_visual(&mut self, index: usize, height: Option<u32>, color: SlotColor);

    /// Apply one trace step. Default: one [`apply_visual`] per change.
    ///
    /// [`apply_visual`]: Renderer::apply_visual
    fn apply_step(&mut self, step: &TraceStep) {
        for change in &step.changes {
            self.apply_visual(change.index, change.height, change.color);
        }
    }

    /// Called right before each suspension, after the frame's steps.
    fn present(&mut self) {}

    /// Redraw every bar after a new array was generated or loaded.
    fn rebuild(&mut self, slots: &VisualSlots) {
        for (index, slot) in slots.iter().enumerate() {
            self.apply_visual(index, Some(slot.height), slot.color);
        }
    }
}

/// Renderer that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn apply_visual(&mut self, _index: usize, _height: Option<u32>, _color: SlotColor) {}
}

/// Renderer that keeps every step it receives, plus a mirror of the bars.
///
/// The mirror is what a real renderer would show; comparing it with
/// [`VisualSlots`] checks that nothing was applied out of order or skipped.
#[derive(Debug, Default, Clone)]
pub struct TraceRecorder {
    steps: Vec<TraceStep>,
    frames: Vec<usize>,
    mirror: Vec<VisualSlot>,
}

impl TraceRecorder {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps recorded so far.
    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    /// Step counts at each frame boundary.
    pub fn frames(&self) -> &[usize] {
        &self.frames
    }

    /// Bars as currently drawn.
    pub fn mirror(&self) -> &[VisualSlot] {
        &self.mirror
    }

    /// Forget recorded steps and frames, keeping the mirror.
    pub fn clear(&mut self) {
        self.steps.clear();
        self.frames.clear();
    }

    /// Package the recording as a [`Trace`] starting from `initial`.
    pub fn into_trace(self, initial: Vec<u32>) -> Trace {
        Trace {
            initial,
            steps: self.steps,
            frames: self.frames,
        }
    }
}

impl Renderer for TraceRecorder {
    fn apply_visual(&mut self, index: usize, height: Option<u32>, color: SlotColor) {
        if let Some(slot) = self.mirror.get_mut(index) {
            if let Some(height) = height {
                slot.height = height;
            }
            slot.color = color;
        }
    }

    fn apply_step(&mut self, step: &TraceStep) {
        for change in &step.changes {
            self.apply_visual(change.index, change.height, change.color);
        }
        self.steps.push(step.clone());
    }

    fn present(&mut self) {
        self.frames.push(self.steps.len());
    }

    fn rebuild(&mut self, slots: &VisualSlots) {
        self.mirror = slots.iter().copied().collect();
    }
}
