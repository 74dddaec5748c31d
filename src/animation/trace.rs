//! Trace steps: the atomic, ordered visual events an engine emits.

use serde::{Deserialize, Serialize};

use crate::bars::SlotColor;
use crate::error::SortError;

/// What kind of operation a step records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Bars highlighted for comparison or scanning.
    Compare,
    /// Two indices exchanged different values.
    Swap,
    /// One or more values written in place (shift, merge write, key drop).
    Overwrite,
    /// Color-only change: highlight, reset or finalize.
    Mark,
}

/// The new visual state of one index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotChange {
    /// Array index; always within bounds of the array at emission time.
    pub index: usize,
    /// New bar height, `None` when unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// New color.
    pub color: SlotColor,
}

/// One atomic, immutable visual event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    /// Position in the run's emission order, starting at zero.
    pub seq: u64,
    /// Operation kind.
    pub kind: StepKind,
    /// Per-index changes, applied in order.
    pub changes: Vec<SlotChange>,
}

impl TraceStep {
    /// Indices touched by this step.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.changes.iter().map(|c| c.index)
    }

    /// Whether this step only marks indices as sorted.
    pub fn is_finalize(&self) -> bool {
        self.kind == StepKind::Mark
            && !self.changes.is_empty()
            && self.changes.iter().all(|c| c.color == SlotColor::Sorted)
    }
}

/// Per-run counters. The core keeps these instead of the steps themselves.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub struct TraceStats {
    /// Total steps emitted.
    pub steps: u64,
    /// Compare steps.
    pub compares: u64,
    /// Swap steps.
    pub swaps: u64,
    /// Overwrite steps.
    pub overwrites: u64,
    /// Mark steps.
    pub marks: u64,
    /// Scheduler suspensions awaited.
    pub suspensions: u64,
    /// Out-of-range visual updates skipped by the bounds guard.
    pub skipped: u64,
}

impl TraceStats {
    pub(crate) fn record(&mut self, kind: StepKind) {
        self.steps += 1;
        match kind {
            StepKind::Compare => self.compares += 1,
            StepKind::Swap => self.swaps += 1,
            StepKind::Overwrite => self.overwrites += 1,
            StepKind::Mark => self.marks += 1,
        }
    }
}

/// A complete, replayable run: starting heights, every step, and the frame
/// boundaries at which the engine suspended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// Bar heights before the first step.
    pub initial: Vec<u32>,
    /// Steps in emission order.
    pub steps: Vec<TraceStep>,
    /// For each suspension, the number of steps emitted before it.
    pub frames: Vec<usize>,
}

impl Trace {
    /// Serialize as JSON.
    pub fn to_json(&self) -> Result<String, SortError> {
        serde_json::to_string(self)
            .map_err(|e| SortError::TraceParse(e.to_string()))
    }

    /// Parse a trace previously written by [`Trace::to_json`].
    pub fn from_json(json: &str) -> Result<Self, SortError> {
        serde_json::from_str(json)
            .map_err(|e| SortError::TraceParse(e.to_string()))
    }

    /// Final heights after applying every step to [`Trace::initial`].
    pub fn final_heights(&self) -> Vec<u32> {
        let mut heights = self.initial.clone();
        for change in self.steps.iter().flat_map(|s| &s.changes) {
            if let (Some(h), Some(slot)) =
                (change.height, heights.get_mut(change.index))
            {
                *slot = h;
            }
        }
        heights
    }
}
