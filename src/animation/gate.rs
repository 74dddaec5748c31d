//! Control gate: the single run token guarding against interleaved runs.

use std::cell::Cell;

/// Whether a run is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// No engine running; external controls are enabled.
    #[default]
    Idle,
    /// An engine owns the bars; external controls are disabled.
    Running,
}

/// Mutual-exclusion flag for cooperative, single-threaded runs.
///
/// [`try_lock`](Self::try_lock) checks and sets in one call with no await
/// in between, so two starts can never both see `Idle`.
#[derive(Debug, Default)]
pub struct ControlGate {
    state: Cell<RunState>,
}

impl ControlGate {
    /// Gate in the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> RunState {
        self.state.get()
    }

    /// Whether a run holds the gate.
    pub fn is_locked(&self) -> bool {
        self.state.get() == RunState::Running
    }

    /// Take the run token. Returns false, changing nothing, if already
    /// running.
    #[must_use]
    pub fn try_lock(&self) -> bool {
        if self.is_locked() {
            return false;
        }
        self.state.set(RunState::Running);
        true
    }

    /// Release the run token.
    pub fn unlock(&self) {
        self.state.set(RunState::Idle);
    }
}

/// Receives run start/end notifications so a UI shell can disable and
/// re-enable its controls (generate, size, algorithm select, sort).
pub trait ControlSurface {
    /// The gate was just locked.
    fn on_run_start(&mut self) {}
    /// The gate was just unlocked.
    fn on_run_end(&mut self) {}
}

impl ControlSurface for () {}
