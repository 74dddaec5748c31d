//! Animation plumbing shared by every engine: trace steps, the renderer
//! contract, delay scheduling and the run gate.

pub mod gate;
pub mod render;
pub mod scheduler;
pub mod trace;

pub use gate::{ControlGate, ControlSurface, RunState};
pub use render::{NullRenderer, Renderer, TraceRecorder};
pub use scheduler::{
    delay_for_speed, Scheduler, ThreadTimer, VirtualClock, YieldNow,
    BASE_DELAY_MS,
};
pub use trace::{SlotChange, StepKind, Trace, TraceStats, TraceStep};
