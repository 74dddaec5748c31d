// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Tests may unwrap and panic freely
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]

//! Trace-driven animation engine for comparison sorting algorithms.
//!
//! Sortviz runs bubble, selection, insertion, merge and quick sort as async
//! engines that emit one [`animation::TraceStep`] per visual change (compare,
//! swap, overwrite, mark) and suspend between steps for a delay derived from
//! a user speed factor. Renderers mirror the steps; the engines never sleep
//! or draw on their own.
//!
//! # Key entry points
//!
//! - [`engine::Visualizer`] - owns the bars and runs one engine at a time,
//!   ignoring requests that arrive mid-run
//! - [`engine::record`] - headless run producing a replayable
//!   [`animation::Trace`]
//! - [`animation::Renderer`] / [`animation::Scheduler`] - the seams a host
//!   plugs its drawing and timing into
//! - [`options::Options`] - run and palette configuration with TOML presets
//!
//! # Architecture
//!
//! Engines are free async functions over an [`algorithms::Stage`], the
//! explicitly passed bundle of array, visual slots, renderer and scheduler
//! for one run. Each mutation goes through the stage, which updates the
//! slots, hands a step to the renderer and counts it, so the picture never
//! drifts from the array. Merge and quick sort recurse with boxed futures
//! and await their children before returning.
//!
//! Nothing here depends on an async runtime: any executor that polls the
//! run future works, `pollster` included.

pub mod algorithms;
pub mod animation;
pub mod bars;
pub mod engine;
pub mod error;
pub mod options;

pub use algorithms::Algorithm;
pub use engine::{record, Admission, Recording, RunOutcome, RunReport, Visualizer};
pub use error::SortError;
