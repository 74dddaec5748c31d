//! Bar data: the authoritative value sequence and its per-index visual
//! mirror.
//!
//! [`ArrayState`] is the only place bar values live. [`VisualSlots`] holds
//! the `(height, color)` pair the renderer last saw for each index; heights
//! in it are only ever copied from the array state, never computed by an
//! engine.

mod array;
mod slots;

pub use array::ArrayState;
pub use slots::{SlotColor, VisualSlot, VisualSlots};

/// A value that can be sorted and drawn as a bar.
///
/// Engines compare bars with [`Ord`] and draw them with [`Bar::height`].
/// `u32` is the production bar type; tests use tagged values whose ordering
/// ignores the tag to observe stability.
pub trait Bar: Copy + Ord {
    /// Drawn height of the bar.
    fn height(&self) -> u32;
}

impl Bar for u32 {
    #[inline]
    fn height(&self) -> u32 {
        *self
    }
}
