use serde::{Deserialize, Serialize};

/// Color state of a single bar.
///
/// Names describe what the color means, not how it is drawn; the palette in
/// [`ColorOptions`](crate::options::ColorOptions) maps each to RGB.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SlotColor {
    /// Resting color ("steelblue").
    #[default]
    Default,
    /// Being compared or scanned ("yellow").
    Comparing,
    /// Swap, shift or write in progress ("red").
    Active,
    /// Quick sort pivot ("red").
    Pivot,
    /// Selection sort minimum candidate ("orange").
    Minimum,
    /// Quick sort partition exchange ("purple").
    Exchanged,
    /// Finalized / sorted indicator ("green").
    Sorted,
}

/// What the renderer shows at one index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisualSlot {
    /// Bar height, mirrors the array value at this index.
    pub height: u32,
    /// Current color.
    pub color: SlotColor,
}

/// Per-index visual state, one slot per array element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisualSlots {
    slots: Vec<VisualSlot>,
}

impl VisualSlots {
    /// Fresh slots in the default color.
    pub fn from_heights(heights: impl IntoIterator<Item = u32>) -> Self {
        Self {
            slots: heights
                .into_iter()
                .map(|height| VisualSlot {
                    height,
                    color: SlotColor::Default,
                })
                .collect(),
        }
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether there are no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot at `index`, if in range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<VisualSlot> {
        self.slots.get(index).copied()
    }

    /// Iterate over all slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = &VisualSlot> + '_ {
        self.slots.iter()
    }

    /// Whether every slot carries the sorted indicator.
    pub fn all_sorted(&self) -> bool {
        self.slots.iter().all(|s| s.color == SlotColor::Sorted)
    }

    /// Indices whose color is not yet [`SlotColor::Sorted`].
    pub fn unsorted_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.color != SlotColor::Sorted)
            .map(|(i, _)| i)
            .collect()
    }

    pub(crate) fn set_color(&mut self, index: usize, color: SlotColor) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.color = color;
        }
    }

    pub(crate) fn set_height(&mut self, index: usize, height: u32) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.height = height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_slots_are_default_colored() {
        let slots = VisualSlots::from_heights([4, 8, 15]);
        assert_eq!(slots.len(), 3);
        assert!(slots.iter().all(|s| s.color == SlotColor::Default));
        assert_eq!(slots.get(2).map(|s| s.height), Some(15));
        assert_eq!(slots.unsorted_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn all_sorted_tracks_every_slot() {
        let mut slots = VisualSlots::from_heights([1, 2]);
        slots.set_color(0, SlotColor::Sorted);
        assert!(!slots.all_sorted());
        slots.set_color(1, SlotColor::Sorted);
        assert!(slots.all_sorted());
        assert!(slots.unsorted_indices().is_empty());
    }

    #[test]
    fn empty_slots_count_as_sorted() {
        assert!(VisualSlots::default().all_sorted());
    }

    #[test]
    fn out_of_range_updates_are_ignored() {
        let mut slots = VisualSlots::from_heights([1]);
        slots.set_color(5, SlotColor::Pivot);
        slots.set_height(5, 99);
        assert_eq!(slots.get(0), Some(VisualSlot { height: 1, color: SlotColor::Default }));
    }
}
