use std::ops::RangeInclusive;

use rand::Rng;

use super::Bar;
use crate::error::SortError;

/// The ordered sequence of bar values a run sorts.
///
/// Length is fixed once constructed; a new array replaces the old one
/// wholesale. Only the active engine mutates it, through
/// [`Stage`](crate::algorithms::Stage).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArrayState<T = u32> {
    values: Vec<T>,
}

impl<T: Bar> ArrayState<T> {
    /// Wrap an existing sequence.
    pub fn new(values: Vec<T>) -> Self {
        Self { values }
    }

    /// Number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the array has no bars.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`, if in range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<T> {
        self.values.get(index).copied()
    }

    /// Borrow the values.
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Consume into the underlying values.
    pub fn into_vec(self) -> Vec<T> {
        self.values
    }

    /// Whether the values are in ascending order.
    pub fn is_sorted(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }

    /// Overwrite the value at `index`. Returns false when out of range.
    pub(crate) fn set(&mut self, index: usize, value: T) -> bool {
        match self.values.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Copy of the inclusive range `start..=end`.
    pub(crate) fn copy_range(&self, start: usize, end: usize) -> Vec<T> {
        self.values[start..=end].to_vec()
    }
}

impl ArrayState<u32> {
    /// Build from caller-supplied values, rejecting zero heights.
    pub fn from_heights(values: Vec<u32>) -> Result<Self, SortError> {
        if let Some(index) = values.iter().position(|&v| v == 0) {
            return Err(SortError::InvalidValue { index });
        }
        Ok(Self { values })
    }

    /// `len` values drawn uniformly from `heights`.
    pub fn random<R: Rng + ?Sized>(
        len: usize,
        heights: RangeInclusive<u32>,
        rng: &mut R,
    ) -> Result<Self, SortError> {
        let (min, max) = (*heights.start(), *heights.end());
        if min == 0 || min > max {
            return Err(SortError::InvalidHeightRange { min, max });
        }
        let values = (0..len).map(|_| rng.random_range(min..=max)).collect();
        Ok(Self { values })
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn random_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let arr = ArrayState::random(200, 10..=390, &mut rng).unwrap();
        assert_eq!(arr.len(), 200);
        assert!(arr.as_slice().iter().all(|v| (10..=390).contains(v)));
    }

    #[test]
    fn random_rejects_bad_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(matches!(
            ArrayState::random(4, 0..=10, &mut rng),
            Err(SortError::InvalidHeightRange { min: 0, max: 10 })
        ));
        #[allow(clippy::reversed_empty_ranges)]
        let empty = 20..=10;
        assert!(ArrayState::random(4, empty, &mut rng).is_err());
    }

    #[test]
    fn random_zero_length_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let arr = ArrayState::random(0, 10..=20, &mut rng).unwrap();
        assert!(arr.is_empty());
        assert!(arr.is_sorted());
    }

    #[test]
    fn from_heights_rejects_zero() {
        let err = ArrayState::from_heights(vec![3, 0, 2]).unwrap_err();
        assert!(matches!(err, SortError::InvalidValue { index: 1 }));
        assert!(ArrayState::from_heights(vec![3, 1, 2]).is_ok());
    }

    #[test]
    fn set_out_of_range_is_refused() {
        let mut arr = ArrayState::new(vec![1u32, 2]);
        assert!(!arr.set(2, 9));
        assert!(arr.set(1, 9));
        assert_eq!(arr.as_slice(), &[1, 9]);
    }
}
