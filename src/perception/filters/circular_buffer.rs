//! Fixed-capacity ring store indexed by sample age

use super::error::FilterError;
use super::sample::Sample;

/// Capacity used when a configuration does not name one
pub const DEFAULT_CAPACITY: usize = 20;

/// A fixed-size circular buffer.
///
/// Elements are addressed by logical age: 0 is the most recent write, 1 the
/// write before it, and so on. Once full, each write overwrites the oldest
/// slot. The buffer is deliberately not `Clone` and has no `Default`.
#[derive(Debug)]
pub struct CircularBuffer<T> {
    elements: Box<[T]>,
    last_index: Option<usize>,
    count: usize,
}

impl<T: Sample> CircularBuffer<T> {
    /// Create a buffer holding up to `capacity` elements, all slots zeroed
    pub fn new(capacity: usize) -> Result<Self, FilterError> {
        if capacity == 0 {
            return Err(FilterError::ZeroCapacity);
        }

        let mut elements = Vec::new();
        elements
            .try_reserve_exact(capacity)
            .map_err(|source| FilterError::Allocation { capacity, source })?;
        elements.resize(capacity, T::zero());

        Ok(CircularBuffer {
            elements: elements.into_boxed_slice(),
            last_index: None,
            count: 0,
        })
    }

    /// Write a new element.
    ///
    /// Returns the displaced element only if the buffer was already full;
    /// slots that were never logically filled are not reported.
    pub fn add_element(&mut self, value: T) -> Option<T> {
        let was_full = self.is_full();
        let index = match self.last_index {
            Some(last) => (last + 1) % self.capacity(),
            None => 0,
        };
        self.last_index = Some(index);

        let previous = std::mem::replace(&mut self.elements[index], value);
        if self.count < self.capacity() {
            self.count += 1;
        }

        was_full.then_some(previous)
    }

    /// Element at logical age `age`, or zero if the buffer holds fewer elements
    pub fn get_prev(&self, age: usize) -> T {
        match self.last_index {
            Some(last) if age < self.count => {
                let capacity = self.capacity();
                self.elements[(last + capacity - age) % capacity]
            }
            _ => T::zero(),
        }
    }

    /// Iterate over the retained elements, most recent first
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.count).map(move |age| self.get_prev(age))
    }

    /// Retained elements in physical slot order.
    ///
    /// Writes fill slots from 0 before the first wraparound, so the first
    /// `len()` slots always hold exactly the retained elements.
    pub fn slots(&self) -> &[T] {
        &self.elements[..self.count]
    }

    /// Forget all elements; storage is kept for reuse
    pub fn clear(&mut self) {
        self.count = 0;
        self.last_index = None;
    }

    pub fn capacity(&self) -> usize {
        self.elements.len()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == self.capacity()
    }

    /// Physical slot of the most recent write
    pub fn last_index(&self) -> Option<usize> {
        self.last_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            CircularBuffer::<f64>::new(0),
            Err(FilterError::ZeroCapacity)
        ));
    }

    #[test]
    fn test_fresh_buffer() {
        let buffer = CircularBuffer::<f64>::new(4).unwrap();
        assert_eq!(buffer.capacity(), 4);
        assert!(buffer.is_empty());
        assert_eq!(buffer.last_index(), None);
        assert_eq!(buffer.get_prev(0), 0.0);
    }

    #[test]
    fn test_eviction_only_reported_when_full() {
        let mut buffer = CircularBuffer::<i32>::new(2).unwrap();
        assert_eq!(buffer.add_element(1), None);
        assert_eq!(buffer.add_element(2), None);
        assert_eq!(buffer.add_element(3), Some(1));
        assert_eq!(buffer.add_element(4), Some(2));
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_ages_across_wraparound() {
        let mut buffer = CircularBuffer::<i32>::new(3).unwrap();
        for v in 1..=5 {
            buffer.add_element(v);
        }
        // Slots now hold [4, 5, 3]
        assert_eq!(buffer.last_index(), Some(1));
        assert_eq!(buffer.get_prev(0), 5);
        assert_eq!(buffer.get_prev(1), 4);
        assert_eq!(buffer.get_prev(2), 3);
        assert_eq!(buffer.get_prev(3), 0);
        assert_eq!(buffer.iter().collect::<Vec<_>>(), vec![5, 4, 3]);
        assert_eq!(buffer.slots(), &[4, 5, 3]);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut buffer = CircularBuffer::<i32>::new(3).unwrap();
        buffer.add_element(7);
        buffer.add_element(8);
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 3);
        assert_eq!(buffer.get_prev(0), 0);

        // Stale slots are not reported as evictions after a clear
        assert_eq!(buffer.add_element(9), None);
        assert_eq!(buffer.last_index(), Some(0));
        assert_eq!(buffer.get_prev(0), 9);
        assert_eq!(buffer.get_prev(1), 0);
        assert_eq!(buffer.slots(), &[9]);
    }
}
