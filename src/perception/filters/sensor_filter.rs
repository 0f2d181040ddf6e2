//! Running statistics over the most recent sensor samples

use super::circular_buffer::CircularBuffer;
use super::error::FilterError;
use super::sample::Sample;
use super::Filter;
use log::trace;

/// A buffer of sensor data taken over time with cached running statistics.
///
/// The running sum is maintained incrementally on every push and recomputed
/// exactly each time the write index wraps back to slot 0, which bounds the
/// rounding error to one lap of the buffer.
#[derive(Debug)]
pub struct SensorFilter<T> {
    buffer: CircularBuffer<T>,
    running_total: T,
}

impl<T: Sample> SensorFilter<T> {
    /// Create a new filter over the last `capacity` samples
    pub fn new(capacity: usize) -> Result<Self, FilterError> {
        Ok(SensorFilter {
            buffer: CircularBuffer::new(capacity)?,
            running_total: T::zero(),
        })
    }

    /// Add a new sample and update the running sum
    pub fn push(&mut self, value: T) {
        if let Some(evicted) = self.buffer.add_element(value) {
            self.running_total -= evicted;
        }
        self.running_total += value;

        if self.buffer.last_index() == Some(0) {
            self.resync();
        }
    }

    // Replace the accumulated total with an exact sum of the retained samples,
    // folded in slot order
    fn resync(&mut self) {
        let mut total = T::zero();
        for &sample in self.buffer.slots() {
            total += sample;
        }
        self.running_total = total;
        trace!("resynced running total over {} samples", self.buffer.len());
    }

    /// Most recent sample, or zero if nothing was pushed
    pub fn peek_back(&self) -> T {
        self.buffer.get_prev(0)
    }

    /// Sample pushed `age` steps ago, or zero if it is no longer retained
    pub fn get_prev(&self, age: usize) -> T {
        self.buffer.get_prev(age)
    }

    /// Sum of the retained samples
    pub fn total(&self) -> T {
        self.running_total
    }

    /// Mean of the retained samples, or zero when empty
    pub fn mean(&self) -> T {
        if self.buffer.is_empty() {
            T::zero()
        } else {
            self.running_total.div_count(self.buffer.len())
        }
    }

    /// Mean of the `n` most recent samples (fewer if not yet available)
    pub fn mean_of_last(&self, n: usize) -> T {
        let n = n.min(self.buffer.len());
        if n == 0 {
            return T::zero();
        }
        if n == self.buffer.len() {
            return self.mean();
        }

        let mut total = T::zero();
        for sample in self.buffer.iter().take(n) {
            total += sample;
        }
        total.div_count(n)
    }

    /// Four point Savitzky-Golay smoothing of the latest sample
    pub fn savitzky_golay_smooth4(&self) -> T {
        self.weighted(&[0.7, 0.4, 0.1, -0.2])
    }

    /// Eight point Savitzky-Golay smoothing of the latest sample
    pub fn savitzky_golay_smooth8(&self) -> T {
        self.weighted(&[
            0.41667, 0.33333, 0.25, 0.16667, 0.08333, 0.0, -0.08333, -0.16667,
        ])
    }

    /// Four point Savitzky-Golay first derivative, per sample step
    pub fn savitzky_golay_derivative4(&self) -> T {
        self.weighted(&[0.3, 0.1, -0.1, -0.3])
    }

    /// Five point Savitzky-Golay first derivative, per sample step
    pub fn savitzky_golay_derivative5(&self) -> T {
        self.weighted(&[0.2, 0.1, 0.0, -0.1, -0.2])
    }

    // Weighted sum over the latest samples, weights[0] applying to age 0.
    // Zero when the history is shorter than the window.
    fn weighted(&self, weights: &[f64]) -> T {
        if self.buffer.len() < weights.len() {
            return T::zero();
        }

        let mut acc = T::zero();
        for (age, &weight) in weights.iter().enumerate() {
            if weight != 0.0 {
                acc += self.buffer.get_prev(age).scale(weight);
            }
        }
        acc
    }

    /// Number of retained samples
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.buffer.is_full()
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Drop all samples and reset the running sum
    pub fn clear(&mut self) {
        self.running_total = T::zero();
        self.buffer.clear();
    }
}

impl<T: Sample> Filter<T> for SensorFilter<T> {
    fn filter(&mut self, input: T) -> T {
        self.push(input);
        self.mean()
    }

    fn reset(&mut self) {
        self.clear();
    }

    fn name(&self) -> &str {
        "SensorFilter"
    }
}
