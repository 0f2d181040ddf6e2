//! Filtering algorithms for sensor data
pub mod circular_buffer;
pub mod error;
pub mod sample;
pub mod sensor_filter;

pub use circular_buffer::{CircularBuffer, DEFAULT_CAPACITY};
pub use error::FilterError;
pub use sample::Sample;
pub use sensor_filter::SensorFilter;

/// A generic filter interface
pub trait Filter<T> {
    /// Feed one input and return the filtered value
    fn filter(&mut self, input: T) -> T;

    /// Forget all accumulated history
    fn reset(&mut self);

    /// Get the name of this filter
    fn name(&self) -> &str;
}
