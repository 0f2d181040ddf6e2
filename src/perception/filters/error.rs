//! Errors raised while building filters

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors produced when constructing or configuring sensor filters
#[derive(Debug, Error)]
pub enum FilterError {
    /// A ring store needs room for at least one sample
    #[error("filter capacity must be positive")]
    ZeroCapacity,

    /// The backing storage could not be reserved
    #[error("failed to allocate storage for {capacity} samples")]
    Allocation {
        capacity: usize,
        #[source]
        source: TryReserveError,
    },

    /// A configuration parameter had an unusable value
    #[error("invalid value {value} for parameter `{name}`")]
    InvalidParameter { name: String, value: f64 },
}
