//! Filter configuration for the perception stack

use super::filters::{FilterError, DEFAULT_CAPACITY};
use log::debug;
use std::collections::HashMap;

/// Window sizes for each filtered channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterConfig {
    pub gyro_capacity: usize,
    pub accel_capacity: usize,
    pub orientation_capacity: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            gyro_capacity: DEFAULT_CAPACITY,
            accel_capacity: DEFAULT_CAPACITY,
            orientation_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl FilterConfig {
    /// Build a configuration from a parameter map, starting from the defaults.
    ///
    /// Recognized keys are `gyro_capacity`, `accel_capacity` and
    /// `orientation_capacity`; anything else is ignored.
    pub fn from_params(params: &HashMap<String, f64>) -> Result<Self, FilterError> {
        let mut config = FilterConfig::default();
        config.apply(params)?;
        Ok(config)
    }

    /// Override fields named in `params`, leaving the rest untouched.
    ///
    /// Either every named field is applied or, on error, none is.
    pub fn apply(&mut self, params: &HashMap<String, f64>) -> Result<(), FilterError> {
        let mut next = *self;
        if let Some(&value) = params.get("gyro_capacity") {
            next.gyro_capacity = capacity_param("gyro_capacity", value)?;
        }

        if let Some(&value) = params.get("accel_capacity") {
            next.accel_capacity = capacity_param("accel_capacity", value)?;
        }

        if let Some(&value) = params.get("orientation_capacity") {
            next.orientation_capacity = capacity_param("orientation_capacity", value)?;
        }

        *self = next;
        debug!("filter configuration: {:?}", self);
        Ok(())
    }
}

fn capacity_param(name: &str, value: f64) -> Result<usize, FilterError> {
    if value == 0.0 {
        return Err(FilterError::ZeroCapacity);
    }
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(FilterError::InvalidParameter {
            name: name.to_string(),
            value,
        });
    }
    Ok(value as usize)
}
