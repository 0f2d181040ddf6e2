//! Perception module for the tracking pipeline
pub mod config;
pub mod filters;
pub mod sensors;

use self::config::FilterConfig;
use self::filters::{FilterError, SensorFilter};
use crate::common::types::{ImuSample, Vec3};
use crate::lifecycle::{LifecycleNode, LifecycleNodeBase, State};
use log::{info, warn};
use std::any::Any;
use std::collections::HashMap;

/// Perception stack: smooths each incoming IMU channel independently
pub struct PerceptionStack {
    base: LifecycleNodeBase,
    config: FilterConfig,
    gyro: SensorFilter<Vec3>,
    accel: SensorFilter<Vec3>,
    orientation: SensorFilter<Vec3>,
    dropped: u64,
    drop_warned: bool,
}

impl PerceptionStack {
    /// Create a new perception stack with default window sizes
    pub fn new() -> Result<Self, FilterError> {
        Self::with_config(FilterConfig::default())
    }

    /// Create a new perception stack with the given window sizes
    pub fn with_config(config: FilterConfig) -> Result<Self, FilterError> {
        Ok(PerceptionStack {
            base: LifecycleNodeBase::new("perception_stack"),
            config,
            gyro: SensorFilter::new(config.gyro_capacity)?,
            accel: SensorFilter::new(config.accel_capacity)?,
            orientation: SensorFilter::new(config.orientation_capacity)?,
            dropped: 0,
            drop_warned: false,
        })
    }

    /// Update the filter configuration; takes effect on the next configure
    pub fn configure_filters(&mut self, params: &HashMap<String, f64>) -> Result<(), String> {
        self.config.apply(params).map_err(|e| e.to_string())
    }

    pub fn config(&self) -> FilterConfig {
        self.config
    }

    pub fn state(&self) -> State {
        self.base.get_state()
    }

    /// Feed one tick of sensor data. Samples are dropped unless the stack is active.
    ///
    /// The first drop after each state change is logged; later ones are only counted.
    pub fn push_imu(&mut self, sample: ImuSample) -> bool {
        if !self.base.is_active() {
            self.dropped += 1;
            if !self.drop_warned {
                self.drop_warned = true;
                warn!(
                    "{}: dropping samples while {:?} ({} dropped so far)",
                    self.base.name,
                    self.base.get_state(),
                    self.dropped
                );
            }
            return false;
        }

        self.gyro.push(sample.gyro);
        self.accel.push(sample.accel);
        self.orientation.push(sample.orientation);
        true
    }

    /// Most recent raw sample, if any
    pub fn latest(&self) -> Option<ImuSample> {
        if self.gyro.is_empty() {
            return None;
        }
        Some(ImuSample {
            gyro: self.gyro.peek_back(),
            accel: self.accel.peek_back(),
            orientation: self.orientation.peek_back(),
        })
    }

    /// Mean angular velocity over the gyro window
    pub fn smoothed_gyro(&self) -> Vec3 {
        self.gyro.mean()
    }

    /// Mean acceleration over the accel window
    pub fn smoothed_accel(&self) -> Vec3 {
        self.accel.mean()
    }

    /// Mean orientation over the orientation window
    pub fn smoothed_orientation(&self) -> Vec3 {
        self.orientation.mean()
    }

    /// Change in orientation per tick, estimated over the last five samples
    pub fn orientation_rate(&self) -> Vec3 {
        self.orientation.savitzky_golay_derivative5()
    }

    /// Number of samples in the gyro window
    pub fn sample_count(&self) -> usize {
        self.gyro.size()
    }

    pub fn dropped_samples(&self) -> u64 {
        self.dropped
    }

    // All three windows are replaced together or not at all
    fn rebuild_filters(&mut self) -> Result<(), FilterError> {
        let gyro = SensorFilter::new(self.config.gyro_capacity)?;
        let accel = SensorFilter::new(self.config.accel_capacity)?;
        let orientation = SensorFilter::new(self.config.orientation_capacity)?;
        self.gyro = gyro;
        self.accel = accel;
        self.orientation = orientation;
        Ok(())
    }
}

impl LifecycleNode for PerceptionStack {
    fn on_configure(&mut self) -> Result<(), String> {
        info!("Configuring perception stack");
        if self.base.is_active() {
            return Err("Perception stack must be deactivated before reconfiguring".to_string());
        }
        self.rebuild_filters().map_err(|e| e.to_string())?;
        self.base
            .transition(&[State::Unconfigured, State::Inactive], State::Inactive)?;
        self.drop_warned = false;
        Ok(())
    }

    fn on_activate(&mut self) -> Result<(), String> {
        info!("Activating perception stack");
        self.base
            .transition(&[State::Inactive, State::Active], State::Active)?;
        self.drop_warned = false;
        Ok(())
    }

    fn on_deactivate(&mut self) -> Result<(), String> {
        info!("Deactivating perception stack");
        self.base.set_state(State::Inactive);
        self.drop_warned = false;
        Ok(())
    }

    fn on_cleanup(&mut self) -> Result<(), String> {
        info!("Cleaning up perception stack");
        self.gyro.clear();
        self.accel.clear();
        self.orientation.clear();
        self.base.set_state(State::Unconfigured);
        self.drop_warned = false;
        Ok(())
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
