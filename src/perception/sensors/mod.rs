//! Sensor interfaces for the tracking pipeline

use crate::common::types::{ImuSample, Vec3};

/// A generic sensor interface
pub trait Sensor {
    /// Reading produced by this sensor
    type Reading;

    /// Get the sensor name
    fn name(&self) -> &str;

    /// Read the next sample, if one is available
    fn poll(&mut self) -> Result<Option<Self::Reading>, String>;
}

/// Deterministic IMU source: a slow yaw sweep with a fixed tremor on top.
///
/// Used to drive the filters without hardware attached.
#[derive(Debug)]
pub struct SyntheticImu {
    tick: u64,
    rate_hz: f64,
    yaw_rate: f64,
    tremor: f64,
    limit: Option<u64>,
}

impl SyntheticImu {
    /// Create a source sampling at `rate_hz`, turning at `yaw_rate` rad/s
    pub fn new(rate_hz: f64, yaw_rate: f64) -> Self {
        SyntheticImu {
            tick: 0,
            rate_hz,
            yaw_rate,
            tremor: 0.05,
            limit: None,
        }
    }

    /// Stop producing samples after `ticks` readings
    pub fn with_limit(mut self, ticks: u64) -> Self {
        self.limit = Some(ticks);
        self
    }

    /// Amplitude of the alternating tremor added to the gyro signal
    pub fn with_tremor(mut self, tremor: f64) -> Self {
        self.tremor = tremor;
        self
    }

    fn sample_at(&self, tick: u64) -> ImuSample {
        let t = tick as f64 / self.rate_hz;
        let jitter = if tick % 2 == 0 { self.tremor } else { -self.tremor };

        ImuSample {
            gyro: Vec3::new(0.0, 0.0, self.yaw_rate + jitter),
            accel: Vec3::new(0.0, 0.0, 9.81),
            orientation: Vec3::new(self.yaw_rate * t, 0.0, 0.0),
        }
    }
}

impl Sensor for SyntheticImu {
    type Reading = ImuSample;

    fn name(&self) -> &str {
        "synthetic_imu"
    }

    fn poll(&mut self) -> Result<Option<ImuSample>, String> {
        if self.rate_hz <= 0.0 {
            return Err("Sample rate must be positive".to_string());
        }
        if self.limit.is_some_and(|limit| self.tick >= limit) {
            return Ok(None);
        }

        let sample = self.sample_at(self.tick);
        self.tick += 1;
        Ok(Some(sample))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_imu_alternates_tremor() {
        let mut imu = SyntheticImu::new(100.0, 1.0).with_tremor(0.5).with_limit(2);
        let first = imu.poll().unwrap().unwrap();
        let second = imu.poll().unwrap().unwrap();
        assert_eq!(first.gyro.z, 1.5);
        assert_eq!(second.gyro.z, 0.5);
        assert!((second.orientation.x - 0.01).abs() < 1e-12);
        assert_eq!(imu.poll().unwrap(), None);
    }

    #[test]
    fn test_invalid_rate() {
        let mut imu = SyntheticImu::new(0.0, 1.0);
        assert!(imu.poll().is_err());
    }
}
