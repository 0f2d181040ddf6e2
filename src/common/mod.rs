//! Common utilities and types for the tracking pipeline

/// Common types and utilities used across the codebase
pub mod types {
    use nalgebra::Vector3;

    /// A 3-axis reading (x, y, z)
    pub type Vec3 = Vector3<f64>;

    /// One tick of inertial and pose data
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct ImuSample {
        /// Angular velocity in rad/s
        pub gyro: Vec3,
        /// Linear acceleration in m/s^2
        pub accel: Vec3,
        /// Orientation as (yaw, pitch, roll) in radians
        pub orientation: Vec3,
    }
}
