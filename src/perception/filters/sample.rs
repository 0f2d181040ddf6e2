//! Numeric bound for values stored in sensor filters

use nalgebra::{Vector2, Vector3, Vector4};
use std::ops::{AddAssign, SubAssign};

/// A value that can be accumulated by a [`SensorFilter`](super::SensorFilter).
///
/// `zero` is both the additive identity used to reset running totals and the
/// value returned when a filter is asked for history it does not have.
pub trait Sample: Copy + AddAssign + SubAssign {
    /// Additive identity
    fn zero() -> Self;

    /// Divide by a sample count, as a floating point division
    fn div_count(self, count: usize) -> Self;

    /// Multiply by a floating point weight
    fn scale(self, factor: f64) -> Self;
}

impl Sample for f64 {
    fn zero() -> Self {
        0.0
    }

    fn div_count(self, count: usize) -> Self {
        self / count as f64
    }

    fn scale(self, factor: f64) -> Self {
        self * factor
    }
}

impl Sample for f32 {
    fn zero() -> Self {
        0.0
    }

    fn div_count(self, count: usize) -> Self {
        self / count as f32
    }

    fn scale(self, factor: f64) -> Self {
        self * factor as f32
    }
}

// Integer samples accumulate with the type's own `+=`/`-=`: a window whose
// running total leaves the type's range overflows (a panic in debug builds).
// `div_count` and `scale` go through f64, which is exact only up to 2^53, so
// i64 totals beyond that lose their low bits in `mean` and the history filters.
macro_rules! impl_integer_sample {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                fn zero() -> Self {
                    0
                }

                // Truncates toward zero, same as casting the float quotient back
                fn div_count(self, count: usize) -> Self {
                    (self as f64 / count as f64) as $t
                }

                fn scale(self, factor: f64) -> Self {
                    (self as f64 * factor) as $t
                }
            }
        )*
    };
}

impl_integer_sample!(i32, i64);

macro_rules! impl_vector_sample {
    ($($v:ident<$n:ty>),*) => {
        $(
            impl Sample for $v<$n> {
                fn zero() -> Self {
                    $v::zeros()
                }

                fn div_count(self, count: usize) -> Self {
                    self / count as $n
                }

                fn scale(self, factor: f64) -> Self {
                    self * factor as $n
                }
            }
        )*
    };
}

impl_vector_sample!(
    Vector2<f32>,
    Vector2<f64>,
    Vector3<f32>,
    Vector3<f64>,
    Vector4<f32>,
    Vector4<f64>
);
