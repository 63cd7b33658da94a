//! Unit types for rail quantities.
//!
//! Type-safe linear distances and motor step counts so millimeters,
//! microns and steps cannot be mixed up at API boundaries.

use core::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Linear distance in millimeters.
///
/// Used for positions and relative moves along the rail.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Millimeters(pub f32);

impl Millimeters {
    /// Convert to a step count, truncating toward zero.
    #[inline]
    pub fn to_steps(self, steps_per_mm: i32) -> Steps {
        Steps((self.0 * steps_per_mm as f32) as i64)
    }

    /// Absolute distance.
    #[inline]
    pub fn abs(self) -> Self {
        Self(libm::fabsf(self.0))
    }

    /// Clamp into `[min, max]`.
    #[inline]
    pub fn clamp(self, min: f32, max: f32) -> Self {
        Self(self.0.max(min).min(max))
    }
}

impl Add for Millimeters {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Millimeters {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Millimeters {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

/// Linear distance in microns.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Microns(pub f32);

impl Microns {
    /// Convert to millimeters.
    #[inline]
    pub fn to_mm(self) -> Millimeters {
        Millimeters(self.0 / 1000.0)
    }

    /// Convert to a whole number of steps, truncating toward zero.
    #[inline]
    pub fn to_steps(self, steps_per_mm: i32) -> u32 {
        let steps = self.0 * steps_per_mm as f32 / 1000.0;
        if steps > 0.0 {
            steps as u32
        } else {
            0
        }
    }
}

/// Motor position or move length in steps.
///
/// Uses i64 for unlimited range in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Steps(pub i64);

impl Steps {
    /// Get absolute value as u64.
    #[inline]
    pub fn abs(self) -> u64 {
        self.0.unsigned_abs()
    }
}

impl Add for Steps {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}
