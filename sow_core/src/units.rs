//! # Unit Types
//!
//! Type-safe wrappers for the engineering units used in wind-uplift work.
//! These provide compile-time safety against unit confusion while remaining
//! lightweight (just f64 wrappers).
//!
//! ## Design Philosophy
//!
//! We use simple newtype wrappers rather than a full units library because:
//! - Roofing wind calculations use a small, fixed set of units
//! - We want JSON serialization to be clean (just numbers)
//! - Minimal runtime overhead
//!
//! ## US Customary Units (Primary)
//!
//! US customary units are used internally as this matches US building codes:
//! - Length: feet (ft), inches (in)
//! - Pressure: pounds per square foot (psf)
//! - Wind speed: miles per hour (mph)
//! - Area: square feet (sqft)
//! - Roof slope: degrees
//!
//! ## Example
//!
//! ```rust
//! use sow_core::units::{Feet, Inches, Psf};
//!
//! let height = Feet(42.0);
//! let height_in: Inches = height.into();
//! assert_eq!(height_in.0, 504.0);
//!
//! let uplift = Psf(-58.3); // negative = suction
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / 12.0)
    }
}

// ============================================================================
// Pressure and Speed Units
// ============================================================================

/// Pressure in pounds per square foot (psf)
///
/// Sign convention follows ASCE 7: negative values are uplift/suction
/// acting away from the roof surface.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Psf(pub f64);

/// Wind speed in miles per hour (mph)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mph(pub f64);

// ============================================================================
// Area and Angle Units
// ============================================================================

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

/// Angle in degrees (roof slope)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

impl Psf {
    /// Magnitude of the pressure, ignoring sign convention
    pub fn magnitude(self) -> f64 {
        self.0.abs()
    }

    /// True when the pressure acts away from the surface (suction)
    pub fn is_uplift(self) -> bool {
        self.0 < 0.0
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Feet);
impl_arithmetic!(Inches);
impl_arithmetic!(Psf);
impl_arithmetic!(Mph);
impl_arithmetic!(SqFt);
impl_arithmetic!(Degrees);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feet_to_inches() {
        let ft = Feet(10.0);
        let inches: Inches = ft.into();
        assert_eq!(inches.0, 120.0);
    }

    #[test]
    fn test_uplift_sign_convention() {
        let suction = Psf(-32.5);
        assert!(suction.is_uplift());
        assert_eq!(suction.magnitude(), 32.5);

        let positive = Psf(12.0);
        assert!(!positive.is_uplift());
    }

    #[test]
    fn test_arithmetic() {
        let a = Feet(10.0);
        let b = Feet(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
    }

    #[test]
    fn test_serialization() {
        let v = Mph(140.0);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "140.0");

        let roundtrip: Mph = serde_json::from_str(&json).unwrap();
        assert_eq!(v, roundtrip);
    }
}
