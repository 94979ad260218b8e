//! # Unit Types
//!
//! Lightweight metric wrappers used where unit confusion is easy: the design
//! works in millimetres and mm², the quantity take-off reports in metres,
//! m² and m³.
//!
//! ## Example
//!
//! ```rust
//! use rcbeam_core::units::{Meters, Millimeters, SquareMeters, SquareMillimeters};
//!
//! let span: Meters = Millimeters(8619.0).into();
//! assert!((span.0 - 8.619).abs() < 1e-12);
//!
//! let section: SquareMeters = SquareMillimeters(400.0 * 750.0).into();
//! let volume = section * span;
//! assert!((volume.0 - 2.5857).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1e3)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1e3)
    }
}

// ============================================================================
// Area and Volume Units
// ============================================================================

/// Area in square millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMillimeters(pub f64);

/// Area in square metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

/// Volume in cubic metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

impl From<SquareMillimeters> for SquareMeters {
    fn from(mm2: SquareMillimeters) -> Self {
        SquareMeters(mm2.0 / 1e6)
    }
}

impl Add for SquareMillimeters {
    type Output = SquareMillimeters;
    fn add(self, rhs: Self) -> Self::Output {
        SquareMillimeters(self.0 + rhs.0)
    }
}

impl Mul<Meters> for SquareMeters {
    type Output = CubicMeters;
    fn mul(self, rhs: Meters) -> Self::Output {
        CubicMeters(self.0 * rhs.0)
    }
}

// ============================================================================
// Rounding
// ============================================================================

/// Round to a fixed number of decimal places.
///
/// Exact ties go to the even neighbour, so `0.0625` rounds to `0.062`.
///
/// ```rust
/// use rcbeam_core::units::round_to;
///
/// assert_eq!(round_to(95.3323, 1), 95.3);
/// assert_eq!(round_to(2.5857, 3), 2.586);
/// assert_eq!(round_to(0.0625, 3), 0.062);
/// ```
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_conversion() {
        let m: Meters = Millimeters(750.0).into();
        assert!((m.0 - 0.75).abs() < 1e-12);
        let mm: Millimeters = Meters(8.619).into();
        assert!((mm.0 - 8619.0).abs() < 1e-9);
    }

    #[test]
    fn test_area_to_volume() {
        let area: SquareMeters = SquareMillimeters(300_000.0).into();
        let volume = area * Meters(2.0);
        assert!((volume.0 - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(83.5031, 1), 83.5);
        assert_eq!(round_to(0.0004, 3), 0.0);
        assert_eq!(round_to(0.0776, 3), 0.078);
        assert_eq!(round_to(-1.26, 1), -1.3);
    }

    #[test]
    fn test_round_to_ties_even() {
        assert_eq!(round_to(0.0625, 3), 0.062);
        assert_eq!(round_to(0.1875, 3), 0.188);
        assert_eq!(round_to(2.5, 0), 2.0);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Millimeters(400.0)).unwrap();
        assert_eq!(json, "400.0");
    }
}
