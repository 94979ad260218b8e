//! Standard Reinforcing Bar Sizes
//!
//! High-yield deformed bars are designated by a "T" prefix and the nominal
//! diameter in millimetres (T16 = 16 mm). Each design stage searches its own
//! subset of the catalog:
//!
//! - Flexural bars: T16 to T32
//! - Shear links: T12 and T16
//! - Side-face bars: T16 to T32
//!
//! Link and side-face spacings are drawn from [`SPACING_STEPS_MM`].

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Standard link and side-face bar spacings, widest first (mm)
pub const SPACING_STEPS_MM: [u32; 5] = [250, 200, 150, 125, 100];

/// Standard bar size designation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BarSize {
    /// 10 mm bar
    T10,
    /// 12 mm bar
    T12,
    /// 16 mm bar
    T16,
    /// 20 mm bar
    T20,
    /// 25 mm bar
    T25,
    /// 32 mm bar
    T32,
}

impl BarSize {
    /// All catalog sizes in ascending diameter
    pub const ALL: [BarSize; 6] = [
        BarSize::T10,
        BarSize::T12,
        BarSize::T16,
        BarSize::T20,
        BarSize::T25,
        BarSize::T32,
    ];

    /// Sizes used for longitudinal top/bottom bars
    pub const FLEXURAL: [BarSize; 4] = [BarSize::T16, BarSize::T20, BarSize::T25, BarSize::T32];

    /// Sizes used for shear links
    pub const LINKS: [BarSize; 2] = [BarSize::T12, BarSize::T16];

    /// Sizes used for side-face bars
    pub const SIDEFACE: [BarSize; 4] = [BarSize::T16, BarSize::T20, BarSize::T25, BarSize::T32];

    /// Nominal diameter in mm
    pub fn diameter_mm(&self) -> u32 {
        match self {
            BarSize::T10 => 10,
            BarSize::T12 => 12,
            BarSize::T16 => 16,
            BarSize::T20 => 20,
            BarSize::T25 => 25,
            BarSize::T32 => 32,
        }
    }

    /// Nominal cross-sectional area in mm² (πd²/4)
    pub fn area_mm2(&self) -> f64 {
        let d = self.diameter_mm() as f64;
        PI * d * d / 4.0
    }

    /// Smallest size in a catalog slice
    pub fn smallest(sizes: &[BarSize]) -> Option<BarSize> {
        sizes.iter().copied().min()
    }
}

impl fmt::Display for BarSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.diameter_mm())
    }
}

/// A group of identical bars, e.g. "3T25"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BarGroup {
    /// Number of bars
    pub count: u32,
    /// Bar size
    pub size: BarSize,
}

impl BarGroup {
    pub fn new(count: u32, size: BarSize) -> Self {
        BarGroup { count, size }
    }

    /// Total nominal area of the group in mm²
    pub fn area_mm2(&self) -> f64 {
        self.count as f64 * self.size.area_mm2()
    }
}

impl fmt::Display for BarGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_areas() {
        assert!((BarSize::T16.area_mm2() - 201.06).abs() < 0.01);
        assert!((BarSize::T25.area_mm2() - 490.87).abs() < 0.01);
        assert!((BarSize::T12.area_mm2() - 113.10).abs() < 0.01);
    }

    #[test]
    fn test_catalogs_are_ascending() {
        for catalog in [&BarSize::FLEXURAL[..], &BarSize::LINKS[..], &BarSize::SIDEFACE[..]] {
            assert!(catalog.windows(2).all(|w| w[0].diameter_mm() < w[1].diameter_mm()));
            assert!(catalog.iter().all(|size| BarSize::ALL.contains(size)));
        }
        assert!(SPACING_STEPS_MM.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_display() {
        assert_eq!(BarSize::T25.to_string(), "T25");
        assert_eq!(BarGroup::new(3, BarSize::T16).to_string(), "3T16");
    }

    #[test]
    fn test_smallest() {
        assert_eq!(BarSize::smallest(&BarSize::LINKS), Some(BarSize::T12));
        assert_eq!(BarSize::smallest(&[]), None);
    }
}
