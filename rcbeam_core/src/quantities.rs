//! # Material Quantities
//!
//! Concrete and reinforcement take-off for a designed beam, in m² and m³.
//!
//! Areas are cross-sectional sums of the provided steel; volumes multiply an
//! area by the span. Reported values are rounded to three decimals and each
//! volume is computed from the rounded area, so the take-off reads
//! consistently in the schedule. A zero span gives zero volumes.
//!
//! Link areas are summed per zone as mm²/m and reported without conversion
//! to an actual link length; see DESIGN.md.

use serde::{Deserialize, Serialize};

use crate::design::BeamDesign;
use crate::units::{round_to, CubicMeters, Meters, Millimeters, SquareMeters, SquareMillimeters};

const DECIMALS: i32 = 3;

/// Quantity take-off for one beam.
///
/// ## JSON Example
///
/// ```json
/// {
///   "concrete_area": 0.3,
///   "concrete_volume": 2.586,
///   "flexural_area": 0.009,
///   "flexural_volume": 0.078,
///   "shear_area": 0.005,
///   "shear_volume": 0.039,
///   "sideface_area": 0.000804,
///   "sideface_volume": 0.007,
///   "total_area": 0.015,
///   "total_volume": 0.124
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamQuantities {
    pub concrete_area: SquareMeters,
    pub concrete_volume: CubicMeters,
    pub flexural_area: SquareMeters,
    pub flexural_volume: CubicMeters,
    pub shear_area: SquareMeters,
    pub shear_volume: CubicMeters,
    /// Not rounded: a single side-face selection is usually well below 0.001 m²
    pub sideface_area: SquareMeters,
    pub sideface_volume: CubicMeters,
    pub total_area: SquareMeters,
    pub total_volume: CubicMeters,
}

impl BeamQuantities {
    pub fn from_design(design: &BeamDesign) -> Self {
        let input = &design.input;
        let span: Meters = Millimeters(input.span_mm).into();

        let concrete_area: SquareMeters = SquareMillimeters(input.section_area_mm2()).into();
        let concrete_volume = rounded_volume(concrete_area, span);

        let flexural_sum: f64 = design.flexure.selections().map(|s| s.provided_area_mm2).sum();
        let flexural_area = rounded_area(SquareMillimeters(flexural_sum));
        let flexural_volume = rounded_volume(flexural_area, span);

        let shear_sum: f64 = design.shear.links.values().map(|l| l.provided_area).sum();
        let shear_area = rounded_area(SquareMillimeters(shear_sum));
        let shear_volume = if span.0 > 0.0 {
            CubicMeters(round_to(shear_sum * span.0 / 1e6, DECIMALS))
        } else {
            CubicMeters(0.0)
        };

        let sideface_area: SquareMeters = SquareMillimeters(design.sideface.rebar.provided_area_mm2).into();
        let sideface_volume = rounded_volume(sideface_area, span);

        let total_area = SquareMeters(round_to(
            flexural_area.0 + shear_area.0 + sideface_area.0,
            DECIMALS,
        ));
        let total_volume = CubicMeters(round_to(
            flexural_volume.0 + shear_volume.0 + sideface_volume.0,
            DECIMALS,
        ));

        BeamQuantities {
            concrete_area,
            concrete_volume,
            flexural_area,
            flexural_volume,
            shear_area,
            shear_volume,
            sideface_area,
            sideface_volume,
            total_area,
            total_volume,
        }
    }
}

fn rounded_area(area: SquareMillimeters) -> SquareMeters {
    let m2: SquareMeters = area.into();
    SquareMeters(round_to(m2.0, DECIMALS))
}

fn rounded_volume(area: SquareMeters, span: Meters) -> CubicMeters {
    CubicMeters(round_to((area * span).0, DECIMALS))
}
