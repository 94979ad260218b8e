//! # Beam Input Record
//!
//! Geometry and factored design demands for one reinforced-concrete beam, as
//! exported by the analysis model. The design engine only reads this record.
//!
//! ## Units
//!
//! - Geometry in mm, concrete grade as cube strength in MPa
//! - Flexural and torsion-longitudinal areas in mm²
//! - Shear force in kN
//! - Shear and torsion link areas in mm²/m (Asv/sv, At/s)
//!
//! ## Example
//!
//! ```rust
//! use rcbeam_core::beam::BeamInput;
//! use rcbeam_core::position::PerPosition;
//!
//! let beam = BeamInput {
//!     req_top_flexure: PerPosition::new(1979.0, 703.0, 1979.0),
//!     req_bottom_flexure: PerPosition::new(1230.0, 1099.0, 1053.0),
//!     ..BeamInput::new("Attic Level-3", "B1050", 400.0, 750.0, 8619.0, 45.0)
//! };
//! assert!(beam.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::Concrete;
use crate::position::PerPosition;

/// Largest accepted section width or depth (mm)
pub const MAX_SECTION_MM: f64 = 5_000.0;

/// Largest accepted span (mm)
pub const MAX_SPAN_MM: f64 = 200_000.0;

/// Flexural overstress flags reported by the analysis model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlexureOverstress {
    /// Positive (sagging) moment overstressed: affects bottom bars
    pub positive: bool,
    /// Negative (hogging) moment overstressed: affects top bars
    pub negative: bool,
}

/// Shear and torsion overstress flags reported by the analysis model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShearOverstress {
    pub shear: bool,
    pub torsion: bool,
}

/// Input record for a single beam.
///
/// ## JSON Example
///
/// ```json
/// {
///   "storey": "Attic Level-3",
///   "element_id": "B1050",
///   "width_mm": 400.0,
///   "depth_mm": 750.0,
///   "span_mm": 8619.0,
///   "concrete_grade_mpa": 45.0,
///   "req_top_flexure": { "left": 1979.0, "middle": 703.0, "right": 1979.0 },
///   "req_bottom_flexure": { "left": 1230.0, "middle": 1099.0, "right": 1053.0 },
///   "req_torsion_flexure": { "left": 0.0, "middle": 0.0, "right": 0.0 },
///   "shear_force_kn": { "left": 237.0, "middle": 187.0, "right": 216.0 },
///   "req_shear": { "left": 0.0, "middle": 0.0, "right": 0.0 },
///   "req_torsion_shear": { "left": 0.0, "middle": 0.0, "right": 0.0 },
///   "flexure_overstressed": { "positive": false, "negative": false },
///   "shear_overstressed": { "shear": false, "torsion": false }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamInput {
    /// Storey label (e.g., "Attic Level-3")
    pub storey: String,

    /// Element identifier in the analysis model (e.g., "B1050")
    pub element_id: String,

    /// Section width in mm
    pub width_mm: f64,

    /// Overall section depth in mm
    pub depth_mm: f64,

    /// Span in mm
    pub span_mm: f64,

    /// Concrete cube strength fcu in MPa
    pub concrete_grade_mpa: f64,

    /// Required top flexural steel (mm²)
    pub req_top_flexure: PerPosition<f64>,

    /// Required bottom flexural steel (mm²)
    pub req_bottom_flexure: PerPosition<f64>,

    /// Required longitudinal torsion steel (mm²)
    pub req_torsion_flexure: PerPosition<f64>,

    /// Design shear force (kN)
    pub shear_force_kn: PerPosition<f64>,

    /// Required shear links Asv/sv (mm²/m)
    pub req_shear: PerPosition<f64>,

    /// Required torsion links At/s (mm²/m)
    pub req_torsion_shear: PerPosition<f64>,

    #[serde(default)]
    pub flexure_overstressed: FlexureOverstress,

    #[serde(default)]
    pub shear_overstressed: ShearOverstress,
}

impl BeamInput {
    /// Create a beam with the given identity and geometry and zero demands.
    pub fn new(
        storey: impl Into<String>,
        element_id: impl Into<String>,
        width_mm: f64,
        depth_mm: f64,
        span_mm: f64,
        concrete_grade_mpa: f64,
    ) -> Self {
        BeamInput {
            storey: storey.into(),
            element_id: element_id.into(),
            width_mm,
            depth_mm,
            span_mm,
            concrete_grade_mpa,
            req_top_flexure: PerPosition::default(),
            req_bottom_flexure: PerPosition::default(),
            req_torsion_flexure: PerPosition::default(),
            shear_force_kn: PerPosition::default(),
            req_shear: PerPosition::default(),
            req_torsion_shear: PerPosition::default(),
            flexure_overstressed: FlexureOverstress::default(),
            shear_overstressed: ShearOverstress::default(),
        }
    }

    /// Validate input parameters.
    ///
    /// Width and depth must be positive, span and all demands must be
    /// non-negative, and every value must be finite. A zero span is accepted
    /// and produces zero quantities. Geometry beyond [`MAX_SECTION_MM`] or
    /// [`MAX_SPAN_MM`] is rejected.
    pub fn validate(&self) -> CalcResult<()> {
        positive("width_mm", self.width_mm)?;
        positive("depth_mm", self.depth_mm)?;
        positive("concrete_grade_mpa", self.concrete_grade_mpa)?;
        non_negative("span_mm", self.span_mm)?;
        at_most("width_mm", self.width_mm, MAX_SECTION_MM)?;
        at_most("depth_mm", self.depth_mm, MAX_SECTION_MM)?;
        at_most("span_mm", self.span_mm, MAX_SPAN_MM)?;

        let demands = [
            ("req_top_flexure", &self.req_top_flexure),
            ("req_bottom_flexure", &self.req_bottom_flexure),
            ("req_torsion_flexure", &self.req_torsion_flexure),
            ("req_shear", &self.req_shear),
            ("req_torsion_shear", &self.req_torsion_shear),
        ];
        for (field, values) in demands {
            for (position, value) in values.iter() {
                non_negative(&format!("{field}.{position}"), *value)?;
            }
        }

        // Shear force sign follows the analysis convention; only magnitude is used.
        for (position, value) in self.shear_force_kn.iter() {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(
                    format!("shear_force_kn.{position}"),
                    value.to_string(),
                    "Value must be finite",
                ));
            }
        }
        Ok(())
    }

    pub fn concrete(&self) -> Concrete {
        Concrete::new(self.concrete_grade_mpa)
    }

    /// Gross concrete section area in mm²
    pub fn section_area_mm2(&self) -> f64 {
        self.width_mm * self.depth_mm
    }
}

fn positive(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Value must be positive and finite",
        ));
    }
    Ok(())
}

fn at_most(field: &str, value: f64, max: f64) -> CalcResult<()> {
    if value > max {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("Value must not exceed {max}"),
        ));
    }
    Ok(())
}

fn non_negative(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Value must be non-negative and finite",
        ));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Beam B1050 at Attic Level-3: no shear or torsion demand.
    pub fn reference_beam() -> BeamInput {
        BeamInput {
            req_top_flexure: PerPosition::new(1979.0, 703.0, 1979.0),
            req_bottom_flexure: PerPosition::new(1230.0, 1099.0, 1053.0),
            shear_force_kn: PerPosition::new(237.0, 187.0, 216.0),
            ..BeamInput::new("Attic Level-3", "B1050", 400.0, 750.0, 8619.0, 45.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::reference_beam;
    use super::*;

    #[test]
    fn test_reference_beam_is_valid() {
        assert!(reference_beam().validate().is_ok());
    }

    #[test]
    fn test_negative_width_rejected() {
        let mut beam = reference_beam();
        beam.width_mm = -400.0;
        let err = beam.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_oversized_geometry_rejected() {
        let mut beam = reference_beam();
        beam.width_mm = 1e12;
        match beam.validate() {
            Err(CalcError::InvalidInput { field, .. }) => assert_eq!(field, "width_mm"),
            other => panic!("expected invalid input, got {other:?}"),
        }

        let mut beam = reference_beam();
        beam.span_mm = MAX_SPAN_MM + 1.0;
        assert!(beam.validate().is_err());

        let mut beam = reference_beam();
        beam.depth_mm = MAX_SECTION_MM;
        assert!(beam.validate().is_ok());
    }

    #[test]
    fn test_zero_span_accepted() {
        let mut beam = reference_beam();
        beam.span_mm = 0.0;
        assert!(beam.validate().is_ok());
    }

    #[test]
    fn test_non_finite_demand_rejected() {
        let mut beam = reference_beam();
        beam.req_bottom_flexure.middle = f64::NAN;
        match beam.validate() {
            Err(CalcError::InvalidInput { field, .. }) => assert_eq!(field, "req_bottom_flexure.middle"),
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_shear_force_accepted() {
        let mut beam = reference_beam();
        beam.shear_force_kn.right = -216.0;
        assert!(beam.validate().is_ok());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let beam = reference_beam();
        let json = serde_json::to_string_pretty(&beam).unwrap();
        let roundtrip: BeamInput = serde_json::from_str(&json).unwrap();
        assert_eq!(beam, roundtrip);
    }

    #[test]
    fn test_overstress_flags_default() {
        let json = serde_json::to_value(reference_beam()).unwrap();
        let mut object = json.as_object().unwrap().clone();
        object.remove("flexure_overstressed");
        object.remove("shear_overstressed");
        let beam: BeamInput = serde_json::from_value(serde_json::Value::Object(object)).unwrap();
        assert!(!beam.flexure_overstressed.negative);
        assert!(!beam.shear_overstressed.torsion);
    }
}
