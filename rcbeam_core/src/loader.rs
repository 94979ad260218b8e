//! # Analysis Export Loader
//!
//! Beam records as exported from the analysis model: flat field names with
//! per-position demands given as `[left, middle, right]` lists and overstress
//! flags as two-element lists.
//!
//! ## JSON Example
//!
//! ```json
//! [
//!   {
//!     "storey": "Attic Level-3",
//!     "etabs_id": "B1050",
//!     "width": 400,
//!     "depth": 750,
//!     "span": 8619,
//!     "comp_conc_grade": 45,
//!     "flex_overstressed": [false, false],
//!     "req_top_flex_reinf": [1979, 703, 1979],
//!     "req_bot_flex_reinf": [1230, 1099, 1053],
//!     "req_torsion_flex_reinf": [0, 0, 0],
//!     "shear_force": [237, 187, 216],
//!     "shear_overstressed": [false, false],
//!     "req_shear_reinf": [0, 0, 0],
//!     "req_torsion_reinf": [0, 0, 0]
//!   }
//! ]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::beam::{BeamInput, FlexureOverstress, ShearOverstress};
use crate::errors::{CalcError, CalcResult};
use crate::file_io::read_json;
use crate::position::PerPosition;

/// One exported beam record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamRecord {
    pub storey: String,
    #[serde(alias = "etabs_id")]
    pub element_id: String,
    pub width: f64,
    pub depth: f64,
    pub span: f64,
    pub comp_conc_grade: f64,

    /// `[positive, negative]`
    #[serde(default)]
    pub flex_overstressed: Vec<bool>,
    pub req_top_flex_reinf: Vec<f64>,
    pub req_bot_flex_reinf: Vec<f64>,
    pub req_torsion_flex_reinf: Vec<f64>,
    pub shear_force: Vec<f64>,

    /// `[shear, torsion]`
    #[serde(default)]
    pub shear_overstressed: Vec<bool>,
    pub req_shear_reinf: Vec<f64>,
    pub req_torsion_reinf: Vec<f64>,
}

fn positions(field: &str, values: &[f64]) -> CalcResult<PerPosition<f64>> {
    PerPosition::from_slice(values).ok_or_else(|| {
        CalcError::invalid_input(
            field,
            format!("{values:?}"),
            format!("Expected 3 values (left, middle, right), got {}", values.len()),
        )
    })
}

fn flag_pair(field: &str, flags: &[bool]) -> CalcResult<(bool, bool)> {
    match flags {
        [] => Ok((false, false)),
        [first, second] => Ok((*first, *second)),
        _ => Err(CalcError::invalid_input(
            field,
            format!("{flags:?}"),
            format!("Expected 2 flags, got {}", flags.len()),
        )),
    }
}

impl TryFrom<BeamRecord> for BeamInput {
    type Error = CalcError;

    fn try_from(record: BeamRecord) -> CalcResult<Self> {
        let (positive, negative) = flag_pair("flex_overstressed", &record.flex_overstressed)?;
        let (shear, torsion) = flag_pair("shear_overstressed", &record.shear_overstressed)?;

        Ok(BeamInput {
            req_top_flexure: positions("req_top_flex_reinf", &record.req_top_flex_reinf)?,
            req_bottom_flexure: positions("req_bot_flex_reinf", &record.req_bot_flex_reinf)?,
            req_torsion_flexure: positions("req_torsion_flex_reinf", &record.req_torsion_flex_reinf)?,
            shear_force_kn: positions("shear_force", &record.shear_force)?,
            req_shear: positions("req_shear_reinf", &record.req_shear_reinf)?,
            req_torsion_shear: positions("req_torsion_reinf", &record.req_torsion_reinf)?,
            flexure_overstressed: FlexureOverstress { positive, negative },
            shear_overstressed: ShearOverstress { shear, torsion },
            ..BeamInput::new(
                record.storey,
                record.element_id,
                record.width,
                record.depth,
                record.span,
                record.comp_conc_grade,
            )
        })
    }
}

/// Read a JSON array of [`BeamRecord`]s and convert them to beam inputs.
///
/// The first malformed record fails the whole load, with the record's
/// element id in the error field.
pub fn load_records(path: &Path) -> CalcResult<Vec<BeamInput>> {
    let records: Vec<BeamRecord> = read_json(path)?;
    let inputs = records
        .into_iter()
        .map(|record| {
            let element = record.element_id.clone();
            BeamInput::try_from(record).map_err(|e| match e {
                CalcError::InvalidInput { field, value, reason } => {
                    CalcError::invalid_input(format!("{element}.{field}"), value, reason)
                }
                other => other,
            })
        })
        .collect::<CalcResult<Vec<_>>>()?;
    info!(path = %path.display(), count = inputs.len(), "loaded beam records");
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beam::test_support::reference_beam;

    const B1050: &str = r#"{
        "storey": "Attic Level-3",
        "etabs_id": "B1050",
        "width": 400,
        "depth": 750,
        "span": 8619,
        "comp_conc_grade": 45,
        "flex_overstressed": [false, false],
        "req_top_flex_reinf": [1979, 703, 1979],
        "req_bot_flex_reinf": [1230, 1099, 1053],
        "req_torsion_flex_reinf": [0, 0, 0],
        "shear_force": [237, 187, 216],
        "shear_overstressed": [false, false],
        "req_shear_reinf": [0, 0, 0],
        "req_torsion_reinf": [0, 0, 0]
    }"#;

    fn record() -> BeamRecord {
        serde_json::from_str(B1050).unwrap()
    }

    #[test]
    fn test_record_converts_to_input() {
        let input = BeamInput::try_from(record()).unwrap();
        assert_eq!(input, reference_beam());
    }

    #[test]
    fn test_wrong_list_length_rejected() {
        let mut record = record();
        record.req_top_flex_reinf = vec![1979.0, 703.0];
        match BeamInput::try_from(record) {
            Err(CalcError::InvalidInput { field, .. }) => assert_eq!(field, "req_top_flex_reinf"),
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[test]
    fn test_overstress_flags_mapped() {
        let mut record = record();
        record.flex_overstressed = vec![false, true];
        record.shear_overstressed = vec![true, false];
        let input = BeamInput::try_from(record).unwrap();
        assert!(input.flexure_overstressed.negative);
        assert!(!input.flexure_overstressed.positive);
        assert!(input.shear_overstressed.shear);
    }

    #[test]
    fn test_missing_flags_default_false() {
        let mut value: serde_json::Value = serde_json::from_str(B1050).unwrap();
        value.as_object_mut().unwrap().remove("shear_overstressed");
        let record: BeamRecord = serde_json::from_value(value).unwrap();
        let input = BeamInput::try_from(record).unwrap();
        assert!(!input.shear_overstressed.torsion);
    }

    #[test]
    fn test_bad_flag_count_rejected() {
        let mut record = record();
        record.flex_overstressed = vec![true];
        assert!(BeamInput::try_from(record).is_err());
    }

    #[test]
    fn test_load_records_names_element_on_error() {
        let path = std::env::temp_dir().join(format!("rcbeam_records_{}.json", std::process::id()));
        let mut bad = record();
        bad.element_id = "B2001".to_string();
        bad.shear_force = vec![1.0; 4];
        std::fs::write(&path, serde_json::to_string(&vec![record(), bad]).unwrap()).unwrap();

        match load_records(&path) {
            Err(CalcError::InvalidInput { field, .. }) => assert_eq!(field, "B2001.shear_force"),
            other => panic!("expected invalid input, got {other:?}"),
        }
        let _ = std::fs::remove_file(&path);
    }
}
