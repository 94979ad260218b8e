//! # Beam Design Pipeline
//!
//! Runs the three design stages for one beam in a fixed order:
//!
//! 1. [`flexure`] - top and bottom bars, torsion splitting, residual areas
//! 2. [`shear`] - links per spacing zone, using the flexural bar sizes
//! 3. [`sideface`] - side-face bars from the torsion left after residuals
//!
//! Each stage reads the beam input and the earlier stage results; nothing is
//! mutated after it is built. A design with unsolved selections is still a
//! complete result. Only invalid input is an error.
//!
//! ## Example
//!
//! ```rust
//! use rcbeam_core::beam::BeamInput;
//! use rcbeam_core::design::design_beam;
//! use rcbeam_core::position::PerPosition;
//! use rcbeam_core::project::DesignSettings;
//!
//! let beam = BeamInput {
//!     req_top_flexure: PerPosition::new(1979.0, 703.0, 1979.0),
//!     req_bottom_flexure: PerPosition::new(1230.0, 1099.0, 1053.0),
//!     ..BeamInput::new("Attic Level-3", "B1050", 400.0, 750.0, 8619.0, 45.0)
//! };
//!
//! let design = design_beam(&beam, &DesignSettings::default()).unwrap();
//! assert_eq!(design.flexure.top.left.designation, "3T25 + 3T16");
//! assert_eq!(design.shear.links.left.designation, "2L-T12@125");
//! assert_eq!(design.sideface.rebar.designation, "T16@250 EF");
//! ```

pub mod flexure;
pub mod selector;
pub mod shear;
pub mod sideface;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::beam::BeamInput;
use crate::errors::CalcResult;
use crate::project::DesignSettings;

pub use flexure::{BarLayers, Face, FlexuralDesign, RebarSelection};
pub use shear::{ShearDesign, ShearLinkSelection};
pub use sideface::{SidefaceDesign, SidefaceSelection};

/// Complete design for one beam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamDesign {
    pub input: BeamInput,
    pub flexure: FlexuralDesign,
    pub shear: ShearDesign,
    pub sideface: SidefaceDesign,
}

impl BeamDesign {
    /// `true` when every flexural, shear and side-face selection is solved.
    pub fn is_solved(&self) -> bool {
        self.flexure.is_solved() && self.shear.is_solved() && self.sideface.rebar.solved
    }
}

/// Validate `input` and run the flexure, shear and side-face stages.
///
/// # Errors
///
/// Returns [`CalcError::InvalidInput`](crate::errors::CalcError::InvalidInput)
/// when the beam geometry or demands are invalid. Unsolved selections are
/// reported through their `solved` flags, not as errors.
pub fn design_beam(input: &BeamInput, settings: &DesignSettings) -> CalcResult<BeamDesign> {
    input.validate()?;

    let flexure = flexure::design(input, settings);
    let shear = shear::design(input, settings, &flexure);
    let sideface = sideface::design(input, settings, &flexure, &shear);

    let design = BeamDesign {
        input: input.clone(),
        flexure,
        shear,
        sideface,
    };
    debug!(
        storey = %input.storey,
        element = %input.element_id,
        solved = design.is_solved(),
        "beam designed"
    );
    Ok(design)
}
