//! # Side-Face Reinforcement
//!
//! Deep beams carry longitudinal torsion steel as side-face bars on both
//! vertical faces. The demand at each position is the torsion area that the
//! top and bottom bars cannot absorb from their surplus over flexure.
//!
//! Beams at or below the torsion split depth carry all torsion steel in the
//! top and bottom bars, so no side-face bars are designed for them.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::flexure::{Face, FlexuralDesign};
use super::selector::{select_min_excess, utilization, Candidate};
use super::shear::ShearDesign;
use crate::beam::BeamInput;
use crate::materials::{BarSize, SPACING_STEPS_MM};
use crate::position::PerPosition;
use crate::project::DesignSettings;

/// Upper limit on the section width used in the bar size check (mm)
const MAX_CHECK_WIDTH_MM: f64 = 500.0;

/// Selected side-face bars.
///
/// ## JSON Example
///
/// ```json
/// {
///   "required": true,
///   "size": "T16",
///   "spacing_mm": 250,
///   "bars_per_face": 2,
///   "designation": "T16@250 EF",
///   "required_area_mm2": 0.0,
///   "provided_area_mm2": 804.0,
///   "utilization": 0.0,
///   "solved": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidefaceSelection {
    /// `false` when the beam is shallow enough to need no side-face bars
    pub required: bool,
    pub size: Option<BarSize>,
    pub spacing_mm: Option<u32>,
    pub bars_per_face: u32,

    /// Designation with "EF" (each face), e.g. "T16@250 EF"
    pub designation: String,

    pub required_area_mm2: f64,

    /// Bars on both faces, rounded to whole mm²
    pub provided_area_mm2: f64,

    pub utilization: f64,
    pub solved: bool,
}

impl SidefaceSelection {
    fn not_required(demand: f64) -> Self {
        SidefaceSelection {
            required: false,
            size: None,
            spacing_mm: None,
            bars_per_face: 0,
            designation: "-".to_string(),
            required_area_mm2: demand,
            provided_area_mm2: 0.0,
            utilization: 0.0,
            solved: true,
        }
    }

    pub fn diameter_mm(&self) -> Option<u32> {
        self.size.map(|s| s.diameter_mm())
    }
}

#[derive(Debug, Clone, Copy)]
struct SidefaceCandidate {
    size: BarSize,
    spacing_mm: u32,
    bars_per_face: u32,
    area: f64,
}

impl Candidate for SidefaceCandidate {
    type TieBreak = (BarSize, Reverse<u32>);

    fn provided_area(&self) -> f64 {
        self.area
    }

    fn tie_break(&self) -> Self::TieBreak {
        (self.size, Reverse(self.spacing_mm))
    }
}

/// Results of the side-face stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidefaceDesign {
    /// Torsion steel left for the side faces at each position (mm²)
    pub required_torsion: PerPosition<f64>,

    /// Governing side-face demand: the largest of the three positions (mm²)
    pub total_required: f64,

    /// Vertical space between the top and bottom bar stacks (mm)
    pub clear_space_mm: f64,

    pub rebar: SidefaceSelection,
}

/// Torsion area remaining after the flexural surplus is used: max(0, T − R).
pub fn net_torsion_demand(torsion: &PerPosition<f64>, residual: &PerPosition<f64>) -> PerPosition<f64> {
    PerPosition::from_fn(|p| (torsion[p] - residual[p]).max(0.0))
}

/// Clear vertical space for side-face bars (mm).
///
/// Depth less cover and the largest link on both faces, less the deepest top
/// and bottom bar stacks.
pub fn clear_space_mm(
    input: &BeamInput,
    settings: &DesignSettings,
    flexure: &FlexuralDesign,
    shear: &ShearDesign,
) -> f64 {
    let link = shear.largest_link().map_or(0.0, |s| s.diameter_mm() as f64);
    input.depth_mm
        - 2.0 * settings.cover_mm
        - 2.0 * link
        - flexure.max_stack_depth_mm(Face::Top, settings.min_bar_gap_mm)
        - flexure.max_stack_depth_mm(Face::Bottom, settings.min_bar_gap_mm)
}

/// Bars on each face at `spacing_mm` over `clear_space_mm`.
pub fn bars_per_face(clear_space_mm: f64, spacing_mm: u32) -> u32 {
    if clear_space_mm <= 0.0 || spacing_mm == 0 {
        return 0;
    }
    ((clear_space_mm / spacing_mm as f64).ceil() as u32).saturating_sub(1)
}

/// Smallest side-face bar diameter for a spacing: √(s·b/fy), b capped at 500 mm
pub fn min_bar_diameter_mm(spacing_mm: u32, width_mm: f64, fy_mpa: f64) -> f64 {
    (spacing_mm as f64 * width_mm.min(MAX_CHECK_WIDTH_MM) / fy_mpa).sqrt()
}

/// Minimum-excess side-face bars for the governing demand.
pub fn select_sideface(
    demand: f64,
    clear_space_mm: f64,
    width_mm: f64,
    settings: &DesignSettings,
) -> SidefaceSelection {
    let spacings: Vec<u32> = SPACING_STEPS_MM
        .iter()
        .copied()
        .filter(|&s| s <= settings.max_sideface_spacing_mm)
        .collect();

    let mut candidates = Vec::new();
    for &size in BarSize::SIDEFACE.iter() {
        for &spacing in &spacings {
            if (size.diameter_mm() as f64) < min_bar_diameter_mm(spacing, width_mm, settings.rebar_yield_mpa) {
                continue;
            }
            if ((spacing as f64) - (size.diameter_mm() as f64)) < settings.min_bar_gap_mm {
                continue;
            }
            let n = bars_per_face(clear_space_mm, spacing);
            if n == 0 {
                continue;
            }
            candidates.push(SidefaceCandidate {
                size,
                spacing_mm: spacing,
                bars_per_face: n,
                area: (2.0 * n as f64 * size.area_mm2()).round(),
            });
        }
    }

    match select_min_excess(candidates, demand) {
        Some(choice) => {
            let c = choice.candidate;
            SidefaceSelection {
                required: true,
                size: Some(c.size),
                spacing_mm: Some(c.spacing_mm),
                bars_per_face: c.bars_per_face,
                designation: format!("{}@{} EF", c.size, c.spacing_mm),
                required_area_mm2: demand,
                provided_area_mm2: c.area,
                utilization: utilization(demand, c.area),
                solved: choice.solved,
            }
        }
        None => SidefaceSelection {
            required: true,
            solved: false,
            ..SidefaceSelection::not_required(demand)
        },
    }
}

/// Run the side-face stage after the flexural and shear stages.
pub fn design(
    input: &BeamInput,
    settings: &DesignSettings,
    flexure: &FlexuralDesign,
    shear: &ShearDesign,
) -> SidefaceDesign {
    let required_torsion = net_torsion_demand(&input.req_torsion_flexure, &flexure.residual);
    let total_required = required_torsion.max_value();
    let clear_space_mm = clear_space_mm(input, settings, flexure, shear);

    let mut rebar = if input.depth_mm > settings.torsion_split_depth_mm {
        select_sideface(total_required, clear_space_mm, input.width_mm, settings)
    } else {
        // Torsion sits in the top and bottom bars; anything left over means
        // the flexural bars fell short.
        SidefaceSelection {
            solved: total_required == 0.0,
            ..SidefaceSelection::not_required(total_required)
        }
    };

    if input.shear_overstressed.torsion {
        rebar.solved = false;
    }
    if !rebar.solved {
        warn!(
            element = %input.element_id,
            required = total_required,
            clear_space = clear_space_mm,
            "side-face bars unsolved"
        );
    }
    debug!(
        element = %input.element_id,
        designation = %rebar.designation,
        "side-face design complete"
    );

    SidefaceDesign {
        required_torsion,
        total_required,
        clear_space_mm,
        rebar,
    }
}
