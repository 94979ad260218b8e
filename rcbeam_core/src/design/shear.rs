//! # Shear Link Design
//!
//! Selects transverse links for three spacing zones: the two support zones
//! and the midspan zone. Each zone is designed for its own combined shear
//! and torsion requirement.
//!
//! ## Method
//!
//! - Legs: from two up to one per longitudinal bar, with a minimum set by the
//!   transverse leg spacing limit min(d, 600 mm)
//! - Requirement: Asv/sv + 2·At/s (mm²/m)
//! - Support spacing: min(d/4, 8 × smallest longitudinal bar, 24 × link, 300)
//! - Midspan spacing: min(d/2, 300)
//! - Minimum links: 0.4·(fcu/40)^(2/3)·b / (0.95·fy)
//! - Nominal shear stress V/(b·d) must not exceed min(0.8√fcu, 5 MPa)

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::flexure::{Face, FlexuralDesign};
use super::selector::{search_target, select_min_excess, utilization, Candidate};
use crate::beam::BeamInput;
use crate::materials::{BarSize, SPACING_STEPS_MM};
use crate::position::{PerPosition, Position};
use crate::project::DesignSettings;

/// Upper bound on link spacing and transverse leg spacing (mm)
const MAX_LINK_SPACING_MM: f64 = 300.0;
const MAX_LEG_SPACING_MM: f64 = 600.0;

/// Selected links for one spacing zone.
///
/// ## JSON Example
///
/// ```json
/// {
///   "legs": 2,
///   "size": "T12",
///   "spacing_mm": 125,
///   "designation": "2L-T12@125",
///   "required_area": 0.0,
///   "provided_area": 1810.0,
///   "utilization": 0.0,
///   "solved": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShearLinkSelection {
    pub legs: u32,
    pub size: Option<BarSize>,
    pub spacing_mm: u32,

    /// Human-readable designation (e.g., "2L-T12@125")
    pub designation: String,

    /// Governing requirement for the zone (mm²/m)
    pub required_area: f64,

    /// Link area per metre run, rounded to whole mm²/m
    pub provided_area: f64,

    /// required / provided × 100; 0 when minimum links govern
    pub utilization: f64,

    pub solved: bool,
}

impl ShearLinkSelection {
    pub fn diameter_mm(&self) -> Option<u32> {
        self.size.map(|s| s.diameter_mm())
    }
}

#[derive(Debug, Clone, Copy)]
struct LinkCandidate {
    legs: u32,
    size: BarSize,
    spacing_mm: u32,
    area: f64,
}

impl LinkCandidate {
    fn new(legs: u32, size: BarSize, spacing_mm: u32) -> Self {
        let area = (legs as f64 * size.area_mm2() * 1000.0 / spacing_mm as f64).round();
        LinkCandidate {
            legs,
            size,
            spacing_mm,
            area,
        }
    }
}

impl Candidate for LinkCandidate {
    type TieBreak = (u32, BarSize, Reverse<u32>);

    fn provided_area(&self) -> f64 {
        self.area
    }

    fn tie_break(&self) -> Self::TieBreak {
        (self.legs, self.size, Reverse(self.spacing_mm))
    }
}

/// Results of the shear stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShearDesign {
    /// Leg counts available to every zone, ascending (e.g. `[2, 3]`)
    pub leg_counts: Vec<u32>,

    /// Combined shear and torsion link requirement (mm²/m)
    pub total_required: PerPosition<f64>,

    /// Effective depth used for spacing and stress checks (mm)
    pub effective_depth_mm: f64,

    /// Permitted spacings in the support zones, widest first
    pub support_spacings: Vec<u32>,

    /// Permitted spacings in the midspan zone, widest first
    pub midspan_spacings: Vec<u32>,

    /// Minimum link area (mm²/m)
    pub minimum_area: f64,

    /// Nominal shear stress V/(b·d) (MPa)
    pub shear_stress_mpa: PerPosition<f64>,

    /// Shear stress limit (MPa)
    pub max_shear_stress_mpa: f64,

    pub links: PerPosition<ShearLinkSelection>,
}

impl ShearDesign {
    /// Spacings permitted in the zone at `position`
    pub fn spacings_for(&self, position: Position) -> &[u32] {
        if position.is_support() {
            &self.support_spacings
        } else {
            &self.midspan_spacings
        }
    }

    /// Largest link used in any zone
    pub fn largest_link(&self) -> Option<BarSize> {
        self.links.values().filter_map(|l| l.size).max()
    }

    pub fn is_solved(&self) -> bool {
        self.links.values().all(|l| l.solved)
    }
}

fn link_diameter_mm() -> f64 {
    BarSize::smallest(&BarSize::LINKS).map_or(0.0, |s| s.diameter_mm() as f64)
}

/// Stage 1: leg counts from the width and the longitudinal bar count.
pub fn link_leg_counts(
    width_mm: f64,
    effective_depth_mm: f64,
    bar_count: u32,
    settings: &DesignSettings,
) -> Vec<u32> {
    let core_width = (width_mm - 2.0 * settings.cover_mm).max(0.0);
    let leg_spacing = effective_depth_mm.min(MAX_LEG_SPACING_MM).max(1.0);
    let min_legs = ((core_width / leg_spacing).ceil() as u32).saturating_add(1).max(2);
    let max_legs = bar_count.max(min_legs);
    (min_legs..=max_legs).collect()
}

/// Stage 2: combined link requirement Asv/sv + 2·At/s at each position.
pub fn total_shear_requirement(input: &BeamInput) -> PerPosition<f64> {
    PerPosition::from_fn(|p| input.req_shear[p] + 2.0 * input.req_torsion_shear[p])
}

/// Effective depth to the centroid of the largest bottom bar (mm)
pub fn effective_depth_mm(input: &BeamInput, flexure: &FlexuralDesign, settings: &DesignSettings) -> f64 {
    let bar = flexure
        .largest_bar(Face::Bottom)
        .map_or(0.0, |s| s.diameter_mm() as f64);
    input.depth_mm - settings.cover_mm - link_diameter_mm() - bar / 2.0
}

/// Standard spacings at or below `limit_mm`, widest first. Falls back to
/// the closest standard spacing when the limit is below all of them; a
/// zone designed on the fallback is reported unsolved when it carries demand.
pub fn allowed_spacings(limit_mm: f64) -> Vec<u32> {
    let allowed: Vec<u32> = SPACING_STEPS_MM
        .iter()
        .copied()
        .filter(|&s| s as f64 <= limit_mm)
        .collect();
    if allowed.is_empty() {
        SPACING_STEPS_MM.iter().copied().min().into_iter().collect()
    } else {
        allowed
    }
}

/// Stage 3: maximum link spacing at the supports (mm)
pub fn support_spacing_limit(effective_depth_mm: f64, flexure: &FlexuralDesign) -> f64 {
    let mut limit = (effective_depth_mm / 4.0)
        .min(24.0 * link_diameter_mm())
        .min(MAX_LINK_SPACING_MM);
    if let Some(bar) = flexure.smallest_bar() {
        limit = limit.min(8.0 * bar.diameter_mm() as f64);
    }
    limit
}

/// Stage 3: maximum link spacing at midspan (mm)
pub fn midspan_spacing_limit(effective_depth_mm: f64) -> f64 {
    (effective_depth_mm / 2.0).min(MAX_LINK_SPACING_MM)
}

/// Minimum link area per metre run (mm²/m)
pub fn minimum_link_area(input: &BeamInput, settings: &DesignSettings) -> f64 {
    input.concrete().min_link_stress_mpa() * input.width_mm / (0.95 * settings.rebar_yield_mpa) * 1000.0
}

/// Stage 4: minimum-excess links for one zone.
pub fn select_links(demand: f64, floor: f64, leg_counts: &[u32], spacings: &[u32]) -> ShearLinkSelection {
    let candidates = leg_counts.iter().flat_map(|&legs| {
        BarSize::LINKS.iter().flat_map(move |&size| {
            spacings
                .iter()
                .map(move |&spacing| LinkCandidate::new(legs, size, spacing))
        })
    });

    match select_min_excess(candidates, search_target(demand, floor)) {
        Some(choice) => {
            let c = choice.candidate;
            ShearLinkSelection {
                legs: c.legs,
                size: Some(c.size),
                spacing_mm: c.spacing_mm,
                designation: format!("{}L-{}@{}", c.legs, c.size, c.spacing_mm),
                required_area: demand,
                provided_area: c.area,
                utilization: utilization(demand, c.area),
                solved: choice.solved,
            }
        }
        None => ShearLinkSelection {
            legs: 0,
            size: None,
            spacing_mm: 0,
            designation: "-".to_string(),
            required_area: demand,
            provided_area: 0.0,
            utilization: 0.0,
            solved: false,
        },
    }
}

/// Run the shear stage against a finished flexural design.
pub fn design(input: &BeamInput, settings: &DesignSettings, flexure: &FlexuralDesign) -> ShearDesign {
    let d = effective_depth_mm(input, flexure, settings);
    let leg_counts = link_leg_counts(input.width_mm, d, flexure.bar_count, settings);
    let total_required = total_shear_requirement(input);
    let support_limit = support_spacing_limit(d, flexure);
    let midspan_limit = midspan_spacing_limit(d);
    let support_spacings = allowed_spacings(support_limit);
    let midspan_spacings = allowed_spacings(midspan_limit);
    let minimum_area = minimum_link_area(input, settings);

    let max_shear_stress_mpa = input.concrete().max_shear_stress_mpa();
    let shear_stress_mpa = PerPosition::from_fn(|p| {
        if d > 0.0 {
            input.shear_force_kn[p].abs() * 1000.0 / (input.width_mm * d)
        } else {
            0.0
        }
    });
    let overstressed = input.shear_overstressed.shear || input.shear_overstressed.torsion;

    let links = PerPosition::from_fn(|p| {
        let (spacings, limit) = if p.is_support() {
            (&support_spacings, support_limit)
        } else {
            (&midspan_spacings, midspan_limit)
        };
        let mut selection = select_links(total_required[p], minimum_area, &leg_counts, spacings);
        let spacing_exceeded = selection.spacing_mm as f64 > limit;
        let stress_exceeded = shear_stress_mpa[p] > max_shear_stress_mpa;

        // Minimum links always satisfy a zone with no demand.
        if total_required[p] > 0.0 && (overstressed || stress_exceeded || spacing_exceeded) {
            selection.solved = false;
        }
        if !selection.solved || overstressed || stress_exceeded || spacing_exceeded {
            warn!(
                element = %input.element_id,
                position = %p,
                required = selection.required_area,
                shear_stress = shear_stress_mpa[p],
                spacing_limit = limit,
                overstressed,
                solved = selection.solved,
                "shear links exceed a design limit"
            );
        }
        selection
    });

    debug!(
        element = %input.element_id,
        effective_depth = d,
        ?leg_counts,
        ?support_spacings,
        ?midspan_spacings,
        "shear design complete"
    );

    ShearDesign {
        leg_counts,
        total_required,
        effective_depth_mm: d,
        support_spacings,
        midspan_spacings,
        minimum_area,
        shear_stress_mpa,
        max_shear_stress_mpa,
        links,
    }
}
