//! # Flexural Design
//!
//! Selects the top and bottom longitudinal bars at the left support, midspan
//! and right support. The stages run in a fixed order:
//!
//! 1. Count the bar positions that fit across the width
//! 2. Merge half the longitudinal torsion steel into each face for shallow beams
//! 3. Select the minimum-excess bar arrangement for each of the six slots
//! 4. Re-assess the selections against span and overstress flags
//! 5. Record the residual area available to offset side-face torsion steel
//!
//! Each slot holds either one layer (`3T25`) or two layers of equal count
//! with a same-or-smaller second size (`3T25 + 3T16`).

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::selector::{search_target, select_min_excess, utilization, Candidate};
use crate::beam::BeamInput;
use crate::materials::{BarGroup, BarSize};
use crate::position::{PerPosition, Position};
use crate::project::DesignSettings;

/// Beam face carrying longitudinal bars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Top,
    Bottom,
}

impl Face {
    pub const ALL: [Face; 2] = [Face::Top, Face::Bottom];
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Face::Top => f.write_str("top"),
            Face::Bottom => f.write_str("bottom"),
        }
    }
}

/// Longitudinal bars at one slot: a primary layer and an optional second
/// layer of the same count and a same-or-smaller size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarLayers {
    pub primary: BarGroup,
    pub secondary: Option<BarGroup>,
}

impl BarLayers {
    pub fn single(count: u32, size: BarSize) -> Self {
        BarLayers {
            primary: BarGroup::new(count, size),
            secondary: None,
        }
    }

    pub fn double(count: u32, first: BarSize, second: BarSize) -> Self {
        BarLayers {
            primary: BarGroup::new(count, first),
            secondary: Some(BarGroup::new(count, second)),
        }
    }

    pub fn area_mm2(&self) -> f64 {
        self.primary.area_mm2() + self.secondary.map_or(0.0, |g| g.area_mm2())
    }

    /// Bar diameters, primary layer first (e.g. `[25, 16]`)
    pub fn diameters(&self) -> Vec<u32> {
        self.groups().map(|g| g.size.diameter_mm()).collect()
    }

    pub fn largest(&self) -> BarSize {
        self.groups().map(|g| g.size).max().unwrap_or(self.primary.size)
    }

    pub fn smallest(&self) -> BarSize {
        self.groups().map(|g| g.size).min().unwrap_or(self.primary.size)
    }

    pub fn layer_count(&self) -> u32 {
        if self.secondary.is_some() { 2 } else { 1 }
    }

    /// Number of different bar sizes used (1 or 2)
    pub fn distinct_sizes(&self) -> u32 {
        match self.secondary {
            Some(second) if second.size != self.primary.size => 2,
            _ => 1,
        }
    }

    /// Vertical depth taken by the bars: one diameter for a single layer,
    /// otherwise both diameters plus the clear gap between layers.
    pub fn stack_depth_mm(&self, min_gap_mm: f64) -> f64 {
        let first = self.primary.size.diameter_mm() as f64;
        match self.secondary {
            Some(second) => first + min_gap_mm.max(first) + second.size.diameter_mm() as f64,
            None => first,
        }
    }

    fn groups(&self) -> impl Iterator<Item = BarGroup> {
        std::iter::once(self.primary).chain(self.secondary)
    }
}

impl fmt::Display for BarLayers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.secondary {
            Some(second) => write!(f, "{} + {}", self.primary, second),
            None => write!(f, "{}", self.primary),
        }
    }
}

/// Selected longitudinal bars for one flexural slot.
///
/// ## JSON Example
///
/// ```json
/// {
///   "bars": { "primary": { "count": 3, "size": "T25" }, "secondary": { "count": 3, "size": "T16" } },
///   "designation": "3T25 + 3T16",
///   "required_area_mm2": 1979.0,
///   "provided_area_mm2": 2076.0,
///   "utilization": 95.3,
///   "solved": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebarSelection {
    /// Chosen bars; `None` when no catalog size fits the section width
    pub bars: Option<BarLayers>,

    /// Human-readable designation (e.g., "3T25 + 3T16")
    pub designation: String,

    /// Demand the selection was checked against (mm²)
    pub required_area_mm2: f64,

    /// Provided area rounded to whole mm²
    pub provided_area_mm2: f64,

    /// required / provided × 100, one decimal; 0 when there is no demand
    pub utilization: f64,

    pub solved: bool,
}

impl RebarSelection {
    fn from_bars(bars: BarLayers, demand: f64, solved: bool) -> Self {
        let provided = bars.area_mm2().round();
        RebarSelection {
            bars: Some(bars),
            designation: bars.to_string(),
            required_area_mm2: demand,
            provided_area_mm2: provided,
            utilization: utilization(demand, provided),
            solved,
        }
    }

    fn none(demand: f64) -> Self {
        RebarSelection {
            bars: None,
            designation: "-".to_string(),
            required_area_mm2: demand,
            provided_area_mm2: 0.0,
            utilization: 0.0,
            solved: false,
        }
    }

    /// Bar diameters, primary layer first
    pub fn diameters(&self) -> Vec<u32> {
        self.bars.map(|b| b.diameters()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy)]
struct FlexuralCandidate {
    bars: BarLayers,
    area: f64,
}

impl FlexuralCandidate {
    fn new(bars: BarLayers) -> Self {
        FlexuralCandidate {
            bars,
            area: bars.area_mm2().round(),
        }
    }
}

impl Candidate for FlexuralCandidate {
    type TieBreak = (u32, BarSize, u32);

    fn provided_area(&self) -> f64 {
        self.area
    }

    fn tie_break(&self) -> Self::TieBreak {
        (self.bars.distinct_sizes(), self.bars.largest(), self.bars.layer_count())
    }
}

/// Flexural steel requirement at each slot after torsion splitting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TorsionSplit {
    pub top: PerPosition<f64>,
    pub bottom: PerPosition<f64>,
    /// `true` when half the torsion steel was added to each face
    pub merged: bool,
}

/// Results of the flexural stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexuralDesign {
    /// Bars per layer across the width
    pub bar_count: u32,

    /// `true` when torsion steel was merged into the top and bottom bars
    pub torsion_merged: bool,

    /// Top requirement including any merged torsion steel (mm²)
    pub required_top: PerPosition<f64>,

    /// Bottom requirement including any merged torsion steel (mm²)
    pub required_bottom: PerPosition<f64>,

    pub top: PerPosition<RebarSelection>,
    pub bottom: PerPosition<RebarSelection>,

    /// Area provided beyond the pure flexural demand, both faces (mm²)
    pub residual: PerPosition<f64>,
}

impl FlexuralDesign {
    pub fn face(&self, face: Face) -> &PerPosition<RebarSelection> {
        match face {
            Face::Top => &self.top,
            Face::Bottom => &self.bottom,
        }
    }

    /// All six selections, top face first
    pub fn selections(&self) -> impl Iterator<Item = &RebarSelection> {
        self.top.values().chain(self.bottom.values())
    }

    pub fn is_solved(&self) -> bool {
        self.selections().all(|s| s.solved)
    }

    /// Smallest longitudinal bar used anywhere in the beam
    pub fn smallest_bar(&self) -> Option<BarSize> {
        self.selections().filter_map(|s| s.bars).map(|b| b.smallest()).min()
    }

    /// Largest bar used on a face
    pub fn largest_bar(&self, face: Face) -> Option<BarSize> {
        self.face(face).values().filter_map(|s| s.bars).map(|b| b.largest()).max()
    }

    /// Deepest bar stack on a face (mm)
    pub fn max_stack_depth_mm(&self, face: Face, min_gap_mm: f64) -> f64 {
        self.face(face)
            .values()
            .filter_map(|s| s.bars)
            .map(|b| b.stack_depth_mm(min_gap_mm))
            .fold(0.0, f64::max)
    }
}

/// Number of bars per layer: one per `bar_pitch_mm` of width, less one,
/// and never fewer than two corner bars.
pub fn longitudinal_bar_count(width_mm: f64, settings: &DesignSettings) -> u32 {
    let bands = (width_mm / settings.bar_pitch_mm).floor().max(0.0) as u32;
    bands.saturating_sub(1).max(2)
}

/// Width available to longitudinal bars inside the links (mm)
pub fn clear_width_mm(width_mm: f64, settings: &DesignSettings) -> f64 {
    let link = BarSize::smallest(&BarSize::LINKS).map_or(0.0, |s| s.diameter_mm() as f64);
    width_mm - 2.0 * settings.cover_mm - 2.0 * link
}

/// Whether `count` bars of `size` fit in one layer with the minimum clear gap.
pub fn fits_in_width(count: u32, size: BarSize, clear_width_mm: f64, min_gap_mm: f64) -> bool {
    let d = size.diameter_mm() as f64;
    let gaps = count.saturating_sub(1) as f64;
    count as f64 * d + gaps * min_gap_mm.max(d) <= clear_width_mm
}

/// Stage 2: add half the torsion steel to each face when the beam is too
/// shallow for side-face bars.
pub fn split_torsion(input: &BeamInput, settings: &DesignSettings) -> TorsionSplit {
    let merged = input.depth_mm <= settings.torsion_split_depth_mm;
    let share = |position: Position| {
        if merged {
            input.req_torsion_flexure[position] / 2.0
        } else {
            0.0
        }
    };
    TorsionSplit {
        top: PerPosition::from_fn(|p| input.req_top_flexure[p] + share(p)),
        bottom: PerPosition::from_fn(|p| input.req_bottom_flexure[p] + share(p)),
        merged,
    }
}

/// Minimum flexural steel per face (mm²)
pub fn minimum_area_mm2(input: &BeamInput, settings: &DesignSettings) -> f64 {
    settings.min_flexural_ratio * input.section_area_mm2()
}

fn candidates(count: u32, sizes: &[BarSize]) -> Vec<FlexuralCandidate> {
    let mut out = Vec::new();
    for (i, &first) in sizes.iter().enumerate() {
        out.push(FlexuralCandidate::new(BarLayers::single(count, first)));
        for &second in &sizes[..=i] {
            out.push(FlexuralCandidate::new(BarLayers::double(count, first, second)));
        }
    }
    out
}

/// Stage 3: select bars for one slot from the sizes that fit the width.
pub fn select_rebar(demand: f64, floor: f64, count: u32, sizes: &[BarSize]) -> RebarSelection {
    match select_min_excess(candidates(count, sizes), search_target(demand, floor)) {
        Some(choice) => RebarSelection::from_bars(choice.candidate.bars, demand, choice.solved),
        None => RebarSelection::none(demand),
    }
}

/// Stage 4: short spans cannot curtail bars practically, so every slot on a
/// face takes the face's largest selection. Overstressed faces are marked
/// unsolved.
fn assess_feasibility(
    face: &mut PerPosition<RebarSelection>,
    demands: &PerPosition<f64>,
    floor: f64,
    short_span: bool,
    overstressed: bool,
) {
    if short_span {
        let governing = face
            .values()
            .filter_map(|s| s.bars)
            .max_by_key(|b| (b.area_mm2().round() as i64, b.largest()));
        if let Some(bars) = governing {
            for position in Position::ALL {
                let demand = demands[position];
                let provided = bars.area_mm2().round();
                face[position] = RebarSelection::from_bars(bars, demand, provided >= search_target(demand, floor));
            }
        }
    }
    if overstressed {
        for position in Position::ALL {
            face[position].solved = false;
        }
    }
}

/// Stage 5: area provided beyond the pure flexural demand, summed over both
/// faces. Each face contributes at least zero.
pub fn residual_areas(
    top: &PerPosition<RebarSelection>,
    bottom: &PerPosition<RebarSelection>,
    input: &BeamInput,
) -> PerPosition<f64> {
    PerPosition::from_fn(|p| {
        (top[p].provided_area_mm2 - input.req_top_flexure[p]).max(0.0)
            + (bottom[p].provided_area_mm2 - input.req_bottom_flexure[p]).max(0.0)
    })
}

/// Run the flexural stage for a validated beam.
pub fn design(input: &BeamInput, settings: &DesignSettings) -> FlexuralDesign {
    let bar_count = longitudinal_bar_count(input.width_mm, settings);
    let clear_width = clear_width_mm(input.width_mm, settings);
    let sizes: Vec<BarSize> = BarSize::FLEXURAL
        .iter()
        .copied()
        .filter(|&size| fits_in_width(bar_count, size, clear_width, settings.min_bar_gap_mm))
        .collect();
    if sizes.is_empty() {
        warn!(element = %input.element_id, width = input.width_mm, "no flexural bar size fits the section width");
    }

    let split = split_torsion(input, settings);
    let floor = minimum_area_mm2(input, settings);

    let mut top = PerPosition::from_fn(|p| select_rebar(split.top[p], floor, bar_count, &sizes));
    let mut bottom = PerPosition::from_fn(|p| select_rebar(split.bottom[p], floor, bar_count, &sizes));

    let short_span = input.span_mm <= settings.short_span_mm;
    assess_feasibility(&mut top, &split.top, floor, short_span, input.flexure_overstressed.negative);
    assess_feasibility(&mut bottom, &split.bottom, floor, short_span, input.flexure_overstressed.positive);

    let residual = residual_areas(&top, &bottom, input);

    for (face, selections) in [(Face::Top, &top), (Face::Bottom, &bottom)] {
        for (position, selection) in selections.iter() {
            if !selection.solved {
                warn!(
                    element = %input.element_id,
                    %face,
                    %position,
                    required = selection.required_area_mm2,
                    provided = selection.provided_area_mm2,
                    "flexural selection unsolved"
                );
            }
        }
    }
    debug!(
        element = %input.element_id,
        bar_count,
        torsion_merged = split.merged,
        short_span,
        "flexural design complete"
    );

    FlexuralDesign {
        bar_count,
        torsion_merged: split.merged,
        required_top: split.top,
        required_bottom: split.bottom,
        top,
        bottom,
        residual,
    }
}
