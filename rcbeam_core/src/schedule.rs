//! # Beam Schedule
//!
//! Flattens designed beams into schedule rows: bar designations per face and
//! position followed by the required/provided/utilization criteria for every
//! slot, plus a separate quantities row.
//!
//! Unsolved selections keep their best-effort designation and are marked
//! with a trailing `*`.
//!
//! ## Example
//!
//! ```rust
//! use rcbeam_core::beam::BeamInput;
//! use rcbeam_core::design::design_beam;
//! use rcbeam_core::position::PerPosition;
//! use rcbeam_core::project::DesignSettings;
//! use rcbeam_core::schedule::{ScheduleRow, SCHEDULE_HEADERS};
//!
//! let beam = BeamInput {
//!     req_bottom_flexure: PerPosition::new(1230.0, 1099.0, 1053.0),
//!     ..BeamInput::new("Attic Level-3", "B1050", 400.0, 750.0, 8619.0, 45.0)
//! };
//! let design = design_beam(&beam, &DesignSettings::default()).unwrap();
//! let row = ScheduleRow::from_design(&design);
//! assert_eq!(row.cells().len(), SCHEDULE_HEADERS.len());
//! ```

use serde::{Deserialize, Serialize};

use crate::design::BeamDesign;
use crate::position::PerPosition;
use crate::quantities::BeamQuantities;

/// Column headers for [`ScheduleRow::cells`]
pub const SCHEDULE_HEADERS: [&str; 45] = [
    "Storey",
    "Element ID",
    "Span (mm)",
    "Width (mm)",
    "Depth (mm)",
    "Bottom Left (BL)",
    "Bottom Middle (B)",
    "Bottom Right (BR)",
    "Top Left (TL)",
    "Top Middle (T)",
    "Top Right (TR)",
    "Side Face",
    "Links Left (H)",
    "Links Middle (J)",
    "Links Right (K)",
    "BL Required (mm²)",
    "BL Provided (mm²)",
    "BL Utilization (%)",
    "BM Required (mm²)",
    "BM Provided (mm²)",
    "BM Utilization (%)",
    "BR Required (mm²)",
    "BR Provided (mm²)",
    "BR Utilization (%)",
    "TL Required (mm²)",
    "TL Provided (mm²)",
    "TL Utilization (%)",
    "TM Required (mm²)",
    "TM Provided (mm²)",
    "TM Utilization (%)",
    "TR Required (mm²)",
    "TR Provided (mm²)",
    "TR Utilization (%)",
    "Side Face Required (mm²)",
    "Side Face Provided (mm²)",
    "Side Face Utilization (%)",
    "Links L Required (mm²/m)",
    "Links L Provided (mm²/m)",
    "Links L Utilization (%)",
    "Links M Required (mm²/m)",
    "Links M Provided (mm²/m)",
    "Links M Utilization (%)",
    "Links R Required (mm²/m)",
    "Links R Provided (mm²/m)",
    "Links R Utilization (%)",
];

/// Column headers for [`QuantitiesRow::cells`]
pub const QUANTITY_HEADERS: [&str; 15] = [
    "Storey",
    "Element ID",
    "Span (mm)",
    "Width (mm)",
    "Depth (mm)",
    "Concrete Area (m²)",
    "Concrete Volume (m³)",
    "Flexural Rebar Area (m²)",
    "Flexural Rebar Volume (m³)",
    "Shear Rebar Area (m²)",
    "Shear Rebar Volume (m³)",
    "Sideface Rebar Area (m²)",
    "Sideface Rebar Volume (m³)",
    "Total Rebar Area (m²)",
    "Total Rebar Volume (m³)",
];

/// Required, provided and utilization for one slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    pub required: f64,
    pub provided: f64,
    pub utilization: f64,
}

/// One beam's line in the reinforcement schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub storey: String,
    pub element_id: String,
    pub span_mm: f64,
    pub width_mm: f64,
    pub depth_mm: f64,
    pub bottom: PerPosition<String>,
    pub top: PerPosition<String>,
    pub sideface: String,
    pub links: PerPosition<String>,
    pub bottom_criteria: PerPosition<Criteria>,
    pub top_criteria: PerPosition<Criteria>,
    pub sideface_criteria: Criteria,
    pub link_criteria: PerPosition<Criteria>,
}

fn mark(designation: &str, solved: bool) -> String {
    if solved {
        designation.to_string()
    } else {
        format!("{designation}*")
    }
}

fn number(value: f64) -> String {
    format!("{value}")
}

impl ScheduleRow {
    pub fn from_design(design: &BeamDesign) -> Self {
        let input = &design.input;
        let flexure = &design.flexure;
        let shear = &design.shear;
        let sideface = &design.sideface.rebar;

        ScheduleRow {
            storey: input.storey.clone(),
            element_id: input.element_id.clone(),
            span_mm: input.span_mm,
            width_mm: input.width_mm,
            depth_mm: input.depth_mm,
            bottom: flexure.bottom.map(|s| mark(&s.designation, s.solved)),
            top: flexure.top.map(|s| mark(&s.designation, s.solved)),
            sideface: mark(&sideface.designation, sideface.solved),
            links: shear.links.map(|l| mark(&l.designation, l.solved)),
            bottom_criteria: flexure.bottom.map(|s| Criteria {
                required: s.required_area_mm2,
                provided: s.provided_area_mm2,
                utilization: s.utilization,
            }),
            top_criteria: flexure.top.map(|s| Criteria {
                required: s.required_area_mm2,
                provided: s.provided_area_mm2,
                utilization: s.utilization,
            }),
            sideface_criteria: Criteria {
                required: sideface.required_area_mm2,
                provided: sideface.provided_area_mm2,
                utilization: sideface.utilization,
            },
            link_criteria: shear.links.map(|l| Criteria {
                required: l.required_area,
                provided: l.provided_area,
                utilization: l.utilization,
            }),
        }
    }

    /// Cell text in [`SCHEDULE_HEADERS`] order.
    pub fn cells(&self) -> Vec<String> {
        let mut cells = vec![
            self.storey.clone(),
            self.element_id.clone(),
            number(self.span_mm),
            number(self.width_mm),
            number(self.depth_mm),
        ];
        cells.extend(self.bottom.values().cloned());
        cells.extend(self.top.values().cloned());
        cells.push(self.sideface.clone());
        cells.extend(self.links.values().cloned());

        let criteria = self
            .bottom_criteria
            .values()
            .chain(self.top_criteria.values())
            .chain(std::iter::once(&self.sideface_criteria))
            .chain(self.link_criteria.values());
        for c in criteria {
            cells.push(number(c.required));
            cells.push(number(c.provided));
            cells.push(number(c.utilization));
        }
        cells
    }
}

/// One beam's line in the quantities schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantitiesRow {
    pub storey: String,
    pub element_id: String,
    pub span_mm: f64,
    pub width_mm: f64,
    pub depth_mm: f64,
    pub quantities: BeamQuantities,
}

impl QuantitiesRow {
    pub fn from_design(design: &BeamDesign) -> Self {
        let input = &design.input;
        QuantitiesRow {
            storey: input.storey.clone(),
            element_id: input.element_id.clone(),
            span_mm: input.span_mm,
            width_mm: input.width_mm,
            depth_mm: input.depth_mm,
            quantities: BeamQuantities::from_design(design),
        }
    }

    /// Cell text in [`QUANTITY_HEADERS`] order.
    pub fn cells(&self) -> Vec<String> {
        let q = &self.quantities;
        vec![
            self.storey.clone(),
            self.element_id.clone(),
            number(self.span_mm),
            number(self.width_mm),
            number(self.depth_mm),
            number(q.concrete_area.0),
            number(q.concrete_volume.0),
            number(q.flexural_area.0),
            number(q.flexural_volume.0),
            number(q.shear_area.0),
            number(q.shear_volume.0),
            number(q.sideface_area.0),
            number(q.sideface_volume.0),
            number(q.total_area.0),
            number(q.total_volume.0),
        ]
    }
}

/// Render rows as a left-aligned plain-text table with a header rule.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    let mut lines = vec![
        render_line(headers.iter().copied(), &widths),
        render_line(rule.iter().map(String::as_str), &widths),
    ];
    lines.extend(rows.iter().map(|row| render_line(row.iter().map(String::as_str), &widths)));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beam::test_support::reference_beam;
    use crate::design::design_beam;
    use crate::project::DesignSettings;

    fn reference_design() -> BeamDesign {
        design_beam(&reference_beam(), &DesignSettings::default()).unwrap()
    }

    #[test]
    fn test_schedule_row_cells() {
        let row = ScheduleRow::from_design(&reference_design());
        let cells = row.cells();
        assert_eq!(cells.len(), SCHEDULE_HEADERS.len());
        assert_eq!(cells[0], "Attic Level-3");
        assert_eq!(cells[1], "B1050");
        assert_eq!(cells[5], "3T25");
        assert_eq!(cells[8], "3T25 + 3T16");
        assert_eq!(cells[11], "T16@250 EF");
        assert_eq!(cells[12], "2L-T12@125");
        assert_eq!(cells[13], "2L-T12@250");
        // BL criteria
        assert_eq!(&cells[15..18], &["1230", "1473", "83.5"]);
    }

    #[test]
    fn test_unsolved_cells_are_marked() {
        let mut beam = reference_beam();
        beam.req_bottom_flexure.middle = 6000.0;
        let design = design_beam(&beam, &DesignSettings::default()).unwrap();
        let row = ScheduleRow::from_design(&design);
        assert_eq!(row.bottom.middle, "3T32 + 3T32*");
        assert_eq!(row.bottom.left, "3T25");
    }

    #[test]
    fn test_quantities_row_cells() {
        let row = QuantitiesRow::from_design(&reference_design());
        let cells = row.cells();
        assert_eq!(cells.len(), QUANTITY_HEADERS.len());
        assert_eq!(cells[6], "2.586");
        assert_eq!(cells[14], "0.124");
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let table = render_table(
            &["Storey", "ID"],
            &[vec!["Roof".to_string(), "B1".to_string()], vec!["Attic Level-3".to_string(), "B1050".to_string()]],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Storey         ID");
        assert_eq!(lines[3], "Attic Level-3  B1050");
    }
}
