//! # Batch Design
//!
//! Designs every beam in a project. Beams are independent, so they run in
//! parallel on the rayon pool; results come back in schedule order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::design::{design_beam, BeamDesign};
use crate::errors::CalcResult;
use crate::project::{BeamItem, DesignSettings, Project};

/// Design result for one project beam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamOutcome {
    pub id: Uuid,
    pub storey: String,
    pub element_id: String,
    pub result: CalcResult<BeamDesign>,
}

impl BeamOutcome {
    pub fn design(&self) -> Option<&BeamDesign> {
        self.result.as_ref().ok()
    }
}

/// Summary counts for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub solved: usize,
    pub unsolved: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[BeamOutcome]) -> Self {
        outcomes.iter().fold(
            BatchSummary {
                total: outcomes.len(),
                ..BatchSummary::default()
            },
            |mut summary, outcome| {
                match &outcome.result {
                    Ok(design) if design.is_solved() => summary.solved += 1,
                    Ok(_) => summary.unsolved += 1,
                    Err(_) => summary.failed += 1,
                }
                summary
            },
        )
    }
}

fn design_item(item: &BeamItem, settings: &DesignSettings) -> BeamOutcome {
    let result = design_beam(&item.input, settings);
    if let Err(e) = &result {
        warn!(
            storey = %item.input.storey,
            element = %item.input.element_id,
            error = %e,
            "beam rejected"
        );
    }
    BeamOutcome {
        id: item.id,
        storey: item.input.storey.clone(),
        element_id: item.input.element_id.clone(),
        result,
    }
}

/// Design all beams in `project`.
///
/// An invalid beam yields an error outcome; the rest of the batch still runs.
pub fn design_project(project: &Project) -> Vec<BeamOutcome> {
    let outcomes: Vec<BeamOutcome> = project
        .beams
        .par_iter()
        .map(|item| design_item(item, &project.settings))
        .collect();

    let summary = BatchSummary::from_outcomes(&outcomes);
    info!(
        total = summary.total,
        solved = summary.solved,
        unsolved = summary.unsolved,
        failed = summary.failed,
        "batch design complete"
    );
    outcomes
}
