use std::path::Path;

use rcbeam_core::file_io::write_json_atomic;
use rcbeam_core::loader::load_records;
use rcbeam_core::schedule::{render_table, QuantitiesRow, ScheduleRow, QUANTITY_HEADERS, SCHEDULE_HEADERS};
use rcbeam_core::{
    design_project, load_project, save_project, BatchSummary, BeamOutcome, CalcError, CalcResult, FileLock,
    Project, ProjectMetadata,
};
use serde::Serialize;
use tracing::info;

pub fn new_project(path: &Path, engineer: String, job_id: String, client: String, force: bool) -> CalcResult<()> {
    if path.exists() && !force {
        return Err(CalcError::file_error(
            "create",
            path.display().to_string(),
            "File already exists (use --force to overwrite)",
        ));
    }
    let project = Project::new(engineer, job_id, client);
    save_project(&project, path)?;
    println!("Created {}", path.display());
    Ok(())
}

/// Add new beams and replace beams with a matching storey and element id.
pub fn import(path: &Path, records: &Path, user: String) -> CalcResult<()> {
    let _lock = FileLock::acquire(path, user)?;
    let mut project = load_project(path)?;
    let inputs = load_records(records)?;

    let (mut added, mut updated) = (0usize, 0usize);
    for input in inputs {
        match project.find_beam_mut(&input.storey, &input.element_id) {
            Some(item) => {
                item.input = input;
                updated += 1;
            }
            None => {
                project.add_beam(input);
                added += 1;
            }
        }
    }
    project.touch();
    save_project(&project, path)?;

    info!(added, updated, "import complete");
    println!(
        "Imported {} beams into {} ({added} added, {updated} updated)",
        added + updated,
        path.display()
    );
    Ok(())
}

#[derive(Serialize)]
struct BeamReport {
    #[serde(flatten)]
    outcome: BeamOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule: Option<ScheduleRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quantities: Option<QuantitiesRow>,
}

#[derive(Serialize)]
struct DesignReport {
    meta: ProjectMetadata,
    summary: BatchSummary,
    beams: Vec<BeamReport>,
}

pub fn design(path: &Path, json: bool, output: Option<&Path>) -> CalcResult<()> {
    let project = load_project(path)?;
    let outcomes = design_project(&project);
    let summary = BatchSummary::from_outcomes(&outcomes);

    let beams: Vec<BeamReport> = outcomes
        .into_iter()
        .map(|outcome| {
            let schedule = outcome.design().map(ScheduleRow::from_design);
            let quantities = outcome.design().map(QuantitiesRow::from_design);
            BeamReport {
                outcome,
                schedule,
                quantities,
            }
        })
        .collect();
    let report = DesignReport {
        meta: project.meta.clone(),
        summary,
        beams,
    };

    if let Some(output) = output {
        write_json_atomic(&report, output)?;
    }

    if json {
        let text = serde_json::to_string_pretty(&report).map_err(CalcError::serialization)?;
        println!("{text}");
        return Ok(());
    }

    print_tables(&report);
    Ok(())
}

fn print_tables(report: &DesignReport) {
    let schedule: Vec<Vec<String>> = report
        .beams
        .iter()
        .filter_map(|b| b.schedule.as_ref().map(ScheduleRow::cells))
        .collect();
    let quantities: Vec<Vec<String>> = report
        .beams
        .iter()
        .filter_map(|b| b.quantities.as_ref().map(QuantitiesRow::cells))
        .collect();

    println!("Job {} - {}", report.meta.job_id, report.meta.client);
    println!();
    println!("BEAM SCHEDULE");
    print!("{}", render_table(&SCHEDULE_HEADERS, &schedule));
    println!();
    println!("QUANTITIES");
    print!("{}", render_table(&QUANTITY_HEADERS, &quantities));

    let failures: Vec<&BeamReport> = report.beams.iter().filter(|b| b.outcome.result.is_err()).collect();
    if !failures.is_empty() {
        println!();
        println!("REJECTED");
        for beam in failures {
            if let Err(e) = &beam.outcome.result {
                println!("  {} {}: {e}", beam.outcome.storey, beam.outcome.element_id);
            }
        }
    }

    let s = report.summary;
    println!();
    println!(
        "{} beams: {} solved, {} unsolved (marked *), {} rejected",
        s.total, s.solved, s.unsolved, s.failed
    );
}
