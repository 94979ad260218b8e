//! End-to-end design of beam B1050 at Attic Level-3: minimum shear and
//! side-face reinforcement with no shear or torsion demand.

use rcbeam_core::design::design_beam;
use rcbeam_core::file_io::{load_project, save_project};
use rcbeam_core::loader::BeamRecord;
use rcbeam_core::schedule::{QuantitiesRow, ScheduleRow};
use rcbeam_core::units::{CubicMeters, SquareMeters};
use rcbeam_core::{design_project, BeamDesign, BeamInput, BeamQuantities, DesignSettings, PerPosition, Project};

fn b1050() -> BeamInput {
    BeamInput {
        req_top_flexure: PerPosition::new(1979.0, 703.0, 1979.0),
        req_bottom_flexure: PerPosition::new(1230.0, 1099.0, 1053.0),
        shear_force_kn: PerPosition::new(237.0, 187.0, 216.0),
        ..BeamInput::new("Attic Level-3", "B1050", 400.0, 750.0, 8619.0, 45.0)
    }
}

fn designed() -> BeamDesign {
    design_beam(&b1050(), &DesignSettings::default()).expect("B1050 is valid")
}

#[test]
fn flexural_design() {
    let flexure = designed().flexure;

    assert_eq!(flexure.top.left.designation, "3T25 + 3T16");
    assert_eq!(flexure.top.left.diameters(), vec![25, 16]);
    assert_eq!(flexure.top.left.provided_area_mm2, 2076.0);
    assert_eq!(flexure.top.left.utilization, 95.3);
    assert_eq!(flexure.top.middle.designation, "3T20");
    assert_eq!(flexure.top.middle.utilization, 74.6);
    assert_eq!(flexure.top.right, flexure.top.left);

    assert_eq!(flexure.bottom.left.designation, "3T25");
    assert_eq!(flexure.bottom.left.provided_area_mm2, 1473.0);
    assert_eq!(flexure.bottom.left.utilization, 83.5);
    assert_eq!(flexure.bottom.middle.designation, "3T16 + 3T16");
    assert_eq!(flexure.bottom.middle.utilization, 91.1);
    assert_eq!(flexure.bottom.right.designation, "3T16 + 3T16");
    assert_eq!(flexure.bottom.right.utilization, 87.3);

    assert_eq!(flexure.residual, PerPosition::new(340.0, 346.0, 250.0));
    assert!(flexure.is_solved());
}

#[test]
fn shear_design() {
    let shear = designed().shear;

    assert_eq!(shear.total_required, PerPosition::new(0.0, 0.0, 0.0));
    assert_eq!(shear.leg_counts, vec![2, 3]);
    assert_eq!(shear.support_spacings, vec![125, 100]);
    assert_eq!(shear.midspan_spacings, vec![250, 200, 150, 125, 100]);

    for link in [&shear.links.left, &shear.links.right] {
        assert_eq!(link.designation, "2L-T12@125");
        assert_eq!(link.provided_area, 1810.0);
        assert_eq!(link.utilization, 0.0);
        assert!(link.solved);
    }
    assert_eq!(shear.links.middle.designation, "2L-T12@250");
    assert_eq!(shear.links.middle.provided_area, 905.0);
}

#[test]
fn sideface_design() {
    let sideface = designed().sideface;

    assert_eq!(sideface.clear_space_mm, 503.0);
    assert_eq!(sideface.rebar.designation, "T16@250 EF");
    assert_eq!(sideface.rebar.diameter_mm(), Some(16));
    assert_eq!(sideface.rebar.spacing_mm, Some(250));
    assert_eq!(sideface.rebar.provided_area_mm2, 804.0);
    assert_eq!(sideface.rebar.utilization, 0.0);
    assert!(sideface.rebar.solved);
}

#[test]
fn quantities() {
    let q = BeamQuantities::from_design(&designed());
    assert_eq!(q.concrete_volume, CubicMeters(2.586));
    assert_eq!(q.flexural_area, SquareMeters(0.009));
    assert_eq!(q.total_volume, CubicMeters(0.124));
}

#[test]
fn schedule_rows() {
    let design = designed();
    let row = ScheduleRow::from_design(&design);
    assert_eq!(row.top.left, "3T25 + 3T16");
    assert_eq!(row.sideface, "T16@250 EF");
    assert_eq!(row.links.middle, "2L-T12@250");

    let quantities = QuantitiesRow::from_design(&design);
    assert_eq!(quantities.element_id, "B1050");
}

#[test]
fn analysis_export_matches_direct_input() {
    let record: BeamRecord = serde_json::from_value(serde_json::json!({
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
    }))
    .unwrap();
    let input = BeamInput::try_from(record).unwrap();
    let design = design_beam(&input, &DesignSettings::default()).unwrap();
    assert_eq!(design, designed());
}

#[test]
fn project_file_roundtrip_then_batch() {
    let path = std::env::temp_dir().join(format!("rcbeam_it_{}.rcb", std::process::id()));
    let mut project = Project::new("Engineer", "25-042", "Client");
    project.add_beam(b1050());
    save_project(&project, &path).unwrap();

    let loaded = load_project(&path).unwrap();
    let outcomes = design_project(&loaded);
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].design(), Some(&designed()));

    let _ = std::fs::remove_file(&path);
}
