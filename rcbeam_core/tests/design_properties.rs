//! Properties that hold for every valid beam, not just the reference cases.

use proptest::prelude::*;
use rcbeam_core::design::sideface::net_torsion_demand;
use rcbeam_core::units::round_to;
use rcbeam_core::{design_beam, BeamInput, DesignSettings, PerPosition};

fn per_position(max: f64) -> impl Strategy<Value = PerPosition<f64>> {
    (0.0..max, 0.0..max, 0.0..max).prop_map(|(l, m, r)| PerPosition::new(l, m, r))
}

prop_compose! {
    fn beam()(
        width in 200.0..900.0f64,
        depth in 300.0..1400.0f64,
        span in prop_oneof![Just(0.0), 1000.0..14000.0f64],
        grade in 25.0..60.0f64,
        top in per_position(5000.0),
        bottom in per_position(5000.0),
        torsion in per_position(2500.0),
        force in per_position(1200.0),
        shear in per_position(3000.0),
        torsion_shear in per_position(1000.0),
    ) -> BeamInput {
        BeamInput {
            req_top_flexure: top,
            req_bottom_flexure: bottom,
            req_torsion_flexure: torsion,
            shear_force_kn: force,
            req_shear: shear,
            req_torsion_shear: torsion_shear,
            ..BeamInput::new("Level 1", "B1", width, depth, span, grade)
        }
    }
}

fn check_utilization(required: f64, provided: f64, utilization: f64) {
    if required > 0.0 && provided > 0.0 {
        assert_eq!(utilization, round_to(required / provided * 100.0, 1));
    } else {
        assert_eq!(utilization, 0.0);
    }
}

proptest! {
    #[test]
    fn solved_selections_are_adequate(input in beam()) {
        let design = design_beam(&input, &DesignSettings::default()).unwrap();

        for s in design.flexure.selections() {
            if s.solved {
                prop_assert!(s.provided_area_mm2 >= s.required_area_mm2);
            }
            check_utilization(s.required_area_mm2, s.provided_area_mm2, s.utilization);
        }
        for link in design.shear.links.values() {
            if link.solved {
                prop_assert!(link.provided_area >= link.required_area);
            }
            check_utilization(link.required_area, link.provided_area, link.utilization);
        }
        let side = &design.sideface.rebar;
        if side.solved && side.required {
            prop_assert!(side.provided_area_mm2 >= side.required_area_mm2);
        }
    }

    #[test]
    fn residual_is_non_negative(input in beam()) {
        let design = design_beam(&input, &DesignSettings::default()).unwrap();
        for residual in design.flexure.residual.values() {
            prop_assert!(*residual >= 0.0);
        }
    }

    #[test]
    fn zero_shear_demand_is_solved_at_zero_utilization(mut input in beam()) {
        input.req_shear = PerPosition::default();
        input.req_torsion_shear = PerPosition::default();
        let design = design_beam(&input, &DesignSettings::default()).unwrap();
        for link in design.shear.links.values() {
            prop_assert_eq!(link.utilization, 0.0);
            prop_assert!(link.solved);
        }
    }

    #[test]
    fn larger_residual_never_increases_sideface_demand(
        torsion in per_position(3000.0),
        residual in per_position(2000.0),
        extra in per_position(1000.0),
    ) {
        let larger = PerPosition::from_fn(|p| residual[p] + extra[p]);
        let base = net_torsion_demand(&torsion, &residual);
        let reduced = net_torsion_demand(&torsion, &larger);
        for (p, value) in reduced.iter() {
            prop_assert!(*value <= base[p]);
            prop_assert!(*value >= 0.0);
        }
        prop_assert!(reduced.max_value() <= base.max_value());
    }

    #[test]
    fn repeated_runs_serialize_identically(input in beam()) {
        let settings = DesignSettings::default();
        let first = serde_json::to_string(&design_beam(&input, &settings).unwrap()).unwrap();
        let second = serde_json::to_string(&design_beam(&input, &settings).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }
}
