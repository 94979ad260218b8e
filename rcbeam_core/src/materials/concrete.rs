//! Concrete strength-dependent limits used by the shear design.

use serde::{Deserialize, Serialize};

/// Concrete described by its characteristic cube strength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Concrete {
    /// Characteristic cube strength fcu (MPa)
    pub fcu_mpa: f64,
}

impl Concrete {
    pub fn new(fcu_mpa: f64) -> Self {
        Concrete { fcu_mpa }
    }

    /// Upper limit on nominal shear stress V/(b·d): min(0.8√fcu, 5 MPa)
    pub fn max_shear_stress_mpa(&self) -> f64 {
        (0.8 * self.fcu_mpa.max(0.0).sqrt()).min(5.0)
    }

    /// Stress used for minimum links: 0.4 MPa, scaled by (fcu/40)^(2/3)
    /// for grades above C40, with fcu capped at 80 MPa.
    pub fn min_link_stress_mpa(&self) -> f64 {
        let fcu = self.fcu_mpa.clamp(40.0, 80.0);
        0.4 * (fcu / 40.0).powf(2.0 / 3.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shear_stress_cap() {
        assert!((Concrete::new(25.0).max_shear_stress_mpa() - 4.0).abs() < 1e-9);
        assert_eq!(Concrete::new(45.0).max_shear_stress_mpa(), 5.0);
    }

    #[test]
    fn test_min_link_stress() {
        assert!((Concrete::new(30.0).min_link_stress_mpa() - 0.4).abs() < 1e-12);
        let c45 = Concrete::new(45.0).min_link_stress_mpa();
        assert!(c45 > 0.43 && c45 < 0.44);
        assert_eq!(
            Concrete::new(100.0).min_link_stress_mpa(),
            Concrete::new(80.0).min_link_stress_mpa()
        );
    }
}
