//! # Project Data Structures
//!
//! The `Project` struct is the root container for a beam schedule. Projects
//! serialize to `.rcb` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: DesignSettings (cover, steel grade, detailing limits)
//! └── beams: Vec<BeamItem> (beam inputs in schedule order)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rcbeam_core::project::Project;
//!
//! let project = Project::new("Jane Engineer", "25-042", "ACME Corp");
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("cover_mm"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::beam::BeamInput;

/// Current schema version for .rcb files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Design settings shared by every beam in the project
    #[serde(default)]
    pub settings: DesignSettings,

    /// Beams in schedule order
    #[serde(default)]
    pub beams: Vec<BeamItem>,
}

/// A beam stored in a project, with a stable identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamItem {
    pub id: Uuid,
    pub input: BeamInput,
}

impl Project {
    /// Create a new empty project.
    ///
    /// ```rust
    /// use rcbeam_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(project.meta.engineer, "John Doe");
    /// assert!(project.beams.is_empty());
    /// ```
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: DesignSettings::default(),
            beams: Vec::new(),
        }
    }

    /// Append a beam and return the UUID assigned to it.
    pub fn add_beam(&mut self, input: BeamInput) -> Uuid {
        let id = Uuid::new_v4();
        self.beams.push(BeamItem { id, input });
        self.touch();
        id
    }

    /// Find a beam by storey and element id, as used in analysis exports.
    pub fn find_beam_mut(&mut self, storey: &str, element_id: &str) -> Option<&mut BeamItem> {
        self.beams
            .iter_mut()
            .find(|item| item.input.storey == storey && item.input.element_id == element_id)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn beam_count(&self) -> usize {
        self.beams.len()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Detailing and material settings used by every design stage.
///
/// Missing fields fall back to their defaults when a project file is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSettings {
    /// Design code label (informational)
    pub code: String,

    /// Nominal cover to the links (mm)
    pub cover_mm: f64,

    /// Characteristic yield strength of reinforcement fy (MPa)
    pub rebar_yield_mpa: f64,

    /// Minimum clear gap between bars and between bar layers (mm)
    pub min_bar_gap_mm: f64,

    /// Beams at or below this depth carry longitudinal torsion steel in the
    /// top and bottom bars instead of side-face bars (mm)
    pub torsion_split_depth_mm: f64,

    /// Width allotted per longitudinal bar when counting bar positions (mm)
    pub bar_pitch_mm: f64,

    /// Spans at or below this length use uniform top and bottom bars (mm)
    pub short_span_mm: f64,

    /// Minimum flexural steel as a fraction of the gross section
    pub min_flexural_ratio: f64,

    /// Maximum side-face bar spacing (mm)
    pub max_sideface_spacing_mm: u32,
}

impl Default for DesignSettings {
    fn default() -> Self {
        DesignSettings {
            code: "BS8110".to_string(),
            cover_mm: 50.0,
            rebar_yield_mpa: 460.0,
            min_bar_gap_mm: 25.0,
            torsion_split_depth_mm: 700.0,
            bar_pitch_mm: 100.0,
            short_span_mm: 4000.0,
            min_flexural_ratio: 0.0013,
            max_sideface_spacing_mm: 250,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beam::test_support::reference_beam;

    #[test]
    fn test_project_creation() {
        let project = Project::new("John Doe", "25-001", "Acme Corp");
        assert_eq!(project.meta.engineer, "John Doe");
        assert_eq!(project.meta.job_id, "25-001");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.settings, DesignSettings::default());
    }

    #[test]
    fn test_add_and_find_beam() {
        let mut project = Project::new("Engineer", "25-001", "Client");
        let id = project.add_beam(reference_beam());
        assert_eq!(project.beam_count(), 1);
        assert!(project.find_beam_mut("Roof", "B1050").is_none());

        let item = project.find_beam_mut("Attic Level-3", "B1050").unwrap();
        assert_eq!(item.id, id);
        item.input.span_mm = 6000.0;
        assert_eq!(project.beams[0].input.span_mm, 6000.0);
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let settings: DesignSettings = serde_json::from_str(r#"{ "cover_mm": 40.0 }"#).unwrap();
        assert_eq!(settings.cover_mm, 40.0);
        assert_eq!(settings.rebar_yield_mpa, 460.0);
        assert_eq!(settings.max_sideface_spacing_mm, 250);
    }

    #[test]
    fn test_project_serialization() {
        let mut project = Project::new("Jane Engineer", "25-042", "Test Client");
        project.add_beam(reference_beam());
        let json = serde_json::to_string_pretty(&project).unwrap();
        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("B1050"));

        let roundtrip: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.engineer, "Jane Engineer");
        assert_eq!(roundtrip.beams[0].input, project.beams[0].input);
    }
}
