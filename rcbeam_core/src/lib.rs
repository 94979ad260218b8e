//! # rcbeam_core - Reinforced-Concrete Beam Rebar Design
//!
//! `rcbeam_core` turns the reinforcement demands exported by a structural
//! analysis model into a detailed bar schedule: top and bottom bars at each
//! support and at midspan, shear links per spacing zone, side-face bars for
//! deep beams, and the resulting material quantities.
//!
//! ## Design Philosophy
//!
//! - **Pure design passes**: each beam is designed from its input and the
//!   project settings only, so beams can run in parallel
//! - **JSON-First**: inputs, results and projects implement Serialize/Deserialize
//! - **Best effort**: a demand the catalog cannot meet is reported through
//!   `solved = false`, never as an error
//!
//! ## Quick Start
//!
//! ```rust
//! use rcbeam_core::{design_beam, BeamInput, BeamQuantities, DesignSettings, PerPosition};
//!
//! let beam = BeamInput {
//!     req_top_flexure: PerPosition::new(1979.0, 703.0, 1979.0),
//!     req_bottom_flexure: PerPosition::new(1230.0, 1099.0, 1053.0),
//!     shear_force_kn: PerPosition::new(237.0, 187.0, 216.0),
//!     ..BeamInput::new("Attic Level-3", "B1050", 400.0, 750.0, 8619.0, 45.0)
//! };
//!
//! let design = design_beam(&beam, &DesignSettings::default()).unwrap();
//! assert_eq!(design.flexure.bottom.left.designation, "3T25");
//!
//! let quantities = BeamQuantities::from_design(&design);
//! assert_eq!(quantities.concrete_volume.0, 2.586);
//! ```
//!
//! ## Modules
//!
//! - [`beam`] - Beam input record and validation
//! - [`design`] - Flexure, shear and side-face design stages
//! - [`materials`] - Bar catalog and concrete limits
//! - [`quantities`] - Concrete and steel take-off
//! - [`schedule`] - Schedule rows and text tables
//! - [`project`] - Project container and design settings
//! - [`loader`] - Analysis export records
//! - [`batch`] - Parallel design of a whole project
//! - [`file_io`] - Atomic saves, version checks and file locking
//! - [`units`] - Metric unit wrappers
//! - [`errors`] - Structured error types

pub mod batch;
pub mod beam;
pub mod design;
pub mod errors;
pub mod file_io;
pub mod loader;
pub mod materials;
pub mod position;
pub mod project;
pub mod quantities;
pub mod schedule;
pub mod units;

pub use batch::{design_project, BatchSummary, BeamOutcome};
pub use beam::BeamInput;
pub use design::{design_beam, BeamDesign};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_project, FileLock};
pub use position::{PerPosition, Position};
pub use project::{DesignSettings, Project, ProjectMetadata};
pub use quantities::BeamQuantities;
