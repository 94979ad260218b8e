//! # Materials
//!
//! Reinforcement catalog and concrete properties.
//!
//! ## Example
//!
//! ```rust
//! use rcbeam_core::materials::{BarGroup, BarSize};
//!
//! let group = BarGroup::new(3, BarSize::T25);
//! assert_eq!(group.to_string(), "3T25");
//! assert!((group.area_mm2() - 1472.6).abs() < 0.1);
//! ```

pub mod concrete;
pub mod rebar;

pub use concrete::Concrete;
pub use rebar::{BarGroup, BarSize, SPACING_STEPS_MM};
