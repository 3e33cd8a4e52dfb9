//! Shear flow in the thin-walled single-cell box formed by a NACA 4-digit airfoil nose and a
//! vertical spar web.
//!
//! The stages run in order: [`airfoil::generate`] samples the profile, [`airfoil::spar`] rotates
//! and cuts it at the spar, [`contour`] turns the point chains into panels, [`section`] integrates
//! the thin-wall section properties and [`shear`] solves the closed-cell shear flow.
//! [`analysis::run`] chains them from one [`config::AnalysisConfig`].

pub mod airfoil;
pub mod algorithms;
pub mod analysis;
pub mod config;
pub mod contour;
pub mod errors;
pub mod geometry;
pub mod records;
pub mod section;
pub mod shear;

pub use errors::{Result, SectionError};
