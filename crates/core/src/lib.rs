//! Batchivo domain logic.
//!
//! Pure, synchronous computations over in-memory snapshots: material
//! planning for production runs, variance analytics, production run rules
//! and spool inventory arithmetic. Nothing in this crate performs I/O.

pub mod error;
pub mod inventory;
pub mod material_suggestion;
pub mod production_run;
pub mod threshold_validation;
pub mod types;
pub mod variance;
