//! ppd-core
//!
//! Pure domain types for postpartum depression risk screening: demographics,
//! the predictor feature record, risk labels and their presentation.
//! No I/O. This is the shared vocabulary of the screening system.

pub mod error;
pub mod models;
