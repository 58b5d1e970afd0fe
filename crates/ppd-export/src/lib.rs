//! ppd-export
//!
//! Results report rendering: the report model, chart geometry and the HTML
//! template.

pub mod chart;
pub mod error;
pub mod render;
pub mod report;
