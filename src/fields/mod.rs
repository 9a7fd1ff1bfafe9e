//! Field Extraction
//!
//! Consumer side of the line buffer: picks configured letters out of each
//! completed line.

pub mod report;

pub use report::{Field, FieldReport, OutputFormat};
