//! GCode Field Extractor
//!
//! A small, allocation-free line buffer for G-code style command streams.
//!
//! This library provides:
//! - Byte-at-a-time line collection into a caller-owned buffer
//! - Per-letter field lookup (`X10.5` -> `10.5`)
//! - An async reader loop and field reports for host-side tooling
//! - Configuration management

pub mod app;
pub mod config;
pub mod fields;
pub mod parser;
pub mod stream;

// Re-exports for clean public API
pub use config::Config;
pub use fields::{Field, FieldReport, OutputFormat};
pub use parser::{LineBuffer, LineState};
pub use stream::{LineInfo, LinePump};
