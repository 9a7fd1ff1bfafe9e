//! Stream Ingestion
//!
//! Feeds raw input bytes into a line buffer and tracks what did not fit.

pub mod pump;

pub use pump::{LineInfo, LinePump, PumpStats};
