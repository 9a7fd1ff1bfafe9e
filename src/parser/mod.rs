//! Line Parser
//!
//! Byte-at-a-time line collection and per-letter field lookup.
//! No allocation, no validation of command semantics.

pub mod line_buffer;
pub mod number;

pub use line_buffer::{LineBuffer, LineState, SENTINEL, TERMINATOR};
pub use number::parse_leading_number;
