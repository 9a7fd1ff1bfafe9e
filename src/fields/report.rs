//! Field Reports
//!
//! Turns a completed line into the per-letter values a command interpreter
//! would consume, and renders them as a response line.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::parser::LineBuffer;
use crate::stream::LineInfo;

/// Response rendering for completed lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `ok G1 X10.5 Y-2`
    #[default]
    Text,
    /// One compact JSON object per line
    Json,
}

/// A letter present in the line and its parsed value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Field {
    pub letter: char,
    pub value: f64,
}

/// Fields extracted from one completed line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldReport {
    /// 1-based line number in the input stream
    pub line: usize,
    pub fields: Vec<Field>,
    /// Bytes were dropped because the line did not fit the buffer
    pub truncated: bool,
}

impl FieldReport {
    /// Collect `letters` from `buffer` in the given order.
    ///
    /// Letters are checked with `exists` before `get`, so a missing field is
    /// left out instead of being reported as zero.
    pub fn extract(buffer: &LineBuffer<'_>, letters: &[u8], info: &LineInfo) -> Self {
        let fields = letters
            .iter()
            .filter(|&&letter| buffer.exists(letter))
            .map(|&letter| Field {
                letter: char::from(letter),
                value: buffer.get(letter),
            })
            .collect();

        Self {
            line: info.number,
            fields,
            truncated: info.truncated,
        }
    }

    /// Value of `letter`, if it was present in the line
    pub fn value(&self, letter: char) -> Option<f64> {
        self.fields
            .iter()
            .find(|field| field.letter == letter)
            .map(|field| field.value)
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => serde_json::to_string(self)
                .with_context(|| format!("Failed to encode report for line {}", self.line)),
        }
    }

    fn to_text(&self) -> String {
        let mut text = String::from("ok");
        for field in &self.fields {
            text.push(' ');
            text.push(field.letter);
            text.push_str(&field.value.to_string());
        }
        if self.truncated {
            text.push_str(" truncated");
        }
        text
    }
}
